pub mod health;
pub mod menu;
