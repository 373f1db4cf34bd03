//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_gateway;
mod menu_session_service;

pub use auth_gateway::{AuthGateway, AuthenticatedUser};
pub use menu_session_service::{MenuSessionService, MenuSource, MenuState, ResolvedFlags};
