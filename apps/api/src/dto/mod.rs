mod auth;
mod common;
mod menu;

pub use auth::{LoginRequest, UserIdentityResponse};
pub use common::HealthResponse;
pub use menu::{MenuFlagsResponse, MenuNodeResponse, OpenAncestorChainResponse, VisibleMenuResponse};
