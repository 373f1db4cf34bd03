//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_auth_gateway;
mod http_menu_source;
mod in_memory_auth_gateway;
mod in_memory_menu_source;

pub use http_auth_gateway::HttpAuthGateway;
pub use http_menu_source::HttpMenuSource;
pub use in_memory_auth_gateway::InMemoryAuthGateway;
pub use in_memory_menu_source::InMemoryMenuSource;
