use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use maintdesk_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Collaborator endpoints for the two remote APIs.
#[derive(Debug, Clone)]
pub struct RemoteServicesConfig {
    pub auth_service_url: String,
    pub menu_service_url: String,
}

/// Where login and menu data come from.
#[derive(Debug, Clone)]
pub enum MenuProviderConfig {
    /// Built-in seeded users and menu tree; no remote services needed.
    Seed,
    /// Remote authentication and menu services over HTTP.
    Http(RemoteServicesConfig),
}

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub cookie_secure: bool,
    pub menu_provider: MenuProviderConfig,
}

impl ApiConfig {
    /// Loads and validates configuration from environment variables.
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let menu_provider = match env::var("MENU_PROVIDER")
            .unwrap_or_else(|_| "seed".to_owned())
            .as_str()
        {
            "seed" => MenuProviderConfig::Seed,
            "http" => MenuProviderConfig::Http(RemoteServicesConfig {
                auth_service_url: required_base_url("AUTH_SERVICE_URL")?,
                menu_service_url: required_base_url("MENU_SERVICE_URL")?,
            }),
            other => {
                return Err(AppError::Validation(format!(
                    "MENU_PROVIDER must be either 'seed' or 'http', got '{other}'"
                )));
            }
        };

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            cookie_secure,
            menu_provider,
        })
    }

    /// Returns the socket address the listener binds to.
    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;

        Ok(SocketAddr::from((host, self.api_port)))
    }
}

/// Initializes the tracing subscriber from `RUST_LOG`, defaulting to info.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_base_url(name: &str) -> Result<String, AppError> {
    let value =
        env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    Url::parse(&value).map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))?;

    Ok(value)
}
