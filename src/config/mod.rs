use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, DEFAULT_ALLOWED_ORIGINS};
pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/event_dashboard";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> Self {
        let store_backend = match env::var("STORE_BACKEND")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            Ok("memory") => StoreBackend::Memory,
            Ok("postgres") | Err(_) => StoreBackend::Postgres,
            Ok(other) => {
                tracing::warn!("Config: Unknown STORE_BACKEND '{}', using postgres", other);
                StoreBackend::Postgres
            }
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            host: parse_or("SERVER_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_or("SERVER_PORT", DEFAULT_PORT),
            store_backend,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Config: Invalid value '{}' for {}, using default", raw, key);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        std::env::set_var("EVENT_DASHBOARD_TEST_PORT", "not-a-port");
        assert_eq!(parse_or("EVENT_DASHBOARD_TEST_PORT", 8080u16), 8080);

        std::env::set_var("EVENT_DASHBOARD_TEST_PORT", " 9000 ");
        assert_eq!(parse_or("EVENT_DASHBOARD_TEST_PORT", 8080u16), 9000);

        std::env::remove_var("EVENT_DASHBOARD_TEST_PORT");
        assert_eq!(parse_or("EVENT_DASHBOARD_TEST_PORT", 8080u16), 8080);
    }

    #[test]
    fn test_bind_addr() {
        let config = Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 4000,
            store_backend: StoreBackend::Memory,
            cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
        };
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:4000");
    }
}
