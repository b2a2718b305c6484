//! Server settings

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Listener and surface settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Mount the unauthenticated `GET /users` and `GET /orders` listings
    pub debug_routes: bool,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SHOP_HOST`: Listen address (default: "0.0.0.0")
    /// - `SHOP_PORT`: Listen port (default: 3000)
    /// - `SHOP_DEBUG_ROUTES`: Mount the debug listings (default: true)
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("debug_routes", true)?
            .add_source(Environment::with_prefix("SHOP").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Address to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        unsafe {
            std::env::remove_var("SHOP_HOST");
            std::env::remove_var("SHOP_PORT");
            std::env::remove_var("SHOP_DEBUG_ROUTES");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert!(config.debug_routes);
    }

    #[test]
    #[serial]
    fn test_server_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("SHOP_HOST", "127.0.0.1");
            std::env::set_var("SHOP_PORT", "8080");
            std::env::set_var("SHOP_DEBUG_ROUTES", "false");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(!config.debug_routes);

        unsafe {
            std::env::remove_var("SHOP_HOST");
            std::env::remove_var("SHOP_PORT");
            std::env::remove_var("SHOP_DEBUG_ROUTES");
        }
    }

    #[test]
    #[serial]
    fn test_server_config_rejects_bad_port() {
        unsafe {
            std::env::set_var("SHOP_PORT", "not-a-port");
        }

        assert!(ServerConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("SHOP_PORT");
        }
    }
}
