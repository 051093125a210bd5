use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::Id;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Load the fixed sample courses, users and coursework at startup.
    pub seed_sample_data: bool,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: parse_var("LMS_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_var("LMS_PORT", 5000)?,
            seed_sample_data: parse_var("LMS_SEED_SAMPLE_DATA", true)?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// User on whose behalf the client fetches courses and todos.
    pub current_user_id: Id,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, current_user_id: Id) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            current_user_id,
        }
    }

    pub fn new_from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("LMS_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let current_user_id = parse_var("LMS_USER_ID", 1)?;
        Ok(Self::new(base_url, current_user_id))
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:5000/", 1);
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.current_user_id, 1);
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let port: u16 = parse_var("LMS_TEST_UNSET_PORT_VARIABLE", 5000).expect("default should parse");
        assert_eq!(port, 5000);
    }
}
