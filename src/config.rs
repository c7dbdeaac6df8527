// src/config.rs

use std::env;
use std::net::{IpAddr, SocketAddr};

use dotenvy::dotenv;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    pub allowed_origins: Vec<String>,
    /// Optional JSON file that replaces the built-in question catalog.
    pub catalog_path: Option<String>,
    /// Maximum number of scored results kept in memory.
    pub result_store_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            catalog_path: None,
            result_store_capacity: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup, falling back to the
    /// defaults for unset keys. Panics on values that do not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("HOST")
            .map(|v| v.parse::<IpAddr>().expect("HOST must be a valid IP address"))
            .unwrap_or(defaults.host);

        let port = lookup("PORT")
            .map(|v| v.parse::<u16>().expect("PORT must be a valid port number"))
            .unwrap_or(defaults.port);

        let rust_log = lookup("RUST_LOG").unwrap_or(defaults.rust_log);

        let log_dir = lookup("LOG_DIR").unwrap_or(defaults.log_dir);

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v).expect("CORS_ALLOWED_ORIGINS must be a list of URLs"))
            .unwrap_or(defaults.allowed_origins);

        let catalog_path = lookup("QUIZ_CATALOG_PATH").filter(|p| !p.trim().is_empty());

        let result_store_capacity = lookup("RESULT_STORE_CAPACITY")
            .map(|v| {
                v.trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .expect("RESULT_STORE_CAPACITY must be a positive integer")
            })
            .unwrap_or(defaults.result_store_capacity);

        Self {
            host,
            port,
            rust_log,
            log_dir,
            allowed_origins,
            catalog_path,
            result_store_capacity,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Splits a comma separated origin list, rejecting entries that are not URLs.
///
/// Origins are normalized to `scheme://host[:port]` so they compare equal to
/// the browser's `Origin` header.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let origin = Url::parse(s).map_err(|e| format!("{s}: {e}"))?.origin();
            if !origin.is_tuple() {
                return Err(format!("{s}: not an http(s) origin"));
            }
            Ok(origin.ascii_serialization())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parses_and_normalizes_origins() {
        let origins = parse_origins("http://localhost:3000/, https://quiz.example.com").unwrap();
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://quiz.example.com"]
        );
    }

    #[test]
    fn rejects_invalid_origin() {
        assert!(parse_origins("not a url").is_err());
        // Parses as a URL with scheme "localhost", but has no tuple origin.
        assert!(parse_origins("localhost:3000").is_err());
    }

    #[test]
    fn default_binds_all_interfaces() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.result_store_capacity, 1000);
        assert_eq!(config.allowed_origins.len(), 2);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn reads_origins_capacity_and_catalog_path() {
        let config = config_with(&[
            ("CORS_ALLOWED_ORIGINS", "https://quiz.example.com/app, http://127.0.0.1:5173"),
            ("RESULT_STORE_CAPACITY", "25"),
            ("QUIZ_CATALOG_PATH", "data/custom.json"),
            ("PORT", "9000"),
        ]);
        assert_eq!(
            config.allowed_origins,
            vec!["https://quiz.example.com", "http://127.0.0.1:5173"]
        );
        assert_eq!(config.result_store_capacity, 25);
        assert_eq!(config.catalog_path.as_deref(), Some("data/custom.json"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn blank_catalog_path_is_ignored() {
        let config = config_with(&[("QUIZ_CATALOG_PATH", "  ")]);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    #[should_panic(expected = "RESULT_STORE_CAPACITY must be a positive integer")]
    fn zero_capacity_aborts() {
        config_with(&[("RESULT_STORE_CAPACITY", "0")]);
    }

    #[test]
    #[should_panic(expected = "RESULT_STORE_CAPACITY must be a positive integer")]
    fn non_numeric_capacity_aborts() {
        config_with(&[("RESULT_STORE_CAPACITY", "abc")]);
    }

    #[test]
    #[should_panic(expected = "CORS_ALLOWED_ORIGINS must be a list of URLs")]
    fn invalid_origin_list_aborts() {
        config_with(&[("CORS_ALLOWED_ORIGINS", "http://ok.example.com,not a url")]);
    }
}
