//! Server configuration loaded from the environment (after `.env`).

use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_PATH: &str = "db/blogs.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var("PORT").unwrap_or(DEFAULT_PORT),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            cors_allowed_origins: split_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGINS.to_string()),
            ),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 5] = [
        "HOST",
        "PORT",
        "DATABASE_PATH",
        "DATABASE_MAX_CONNECTIONS",
        "CORS_ALLOWED_ORIGINS",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_environment_is_empty() {
        clear_env();

        let config = ServerConfig::from_env();

        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.database_path, "db/blogs.db");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:8080", "http://127.0.0.1:8080"]
        );
    }

    #[test]
    #[serial]
    fn reads_overrides_and_ignores_garbage() {
        clear_env();
        env::set_var("PORT", "9100");
        env::set_var("DATABASE_PATH", ":memory:");
        env::set_var("DATABASE_MAX_CONNECTIONS", "lots");
        env::set_var("CORS_ALLOWED_ORIGINS", " https://blogit.dev , ,http://localhost:3000");

        let config = ServerConfig::from_env();
        clear_env();

        assert_eq!(config.port, 9100);
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://blogit.dev", "http://localhost:3000"]
        );
    }
}
