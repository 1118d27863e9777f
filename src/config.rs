use std::env;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Interface the server binds to.
    pub address: String,
    /// TCP port the server listens on.
    pub port: u16,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let address = lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            database_url,
            address,
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(|_| None);

        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "/var/lib/blog/blog.db"),
            ("ADDRESS", "0.0.0.0"),
            ("PORT", "9000"),
        ]);

        let config = ServerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_url, "/var/lib/blog/blog.db");
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn invalid_port_uses_default() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "PORT").then(|| "not-a-port".to_string())
        });

        assert_eq!(config.port, 8080);
    }
}
