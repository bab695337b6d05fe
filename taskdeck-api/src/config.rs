use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub auth: Option<AuthConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            database: None,
            auth: Some(AuthConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

fn default_session_ttl_hours() -> i64 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[database]
# path = "/var/lib/taskdeck/db.sqlite3"

[auth]
session_ttl_hours = 24
"#;

impl ApiConfig {
    /// Load the config file, writing a default one first if none exists
    pub fn load(path: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn host_and_port(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }

    pub fn session_ttl_hours(&self) -> i64 {
        self.auth
            .as_ref()
            .map(|auth| auth.session_ttl_hours)
            .unwrap_or_else(default_session_ttl_hours)
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("taskdeck").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_is_written_and_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("api.toml");

        let (config, loaded_from) = ApiConfig::load(Some(path.clone())).unwrap();

        assert_eq!(loaded_from, path);
        assert!(path.exists());
        assert_eq!(config.host_and_port(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.session_ttl_hours(), 24);
        assert!(config.database.and_then(|d| d.path).is_none());
    }

    #[test]
    fn test_existing_file_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[database]\npath = \"/tmp/taskdeck.sqlite3\"\n\n[auth]\nsession_ttl_hours = 2\n",
        )
        .unwrap();

        let (config, _) = ApiConfig::load(Some(path)).unwrap();

        assert_eq!(config.host_and_port(), ("0.0.0.0".to_string(), 9000));
        assert_eq!(config.session_ttl_hours(), 2);
        assert_eq!(
            config.database.and_then(|d| d.path),
            Some(PathBuf::from("/tmp/taskdeck.sqlite3"))
        );
        assert!(config.cors.is_none());
    }
}
