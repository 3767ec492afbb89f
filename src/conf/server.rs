use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
    /// Request body limit in bytes.
    #[serde(default = "ServerConfig::default_max_upload_size")]
    pub max_upload_size: usize,
    #[serde(default = "ServerConfig::default_log_level")]
    pub log_level: String,
}

impl ServerConfig {
    fn default_port() -> u16 {
        8080
    }

    fn default_host() -> String {
        String::from("0.0.0.0")
    }

    fn default_max_upload_size() -> usize {
        100 * 1024 * 1024
    }

    fn default_log_level() -> String {
        String::from("info")
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            max_upload_size: Self::default_max_upload_size(),
            log_level: Self::default_log_level(),
        }
    }
}
