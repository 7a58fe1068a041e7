use anyhow::{Context, Result};

pub const DEFAULT_COLLECTION: &str = "sensor";

#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the document store. `None` leaves storage
    /// unavailable for the lifetime of the process.
    pub mongo_uri: Option<String>,
    /// Database used when the URI does not name a default one.
    pub mongo_database: Option<String>,
    pub mongo_collection: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            mongo_uri: non_empty(lookup("MONGO_URI")),
            mongo_database: non_empty(lookup("MONGO_DATABASE")),
            mongo_collection: optional("MONGO_COLLECTION", DEFAULT_COLLECTION),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "5000")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
