//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use crate::store::CapacityPolicy;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (from MERGINGTON_HOST)
    pub host: String,
    /// Port to listen on (from MERGINGTON_PORT)
    pub port: u16,
    /// Directory served under `/static` (from MERGINGTON_STATIC_DIR)
    pub static_dir: PathBuf,
    /// Catalog file replacing the built-in activities (from MERGINGTON_CATALOG)
    pub catalog_path: Option<PathBuf>,
    /// Allowed CORS origins (from MERGINGTON_CORS_ORIGINS, comma-separated)
    pub cors_origins: Option<Vec<String>>,
    /// Capacity enforcement (from MERGINGTON_ENFORCE_CAPACITY)
    pub capacity_policy: CapacityPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("MERGINGTON_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("MERGINGTON_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid MERGINGTON_PORT {:?}", raw);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let static_dir = lookup("MERGINGTON_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let catalog_path = lookup("MERGINGTON_CATALOG")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let cors_origins = lookup("MERGINGTON_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let enforce = lookup("MERGINGTON_ENFORCE_CAPACITY").is_some_and(|v| is_truthy(&v));
        let capacity_policy = if enforce {
            CapacityPolicy::Enforced
        } else {
            CapacityPolicy::Advisory
        };

        Self {
            host,
            port,
            static_dir,
            catalog_path,
            cors_origins,
            capacity_policy,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
