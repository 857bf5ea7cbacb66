/// Transient SQLite database, dropped with its last connection.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub track_modifications: bool,
    pub host: String,
    /// Raw `APP_PORT`; only parsed when the server binds.
    pub port: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !is_scheme_only(v))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let track_modifications = lookup("TRACK_MODIFICATIONS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        Self {
            database_url,
            track_modifications,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: lookup("APP_PORT").unwrap_or_else(|| "8080".into()),
        }
    }

    /// True when the store lives only in process memory.
    pub fn is_ephemeral(&self) -> bool {
        is_scheme_only(&self.database_url)
            || self.database_url.contains(":memory:")
            || self.database_url.contains("mode=memory")
    }
}

/// `sqlite://` or `sqlite:` with no path names a private temporary database
/// per connection, so it is treated like the in-memory default.
fn is_scheme_only(url: &str) -> bool {
    matches!(url, "" | "sqlite:" | "sqlite://")
}
