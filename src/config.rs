use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub table: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        // The table name is interpolated into the upsert statement, so it has
        // to be a plain identifier rather than arbitrary SQL.
        let table = env_required("FORMDROP_TABLE")?;
        if !is_identifier(&table) {
            return Err(format!(
                "Invalid FORMDROP_TABLE: '{table}' is not a plain SQL identifier"
            ));
        }

        let host: IpAddr = env_or("FORMDROP_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMDROP_HOST: {e}"))?;

        let port: u16 = env_or("FORMDROP_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FORMDROP_PORT: {e}"))?;

        let max_body_size: usize = env_or("FORMDROP_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMDROP_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FORMDROP_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            table,
            host,
            port,
            max_body_size,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
