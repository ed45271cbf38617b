use sqlx::postgres::PgConnectOptions;

/// Environment-derived settings, read once at startup and passed into
/// handlers through router state.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db: DbConfig,
}

/// Connection settings for the stats database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            port: port_or(std::env::var("PORT").ok(), 3001),
            db: DbConfig::from_env(),
        }
    }
}

impl DbConfig {
    pub fn from_env() -> Self {
        DbConfig {
            host: env_or("DB_HOST", "postgres"),
            port: port_or(std::env::var("DB_PORT").ok(), 5432),
            name: env_or("DB_NAME", "gamedb"),
            user: env_or("DB_USER", "gameuser"),
            password: env_or("DB_PASSWORD", "gamepass123"),
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

// Unparseable port values fall back to the default instead of aborting.
fn port_or(raw: Option<String>, default: u16) -> u16 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}
