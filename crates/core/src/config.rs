use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub finviz: FinvizConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `host` or `host:port`
    pub host: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Upper bound for the startup ping
    pub connect_timeout_secs: u64,
    /// Full connection URL; takes precedence over the individual fields
    pub url: Option<String>,
}

pub const DEFAULT_PG_PORT: u16 = 5432;

impl DatabaseConfig {
    /// Splits `host` into host name and port, defaulting the port to 5432.
    #[must_use]
    pub fn host_and_port(&self) -> (String, u16) {
        match self.host.rsplit_once(':') {
            Some((host, port)) => match port.parse() {
                Ok(port) => (host.to_string(), port),
                Err(_) => (self.host.clone(), DEFAULT_PG_PORT),
            },
            None => (self.host.clone(), DEFAULT_PG_PORT),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost:5432".to_string(),
            database: "insider".to_string(),
            username: "postgres".to_string(),
            password: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 5,
            url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinvizConfig {
    /// Used for quote and screener links in published messages
    pub base_url: String,
    pub buy_listing_url: String,
    pub sale_listing_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for FinvizConfig {
    fn default() -> Self {
        Self {
            base_url: "https://finviz.com".to_string(),
            buy_listing_url: "https://finviz.com/insidertrading.ashx?tc=1".to_string(),
            sale_listing_url: "https://finviz.com/insidertrading.ashx?tc=2".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub chat_id: Option<i64>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            token: None,
            chat_id: None,
        }
    }
}
