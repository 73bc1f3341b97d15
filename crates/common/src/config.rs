use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment: `local`, `dev` or `prod` (selects the log format)
    pub app_env: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Address the HTTP API binds to (default: 0.0.0.0:8080)
    pub http_address: String,

    /// Per-request timeout for the HTTP API in seconds (default: 4)
    pub http_read_timeout_secs: u64,

    /// JWT secret for API authentication
    pub jwt_secret: String,

    /// JWT token expiry in hours (default: 72)
    pub jwt_expiry_hours: u64,

    /// Sender address for birthday notices. Doubles as the SMTP username.
    pub email_from: String,

    /// SMTP relay host
    pub smtp_host: Option<String>,

    /// SMTP relay port (default: 587)
    pub smtp_port: u16,

    /// SMTP password
    pub smtp_password: Option<String>,

    /// Resend API key. When set, mail goes through the Resend HTTP API instead of SMTP.
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    pub resend_base_url: String,

    /// Upper bound for a single delivery attempt in seconds (default: 30)
    pub notifier_send_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            http_address: std::env::var("HTTP_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            http_read_timeout_secs: std::env::var("HTTP_READ_TIMEOUT_SECS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_READ_TIMEOUT_SECS must be a valid u64"))?,
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
            jwt_expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| "72".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRY_HOURS must be a valid u64"))?,
            email_from: std::env::var("EMAIL_FROM")
                .map_err(|_| anyhow::anyhow!("EMAIL_FROM environment variable is required"))?,
            smtp_host: std::env::var("SMTP_HOST").ok(),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_PORT must be a valid u16"))?,
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            resend_base_url: std::env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            notifier_send_timeout_secs: std::env::var("NOTIFIER_SEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("NOTIFIER_SEND_TIMEOUT_SECS must be a valid u64"))?,
        })
    }

    /// Whether logs should be emitted as JSON rather than human-readable text.
    pub fn json_logs(&self) -> bool {
        self.app_env != "local"
    }

    /// Default `EnvFilter` directive for the configured environment.
    pub fn default_log_filter(&self) -> &'static str {
        match self.app_env.as_str() {
            "local" | "dev" => "birthday_api=debug,birthday_notifier=debug,tower_http=debug",
            _ => "birthday_api=info,birthday_notifier=info,tower_http=info",
        }
    }
}
