#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: Option<String>,
    pub mail: MailConfig,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub smtp_from: String,
    /// All digest mails go to the owner mailbox; the digest body lists the
    /// individual recipients so the owner can forward.
    pub owner_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            server: ServerConfig { host, port },
            database_url: std::env::var("DATABASE_URL").ok(),
            mail: MailConfig {
                smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                smtp_user: std::env::var("SMTP_USER").ok(),
                smtp_pass: std::env::var("SMTP_PASS").ok(),
                smtp_from: std::env::var("SMTP_FROM")
                    .unwrap_or_else(|_| "noreply@crmserver.local".to_string()),
                owner_email: std::env::var("OWNER_EMAIL")
                    .unwrap_or_else(|_| "owner@crmserver.local".to_string()),
            },
        }
    }
}
