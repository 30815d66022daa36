//! Application configuration management.
//!
//! All configuration comes from environment variables. Mercado Pago and SMTP
//! credentials are optional at startup: missing payment credentials are
//! reported by the `/api/config/check` endpoint and rejected upstream, and
//! missing SMTP credentials switch ticket delivery into simulated mode.

use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app.
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address used to build public URLs
    #[envconfig(default = "localhost")]
    pub web_server_host: String,

    /// Port for web server binding
    #[envconfig(default = "3001")]
    pub web_server_port: u16,

    /// Path to SSL private key file, only read in prod
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file, only read in prod
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// Mercado Pago public key, safe to hand to the frontend
    #[envconfig(default = "")]
    pub mercado_pago_public_key: String,

    /// 🔒 SENSITIVE: Mercado Pago access token
    #[envconfig(default = "")]
    pub mercado_token: String,

    /// SMTP username for ticket delivery. Leave unset to run email
    /// delivery in simulated mode.
    pub smtp_user: Option<String>,

    /// 🔒 SENSITIVE: SMTP password for ticket delivery
    pub smtp_pass: Option<String>,

    /// SMTP relay host
    #[envconfig(default = "smtp.gmail.com")]
    pub smtp_server: String,

    /// Sender address for ticket emails
    #[envconfig(default = "SafeSwap <no-reply@safeswap.app>")]
    pub mail_from: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.web_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.web_server_host,
            port = self.web_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn web_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.web_server_protocol(), self.url_host())
    }

    pub fn has_mercado_token(&self) -> bool {
        !self.mercado_token.is_empty()
    }

    pub fn has_mercado_public_key(&self) -> bool {
        !self.mercado_pago_public_key.is_empty()
    }

    /// Both SMTP credentials must be present for real email delivery
    pub fn has_mail_credentials(&self) -> bool {
        self.smtp_user.is_some() && self.smtp_pass.is_some()
    }
}

/// Global application configuration instance.
///
/// Loaded from the environment on first access; the application panics with a
/// descriptive message if a variable fails to parse.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
