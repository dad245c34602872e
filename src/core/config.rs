use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Width in pixels of the preview modal, used to size the bill image
    pub preview_modal_width: u32,
}

/// Remote bill store connection settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_url: String,
    pub user_agent: String,
}

/// Stored user identity, as the login page would have persisted it
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// JSON document `{"type": "...", "email": "..."}`
    pub user_json: String,
    pub jwt: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            store: StoreConfig::from_env()?,
            session: SessionConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub const DEFAULT_PREVIEW_MODAL_WIDTH: u32 = 800;

    pub fn from_env() -> Result<Self, String> {
        let preview_modal_width = env::var("PREVIEW_MODAL_WIDTH")
            .unwrap_or_else(|_| Self::DEFAULT_PREVIEW_MODAL_WIDTH.to_string())
            .parse::<u32>()
            .map_err(|_| "PREVIEW_MODAL_WIDTH must be a valid number".to_string())?;

        Ok(Self {
            preview_modal_width,
        })
    }
}

impl StoreConfig {
    const DEFAULT_API_URL: &'static str = "http://localhost:5678";
    const DEFAULT_USER_AGENT: &'static str = "BilledCore/0.1 (expense-reports)";

    pub fn from_env() -> Result<Self, String> {
        let api_url = env::var("STORE_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(format!("Invalid STORE_API_URL: {}", api_url));
        }

        let user_agent =
            env::var("STORE_USER_AGENT").unwrap_or_else(|_| Self::DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            api_url,
            user_agent,
        })
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let user_json =
            env::var("BILLED_USER").map_err(|_| "BILLED_USER must be set".to_string())?;

        let jwt = env::var("BILLED_JWT").ok().filter(|s| !s.trim().is_empty());

        Ok(Self { user_json, jwt })
    }
}
