use crate::error::{env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Default Gemini model used for the chat agent
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default timezone applied to created calendar events
pub const DEFAULT_TIMEZONE: &str = "Asia/Karachi";

/// Page size used when listing Classroom courses
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Main configuration structure for the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Path of the JSON file holding the OAuth token set
    pub google_token_path: String,
    /// Calendar that receives assignment events
    pub google_calendar_id: String,
    /// Gemini API key for the chat agent
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Timezone for calendar events
    pub timezone: String,
    /// Address the web interface binds to
    pub bind_address: String,
    /// Classroom course listing page size
    pub page_size: u32,
}

/// Optional overrides read from `config/classmate.toml`
#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    gemini_model: Option<String>,
    timezone: Option<String>,
    google_calendar_id: Option<String>,
    bind_address: Option<String>,
    page_size: Option<u32>,
}

impl Config {
    /// Load configuration from environment and the optional overrides file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;
        let gemini_api_key =
            env::var("GEMINI_API_KEY").map_err(|_| env_error("GEMINI_API_KEY"))?;

        // Optional environment variables with defaults
        let google_token_path = env::var("GOOGLE_TOKEN_PATH")
            .unwrap_or_else(|_| String::from("config/google_token.json"));
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| String::from("primary"));
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| String::from(DEFAULT_GEMINI_MODEL));
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| String::from("127.0.0.1:3000"));
        let page_size = env::var("CLASSROOM_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let mut config = Config {
            google_client_id,
            google_client_secret,
            google_token_path,
            google_calendar_id,
            gemini_api_key,
            gemini_model,
            timezone,
            bind_address,
            page_size,
        };

        // File overrides win over the environment defaults
        if let Ok(content) = fs::read_to_string("config/classmate.toml") {
            if let Ok(overrides) = toml::from_str::<ConfigOverrides>(&content) {
                config.apply_overrides(overrides);
            }
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(model) = overrides.gemini_model {
            self.gemini_model = model;
        }
        if let Some(tz) = overrides.timezone {
            self.timezone = tz;
        }
        if let Some(calendar_id) = overrides.google_calendar_id {
            self.google_calendar_id = calendar_id;
        }
        if let Some(addr) = overrides.bind_address {
            self.bind_address = addr;
        }
        if let Some(size) = overrides.page_size {
            self.page_size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() {
        let mut config = Config {
            google_client_id: String::new(),
            google_client_secret: String::new(),
            google_token_path: String::from("config/google_token.json"),
            google_calendar_id: String::from("primary"),
            gemini_api_key: String::new(),
            gemini_model: String::from(DEFAULT_GEMINI_MODEL),
            timezone: String::from(DEFAULT_TIMEZONE),
            bind_address: String::from("127.0.0.1:3000"),
            page_size: DEFAULT_PAGE_SIZE,
        };

        let overrides: ConfigOverrides =
            toml::from_str("timezone = \"Europe/Helsinki\"\npage_size = 50").unwrap();
        config.apply_overrides(overrides);

        assert_eq!(config.timezone, "Europe/Helsinki");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.google_calendar_id, "primary");
    }
}
