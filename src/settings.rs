use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Postgres connection string. Empty means "use the local SQLite file".
    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub admin_password: String,

    #[serde(default)]
    pub gemini_api_key: Option<String>,

    #[serde(default)]
    pub groq_api_key: Option<String>,

    #[serde(default)]
    pub huggingface_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,

    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_sqlite_path() -> String {
    "portfolio.db".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_groq_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
fn default_huggingface_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3".to_string()
}
fn default_ai_timeout_secs() -> u64 {
    15
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Deployment platforms set these without the APP_ prefix.
        if config.database_url.trim().is_empty() {
            config.database_url = env::var("DATABASE_URL").unwrap_or_default();
        }
        config.admin_password = fill_or_env(config.admin_password, "ADMIN_PASSWORD")?;
        fill_optional_from_env(&mut config.gemini_api_key, "GEMINI_API_KEY");
        fill_optional_from_env(&mut config.groq_api_key, "GROQ_API_KEY");
        fill_optional_from_env(&mut config.huggingface_api_key, "HUGGINGFACE_API_KEY");

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.admin_password.len() < 8 {
            errors.push("ADMIN_PASSWORD must be at least 8 characters");
        }
        if self.sqlite_path.trim().is_empty() && self.database_url.trim().is_empty() {
            errors.push("either DATABASE_URL or a sqlite_path must be configured");
        }
        if self.ai_timeout_secs == 0 {
            errors.push("ai_timeout_secs must be greater than zero");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

fn fill_optional_from_env(current: &mut Option<String>, env_key: &str) {
    if current.as_deref().map_or(true, |s| s.trim().is_empty()) {
        *current = env::var(env_key).ok().filter(|s| !s.trim().is_empty());
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(s) => s.redact(),
            None => "[NOT SET]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("sqlite_path", &self.sqlite_path)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("admin_password", &self.admin_password.redact())
            .field("gemini_api_key", &self.gemini_api_key.redact())
            .field("groq_api_key", &self.groq_api_key.redact())
            .field("huggingface_api_key", &self.huggingface_api_key.redact())
            .field("gemini_model", &self.gemini_model)
            .field("groq_model", &self.groq_model)
            .field("huggingface_model", &self.huggingface_model)
            .field("ai_timeout_secs", &self.ai_timeout_secs)
            .finish()
    }
}
