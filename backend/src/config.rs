use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Output token cap for speech generation (default: 2000)
    pub max_tokens: u32,
    /// Output token cap for the diagnostic endpoints (default: 100)
    pub test_max_tokens: u32,
    /// Client timeout in seconds; unset means the HTTP client default
    #[serde(deserialize_with = "deserialize_opt_duration_secs")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let config_path = path.map(str::to_string).or_else(Self::find_config_file);
        let mut config = if let Some(config_path) = config_path {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8000)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,speech_copilot=debug")
    /// - ANTHROPIC_API_KEY / APP_LLM_API_KEY: Model API credential
    /// - APP_LLM_API_BASE: Model API base URL
    /// - APP_LLM_MODEL: Model identifier
    /// - APP_LLM_MAX_TOKENS: Output token cap for speech generation
    /// - APP_LLM_TIMEOUT: Client timeout (accepts "30", "30s", "2m")
    /// - APP_CORS_ORIGINS: Comma-separated list of allowed browser origins
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Some(port) = lookup("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Some(key) = lookup("APP_LLM_API_KEY").or_else(|| lookup("ANTHROPIC_API_KEY")) {
            self.llm.api_key = Some(key);
            tracing::info!("Override llm.api_key from env");
        }

        if let Some(base) = lookup("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Some(model) = lookup("APP_LLM_MODEL") {
            self.llm.model = model;
            tracing::info!("Override llm.model from env: {}", self.llm.model);
        }

        if let Some(max_tokens) = lookup("APP_LLM_MAX_TOKENS")
            && let Ok(max_tokens) = max_tokens.parse()
        {
            self.llm.max_tokens = max_tokens;
            tracing::info!("Override llm.max_tokens from env: {}", self.llm.max_tokens);
        }

        if let Some(timeout) = lookup("APP_LLM_TIMEOUT") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.llm.timeout_secs = Some(val);
                    tracing::info!("Override llm.timeout_secs from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_TIMEOUT '{}': {} (keep {:?})",
                    timeout,
                    e,
                    self.llm.timeout_secs
                ),
            }
        }

        if let Some(origins) = lookup("APP_CORS_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            tracing::info!("Override cors.allowed_origins from env: {:?}", self.cors.allowed_origins);
        }
    }

    /// Validate configuration
    ///
    /// A missing API key is allowed: the server starts and /health reports it.
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model cannot be empty");
        }

        if self.llm.api_base.trim().is_empty() {
            anyhow::bail!("llm.api_base cannot be empty");
        }

        if self.llm.max_tokens == 0 || self.llm.test_max_tokens == 0 {
            anyhow::bail!("llm.max_tokens and llm.test_max_tokens must be > 0");
        }

        if self.llm.timeout_secs == Some(0) {
            anyhow::bail!("llm.timeout_secs must be > 0 when set");
        }

        // Credentialed CORS cannot use a wildcard origin.
        if self.cors.allowed_origins.iter().any(|o| o.trim() == "*") {
            anyhow::bail!("cors.allowed_origins cannot contain '*'; list each origin explicitly");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl LlmConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8000 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2000,
            test_max_tokens: 100,
            timeout_secs: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://pjdevos-speech-copilot-a9iu.vercel.app".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,speech_copilot=debug".to_string(), file: None }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    let secs = match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(n),
        "m" | "min" | "mins" | "minute" | "minutes" => n.checked_mul(60),
        "h" | "hr" | "hour" | "hours" => n.checked_mul(60 * 60),
        _ => return Err(format!("unsupported unit: {}", unit)),
    };
    secs.ok_or_else(|| "value too large".to_string())
}

// Accepts a number of seconds or a human-friendly string like "30s"
fn deserialize_opt_duration_secs<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = Option<u64>;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(Some(v as u64)) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map(Some).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.llm.test_max_tokens, 100);
        assert_eq!(config.llm.timeout_secs, None);
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert!(!config.llm.has_api_key());
    }

    #[test]
    fn test_parse_duration_to_secs() {
        assert_eq!(parse_duration_to_secs("45"), Ok(45));
        assert_eq!(parse_duration_to_secs("30s"), Ok(30));
        assert_eq!(parse_duration_to_secs("2m"), Ok(120));
        assert_eq!(parse_duration_to_secs("1h"), Ok(3600));
        assert!(parse_duration_to_secs("abc").is_err());
        assert!(parse_duration_to_secs("10x").is_err());
    }

    #[test]
    fn test_parse_duration_overflow_is_an_error() {
        assert_eq!(parse_duration_to_secs("9999999999999999h"), Err("value too large".to_string()));
        assert_eq!(parse_duration_to_secs("999999999999999999m"), Err("value too large".to_string()));
        assert_eq!(parse_duration_to_secs("9999999999999999s"), Ok(9_999_999_999_999_999));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [llm]
            model = "claude-test"
            timeout_secs = "90s"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.model, "claude-test");
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.llm.timeout_secs, Some(90));
        assert_eq!(config.llm.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("APP_SERVER_PORT", "8123"),
            ("ANTHROPIC_API_KEY", "sk-ant-test"),
            ("APP_LLM_MODEL", "claude-other"),
            ("APP_LLM_TIMEOUT", "1m"),
            ("APP_CORS_ORIGINS", "http://a.example, http://b.example,"),
        ]));

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-ant-test"));
        assert!(config.llm.has_api_key());
        assert_eq!(config.llm.model, "claude-other");
        assert_eq!(config.llm.timeout_secs, Some(60));
        assert_eq!(config.cors.allowed_origins, vec!["http://a.example", "http://b.example"]);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("APP_SERVER_PORT", "not-a-port"),
            ("APP_LLM_TIMEOUT", "soon"),
        ]));

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.timeout_secs, None);
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.model = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wildcard_origin() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec!["*".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'*'"), "{}", err);

        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[("APP_CORS_ORIGINS", "http://localhost:3000, *")]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_is_not_configured() {
        let mut config = Config::default();
        config.llm.api_key = Some("   ".to_string());
        assert!(!config.llm.has_api_key());
    }
}
