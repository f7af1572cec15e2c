use std::path::PathBuf;

use bure_core::BureError;
use secrecy::SecretString;

pub const MISTRAL_API_KEY: &str = "MISTRAL_API_KEY";
pub const LLM_MODEL: &str = "LLM_MODEL";
pub const LLM_BASE_URL: &str = "LLM_BASE_URL";
pub const LLM_TEMPERATURE: &str = "LLM_TEMPERATURE";
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";
pub const TAVILY_BASE_URL: &str = "TAVILY_BASE_URL";
pub const PROMPTS_DIR: &str = "BURE_PROMPTS_DIR";

pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Everything needed to wire the production collaborators.
///
/// Keys are held as [`SecretString`] so they never show up in `Debug` output.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub mistral_api_key: SecretString,
    pub model: String,
    pub llm_base_url: Option<String>,
    pub temperature: f32,
    pub tavily_api_key: SecretString,
    pub tavily_base_url: Option<String>,
    pub prompts_dir: Option<PathBuf>,
}

impl AgentConfig {
    pub fn new(
        mistral_api_key: SecretString,
        model: impl Into<String>,
        tavily_api_key: SecretString,
    ) -> Self {
        Self {
            mistral_api_key,
            model: model.into(),
            llm_base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            tavily_api_key,
            tavily_base_url: None,
            prompts_dir: None,
        }
    }

    pub fn from_env() -> Result<Self, BureError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                BureError::Initialization(format!("environment variable {key} is not set"))
            })
        };

        let temperature = match get(LLM_TEMPERATURE) {
            Some(raw) => raw.trim().parse::<f32>().map_err(|err| {
                BureError::Initialization(format!("{LLM_TEMPERATURE}='{raw}': {err}"))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            mistral_api_key: SecretString::new(require(MISTRAL_API_KEY)?),
            model: require(LLM_MODEL)?,
            llm_base_url: get(LLM_BASE_URL),
            temperature,
            tavily_api_key: SecretString::new(require(TAVILY_API_KEY)?),
            tavily_base_url: get(TAVILY_BASE_URL),
            prompts_dir: get(PROMPTS_DIR).map(PathBuf::from),
        })
    }

    pub fn with_prompts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompts_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_and_optional_values() {
        let config = AgentConfig::from_lookup(lookup(&[
            (MISTRAL_API_KEY, "m-key"),
            (LLM_MODEL, "mistral-large-latest"),
            (TAVILY_API_KEY, "t-key"),
            (LLM_TEMPERATURE, "0.3"),
            (PROMPTS_DIR, "/srv/prompts"),
        ]))
        .unwrap();

        assert_eq!(config.mistral_api_key.expose_secret(), "m-key");
        assert_eq!(config.model, "mistral-large-latest");
        assert_eq!(config.tavily_api_key.expose_secret(), "t-key");
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.prompts_dir, Some(PathBuf::from("/srv/prompts")));
        assert!(config.llm_base_url.is_none());
    }

    #[test]
    fn temperature_defaults() {
        let config = AgentConfig::from_lookup(lookup(&[
            (MISTRAL_API_KEY, "m"),
            (LLM_MODEL, "x"),
            (TAVILY_API_KEY, "t"),
        ]))
        .unwrap();
        assert!((config.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_or_blank_key_is_initialization_error() {
        let err = AgentConfig::from_lookup(lookup(&[(LLM_MODEL, "x"), (TAVILY_API_KEY, "t")]))
            .unwrap_err();
        assert!(matches!(err, BureError::Initialization(msg) if msg.contains(MISTRAL_API_KEY)));

        let err = AgentConfig::from_lookup(lookup(&[
            (MISTRAL_API_KEY, "m"),
            (LLM_MODEL, "x"),
            (TAVILY_API_KEY, "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, BureError::Initialization(msg) if msg.contains(TAVILY_API_KEY)));
    }

    #[test]
    fn bad_temperature_is_rejected() {
        let err = AgentConfig::from_lookup(lookup(&[
            (MISTRAL_API_KEY, "m"),
            (LLM_MODEL, "x"),
            (TAVILY_API_KEY, "t"),
            (LLM_TEMPERATURE, "warm"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BureError::Initialization(_)));
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let config = AgentConfig::new(
            SecretString::new("super-secret".to_string()),
            "m",
            SecretString::new("other-secret".to_string()),
        );
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("other-secret"));
    }
}
