use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or, env_required};

const DEFAULT_INDEX: &str = "ycaisus";
const DEFAULT_API_URL: &str = "https://api.pinecone.io";
const DEFAULT_API_VERSION: &str = "2025-01";
const DEFAULT_EMBED_MODEL: &str = "multilingual-e5-large";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pinecone connection configuration
#[derive(Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub index_name: String,
    /// Data-plane host; resolved through the control plane when unset
    pub index_host: Option<String>,
    pub control_plane_url: String,
    pub inference_url: String,
    pub api_version: String,
    pub embed_model: String,
    pub timeout_secs: u64,
}

impl PineconeConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            index_name: DEFAULT_INDEX.to_string(),
            index_host: None,
            control_plane_url: DEFAULT_API_URL.to_string(),
            inference_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_index_name(mut self, index_name: String) -> Self {
        self.index_name = index_name;
        self
    }

    pub fn with_index_host(mut self, host: String) -> Self {
        self.index_host = Some(host);
        self
    }

    pub fn with_control_plane_url(mut self, url: String) -> Self {
        self.control_plane_url = url;
        self
    }

    pub fn with_inference_url(mut self, url: String) -> Self {
        self.inference_url = url;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load from the environment, or `None` when `PINECONE_API_KEY` is unset or blank
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        match env_optional("PINECONE_API_KEY") {
            Some(_) => Self::from_env().map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("index_host", &self.index_host)
            .field("control_plane_url", &self.control_plane_url)
            .field("inference_url", &self.inference_url)
            .field("api_version", &self.api_version)
            .field("embed_model", &self.embed_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("PINECONE_API_KEY")?;

        Ok(Self {
            api_key,
            index_name: env_or_default("PINECONE_INDEX", DEFAULT_INDEX),
            index_host: env_optional("PINECONE_INDEX_HOST"),
            control_plane_url: env_or_default("PINECONE_CONTROL_PLANE_URL", DEFAULT_API_URL),
            inference_url: env_or_default("PINECONE_INFERENCE_URL", DEFAULT_API_URL),
            api_version: env_or_default("PINECONE_API_VERSION", DEFAULT_API_VERSION),
            embed_model: env_or_default("PINECONE_EMBED_MODEL", DEFAULT_EMBED_MODEL),
            timeout_secs: env_parse_or("PINECONE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }
}
