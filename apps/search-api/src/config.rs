use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use domain_search::{PineconeConfig, SearchSettings};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Absent when PINECONE_API_KEY is not set
    pub pinecone: Option<PineconeConfig>,
    pub search: SearchSettings,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let pinecone = PineconeConfig::from_env_optional()?;
        let search = SearchSettings::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            pinecone,
            search,
        })
    }
}
