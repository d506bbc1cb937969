use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Record kind served by this contract instance: `asset` or `customer`.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub store: StoreBackend,
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Run the seeding entry point once at startup.
    #[serde(default)]
    pub seed_on_start: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            store: StoreBackend::default(),
            data_path: default_data_path(),
            seed_on_start: false,
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_kind() -> String { "asset".into() }
fn default_data_path() -> String { "data/state.json".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config from `SERVER_HOST`, `SERVER_PORT` and `REGISTRY_KIND` when no file is present.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Ok(kind) = std::env::var("REGISTRY_KIND") {
            cfg.registry.kind = kind;
        }
        cfg
    }

    /// File config from `CONFIG_PATH` (default `config.toml`), or the env-derived one
    /// when that file does not exist.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// Only a missing file falls back to env; an unreadable or malformed file is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<AppConfig>(&content)
                .map_err(|e| anyhow!("invalid config file {path}: {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.registry.normalize_and_validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl RegistryConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        self.kind = self.kind.trim().to_ascii_lowercase();
        if self.kind != "asset" && self.kind != "customer" {
            return Err(anyhow!("registry.kind must be `asset` or `customer`, got `{}`", self.kind));
        }
        if self.store == StoreBackend::File && self.data_path.trim().is_empty() {
            return Err(anyhow!("registry.data_path is required for the file store"));
        }
        Ok(())
    }
}
