//! Product Notes
//!
//! Merchant notes attached to Shopify products:
//! - Notes stored as a JSON list in one product metafield
//! - Shopify Admin GraphQL client behind the `NoteStore` / `ProductCatalog` traits
//! - Overview of every product with notes, with title search
//! - State machines for the creation page and the action/block extensions
//! - HTTP API and `pnotes` CLI over the same operations

pub mod api;
pub mod i18n;
pub mod notes;
pub mod overview;
pub mod screens;
pub mod shopify;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use notes::NoteManager;
use serde::Deserialize;
use shopify::{AdminClient, AdminClientConfig, MetafieldLocation, NoteStore, ProductCatalog};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub shopify: ShopifyYamlConfig,
    pub notes: NotesYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Shopify Admin API section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopifyYamlConfig {
    pub shop_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
    /// Full GraphQL URL (proxies, local mocks)
    pub endpoint_override: Option<String>,
}

impl Default for ShopifyYamlConfig {
    fn default() -> Self {
        Self {
            shop_domain: String::new(),
            access_token: String::new(),
            api_version: "2025-10".into(),
            request_timeout_secs: 30,
            endpoint_override: None,
        }
    }
}

/// Note storage and extension settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotesYamlConfig {
    pub namespace: String,
    pub key: String,
    pub block_page_size: usize,
    pub action_extension: String,
}

impl Default for NotesYamlConfig {
    fn default() -> Self {
        let location = MetafieldLocation::default();
        Self {
            namespace: location.namespace,
            key: location.key,
            block_page_size: screens::DEFAULT_PAGE_SIZE,
            action_extension: "Note-Added-Action".into(),
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub shop_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub endpoint_override: Option<String>,
    pub notes_namespace: String,
    pub notes_key: String,
    pub block_page_size: usize,
    pub action_extension: String,
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

impl Config {
    /// Load configuration from `config.yaml` (if present) and environment variables.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            server_port: env_parsed("SERVER_PORT").unwrap_or(yaml.server.port),
            shop_domain: std::env::var("SHOPIFY_SHOP_DOMAIN").unwrap_or(yaml.shopify.shop_domain),
            access_token: std::env::var("SHOPIFY_ACCESS_TOKEN")
                .unwrap_or(yaml.shopify.access_token),
            api_version: std::env::var("SHOPIFY_API_VERSION").unwrap_or(yaml.shopify.api_version),
            request_timeout_secs: env_parsed("SHOPIFY_TIMEOUT_SECS")
                .unwrap_or(yaml.shopify.request_timeout_secs),
            endpoint_override: std::env::var("SHOPIFY_ENDPOINT")
                .ok()
                .or(yaml.shopify.endpoint_override),
            notes_namespace: std::env::var("NOTES_NAMESPACE").unwrap_or(yaml.notes.namespace),
            notes_key: std::env::var("NOTES_KEY").unwrap_or(yaml.notes.key),
            block_page_size: env_parsed("NOTES_BLOCK_PAGE_SIZE")
                .unwrap_or(yaml.notes.block_page_size),
            action_extension: std::env::var("NOTES_ACTION_EXTENSION")
                .unwrap_or(yaml.notes.action_extension),
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }

    pub fn metafield(&self) -> MetafieldLocation {
        MetafieldLocation {
            namespace: self.notes_namespace.clone(),
            key: self.notes_key.clone(),
        }
    }

    /// Settings for the Admin API client
    pub fn admin_client_config(&self) -> AdminClientConfig {
        AdminClientConfig {
            shop_domain: self.shop_domain.clone(),
            access_token: self.access_token.clone(),
            api_version: self.api_version.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            endpoint_override: self.endpoint_override.clone(),
            metafield: self.metafield(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<NoteManager>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state backed by the Shopify Admin API
    pub fn new(config: Config) -> Result<Self> {
        if config.shop_domain.is_empty() && config.endpoint_override.is_none() {
            anyhow::bail!("shop domain is not configured (SHOPIFY_SHOP_DOMAIN)");
        }
        if config.access_token.is_empty() {
            tracing::warn!("No Admin API access token configured; requests will be rejected");
        }

        let client = Arc::new(
            AdminClient::new(config.admin_client_config())
                .context("Failed to build Admin API client")?,
        );
        tracing::info!(endpoint = %client.endpoint(), "Using Shopify Admin API");

        Ok(Self::with_backend(config, client.clone(), client))
    }

    /// Create application state over arbitrary store implementations
    pub fn with_backend(
        config: Config,
        store: Arc<dyn NoteStore>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            notes: Arc::new(NoteManager::new(store)),
            catalog,
            config: Arc::new(config),
        }
    }
}

/// Serve the HTTP API until the process is interrupted
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let state = AppState::new(config)?;
    let app = api::create_router(Arc::new(api::handlers::ServerState::new(state)));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Product notes API listening");

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => result.context("Server error")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
