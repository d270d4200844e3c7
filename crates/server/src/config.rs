use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// A client application registered with the provider.
#[derive(Clone, Debug, Deserialize)]
pub struct AppRegistration {
    /// Identifier stored in grant records (`app_name`).
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uris: Vec<String>,
}

impl AppRegistration {
    pub fn is_redirect_uri_allowed(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|allowed| allowed == uri)
    }

    /// First registered redirect URI. Used as the error-redirect target when
    /// the submitted URI failed membership and cannot be trusted.
    pub fn first_redirect_uri(&self) -> Option<&str> {
        self.redirect_uris.first().map(String::as_str)
    }
}

/// A user role the provider can issue grants for, together with the external
/// authentication surface principals of that role sign in at.
#[derive(Clone, Debug, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    pub sign_in_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderConfig {
    /// When true, an existing access token for an `(app_name, owner)` pair is
    /// returned from implicit-flow requests instead of minting a new one.
    #[serde(default)]
    pub reuse_access_tokens: bool,
    pub apps: Vec<AppRegistration>,
    pub user_roles: Vec<RoleConfig>,
}

impl ProviderConfig {
    pub fn app_by_client_id(&self, client_id: &str) -> Option<&AppRegistration> {
        self.apps.iter().find(|app| app.client_id == client_id)
    }

    pub fn app_by_name(&self, name: &str) -> Option<&AppRegistration> {
        self.apps.iter().find(|app| app.name == name)
    }

    pub fn role(&self, name: &str) -> Option<&RoleConfig> {
        self.user_roles.iter().find(|role| role.name == name)
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    pub provider: ProviderConfig,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Load application configuration from `config.yaml` + environment overrides.
///
/// Environment variable override convention: any var matching the key path
/// separated by double underscores (e.g. `PROVIDER__REUSE_ACCESS_TOKENS`)
/// overrides the file value.
///
/// Returns a `ConfigError` instead of panicking so the caller can decide how
/// to fail.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};
    let cfg = Config::builder()
        .add_source(File::with_name("config.yaml"))
        .add_source(Environment::default().separator("__"))
        .build()?;

    let app: AppConfig = cfg.try_deserialize()?;
    validate(&app)?;
    Ok(app)
}

fn validate(app: &AppConfig) -> Result<(), ConfigError> {
    for registration in &app.provider.apps {
        if registration.name.is_empty() || registration.client_id.is_empty() {
            return Err(ConfigError::Validation(
                "app registrations require a name and a client_id".into(),
            ));
        }
        if registration.redirect_uris.is_empty() {
            return Err(ConfigError::Validation(format!(
                "app '{}' has no redirect_uris",
                registration.name
            )));
        }
    }
    let mut client_ids: Vec<&str> = app
        .provider
        .apps
        .iter()
        .map(|a| a.client_id.as_str())
        .collect();
    client_ids.sort_unstable();
    client_ids.dedup();
    if client_ids.len() != app.provider.apps.len() {
        return Err(ConfigError::Validation("duplicate client_id".into()));
    }
    for role in &app.provider.user_roles {
        if role.name.is_empty() || role.sign_in_url.is_empty() {
            return Err(ConfigError::Validation(
                "user roles require a name and a sign_in_url".into(),
            ));
        }
    }
    Ok(())
}

/// Convenience helper for binaries wanting panic-on-error behaviour.
pub fn load_config_or_panic() -> AppConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => panic!("Failed to load configuration: {e}"),
    }
}
