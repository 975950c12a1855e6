use api_client::config::load_config;
use api_client::telemetry::init_tracing;
use api_client::ApiClient;
use shared_types::{ApiConfig, AppError, AuthSession, Role};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Everything a form needs from the running app, built once after sign-in
/// and handed to each form explicitly.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: AuthSession,
    pub theme: Theme,
}

impl AppContext {
    /// Build an authenticated client for `session`.
    pub fn new(config: &ApiConfig, session: AuthSession) -> Result<Self, AppError> {
        let api = ApiClient::new(config)?.with_token(session.access_token.clone());
        Ok(Self {
            api,
            session,
            theme: Theme::default(),
        })
    }

    /// Load `config.toml`, install logging and build the context. Called
    /// once after sign-in.
    pub fn start(session: AuthSession) -> Result<Self, AppError> {
        let config = load_config();
        init_tracing(&config.logging);
        tracing::info!(base_url = %config.api.base_url, role = %session.user.role, "Starting field-ops session");
        Self::new(&config.api, session)
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn role(&self) -> Role {
        self.session.user.role
    }

    /// Value written to `created_by` / `updated_by`.
    pub fn acting_user(&self) -> &str {
        &self.session.user.email
    }

    pub fn validation(&self) -> ValidationContext {
        ValidationContext { role: self.role() }
    }
}

/// Flags a validator needs besides the form itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub role: Role,
}

impl ValidationContext {
    pub fn office() -> Self {
        Self { role: Role::Office }
    }

    pub fn technician() -> Self {
        Self {
            role: Role::Technician,
        }
    }
}
