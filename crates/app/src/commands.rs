//! Command execution.

use std::path::PathBuf;
use std::sync::Arc;

use rental_admin_application::{
    ApiError, AuthenticatedClient, Login, LoginInput, Logout, Navigator, SessionStore,
    SessionStoreError, TransportError,
};
use rental_admin_domain::RequestEnvelope;
use rental_admin_infrastructure::{
    ClientConfig, ConfigError, FileSessionStore, LoginNavigator, ReqwestTransport,
    TokioFileSystem,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::{Cli, Command};

/// Errors that stop a command before or outside an API call.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP transport could not be created.
    #[error("failed to create HTTP client: {0}")]
    Transport(#[from] TransportError),

    /// The session store failed.
    #[error(transparent)]
    Session(#[from] SessionStoreError),

    /// No session file location could be determined.
    #[error("no config directory found; pass --session-file")]
    NoSessionPath,

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves the effective configuration: file and environment, then CLI flags.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.validate()?;
    Ok(config)
}

fn session_path(cli: &Cli) -> Result<PathBuf, CommandError> {
    cli.session_file
        .clone()
        .or_else(FileSessionStore::<TokioFileSystem>::default_path)
        .ok_or(CommandError::NoSessionPath)
}

/// Runs the parsed command and returns the JSON to print.
///
/// # Errors
///
/// Returns an error if setup fails or the API call is rejected.
pub async fn run(cli: Cli) -> Result<Value, CommandError> {
    let config = resolve_config(&cli)?;
    let path = session_path(&cli)?;
    debug!(base_url = %config.base_url, session_file = %path.display(), "Resolved configuration");

    let session: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(TokioFileSystem::new(), path));

    match cli.command {
        Command::Logout => {
            Logout::new(session).execute().await?;
            Ok(json!({"success": true, "data": null, "message": "Signed out"}))
        }
        Command::Login { email, password } => {
            let login = Login::new(build_client(&config, session)?)
                .execute(LoginInput { email, password })
                .await?;
            Ok(json!({
                "success": true,
                "data": {"user": login.user, "token_type": login.token_type},
                "message": "Signed in"
            }))
        }
        Command::Get { path, query } => {
            let request = query
                .into_iter()
                .fold(RequestEnvelope::get(path), |request, (name, value)| {
                    request.with_query(name, value)
                });
            send(&config, session, request).await
        }
        Command::Post { path, data } => {
            send(&config, session, RequestEnvelope::post(path, data)).await
        }
        Command::Put { path, data } => send(&config, session, RequestEnvelope::put(path, data)).await,
        Command::Patch { path, data } => {
            send(&config, session, RequestEnvelope::patch(path, data)).await
        }
        Command::Delete { path } => send(&config, session, RequestEnvelope::delete(path)).await,
    }
}

fn build_client(
    config: &ClientConfig,
    session: Arc<dyn SessionStore>,
) -> Result<Arc<AuthenticatedClient<ReqwestTransport>>, CommandError> {
    let transport = Arc::new(ReqwestTransport::new(config)?);
    let navigator: Arc<dyn Navigator> = Arc::new(LoginNavigator::new(config.login_path.clone()));
    Ok(Arc::new(
        AuthenticatedClient::new(transport, session, navigator)
            .with_refresh_path(config.refresh_path.clone()),
    ))
}

async fn send(
    config: &ClientConfig,
    session: Arc<dyn SessionStore>,
    request: RequestEnvelope,
) -> Result<Value, CommandError> {
    let client = build_client(config, session)?;
    Ok(client.execute(request).await?.into_value())
}
