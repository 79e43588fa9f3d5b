//! Session CLI commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, Notice, OutputFormat};
use pulsedeck_auth::TokenManager;
use pulsedeck_core::config::AppConfig;
use pulsedeck_core::error::AppError;
use pulsedeck_entity::user::AuthUser;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email
    #[arg(short, long)]
    pub email: String,
    /// Password
    #[arg(short, long)]
    pub password: String,
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Roles
    roles: String,
    /// Tenant
    tenant: String,
    /// Token expiry
    expires: String,
    /// Token valid
    valid: String,
}

impl SessionRow {
    fn new(user: &AuthUser, tokens: &TokenManager) -> Self {
        let expires = tokens
            .decode(&user.token)
            .ok()
            .and_then(|claims| claims.expires_at())
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());

        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            roles: user
                .roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            tenant: user.tenant_id.clone(),
            expires,
            valid: if tokens.is_valid(&user.token) { "✓" } else { "✗" }.to_string(),
        }
    }
}

/// Sign in and persist the session
pub async fn login(args: &LoginArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::open_session(config)?;
    session.settled().await;

    session.login(&args.email, &args.password)?;

    output::notice(Notice::Done, &format!("Signed in as {}", args.email));
    print_current(session.current_user().as_ref(), config, format)
}

/// Sign out and delete the stored session
pub async fn logout(config: &AppConfig) -> Result<(), AppError> {
    let session = super::open_session(config)?;
    session.settled().await;

    let was_signed_in = session.is_authenticated();
    let redirect = session.logout();

    if was_signed_in {
        output::notice(Notice::Done, &format!("Signed out, continue at {}", redirect));
    } else {
        output::notice(Notice::Warn, "No active session");
    }
    Ok(())
}

/// Show the restored session
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::open_session(config)?;
    session.settled().await;

    print_current(session.current_user().as_ref(), config, format)
}

/// Reissue the token of the restored session
pub async fn refresh(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::open_session(config)?;
    session.settled().await;

    if !session.is_authenticated() {
        return Err(AppError::session("No active session to refresh"));
    }

    session.refresh_token();
    output::notice(Notice::Done, "Token refreshed");
    print_current(session.current_user().as_ref(), config, format)
}

fn print_current(
    user: Option<&AuthUser>,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match user {
        Some(user) => {
            let tokens = TokenManager::from_config(&config.auth)?;
            output::emit_row(&SessionRow::new(user, &tokens), format);
        }
        None => output::notice(Notice::Warn, "Not signed in"),
    }
    Ok(())
}
