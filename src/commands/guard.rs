//! Route guard CLI commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pulsedeck_auth::{GuardDecisionEngine, RouteAccess, RouteTable};
use pulsedeck_core::config::AppConfig;
use pulsedeck_core::error::AppError;

/// Arguments for `guard`
#[derive(Debug, Args)]
pub struct GuardArgs {
    /// URL to evaluate, e.g. `/dashboard/customize`
    pub url: String,
}

/// Guard decision display row
#[derive(Debug, Serialize, Tabled)]
struct DecisionRow {
    /// Attempted URL
    url: String,
    /// Decision
    decision: String,
    /// Redirect target
    location: String,
}

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    /// Path
    path: String,
    /// Access class
    access: String,
    /// Required roles
    roles: String,
}

/// Evaluate the guard for a URL against the stored session
pub async fn execute(args: &GuardArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::open_session(config)?;
    let engine = GuardDecisionEngine::new(session, RouteTable::dashboard());

    let decision = engine.decide_settled(&args.url).await;
    let location = decision
        .location(&config.session)
        .unwrap_or_else(|| "-".to_string());

    output::emit_row(
        &DecisionRow {
            url: args.url.clone(),
            decision: decision.to_string(),
            location,
        },
        format,
    );
    Ok(())
}

/// List declared routes
pub fn routes(format: OutputFormat) -> Result<(), AppError> {
    let table = RouteTable::dashboard();
    let rows: Vec<RouteRow> = table
        .iter()
        .map(|(path, access)| {
            let (access, roles) = match access {
                RouteAccess::Public => ("public", "-".to_string()),
                RouteAccess::Open => ("open", "-".to_string()),
                RouteAccess::Protected { required_roles } if required_roles.is_empty() => {
                    ("protected", "any".to_string())
                }
                RouteAccess::Protected { required_roles } => (
                    "protected",
                    required_roles
                        .iter()
                        .map(|r| r.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
            };
            RouteRow {
                path: path.to_string(),
                access: access.to_string(),
                roles,
            }
        })
        .collect();

    output::emit_rows(&rows, format);
    Ok(())
}
