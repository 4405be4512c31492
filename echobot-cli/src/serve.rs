//! Serve command - start the local HTTP server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to echobot-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use echobot_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServeArgs {
    /// Port number to listen on
    #[arg(long, env = "PORT", default_value = "5001")]
    pub port: u16,

    /// Directory containing templates/ and static/
    #[arg(long, default_value = "site")]
    pub asset_root: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServeArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting echobot server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServeArgs) -> Result<ServerConfig> {
    validate_asset_root(&args.asset_root)?;

    Ok(ServerConfig {
        port: args.port,
        asset_root: args.asset_root.clone(),
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that the asset root exists
fn validate_asset_root(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Asset root does not exist: {}. Server will start but / and /static/ will fail.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!("Asset root exists but is not a directory: {}", path.display());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
