//! Invoke command - run one function event locally
//!
//! Reads a platform event (`{"path", "httpMethod", "body", ...}`) and prints
//! the `{"statusCode", "headers", "body"}` object the function returns.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use echobot_server::{handle, FunctionEvent, FunctionResponse, ServerConfig};

use crate::input::read_input;

#[derive(Args)]
pub struct InvokeArgs {
    /// Event JSON file (reads stdin when omitted)
    #[arg(long, value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// Directory containing templates/ and static/
    #[arg(long, default_value = "site")]
    pub asset_root: PathBuf,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: InvokeArgs) -> Result<()> {
    let raw = read_input(args.event.as_deref())?;
    let config = ServerConfig {
        asset_root: args.asset_root,
        ..ServerConfig::default()
    };

    let response = invoke(&raw, &config)?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}

/// Decode an event and run it
fn invoke(raw: &str, config: &ServerConfig) -> Result<FunctionResponse> {
    let event: FunctionEvent =
        serde_json::from_str(raw).context("event is not a valid function event")?;
    Ok(handle(&event, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_reset_event() {
        let raw = r#"{"path":"/.netlify/functions/app/reset","httpMethod":"POST","body":"{\"session_id\":\"s9\"}"}"#;
        let response = invoke(raw, &ServerConfig::default()).unwrap();

        assert_eq!(response.status_code, 200);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["session_id"], "s9");
    }

    #[test]
    fn test_invoke_rejects_non_event() {
        assert!(invoke("[1, 2, 3]", &ServerConfig::default()).is_err());
    }
}
