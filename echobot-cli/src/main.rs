//! echobot CLI - Command-line interface
//!
//! Commands:
//! - serve: Run the local HTTP server
//! - invoke: Run one serverless function event
//! - render: Format bot text as HTML
//! - chat: Talk to a running server from the terminal

mod chat;
mod input;
mod invoke;
mod render;
mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "echobot")]
#[command(about = "Static-response chatbot stand-in", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local HTTP server
    Serve(serve::ServeArgs),
    /// Run a single function event and print the response
    Invoke(invoke::InvokeArgs),
    /// Format bot text the way the chat window does
    Render(render::RenderArgs),
    /// Interactive terminal chat against a running server
    Chat(chat::ChatArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args),
        Commands::Invoke(args) => invoke::run(args),
        Commands::Render(args) => render::run(args),
        Commands::Chat(args) => chat::run(args),
    }
}
