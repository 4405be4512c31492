//! Render command - print bot text as chat window HTML

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use echobot_core::markdown_to_html;

use crate::input::read_input;

#[derive(Args)]
pub struct RenderArgs {
    /// Text file to format (reads stdin when omitted)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Keep the final newline instead of dropping it
    #[arg(long)]
    pub keep_trailing_newline: bool,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    println!("{}", render(&text, args.keep_trailing_newline));
    Ok(())
}

fn render(text: &str, keep_trailing_newline: bool) -> String {
    let text = if keep_trailing_newline {
        text
    } else {
        text.strip_suffix('\n').unwrap_or(text)
    };
    markdown_to_html(text)
}
