//! Chat command - terminal client for a running echobot server
//!
//! Type a message to send it. `new` starts a fresh session, `reset` clears
//! the current one, and `quit`, `exit` or `q` leave.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};

use echobot_core::{
    ChatReply, ChatRequest, Conversation, FileStore, ResetReply, ResetRequest, Sender,
};

#[derive(Args)]
pub struct ChatArgs {
    /// Base URL of the server
    #[arg(long, default_value = "http://localhost:5001")]
    pub url: String,

    /// Where the session id is remembered between runs
    #[arg(long, default_value = ".echobot/storage.json")]
    pub session_file: PathBuf,
}

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    NewSession,
    Reset,
    Say(String),
    Nothing,
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => Command::Nothing,
        "quit" | "exit" | "q" => Command::Quit,
        "new" => Command::NewSession,
        "reset" => Command::Reset,
        _ => Command::Say(trimmed.to_string()),
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub fn run(args: ChatArgs) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(chat_loop(args))
}

async fn chat_loop(args: ChatArgs) -> Result<()> {
    let client = Client::new();
    let mut conversation = Conversation::new(FileStore::new(&args.session_file));

    println!("Connected to {}", args.url);
    println!("Type 'quit', 'exit', or 'q' to end the conversation.");
    println!("Type 'new' to start a new session, 'reset' to clear this one.");
    if let Some(session) = conversation.session() {
        println!("Resuming session {}", session);
    }
    print_last_bot_message(&conversation);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Nothing => continue,
            Command::Quit => break,
            Command::NewSession => {
                let request = conversation.begin_new_session();
                let outcome = post_reset(&client, &args.url, &request).await;
                conversation.finish_reset(outcome);
                if let Some(session) = conversation.session() {
                    println!("Starting new session {}", session);
                }
                print_last_bot_message(&conversation);
            }
            Command::Reset => {
                let request = conversation.begin_reset();
                let outcome = post_reset(&client, &args.url, &request).await;
                conversation.finish_reset(outcome);
                print_last_bot_message(&conversation);
            }
            Command::Say(text) => {
                let Some(request) = conversation.begin_send(&text) else {
                    continue;
                };
                let outcome = post_chat(&client, &args.url, &request).await;
                conversation.finish_send(outcome);
                print_last_bot_message(&conversation);
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn post_chat(
    client: &Client,
    base: &str,
    request: &ChatRequest,
) -> Result<ChatReply, reqwest::Error> {
    client
        .post(endpoint(base, "/chat"))
        .json(request)
        .send()
        .await?
        .json::<ChatReply>()
        .await
}

async fn post_reset(
    client: &Client,
    base: &str,
    request: &ResetRequest,
) -> Result<ResetReply, reqwest::Error> {
    client
        .post(endpoint(base, "/reset"))
        .json(request)
        .send()
        .await?
        .json::<ResetReply>()
        .await
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "You: ")?;
    stdout.flush()?;
    Ok(())
}

fn print_last_bot_message(conversation: &Conversation<FileStore>) {
    if let Some(message) = conversation.transcript().last_message() {
        if message.sender == Sender::Bot {
            println!("Bot: {}", message.text);
        }
    }
}
