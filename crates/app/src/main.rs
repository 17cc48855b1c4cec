//! FaqChat - terminal client for the FAQ assistant backend.
//!
//! Asks for a name, authenticates it, then answers questions line by line.

// The chat transcript is the program's output.
#![allow(clippy::print_stdout)]

use anyhow::Context;
use faqchat_core::{ChatSession, SuggestionMatcher};
use faqchat_domain::{Config, Message};
use faqchat_lib::cli::HELP;
use faqchat_lib::utils::logging::{self, error_label, LogFormat};
use faqchat_lib::{AppContext, Command};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before logging so RUST_LOG from the file applies
    let dotenv = dotenvy::dotenv();
    logging::init_tracing(LogFormat::from_env())?;
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let config = faqchat_infra::config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "no configuration found, using defaults");
        Config::default()
    });
    let context = AppContext::new_with_config(config).context("failed to initialize FaqChat")?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let Some(mut session) = sign_in(&context, &mut input).await? else {
        return Ok(());
    };

    println!("\nHi {}! {HELP}\n", session.identity());
    print_questions(&context.suggestions);

    loop {
        prompt("\nyou> ").await?;
        let Some(line) = input.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Questions => print_questions(&context.suggestions),
            Command::Suggest(text) => {
                print_suggestions(&context.suggestions.suggest(&text, session.has_error()));
            }
            Command::Retry => match session.last_failed_question() {
                Some(question) => {
                    println!("(retrying: {question})");
                    let result = session.regenerate().await;
                    reply(result, &session);
                }
                None => println!("Nothing to retry."),
            },
            Command::Ask(_) if session.has_error() => {
                println!("The last question failed. Type /retry to send it again.");
            }
            Command::Ask(text) => {
                let result = session.send(&text).await;
                reply(result, &session);
                if !session.has_error() {
                    print_suggestions(&related(&context.suggestions, &session, &text));
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Prompt for a name until authentication succeeds. `None` on end of input.
async fn sign_in(context: &AppContext, input: &mut Input) -> anyhow::Result<Option<ChatSession>> {
    loop {
        prompt("Enter your name (3-15 characters): ").await?;
        let Some(name) = input.next_line().await? else {
            return Ok(None);
        };

        match context.start_chat(name.trim()).await {
            Ok(session) => return Ok(Some(session)),
            Err(e) => {
                tracing::debug!(kind = error_label(&e), "sign-in failed");
                println!("Could not start a chat: {e}");
            }
        }
    }
}

fn reply(result: faqchat_domain::Result<Message>, session: &ChatSession) {
    match result {
        Ok(message) => println!("bot> {}", message.content),
        Err(e) if session.has_error() => {
            tracing::debug!(kind = error_label(&e), "question failed");
            println!("bot> Something went wrong: {e}\n     Type /retry to try again.");
        }
        Err(e) => println!("{e}"),
    }
}

/// Suggestions for the question just asked, minus the question itself.
fn related(matcher: &SuggestionMatcher, session: &ChatSession, asked: &str) -> Vec<&'static str> {
    matcher
        .suggest(asked, session.has_error())
        .into_iter()
        .filter(|q| !q.eq_ignore_ascii_case(asked.trim()))
        .collect()
}

fn print_questions(matcher: &SuggestionMatcher) {
    println!("Try asking:");
    for question in matcher.predefined() {
        println!("  - {question}");
    }
}

fn print_suggestions(suggestions: &[&str]) {
    if suggestions.is_empty() {
        return;
    }
    println!("Related questions:");
    for question in suggestions {
        println!("  - {question}");
    }
}

async fn prompt(text: &str) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
