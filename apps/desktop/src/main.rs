use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    card::counter_label, load_settings, CardKey, CardView, ClientSettings, FeedController,
    GestureInput, GestureReaction, GestureRecognizer, HttpBackend, SubmissionOutcome,
    EXIT_ANIMATION,
};
use shared::domain::Choice;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse the event feed and record save/skip decisions")]
struct Args {
    /// Settings file (defaults to ./swipe.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    access_token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ranked feed.
    Feed,
    /// Print recorded decisions.
    History,
    /// Interactive swipe session on stdin.
    Swipe,
}

#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Gesture(Vec<GestureInput>),
    Reload,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<SessionCommand> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()?.to_ascii_lowercase().as_str() {
        "left" | "a" => SessionCommand::Gesture(vec![GestureInput::Key(CardKey::ArrowLeft)]),
        "right" | "d" => SessionCommand::Gesture(vec![GestureInput::Key(CardKey::ArrowRight)]),
        "skip" => SessionCommand::Gesture(vec![GestureInput::Button(Choice::Skip)]),
        "save" => SessionCommand::Gesture(vec![GestureInput::Button(Choice::Save)]),
        "drag" => {
            let dx = parts.next()?.parse::<f32>().ok()?;
            SessionCommand::Gesture(vec![
                GestureInput::Start { x: 0.0 },
                GestureInput::Move { x: dx },
                GestureInput::End,
            ])
        }
        "reload" | "r" => SessionCommand::Reload,
        "help" | "?" => SessionCommand::Help,
        "quit" | "q" | "exit" => SessionCommand::Quit,
        _ => return None,
    };
    Some(command)
}

fn print_help() {
    println!("commands: left|a, right|d, skip, save, drag <dx>, reload|r, help, quit|q");
}

fn print_current(controller: &FeedController) {
    if let Some(banner) = controller.banner() {
        println!("! {}", banner.user_message());
    }

    let Some(event) = controller.current_item() else {
        println!("No more events. You've reached the end of your recommendations; `reload` to fetch the feed again.");
        return;
    };

    let view = CardView::new(event, controller.categories());
    println!();
    println!(
        "[{}] {}",
        counter_label(controller.position(), controller.session().len()),
        view.title
    );
    if let Some(price) = &view.price {
        println!("  Price      {price}");
    }
    if let Some(date) = &view.date {
        println!("  Date       {date}");
    }
    if let Some(organizer) = view.organizer {
        println!("  Organizer  {organizer}");
    }
    if !view.chips.is_empty() {
        println!("  Categories {}", view.chips.join(", "));
    }
    if let Some(description) = view.description {
        println!("  {description}");
    }
    if let Some(url) = view.picture_url {
        println!("  Picture    {url}");
    }
}

async fn run_gesture(
    controller: &mut FeedController,
    recognizer: &mut GestureRecognizer,
    inputs: Vec<GestureInput>,
) {
    for input in inputs {
        recognizer.set_disabled(controller.is_submitting());
        match recognizer.handle(input) {
            GestureReaction::SnappedBack => println!("(snapped back)"),
            GestureReaction::Committing(choice) => {
                println!("-> {}", choice.label());
                tokio::time::sleep(EXIT_ANIMATION).await;
                if let GestureReaction::Committed(choice) =
                    recognizer.handle(GestureInput::AnimationFinished)
                {
                    match controller.submit_decision(choice).await {
                        SubmissionOutcome::Recorded { .. }
                        | SubmissionOutcome::Rejected
                        | SubmissionOutcome::Stale => {}
                        SubmissionOutcome::Ignored => println!("(nothing to decide)"),
                    }
                    // Retired after notifying; the next (or same) card gets a fresh one.
                    *recognizer = GestureRecognizer::with_threshold(recognizer.threshold());
                }
            }
            GestureReaction::Ignored
            | GestureReaction::DragStarted
            | GestureReaction::Dragged { .. }
            | GestureReaction::Committed(_) => {}
        }
    }
}

async fn run_swipe_session(settings: &ClientSettings, backend: Arc<HttpBackend>) -> Result<()> {
    let mut controller = FeedController::from_backend(backend);
    let mut recognizer = GestureRecognizer::with_threshold(settings.swipe_threshold);

    controller.load_feed().await;
    print_help();
    print_current(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(SessionCommand::Gesture(inputs)) => {
                if controller.current_item().is_none() {
                    println!("Nothing to swipe; `reload` to fetch the feed again.");
                    continue;
                }
                run_gesture(&mut controller, &mut recognizer, inputs).await;
            }
            Some(SessionCommand::Reload) => {
                controller.reload().await;
                recognizer = GestureRecognizer::with_threshold(settings.swipe_threshold);
            }
            Some(SessionCommand::Help) => {
                print_help();
                continue;
            }
            Some(SessionCommand::Quit) => break,
            None => {
                println!("unrecognized command: {line}");
                continue;
            }
        }
        print_current(&controller);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(server_url) = args.server_url {
        settings.server_url = client_core::config::normalize_server_url(&server_url);
    }
    if let Some(token) = args.access_token {
        settings.access_token = Some(token);
    }
    let backend = Arc::new(HttpBackend::from_settings(&settings)?);
    tracing::info!(server_url = %settings.server_url, "using events backend");

    match args.command {
        Command::Feed => {
            let mut controller = FeedController::from_backend(backend);
            controller.load_feed().await;
            if let Some(banner) = controller.banner() {
                anyhow::bail!("{banner}");
            }
            for (index, event) in controller.session().items().iter().enumerate() {
                let view = CardView::new(event, controller.categories());
                println!(
                    "{:>3}. #{} {} {}",
                    index + 1,
                    event.id.0,
                    view.title,
                    view.price.unwrap_or_default()
                );
            }
        }
        Command::History => {
            let swipes = backend.swipe_history().await?;
            if swipes.is_empty() {
                println!("No decisions recorded yet.");
            }
            for swipe in swipes {
                println!(
                    "{} event #{} {}",
                    swipe.created_at.format("%Y-%m-%d %H:%M"),
                    swipe.event_id.0,
                    Choice::from_liked(swipe.liked).label()
                );
            }
        }
        Command::Swipe => run_swipe_session(&settings, backend).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keyboard_and_button_commands() {
        assert_eq!(
            parse_command("left"),
            Some(SessionCommand::Gesture(vec![GestureInput::Key(
                CardKey::ArrowLeft
            )]))
        );
        assert_eq!(
            parse_command("SAVE"),
            Some(SessionCommand::Gesture(vec![GestureInput::Button(
                Choice::Save
            )]))
        );
        assert_eq!(parse_command("q"), Some(SessionCommand::Quit));
        assert_eq!(parse_command("r"), Some(SessionCommand::Reload));
    }

    #[test]
    fn drag_expands_to_full_pointer_sequence() {
        assert_eq!(
            parse_command("drag -150"),
            Some(SessionCommand::Gesture(vec![
                GestureInput::Start { x: 0.0 },
                GestureInput::Move { x: -150.0 },
                GestureInput::End,
            ]))
        );
        assert_eq!(parse_command("drag"), None);
        assert_eq!(parse_command("drag far"), None);
        assert_eq!(parse_command("jump"), None);
    }
}
