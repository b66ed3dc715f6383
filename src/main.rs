use std::env;
use std::fs;
use std::io::{self, Read};

use anyhow::{anyhow, Context};
use message_lambda::prelude::*;
use serde_json::Value;

#[derive(Debug, PartialEq)]
enum Command {
    Invoke(Option<String>),
    Event(String),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let command = parse_args(&args).inspect_err(|_| print_usage(program(&args)))?;
    let config = HandlerConfig::from_env().context("Invalid configuration")?;
    let response = execute(&config, command)?;
    println!("{}", response);
    Ok(())
}

fn program(args: &[String]) -> &str {
    args.first().map_or("message_lambda", String::as_str)
}

fn print_usage(cmd: &str) {
    eprintln!("Usage: {} <command>", cmd);
    eprintln!("Commands:");
    eprintln!("  invoke [BODY]  Run the handler on an event with the given body");
    eprintln!("  event <PATH>   Run the handler on a full event read from PATH ('-' for stdin)");
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    match args.get(1).map(String::as_str) {
        None => Err(anyhow!("No arguments has been provided")),
        Some("invoke") => Ok(Command::Invoke(args.get(2).cloned())),
        Some("event") => args
            .get(2)
            .cloned()
            .map(Command::Event)
            .ok_or_else(|| anyhow!("The event command needs a file path or '-'")),
        Some(other) => Err(anyhow!("Invalid command: {}", other)),
    }
}

fn execute(config: &HandlerConfig, command: Command) -> anyhow::Result<OutboundResponse> {
    prepare(config)?;
    match command {
        Command::Invoke(body) => {
            let event = match body {
                Some(body) => InboundEvent::with_body(body),
                None => InboundEvent::without_body(),
            };
            Ok(handle(event))
        }
        Command::Event(path) => {
            let raw = read_event(&path)?;
            let payload: Value =
                serde_json::from_str(&raw).context("Event file is not valid JSON")?;
            Ok(handle_value(payload))
        }
    }
}

fn read_event(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Could not read event from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Could not read event file {}", path))
    }
}

/// Builds the inference client up front when configured to, as the Lambda
/// binary does at cold start.
fn prepare(config: &HandlerConfig) -> anyhow::Result<()> {
    if config.inference_client != InferenceClientMode::Eager {
        return Ok(());
    }
    let rt = tokio::runtime::Runtime::new()?;
    let provider = rt
        .block_on(shared_provider(config))
        .context("Could not initialize inference client")?;
    tracing::debug!(region = ?provider.region().ok(), "Inference client ready");
    Ok(())
}
