// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::io::{self, IsTerminal, Read};

use palaver::config::Config;
use palaver::session::{ChatSession, HttpChatBackend, TurnOutcome};

#[derive(Args, Debug)]
pub struct AskArgs {
	/// Message to send; read from stdin when omitted
	#[arg(value_name = "INPUT")]
	pub input: Option<String>,

	/// Chat backend base address (runtime only, not saved)
	#[arg(long)]
	pub endpoint: Option<String>,

	/// Output raw text without colors
	#[arg(long)]
	pub raw: bool,
}

fn read_input(args: &AskArgs) -> Result<String> {
	if let Some(input) = &args.input {
		return Ok(input.clone());
	}

	if io::stdin().is_terminal() {
		return Err(anyhow!(
			"No input provided. Pass a message or pipe one through stdin"
		));
	}

	let mut buffer = String::new();
	io::stdin()
		.read_to_string(&mut buffer)
		.context("Failed to read from stdin")?;
	Ok(buffer)
}

/// Process exit status for a finished turn: only a real reply counts as success
pub fn exit_code(outcome: TurnOutcome) -> i32 {
	match outcome {
		TurnOutcome::Replied => 0,
		TurnOutcome::ApplicationError | TurnOutcome::TransportError => 1,
	}
}

/// Run a single turn on a fresh session and print the reply
pub async fn execute(args: &AskArgs, mut config: Config) -> Result<TurnOutcome> {
	if let Some(endpoint) = &args.endpoint {
		config.endpoint = endpoint.clone();
		config.validate_endpoint()?;
	}

	let input = read_input(args)?;
	if input.trim().is_empty() {
		return Err(anyhow!("Input is empty"));
	}

	let backend = HttpChatBackend::from_config(&config)?;
	let mut session = ChatSession::new(backend);

	let Some(outcome) = session.submit_message(&input).await else {
		return Err(anyhow!("Input is empty"));
	};
	let reply = session
		.transcript()
		.last()
		.map(|message| message.content().to_string())
		.unwrap_or_default();

	match (args.raw, outcome) {
		(true, TurnOutcome::Replied) => println!("{}", reply),
		(true, _) => eprintln!("{}", reply),
		(false, TurnOutcome::Replied) => println!("{}", reply.bright_green()),
		(false, _) => eprintln!("{}", reply.yellow()),
	}

	Ok(outcome)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::net::TcpListener;

	fn args(input: &str, endpoint: Option<String>) -> AskArgs {
		AskArgs {
			input: Some(input.to_string()),
			endpoint,
			raw: true,
		}
	}

	#[test]
	fn test_exit_code_per_outcome() {
		assert_eq!(exit_code(TurnOutcome::Replied), 0);
		assert_eq!(exit_code(TurnOutcome::ApplicationError), 1);
		assert_eq!(exit_code(TurnOutcome::TransportError), 1);
	}

	#[tokio::test]
	async fn test_unreachable_backend_exits_non_zero() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let outcome = execute(
			&args("hello", Some(format!("http://{}", addr))),
			Config::default(),
		)
		.await
		.unwrap();
		assert_eq!(outcome, TurnOutcome::TransportError);
		assert_ne!(exit_code(outcome), 0);
	}

	#[tokio::test]
	async fn test_blank_input_is_rejected() {
		assert!(execute(&args("  \n", None), Config::default()).await.is_err());
	}

	#[tokio::test]
	async fn test_invalid_endpoint_is_rejected() {
		let result = execute(
			&args("hello", Some("localhost:8000".to_string())),
			Config::default(),
		)
		.await;
		assert!(result.is_err());
	}
}
