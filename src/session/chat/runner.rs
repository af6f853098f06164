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

// Interactive session runner

use super::animation::{clear_typing_indicator, show_typing_animation};
use super::assistant_output::{print_assistant_reply, print_message, print_transcript};
use super::commands::{parse_command, print_help, ChatCommand, EXIT_COMMAND, HELP_COMMAND};
use super::input::{create_editor, read_user_input};
use crate::config::Config;
use crate::session::{ChatBackend, ChatSession, HttpChatBackend, TurnOutcome};
use crate::{log_debug, log_info};
use anyhow::Result;
use colored::*;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Display settings for the interactive shell
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
	/// Pause before a successful reply is shown; zero disables it
	pub typing_delay: Duration,
}

impl SessionOptions {
	pub fn from_config(config: &Config) -> Self {
		Self {
			typing_delay: Duration::from_millis(config.typing_delay_ms),
		}
	}
}

// Run an interactive session against the configured endpoint
pub async fn run_interactive_session(config: &Config, options: SessionOptions) -> Result<()> {
	let backend = HttpChatBackend::from_config(config)?;
	log_info!("Chat requests go to {} ({} backend)", backend.chat_url(), backend.name());

	println!("{}", "palaver chat".bright_cyan().bold());
	println!(
		"{} {}",
		"Endpoint:".yellow(),
		config.endpoint.bright_white()
	);
	println!(
		"Type {} for commands, {} to leave.",
		HELP_COMMAND.green(),
		EXIT_COMMAND.green()
	);
	println!();

	let mut session = ChatSession::new(backend);
	if let Some(greeting) = session.transcript().last() {
		print_message(greeting);
	}

	let mut editor = create_editor()?;

	loop {
		let line = read_user_input(&mut editor)?;

		match parse_command(&line) {
			Some(ChatCommand::Exit) => break,
			Some(ChatCommand::Help) => print_help(),
			Some(ChatCommand::History) => print_transcript(session.transcript()),
			Some(ChatCommand::Clear) => {
				session.reset_session();
				println!("{}", "Conversation cleared.".bright_yellow());
				if let Some(greeting) = session.transcript().last() {
					print_message(greeting);
				}
			}
			Some(ChatCommand::Unknown(command)) => {
				println!(
					"{} {}. Type {} for the list.",
					"Unknown command".bright_red(),
					command,
					HELP_COMMAND.green()
				);
			}
			None => {
				session.set_pending_input(line);
				run_turn(&mut session, options).await;
			}
		}
	}

	Ok(())
}

/// Send the pending input with the typing indicator running, then print the reply.
/// `None` means the pending input was blank and nothing was sent.
async fn run_turn<B: ChatBackend>(
	session: &mut ChatSession<B>,
	options: SessionOptions,
) -> Option<TurnOutcome> {
	let text = session.pending_input().to_string();
	let turn = session.begin_turn(&text)?;

	let stop = Arc::new(AtomicBool::new(false));
	let animation = tokio::spawn(show_typing_animation(stop.clone()));

	let result = or_interrupt(session.backend().send(turn.messages())).await;
	let outcome = session.settle_turn(turn, result);

	// Only real replies get the typing pause; errors show up right away
	if outcome == TurnOutcome::Replied && !options.typing_delay.is_zero() {
		or_interrupt(tokio::time::sleep(options.typing_delay)).await;
	}

	stop.store(true, Ordering::SeqCst);
	match animation.await {
		Ok(Err(e)) => log_debug!("Typing indicator failed: {}", e),
		Err(e) => log_debug!("Typing indicator task failed: {}", e),
		Ok(Ok(())) => {}
	}

	if let Some(reply) = session.transcript().last() {
		print_assistant_reply(reply.content(), outcome);
	}
	Some(outcome)
}

/// Await `fut`, or leave the process on Ctrl+C with the cursor the indicator hid shown again
async fn or_interrupt<F: Future>(fut: F) -> F::Output {
	tokio::select! {
		output = fut => output,
		Ok(()) = tokio::signal::ctrl_c() => {
			clear_typing_indicator();
			println!("{}", "Interrupted.".bright_yellow());
			std::process::exit(130);
		}
	}
}
