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

// Chat commands module

use colored::*;

// Chat commands
pub const HELP_COMMAND: &str = "/help";
pub const CLEAR_COMMAND: &str = "/clear";
pub const HISTORY_COMMAND: &str = "/history";
pub const EXIT_COMMAND: &str = "/exit";
pub const QUIT_COMMAND: &str = "/quit";

// Plain word that also ends the session
const EXIT_WORD: &str = "exit";

// List of all available commands for autocomplete
pub const COMMANDS: [&str; 5] = [
	HELP_COMMAND,
	CLEAR_COMMAND,
	HISTORY_COMMAND,
	EXIT_COMMAND,
	QUIT_COMMAND,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
	Help,
	Clear,
	History,
	Exit,
	Unknown(String),
}

/// Interpret a line of input. `None` means the line is a message for the assistant.
pub fn parse_command(line: &str) -> Option<ChatCommand> {
	let line = line.trim();

	if line.eq_ignore_ascii_case(EXIT_WORD) {
		return Some(ChatCommand::Exit);
	}
	if !line.starts_with('/') {
		return None;
	}

	let command = line.split_whitespace().next().unwrap_or(line);
	let parsed = match command {
		HELP_COMMAND => ChatCommand::Help,
		CLEAR_COMMAND => ChatCommand::Clear,
		HISTORY_COMMAND => ChatCommand::History,
		EXIT_COMMAND | QUIT_COMMAND => ChatCommand::Exit,
		other => ChatCommand::Unknown(other.to_string()),
	};
	Some(parsed)
}

pub fn print_help() {
	println!("{}", "Available commands:".bright_cyan());
	println!("  {}  Show this help", HELP_COMMAND.green());
	println!("  {} Start over with a fresh conversation", CLEAR_COMMAND.green());
	println!("  {} Show the conversation so far", HISTORY_COMMAND.green());
	println!("  {}  Leave the session (also {} or Ctrl+D)", EXIT_COMMAND.green(), QUIT_COMMAND.green());
	println!();
	println!("Anything else is sent to the assistant.");
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_plain_text_is_not_a_command() {
		assert_eq!(parse_command("hello"), None);
		assert_eq!(parse_command("exit strategy?"), None);
		assert_eq!(parse_command(""), None);
	}

	#[test]
	fn test_known_commands() {
		assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
		assert_eq!(parse_command("  /clear  "), Some(ChatCommand::Clear));
		assert_eq!(parse_command("/history"), Some(ChatCommand::History));
		assert_eq!(parse_command("/exit"), Some(ChatCommand::Exit));
		assert_eq!(parse_command("/quit now"), Some(ChatCommand::Exit));
		assert_eq!(parse_command("EXIT"), Some(ChatCommand::Exit));
	}

	#[test]
	fn test_unknown_command() {
		assert_eq!(
			parse_command("/save file.txt"),
			Some(ChatCommand::Unknown("/save".to_string()))
		);
	}
}
