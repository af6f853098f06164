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

// User input handling module

use super::commands::EXIT_COMMAND;
use crate::session::chat_helper::CommandHelper;
use anyhow::{Context, Result};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as RustylineConfig, EditMode, Editor};

pub type ChatEditor = Editor<CommandHelper, DefaultHistory>;

/// Build the line editor once per session so history survives between prompts
pub fn create_editor() -> Result<ChatEditor> {
	let config = RustylineConfig::builder()
		.completion_type(CompletionType::List)
		.edit_mode(EditMode::Emacs)
		.auto_add_history(true)
		.bell_style(rustyline::config::BellStyle::None)
		.build();

	let mut editor: ChatEditor =
		Editor::with_config(config).context("Failed to initialize line editor")?;
	editor.set_helper(Some(CommandHelper::new()));
	Ok(editor)
}

/// Read one line. Ctrl+C yields an empty line, Ctrl+D yields the exit command.
pub fn read_user_input(editor: &mut ChatEditor) -> Result<String> {
	let prompt = "> ".bright_blue().to_string();

	match editor.readline(&prompt) {
		Ok(line) => Ok(line),
		Err(ReadlineError::Interrupted) => {
			println!("\nCancelled");
			Ok(String::new())
		}
		Err(ReadlineError::Eof) => {
			println!("\nExiting session.");
			Ok(EXIT_COMMAND.to_string())
		}
		Err(err) => Err(err).context("Failed to read input"),
	}
}
