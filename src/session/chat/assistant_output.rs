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

// Assistant reply and transcript output

use crate::session::{Message, Role, Transcript, TurnOutcome};
use colored::Colorize;

/// Print a settled turn's assistant message. Error notices are yellow.
pub fn print_assistant_reply(content: &str, outcome: TurnOutcome) {
	if outcome.is_error() {
		println!("{}", content.yellow());
	} else {
		println!("{}", content.bright_green());
	}
}

pub fn print_message(message: &Message) {
	match message.role() {
		Role::User => println!("{} {}", "You:".bright_blue().bold(), message.content()),
		Role::Assistant => println!(
			"{} {}",
			"Assistant:".bright_green().bold(),
			message.content().bright_green()
		),
	}
}

pub fn print_transcript(transcript: &Transcript) {
	println!("{}", "───────────── Conversation ─────────────".bright_cyan());
	for message in transcript {
		print_message(message);
	}
	println!("{} {}", "Messages:".yellow(), transcript.len());
}
