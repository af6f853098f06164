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

// Session module: transcript model, controller and backend client

pub mod backend; // Remote chat endpoint abstraction
pub mod chat; // Interactive terminal shell
mod chat_helper; // Chat command completion
pub mod controller; // Chat session controller
#[cfg(test)]
pub(crate) mod testing;

pub use backend::{ChatBackend, ChatReply, HttpChatBackend};
pub use controller::{ChatSession, PendingTurn, TurnOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Greeting every fresh transcript starts with
pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::User => write!(f, "user"),
			Role::Assistant => write!(f, "assistant"),
		}
	}
}

/// A single turn. Fields are private so a message cannot change after creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
	role: Role,
	content: String,
}

impl Message {
	pub fn user(content: impl Into<String>) -> Self {
		Self {
			role: Role::User,
			content: content.into(),
		}
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self {
			role: Role::Assistant,
			content: content.into(),
		}
	}

	pub fn role(&self) -> Role {
		self.role
	}

	pub fn content(&self) -> &str {
		&self.content
	}
}

/// Append-only list of turns; insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
	messages: Vec<Message>,
}

impl Default for Transcript {
	fn default() -> Self {
		Self::new()
	}
}

impl Transcript {
	/// Fresh transcript holding only the greeting
	pub fn new() -> Self {
		Self {
			messages: vec![Message::assistant(GREETING)],
		}
	}

	pub fn push(&mut self, message: Message) {
		self.messages.push(message);
	}

	/// Drop everything and start over from the greeting
	pub fn reset(&mut self) {
		*self = Self::new();
	}

	pub fn messages(&self) -> &[Message] {
		&self.messages
	}

	pub fn last(&self) -> Option<&Message> {
		self.messages.last()
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Message> {
		self.messages.iter()
	}
}

impl<'a> IntoIterator for &'a Transcript {
	type Item = &'a Message;
	type IntoIter = std::slice::Iter<'a, Message>;

	fn into_iter(self) -> Self::IntoIter {
		self.messages.iter()
	}
}
