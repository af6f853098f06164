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

// Chat session controller: owns the transcript and mediates between input and backend

use super::backend::{ChatBackend, ChatReply};
use super::{Message, Transcript};
use crate::log_debug;
use anyhow::Result;

pub const APPLICATION_ERROR_PREFIX: &str = "Sorry, I encountered an error: ";
pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const TRANSPORT_ERROR_NOTICE: &str =
	"Sorry, I couldn't connect to the server. Please make sure the backend is running.";

/// How a settled turn ended. Every variant appended exactly one assistant message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
	/// Backend answered with `success: true`
	Replied,
	/// Backend answered but reported failure
	ApplicationError,
	/// No well-formed answer could be obtained
	TransportError,
}

impl TurnOutcome {
	pub fn is_error(&self) -> bool {
		!matches!(self, TurnOutcome::Replied)
	}
}

/// An in-flight request. It can only be created by `begin_turn` and is consumed
/// by `settle_turn`, so each turn settles exactly once.
#[derive(Debug)]
pub struct PendingTurn {
	context: Vec<Message>,
}

impl PendingTurn {
	/// Conversation to send, ending with the new user message
	pub fn messages(&self) -> &[Message] {
		&self.context
	}
}

pub struct ChatSession<B: ChatBackend> {
	backend: B,
	transcript: Transcript,
	pending_input: String,
	awaiting_response: bool,
}

impl<B: ChatBackend> ChatSession<B> {
	pub fn new(backend: B) -> Self {
		Self {
			backend,
			transcript: Transcript::new(),
			pending_input: String::new(),
			awaiting_response: false,
		}
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	pub fn transcript(&self) -> &Transcript {
		&self.transcript
	}

	pub fn pending_input(&self) -> &str {
		&self.pending_input
	}

	pub fn set_pending_input(&mut self, text: impl Into<String>) {
		self.pending_input = text.into();
	}

	pub fn is_awaiting_response(&self) -> bool {
		self.awaiting_response
	}

	/// Start a turn: record the user message, clear pending input and raise the
	/// in-flight flag. Returns `None` without touching any state when the text is
	/// blank or a request is already outstanding.
	pub fn begin_turn(&mut self, text: &str) -> Option<PendingTurn> {
		if self.awaiting_response {
			log_debug!("Ignoring submission while a response is pending");
			return None;
		}

		let text = text.trim();
		if text.is_empty() {
			return None;
		}

		self.transcript.push(Message::user(text));
		self.pending_input.clear();
		self.awaiting_response = true;

		Some(PendingTurn {
			context: self.transcript.messages().to_vec(),
		})
	}

	/// Finish a turn with whatever the backend produced
	pub fn settle_turn(&mut self, _turn: PendingTurn, result: Result<ChatReply>) -> TurnOutcome {
		let (content, outcome) = match result {
			Ok(reply) if reply.success => (reply.response.unwrap_or_default(), TurnOutcome::Replied),
			Ok(reply) => (
				format!(
					"{}{}",
					APPLICATION_ERROR_PREFIX,
					reply.error.as_deref().unwrap_or(UNKNOWN_ERROR)
				),
				TurnOutcome::ApplicationError,
			),
			Err(e) => {
				log_debug!("Chat request failed: {:#}", e);
				(TRANSPORT_ERROR_NOTICE.to_string(), TurnOutcome::TransportError)
			}
		};

		self.transcript.push(Message::assistant(content));
		self.awaiting_response = false;
		outcome
	}

	/// Send one message and wait for the reply. `None` means the submission was ignored.
	pub async fn submit_message(&mut self, text: &str) -> Option<TurnOutcome> {
		let turn = self.begin_turn(text)?;
		let result = self.backend.send(turn.messages()).await;
		Some(self.settle_turn(turn, result))
	}

	/// Submit whatever is currently in the pending input buffer
	pub async fn submit_pending(&mut self) -> Option<TurnOutcome> {
		let text = self.pending_input.clone();
		self.submit_message(&text).await
	}

	/// Back to a single greeting. No network call.
	pub fn reset_session(&mut self) {
		self.transcript.reset();
		self.pending_input.clear();
	}
}
