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

// In-memory backend shared by the session tests

use super::backend::{ChatBackend, ChatReply};
use super::Message;
use anyhow::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;

pub(crate) enum Scripted {
	Reply(ChatReply),
	Unreachable,
}

/// Backend that plays back canned answers and records what it was sent
pub(crate) struct ScriptedBackend {
	script: Mutex<VecDeque<Scripted>>,
	requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedBackend {
	pub(crate) fn new(script: Vec<Scripted>) -> Self {
		Self {
			script: Mutex::new(script.into()),
			requests: Mutex::new(Vec::new()),
		}
	}

	pub(crate) fn requests(&self) -> Vec<Vec<Message>> {
		self.requests.lock().clone()
	}

	pub(crate) fn request_count(&self) -> usize {
		self.requests.lock().len()
	}
}

#[async_trait::async_trait]
impl ChatBackend for ScriptedBackend {
	fn name(&self) -> &str {
		"scripted"
	}

	async fn send(&self, messages: &[Message]) -> Result<ChatReply> {
		self.requests.lock().push(messages.to_vec());
		match self.script.lock().pop_front() {
			Some(Scripted::Reply(reply)) => Ok(reply),
			Some(Scripted::Unreachable) | None => Err(anyhow::anyhow!("connection refused")),
		}
	}
}
