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

// Chat backend abstraction and the HTTP client for the remote /chat endpoint

use crate::config::Config;
use crate::log_debug;
use crate::session::Message;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Path of the completion route relative to the configured endpoint
const CHAT_ROUTE: &str = "chat";

/// Reply body of the chat endpoint.
///
/// `success` defaults to false when the server leaves it out, which routes the
/// reply through the error path with the generic label.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
	#[serde(default)]
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub response: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ChatReply {
	pub fn success(response: impl Into<String>) -> Self {
		Self {
			success: true,
			response: Some(response.into()),
			error: None,
		}
	}

	pub fn failure(error: Option<String>) -> Self {
		Self {
			success: false,
			response: None,
			error,
		}
	}
}

/// Request body: the whole transcript including the newest user turn
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
	messages: &'a [Message],
}

/// Anything that can answer a transcript.
///
/// `Err` from `send` means no well-formed reply could be obtained at all
/// (network failure, timeout, malformed body). A reply that reports failure is
/// still `Ok`.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
	/// Short name used in logs and the session banner
	fn name(&self) -> &str;

	/// Send the conversation and wait for the single reply
	async fn send(&self, messages: &[Message]) -> Result<ChatReply>;
}

/// Backend that POSTs JSON to `<endpoint>/chat`
pub struct HttpChatBackend {
	client: Client,
	chat_url: Url,
}

impl HttpChatBackend {
	pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
		let chat_url = chat_url(endpoint)?;
		let client = Client::builder()
			.pool_max_idle_per_host(4)
			.pool_idle_timeout(Duration::from_secs(90))
			.timeout(timeout)
			.build()
			.context("Failed to create HTTP client")?;

		Ok(Self { client, chat_url })
	}

	/// Build from a loaded config. Loading only warns about bad values, so this
	/// is where an unusable endpoint is rejected.
	pub fn from_config(config: &Config) -> Result<Self> {
		config.validate()?;
		Self::new(
			&config.endpoint,
			Duration::from_secs(config.request_timeout_seconds),
		)
	}

	pub fn chat_url(&self) -> &Url {
		&self.chat_url
	}
}

/// Resolve the chat route against a base address, with or without trailing slash
fn chat_url(endpoint: &str) -> Result<Url> {
	let base = format!("{}/", endpoint.trim().trim_end_matches('/'));
	let base = Url::parse(&base).context(format!("Invalid chat endpoint: {}", endpoint))?;
	base.join(CHAT_ROUTE)
		.context(format!("Invalid chat endpoint: {}", endpoint))
}

#[async_trait::async_trait]
impl ChatBackend for HttpChatBackend {
	fn name(&self) -> &str {
		"http"
	}

	async fn send(&self, messages: &[Message]) -> Result<ChatReply> {
		log_debug!(
			"POST {} with {} messages",
			self.chat_url,
			messages.len()
		);

		let response = self
			.client
			.post(self.chat_url.clone())
			.json(&ChatRequest { messages })
			.send()
			.await
			.context(format!("Failed to reach {}", self.chat_url))?;

		// The body is interpreted whatever the status: error replies may come with 4xx/5xx
		let status = response.status();
		let body = response
			.bytes()
			.await
			.context("Failed to read chat response body")?;

		let reply: ChatReply = serde_json::from_slice(&body).context(format!(
			"Chat endpoint returned a malformed body (HTTP {})",
			status
		))?;

		log_debug!("HTTP {} success={}", status, reply.success);
		Ok(reply)
	}
}
