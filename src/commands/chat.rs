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

use anyhow::Result;
use clap::Args;

use palaver::config::Config;
use palaver::session::chat::{run_interactive_session, SessionOptions};

#[derive(Args, Debug)]
pub struct ChatArgs {
	/// Chat backend base address (runtime only, not saved)
	#[arg(long)]
	pub endpoint: Option<String>,

	/// Show replies as soon as they arrive, without the typing pause
	#[arg(long)]
	pub no_delay: bool,
}

pub async fn execute(args: &ChatArgs, mut config: Config) -> Result<()> {
	if let Some(endpoint) = &args.endpoint {
		config.endpoint = endpoint.clone();
		config.validate_endpoint()?;
	}

	let mut options = SessionOptions::from_config(&config);
	if args.no_delay {
		options.typing_delay = std::time::Duration::ZERO;
	}

	run_interactive_session(&config, options).await
}
