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
use colored::Colorize;

use palaver::config::{Config, LogLevel};

#[derive(Args, Debug)]
pub struct ConfigArgs {
	/// Set the chat backend base address (e.g. http://localhost:8000)
	#[arg(long)]
	pub endpoint: Option<String>,

	/// Set log level (none, info, debug)
	#[arg(long)]
	pub log_level: Option<LogLevel>,

	/// Set the pause before replies are shown, in milliseconds (0 disables it)
	#[arg(long)]
	pub typing_delay_ms: Option<u64>,

	/// Set the HTTP request timeout in seconds
	#[arg(long)]
	pub request_timeout: Option<u64>,

	/// Show current configuration
	#[arg(long)]
	pub show: bool,
}

fn show_configuration(config: &Config) {
	println!("{}", "───────────── Configuration ─────────────".bright_cyan());
	if let Some(path) = config.config_path() {
		println!("{} {}", "File:".yellow(), path.display());
	}
	println!("{} {}", "Endpoint:".yellow(), config.endpoint.bright_white());
	println!("{} {}", "Log level:".yellow(), config.log_level.as_str());
	println!("{} {} ms", "Typing delay:".yellow(), config.typing_delay_ms);
	println!(
		"{} {} s",
		"Request timeout:".yellow(),
		config.request_timeout_seconds
	);
}

pub fn execute(args: &ConfigArgs, mut config: Config) -> Result<()> {
	if args.show {
		show_configuration(&config);
		return Ok(());
	}

	let mut modified = false;

	if let Some(endpoint) = &args.endpoint {
		config.set_endpoint(endpoint.trim());
		config.validate_endpoint()?;
		println!("Set endpoint to {}", config.endpoint);
		modified = true;
	}

	if let Some(level) = args.log_level {
		config.set_log_level(level);
		println!("Set log level to {}", level.as_str());
		modified = true;
	}

	if let Some(delay) = args.typing_delay_ms {
		config.typing_delay_ms = delay;
		println!("Set typing delay to {} ms", delay);
		modified = true;
	}

	if let Some(timeout) = args.request_timeout {
		config.request_timeout_seconds = timeout;
		println!("Set request timeout to {} s", timeout);
		modified = true;
	}

	// Without flags this writes out the current (possibly default) configuration.
	// Environment overrides only apply to this run and are not written.
	config.save()?;
	if !modified {
		show_configuration(&config);
	}

	Ok(())
}
