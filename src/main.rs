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

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use palaver::config::{self, Config};

#[derive(Parser)]
#[command(name = "palaver")]
#[command(version)]
#[command(about = "Terminal chat client for a JSON chat backend")]
struct PalaverArgs {
	/// Use this config file instead of the system-wide one
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Start an interactive chat session
	Chat(commands::ChatArgs),

	/// Send a single message and print the reply
	Ask(commands::AskArgs),

	/// Show or update the configuration file
	Config(commands::ConfigArgs),
}

fn load_config(path: Option<&Path>) -> Result<Config> {
	match path {
		Some(path) => Config::load_from_path(path),
		None => Config::load(),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = PalaverArgs::parse();

	let config = load_config(args.config.as_deref())?;
	config::set_global_log_level(&config);

	match &args.command {
		Commands::Chat(chat_args) => commands::chat::execute(chat_args, config).await?,
		Commands::Ask(ask_args) => {
			let outcome = commands::ask::execute(ask_args, config).await?;
			let code = commands::ask::exit_code(outcome);
			if code != 0 {
				std::process::exit(code);
			}
		}
		Commands::Config(config_args) => commands::config::execute(config_args, config)?,
	}

	Ok(())
}
