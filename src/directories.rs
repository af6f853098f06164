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

// Directory utilities for cross-platform config directory management

use anyhow::Result;
use std::path::PathBuf;

const APP_DIR: &str = "palaver";
const CONFIG_FILE: &str = "config.toml";

/// Get the configuration directory for palaver
///
/// - Linux: $XDG_CONFIG_HOME/palaver or ~/.config/palaver
/// - macOS: ~/Library/Application Support/palaver
/// - Windows: %APPDATA%/palaver
///
/// The directory is not created here; saving the config creates it.
pub fn get_config_dir() -> Result<PathBuf> {
	match dirs::config_dir() {
		Some(dir) => Ok(dir.join(APP_DIR)),
		None => match dirs::home_dir() {
			Some(home) => Ok(home.join(".config").join(APP_DIR)),
			None => Err(anyhow::anyhow!("Unable to determine home directory")),
		},
	}
}

/// Get the configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
	Ok(get_config_dir()?.join(CONFIG_FILE))
}
