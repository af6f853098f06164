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

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod loading;
pub mod validation;

pub const ENDPOINT_ENV: &str = "PALAVER_ENDPOINT";
pub const LOG_LEVEL_ENV: &str = "PALAVER_LOG_LEVEL";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	#[serde(rename = "none")]
	#[default]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::None => "none",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
		}
	}
}

impl FromStr for LogLevel {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"none" => Ok(LogLevel::None),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			other => Err(anyhow::anyhow!(
				"Invalid log level '{}'. Valid levels are: none, info, debug",
				other
			)),
		}
	}
}

// Default functions
fn default_endpoint() -> String {
	"http://localhost:8000".to_string()
}

fn default_typing_delay_ms() -> u64 {
	1000 // Cosmetic pause before a reply is shown
}

fn default_request_timeout_seconds() -> u64 {
	300 // 5 min transport timeout
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
	#[serde(default)]
	pub log_level: LogLevel,

	// Base address of the chat backend; requests go to <endpoint>/chat
	#[serde(default = "default_endpoint")]
	pub endpoint: String,

	#[serde(default = "default_typing_delay_ms")]
	pub typing_delay_ms: u64,

	#[serde(default = "default_request_timeout_seconds")]
	pub request_timeout_seconds: u64,

	#[serde(skip)]
	pub(crate) config_path: Option<PathBuf>,

	// File values replaced by environment overrides; restored when saving
	#[serde(skip)]
	pub(crate) shadowed: ShadowedValues,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ShadowedValues {
	endpoint: Option<String>,
	log_level: Option<LogLevel>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_level: LogLevel::default(),
			endpoint: default_endpoint(),
			typing_delay_ms: default_typing_delay_ms(),
			request_timeout_seconds: default_request_timeout_seconds(),
			config_path: None,
			shadowed: ShadowedValues::default(),
		}
	}
}

impl Config {
	/// Get the global log level (system-wide setting)
	pub fn get_log_level(&self) -> LogLevel {
		self.log_level
	}

	/// Path this config was loaded from or will be saved to
	pub fn config_path(&self) -> Option<&Path> {
		self.config_path.as_deref()
	}

	/// Set the endpoint as a persistent value, replacing any environment override
	pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
		self.endpoint = endpoint.into();
		self.shadowed.endpoint = None;
	}

	/// Set the log level as a persistent value, replacing any environment override
	pub fn set_log_level(&mut self, level: LogLevel) {
		self.log_level = level;
		self.shadowed.log_level = None;
	}

	/// Copy holding what belongs in the file: environment overrides are swapped
	/// back for the values they replaced
	pub fn persistent_values(&self) -> Config {
		let mut persisted = self.clone();
		if let Some(endpoint) = &self.shadowed.endpoint {
			persisted.endpoint = endpoint.clone();
		}
		if let Some(level) = self.shadowed.log_level {
			persisted.log_level = level;
		}
		persisted.shadowed = ShadowedValues::default();
		persisted
	}
}

// Logging macros for different log levels
// These macros check the process-wide level and only print if appropriate

static CURRENT_LOG_LEVEL: RwLock<LogLevel> = parking_lot::const_rwlock(LogLevel::None);

/// Make the config's log level visible to the logging macros on every thread
pub fn set_global_log_level(config: &Config) {
	*CURRENT_LOG_LEVEL.write() = config.get_log_level();
}

pub fn global_log_level() -> LogLevel {
	*CURRENT_LOG_LEVEL.read()
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if $crate::config::global_log_level().is_info_enabled() {
			use colored::Colorize;
			println!("{}", $fmt.cyan());
		}
	};
	($fmt:expr, $($arg:expr),* $(,)?) => {
		if $crate::config::global_log_level().is_info_enabled() {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).cyan());
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if $crate::config::global_log_level().is_debug_enabled() {
			use colored::Colorize;
			println!("{}", $fmt.bright_blue());
		}
	};
	($fmt:expr, $($arg:expr),* $(,)?) => {
		if $crate::config::global_log_level().is_debug_enabled() {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).bright_blue());
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level (errors should always be shown)
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),* $(,)?) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = Config::default();
		assert_eq!(config.endpoint, "http://localhost:8000");
		assert_eq!(config.typing_delay_ms, 1000);
		assert_eq!(config.request_timeout_seconds, 300);
		assert_eq!(config.log_level, LogLevel::None);
	}

	#[test]
	fn test_partial_toml_uses_defaults() {
		let config: Config = toml::from_str("endpoint = \"http://chat.internal:9000\"").unwrap();
		assert_eq!(config.endpoint, "http://chat.internal:9000");
		assert_eq!(config.typing_delay_ms, 1000);
		assert_eq!(config.request_timeout_seconds, 300);

		let config: Config = toml::from_str("log_level = \"debug\"\ntyping_delay_ms = 0").unwrap();
		assert_eq!(config.log_level, LogLevel::Debug);
		assert_eq!(config.typing_delay_ms, 0);
		assert_eq!(config.endpoint, "http://localhost:8000");
	}

	#[test]
	fn test_log_level_parsing() {
		assert_eq!("none".parse::<LogLevel>().unwrap(), LogLevel::None);
		assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
		assert_eq!(" debug ".parse::<LogLevel>().unwrap(), LogLevel::Debug);
		assert!("verbose".parse::<LogLevel>().is_err());

		assert!(LogLevel::Debug.is_info_enabled());
		assert!(!LogLevel::Info.is_debug_enabled());
		assert!(!LogLevel::None.is_info_enabled());
	}

	#[test]
	fn test_serialized_toml_skips_path() {
		let config = Config {
			config_path: Some(PathBuf::from("/tmp/somewhere.toml")),
			..Default::default()
		};
		let toml_str = toml::to_string(&config).unwrap();
		assert!(toml_str.contains("log_level = \"none\""));
		assert!(toml_str.contains("endpoint = \"http://localhost:8000\""));
		assert!(!toml_str.contains("somewhere"));
	}
}
