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

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::{Config, LogLevel, ENDPOINT_ENV, LOG_LEVEL_ENV};

impl Config {
	/// Load configuration from the system-wide config file, or defaults when it does not exist.
	/// Environment variables take precedence over file values.
	pub fn load() -> Result<Self> {
		let config_path = crate::directories::get_config_file_path()?;

		let mut config = if config_path.exists() {
			Self::read_file(&config_path)?
		} else {
			Self::default()
		};
		config.config_path = Some(config_path);
		config.apply_env_overrides()?;

		config.warn_if_invalid();

		Ok(config)
	}

	// Loading never fails on bad values so `palaver config` can still repair them
	fn warn_if_invalid(&self) {
		if let Err(e) = self.validate() {
			crate::log_error!("Configuration validation warning: {}", e);
			eprintln!("The application will continue, but you may want to fix these issues.");
		}
	}

	/// Load configuration from a specific file path (missing file means defaults).
	/// Environment variables take precedence over file values.
	pub fn load_from_path(path: &Path) -> Result<Self> {
		let mut config = if path.exists() {
			Self::read_file(path)?
		} else {
			Self::default()
		};

		// Store the config path for future saves
		config.config_path = Some(path.to_path_buf());
		config.apply_env_overrides()?;
		config.warn_if_invalid();

		Ok(config)
	}

	fn read_file(path: &Path) -> Result<Self> {
		let config_str = fs::read_to_string(path)
			.context(format!("Failed to read config from {}", path.display()))?;
		toml::from_str(&config_str).context("Failed to parse TOML configuration")
	}

	fn apply_env_overrides(&mut self) -> Result<()> {
		self.apply_overrides_from(|key| std::env::var(key).ok())
	}

	/// Apply overrides from a variable lookup (the environment in production)
	pub(crate) fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
			let previous = std::mem::replace(&mut self.endpoint, endpoint.trim().to_string());
			self.shadowed.endpoint.get_or_insert(previous);
		}
		if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
			let level: LogLevel = level
				.parse()
				.context(format!("Invalid {} value", LOG_LEVEL_ENV))?;
			let previous = std::mem::replace(&mut self.log_level, level);
			self.shadowed.log_level.get_or_insert(previous);
		}
		Ok(())
	}

	/// Save configuration to its file
	pub fn save(&self) -> Result<()> {
		// Use the stored config path, or fallback to system-wide default
		let config_path = match &self.config_path {
			Some(path) => path.clone(),
			None => crate::directories::get_config_file_path()?,
		};

		self.save_to_path(&config_path)?;
		println!("Configuration saved to {}", config_path.display());
		Ok(())
	}

	/// Save configuration to a specific file path. Environment overrides are not
	/// written; the file keeps the values they replaced.
	pub fn save_to_path(&self, path: &Path) -> Result<()> {
		let persisted = self.persistent_values();

		// Validate before saving
		persisted.validate()?;

		// Ensure the parent directory exists
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).context(format!(
				"Failed to create config directory: {}",
				parent.display()
			))?;
		}

		let config_str =
			toml::to_string_pretty(&persisted).context("Failed to serialize configuration to TOML")?;

		fs::write(path, config_str)
			.context(format!("Failed to write config to {}", path.display()))?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_save_and_load_from_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("config.toml");

		let config = Config {
			endpoint: "https://chat.example.com/api".to_string(),
			typing_delay_ms: 250,
			log_level: LogLevel::Info,
			..Default::default()
		};
		config.save_to_path(&path).unwrap();

		let mut loaded = Config::read_file(&path).unwrap();
		assert_eq!(loaded.endpoint, "https://chat.example.com/api");
		assert_eq!(loaded.typing_delay_ms, 250);
		assert_eq!(loaded.log_level, LogLevel::Info);
		assert_eq!(loaded.request_timeout_seconds, 300);

		loaded.config_path = config.config_path.clone();
		assert_eq!(loaded, config);
	}

	#[test]
	fn test_missing_file_yields_defaults_with_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");

		assert!(Config::read_file(&path).is_err());

		let loaded = Config::load_from_path(&path).unwrap();
		assert_eq!(loaded.config_path(), Some(path.as_path()));
		assert!(!path.exists());
	}

	#[test]
	fn test_save_rejects_invalid_endpoint() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");

		let config = Config {
			endpoint: "localhost:8000/chat".to_string(),
			..Default::default()
		};
		assert!(config.save_to_path(&path).is_err());
		assert!(!path.exists());
	}

	#[test]
	fn test_invalid_endpoint_in_file_still_loads() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "endpoint = \"not a url\"").unwrap();

		let mut config = Config::load_from_path(&path).unwrap();
		assert!(config.validate().is_err());

		// The file can be repaired through the loaded value
		config.set_endpoint("http://localhost:9000");
		config.save_to_path(&path).unwrap();
		let repaired = Config::read_file(&path).unwrap();
		assert_eq!(repaired.endpoint, "http://localhost:9000");
	}

	#[test]
	fn test_env_overrides_are_not_saved() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(
			&path,
			"endpoint = \"http://file-host:8000\"\nlog_level = \"info\"",
		)
		.unwrap();

		let mut config = Config::read_file(&path).unwrap();
		config
			.apply_overrides_from(|key| match key {
				ENDPOINT_ENV => Some("http://env-host:9000".to_string()),
				LOG_LEVEL_ENV => Some("debug".to_string()),
				_ => None,
			})
			.unwrap();
		assert_eq!(config.endpoint, "http://env-host:9000");
		assert_eq!(config.log_level, LogLevel::Debug);

		config.typing_delay_ms = 10;
		config.save_to_path(&path).unwrap();

		let saved = fs::read_to_string(&path).unwrap();
		assert!(saved.contains("file-host"), "saved config: {}", saved);
		assert!(!saved.contains("env-host"), "saved config: {}", saved);

		let reloaded = Config::read_file(&path).unwrap();
		assert_eq!(reloaded.endpoint, "http://file-host:8000");
		assert_eq!(reloaded.log_level, LogLevel::Info);
		assert_eq!(reloaded.typing_delay_ms, 10);

		// The running config keeps the override
		assert_eq!(config.endpoint, "http://env-host:9000");
	}

	#[test]
	fn test_explicit_setting_replaces_env_override() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");

		let mut config = Config::default();
		config
			.apply_overrides_from(|key| match key {
				ENDPOINT_ENV => Some("http://env-host:9000".to_string()),
				LOG_LEVEL_ENV => Some("debug".to_string()),
				_ => None,
			})
			.unwrap();
		config.set_endpoint("http://cli-host:7000");
		config.set_log_level(LogLevel::Info);
		config.save_to_path(&path).unwrap();

		let reloaded = Config::read_file(&path).unwrap();
		assert_eq!(reloaded.endpoint, "http://cli-host:7000");
		assert_eq!(reloaded.log_level, LogLevel::Info);
	}

	#[test]
	fn test_malformed_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "endpoint = [").unwrap();

		assert!(Config::load_from_path(&path).is_err());
	}

	#[test]
	fn test_overrides() {
		let mut config = Config::default();
		config
			.apply_overrides_from(|key| match key {
				ENDPOINT_ENV => Some(" http://10.0.0.2:8000 ".to_string()),
				LOG_LEVEL_ENV => Some("debug".to_string()),
				_ => None,
			})
			.unwrap();
		assert_eq!(config.endpoint, "http://10.0.0.2:8000");
		assert_eq!(config.log_level, LogLevel::Debug);

		// Blank values leave the file settings alone
		let mut config = Config::default();
		config
			.apply_overrides_from(|_| Some("  ".to_string()))
			.unwrap();
		assert_eq!(config, Config::default());

		let mut config = Config::default();
		assert!(config
			.apply_overrides_from(|key| (key == LOG_LEVEL_ENV).then(|| "loud".to_string()))
			.is_err());
	}
}
