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

use anyhow::{anyhow, Result};
use url::Url;

use super::Config;

impl Config {
	/// Validate the configuration for common issues
	pub fn validate(&self) -> Result<()> {
		self.validate_endpoint()?;
		self.validate_timeouts()?;
		Ok(())
	}

	pub fn validate_endpoint(&self) -> Result<()> {
		let endpoint = self.endpoint.trim();
		if endpoint.is_empty() {
			return Err(anyhow!("Endpoint must not be empty"));
		}

		let url = Url::parse(endpoint).map_err(|e| {
			anyhow!(
				"Invalid endpoint '{}': {}. Use a full address like 'http://localhost:8000'",
				endpoint,
				e
			)
		})?;

		match url.scheme() {
			"http" | "https" => {}
			scheme => {
				return Err(anyhow!(
					"Unsupported endpoint scheme '{}' in '{}'. Only http and https are supported",
					scheme,
					endpoint
				))
			}
		}

		if url.host_str().is_none() {
			return Err(anyhow!("Endpoint '{}' has no host", endpoint));
		}

		Ok(())
	}

	fn validate_timeouts(&self) -> Result<()> {
		if self.request_timeout_seconds == 0 {
			return Err(anyhow!("request_timeout_seconds must be greater than 0"));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn with_endpoint(endpoint: &str) -> Config {
		Config {
			endpoint: endpoint.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn test_valid_endpoints() {
		assert!(Config::default().validate().is_ok());
		assert!(with_endpoint("https://chat.example.com").validate().is_ok());
		assert!(with_endpoint("http://127.0.0.1:8000/api/").validate().is_ok());
	}

	#[test]
	fn test_invalid_endpoints() {
		assert!(with_endpoint("").validate().is_err());
		assert!(with_endpoint("   ").validate().is_err());
		assert!(with_endpoint("chat.example.com").validate().is_err());
		assert!(with_endpoint("ftp://chat.example.com").validate().is_err());
		assert!(with_endpoint("file:///tmp/chat").validate().is_err());
	}

	#[test]
	fn test_zero_timeout_rejected() {
		let config = Config {
			request_timeout_seconds: 0,
			..Default::default()
		};
		assert!(config.validate().is_err());
	}
}
