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

// Typing indicator shown while a reply is pending

use anyhow::Result;
use colored::*;
use crossterm::{cursor, execute, terminal};
use std::io::{stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const TYPING_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const TYPING_LABEL: &str = "Assistant is typing...";
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Animate until `stop` is raised, then erase the indicator
pub async fn show_typing_animation(stop: Arc<AtomicBool>) -> Result<()> {
	let mut stdout = stdout();
	let mut frame_idx = 0;

	execute!(stdout, cursor::SavePosition, cursor::Hide)?;

	while !stop.load(Ordering::SeqCst) {
		execute!(stdout, cursor::RestorePosition)?;
		print!(" {} {}", TYPING_FRAMES[frame_idx].cyan(), TYPING_LABEL.bright_blue());
		stdout.flush()?;

		frame_idx = (frame_idx + 1) % TYPING_FRAMES.len();
		tokio::time::sleep(FRAME_INTERVAL).await;
	}

	erase(&mut stdout)
}

fn erase(stdout: &mut Stdout) -> Result<()> {
	execute!(
		stdout,
		cursor::RestorePosition,
		terminal::Clear(terminal::ClearType::UntilNewLine),
		cursor::Show
	)?;
	stdout.flush()?;
	Ok(())
}

/// Erase a running indicator and show the cursor again, for exits that never
/// let the animation task finish
pub fn clear_typing_indicator() {
	if let Err(e) = erase(&mut stdout()) {
		crate::log_debug!("Failed to restore the cursor: {}", e);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_animation_stops_when_flag_is_raised() {
		let stop = Arc::new(AtomicBool::new(false));
		let animation = tokio::spawn(show_typing_animation(stop.clone()));

		tokio::time::sleep(Duration::from_millis(150)).await;
		stop.store(true, Ordering::SeqCst);

		let finished = tokio::time::timeout(Duration::from_secs(1), animation).await;
		assert!(finished.is_ok());
	}

	#[test]
	fn test_clear_without_running_indicator_does_not_panic() {
		clear_typing_indicator();
	}
}
