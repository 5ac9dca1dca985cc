use std::io::Write;
use crate::config::constants::SCAN_STEPS;

const BAR_WIDTH: usize = 30;

/// In-place progress line for the scanning step. Rendering is driven by
/// the orchestrator's ticker; this type only draws.
pub struct ProgressLogger {
    animation_chars: Vec<&'static str>,
    frame: usize,
}

impl ProgressLogger {
    pub fn new() -> Self {
        Self {
            animation_chars: vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            frame: 0,
        }
    }

    /// Phase label for a progress value: one label per 10%.
    pub fn step_label(percent: u8) -> &'static str {
        let index = (percent as usize / 10).min(SCAN_STEPS.len() - 1);
        SCAN_STEPS[index]
    }

    pub fn render(&mut self, percent: u8) {
        let filled = (percent as usize * BAR_WIDTH) / 100;
        let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
        let spinner = self.animation_chars[self.frame];
        self.frame = (self.frame + 1) % self.animation_chars.len();

        eprint!(
            "\r\x1b[K{} [{}] {:>3}% {}",
            spinner,
            bar,
            percent,
            Self::step_label(percent)
        );
        let _ = std::io::stderr().flush();
    }

    pub fn finish(&mut self, final_message: &str) {
        eprint!("\r\x1b[K✅  {}\n", final_message);
        let _ = std::io::stderr().flush();
    }

    pub fn error(&mut self, error_message: &str) {
        eprint!("\r\x1b[K❌ {}\n", error_message);
        let _ = std::io::stderr().flush();
    }
}

impl Default for ProgressLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_labels_advance_with_progress() {
        assert_eq!(ProgressLogger::step_label(0), SCAN_STEPS[0]);
        assert_eq!(ProgressLogger::step_label(42), SCAN_STEPS[4]);
        assert_eq!(ProgressLogger::step_label(99), SCAN_STEPS[9]);
        // 100 stays on the last label rather than indexing past the end
        assert_eq!(ProgressLogger::step_label(100), SCAN_STEPS[9]);
    }
}
