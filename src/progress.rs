//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di conversione.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking statistiche di conversione (file convertiti, byte in/out)
//! - Report finale con statistiche aggregate
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:03] [========================>---------------] 12/20 (60%) [OK] photo.webp
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for batch conversion
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for conversion results
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub files_converted: usize,
    pub total_input_bytes: u64,
    pub total_output_bytes: u64,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_converted(&mut self, input_size: u64, output_size: u64) {
        self.files_converted += 1;
        self.total_input_bytes += input_size;
        self.total_output_bytes += output_size;
    }

    /// Output size relative to input size, as a signed percentage delta.
    /// Negative means the converted files are smaller than the originals.
    pub fn size_delta_percent(&self) -> f64 {
        if self.total_input_bytes > 0 {
            (self.total_output_bytes as f64 - self.total_input_bytes as f64)
                / self.total_input_bytes as f64
                * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Converted: {} files | Input: {} | Output: {} ({:+.2}%)",
            self.files_converted,
            crate::file_manager::FileManager::format_size(self.total_input_bytes),
            crate::file_manager::FileManager::format_size(self.total_output_bytes),
            self.size_delta_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = ConversionStats::new();
        stats.add_converted(1000, 400);
        stats.add_converted(1000, 600);

        assert_eq!(stats.files_converted, 2);
        assert_eq!(stats.total_input_bytes, 2000);
        assert_eq!(stats.total_output_bytes, 1000);
        assert!((stats.size_delta_percent() + 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty_delta_is_zero() {
        let stats = ConversionStats::new();
        assert_eq!(stats.size_delta_percent(), 0.0);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut stats = ConversionStats::new();
        stats.add_converted(2048, 1024);
        let summary = stats.format_summary();
        assert!(summary.contains("1 files"));
        assert!(summary.contains("-50.00%"));
    }
}
