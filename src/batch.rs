//! # Batch Conversion Orchestrator
//!
//! Orchestratore che elabora una sequenza ordinata di immagini con lo stesso
//! formato target e la stessa qualità.
//!
//! ## Responsabilità:
//! - Itera gli input in ordine, delegando ogni file a `ImageConverter`
//! - Accumula path di output e preview in due sequenze parallele che
//!   preservano l'ordine di input
//! - Fail-fast: il primo file che fallisce interrompe l'intero batch,
//!   nessun risultato parziale viene restituito
//! - Progress bar e eventi JSON durante l'elaborazione
//!
//! ## Concorrenza:
//! - Gli item vengono elaborati strettamente in sequenza; l'encoding è
//!   CPU-bound e gira su thread blocking (`spawn_blocking`), uno alla volta.
//!   Con un solo item in volo, due input con lo stesso stem non possono
//!   scrivere lo stesso path cache in contemporanea: vince sempre l'ultimo
//!   in ordine di input.

use crate::{
    config::Config,
    converter::{Conversion, ImageConverter},
    file_manager::FileManager,
    format_registry::FormatRegistry,
    json_output::JsonMessage,
    progress::{ConversionStats, ProgressManager},
};
use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Ordered batch results: `output_paths[i]` and `previews[i]` both belong to
/// the i-th input.
#[derive(Debug)]
pub struct BatchOutput {
    pub output_paths: Vec<PathBuf>,
    pub previews: Vec<RgbaImage>,
}

/// Orchestratore principale del batch
pub struct BatchConverter {
    config: Config,
    registry: Arc<FormatRegistry>,
}

impl BatchConverter {
    /// Create a converter backed by the registry the imaging backend reports
    pub fn new(config: Config) -> Result<Self> {
        Self::with_registry(config, Arc::new(FormatRegistry::from_backend()))
    }

    /// Create a converter with an explicit registry (restricted tables in tests)
    pub fn with_registry(config: Config, registry: Arc<FormatRegistry>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    /// Converts every input in order and returns the parallel result sequences.
    ///
    /// # Arguments
    /// * `inputs` - Ordered list of image file paths
    ///
    /// # Returns
    /// * `Result<BatchOutput>` - Output paths and RGBA previews, both in
    ///   input order; empty input yields two empty sequences
    ///
    /// # Errors
    /// The first failing item aborts the whole batch: the error carries the
    /// failing path as context and no partial results are returned. Files
    /// already written for earlier items stay in the cache.
    pub async fn process(&self, inputs: &[PathBuf]) -> Result<BatchOutput> {
        let start_time = std::time::Instant::now();

        if self.config.json_output {
            JsonMessage::start(
                inputs.len(),
                self.config.target_extension.clone(),
                self.config.quality,
            )
            .emit();
        } else {
            info!(
                "Converting {} files to {} (quality: {})",
                inputs.len(),
                self.config.target_extension,
                self.config.quality
            );
        }

        let mut output_paths = Vec::with_capacity(inputs.len());
        let mut previews = Vec::with_capacity(inputs.len());
        let mut stats = ConversionStats::new();
        let progress = ProgressManager::new(inputs.len() as u64);

        for (index, input_path) in inputs.iter().enumerate() {
            if self.config.json_output {
                JsonMessage::file_start(input_path.clone(), index, inputs.len()).emit();
            }

            let conversion = self
                .convert_one(input_path.clone())
                .await
                .with_context(|| format!("Conversion failed for {}", input_path.display()))?;

            let (input_size, _) = FileManager::get_file_info(input_path).await?;
            let (output_size, _) = FileManager::get_file_info(&conversion.output_path).await?;
            stats.add_converted(input_size, output_size);

            if self.config.json_output {
                JsonMessage::file_complete(
                    input_path.clone(),
                    conversion.output_path.clone(),
                    conversion.preview.width(),
                    conversion.preview.height(),
                    output_size,
                )
                .emit();
            }

            let message = format!(
                "[OK] {}",
                conversion
                    .output_path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            );
            progress.update(&message);

            output_paths.push(conversion.output_path);
            previews.push(conversion.preview);
        }

        progress.finish(&stats.format_summary());

        if self.config.json_output {
            JsonMessage::complete(
                stats.files_converted,
                output_paths.clone(),
                stats.total_input_bytes,
                stats.total_output_bytes,
                start_time.elapsed().as_secs_f64(),
            )
            .emit();
        } else {
            info!("=== Conversion Complete ===");
            info!("{}", stats.format_summary());
            info!("Elapsed: {:.2}s", start_time.elapsed().as_secs_f64());
        }

        Ok(BatchOutput {
            output_paths,
            previews,
        })
    }

    /// Runs one conversion on a blocking thread (the encoding is CPU-bound)
    async fn convert_one(&self, input_path: PathBuf) -> Result<Conversion> {
        let converter = ImageConverter::new(self.config.clone(), Arc::clone(&self.registry));
        let conversion = tokio::task::spawn_blocking(move || converter.convert(&input_path))
            .await
            .context("Conversion task panicked")??;
        Ok(conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn batch_for(temp_dir: &TempDir, target_extension: &str, quality: u8) -> BatchConverter {
        let config = Config {
            target_extension: target_extension.to_string(),
            quality,
            cache_dir: temp_dir.path().join("caches"),
            json_output: false,
        };
        BatchConverter::new(config).unwrap()
    }

    fn write_input(dir: &Path, name: &str, side: u32) -> PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(side, side, Rgba([10, 200, 40, 255]));
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let input_a = write_input(temp_dir.path(), "a.png", 10);
        let input_b = write_input(temp_dir.path(), "b.png", 20);

        let batch = batch_for(&temp_dir, ".gif", 50);
        let result = batch.process(&[input_a, input_b]).await.unwrap();

        let cache_dir = temp_dir.path().join("caches");
        assert_eq!(
            result.output_paths,
            vec![cache_dir.join("a.gif"), cache_dir.join("b.gif")]
        );
        // Previews line up with their inputs, not with completion order.
        assert_eq!(result.previews[0].dimensions(), (10, 10));
        assert_eq!(result.previews[1].dimensions(), (20, 20));
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_sequences() {
        let temp_dir = TempDir::new().unwrap();
        let batch = batch_for(&temp_dir, ".webp", 80);

        let result = batch.process(&[]).await.unwrap();
        assert!(result.output_paths.is_empty());
        assert!(result.previews.is_empty());
    }

    #[tokio::test]
    async fn test_first_failure_aborts_the_batch() {
        let temp_dir = TempDir::new().unwrap();
        let good = write_input(temp_dir.path(), "good.png", 10);
        let missing = temp_dir.path().join("missing.png");
        let never_reached = write_input(temp_dir.path(), "later.png", 10);

        let batch = batch_for(&temp_dir, ".png", 80);
        let err = batch
            .process(&[good, missing, never_reached])
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::InputImage(_))
        ));
        assert!(err.to_string().contains("missing.png"));

        let cache_dir = temp_dir.path().join("caches");
        // First item completed before the abort, the one after the failure never ran.
        assert!(cache_dir.join("good.png").exists());
        assert!(!cache_dir.join("later.png").exists());
    }

    #[tokio::test]
    async fn test_unsupported_target_fails_every_item_without_writes() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(temp_dir.path(), "icon.png", 10);

        let batch = batch_for(&temp_dir, ".xyz", 80);
        let err = batch.process(&[input]).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::UnsupportedFormat(_))
        ));

        let cache_dir = temp_dir.path().join("caches");
        if cache_dir.exists() {
            assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 0);
        }
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_up_front() {
        let config = Config {
            quality: 0,
            ..Default::default()
        };
        assert!(BatchConverter::new(config).is_err());
    }

    #[tokio::test]
    async fn test_same_stem_later_input_wins() {
        let temp_dir = TempDir::new().unwrap();
        let dir_a = temp_dir.path().join("first");
        let dir_b = temp_dir.path().join("second");
        std::fs::create_dir_all(&dir_a).unwrap();
        std::fs::create_dir_all(&dir_b).unwrap();

        let small = write_input(&dir_a, "photo.png", 10);
        let large = write_input(&dir_b, "photo.png", 20);

        let batch = batch_for(&temp_dir, ".png", 80);
        let result = batch.process(&[small, large]).await.unwrap();

        // Both items report the same cache path; the file on disk holds the
        // later conversion.
        assert_eq!(result.output_paths[0], result.output_paths[1]);
        let reopened = image::open(&result.output_paths[1]).unwrap();
        assert_eq!(reopened.to_rgba8().dimensions(), (20, 20));
    }
}
