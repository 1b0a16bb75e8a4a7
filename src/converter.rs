//! # Image Conversion Module
//!
//! Questo modulo gestisce la conversione di singole immagini verso il formato
//! target, scrivendo il risultato nella directory cache e verificandolo.
//!
//! ## Pipeline di Conversione
//!
//! 1. **Calcolo path cache**: `<cache-root>/<stem><estensione-target>`,
//!    deterministico per (stem, estensione)
//! 2. **Creazione directory**: cache root creata ricorsivamente a ogni chiamata
//! 3. **Decodifica input**: apertura del file come immagine
//! 4. **Risoluzione formato**: lookup nel `FormatRegistry`; estensione
//!    sconosciuta = errore PRIMA di qualsiasi scrittura
//! 5. **Encoding**: scrittura sul path cache con la qualità configurata
//! 6. **Verifica**: riapertura del file appena scritto e normalizzazione RGBA
//!
//! ## Formati Supportati
//!
//! | Formato | Qualità | Canale alpha in output |
//! |---------|---------|------------------------|
//! | JPEG    | ✅      | ❌ (encoding RGB)      |
//! | WebP    | ✅      | ❌ (encoding RGB)      |
//! | PNG     | ignorata| ✅                     |
//! | GIF     | ignorata| ✅                     |
//! | BMP     | ignorata| ✅                     |
//! | TIFF    | ignorata| ✅                     |
//!
//! ## Gestione Qualità
//!
//! - Interpretata dall'encoder del backend (1-100)
//! - JPEG: `JpegEncoder::new_with_quality`
//! - WebP: `WebPEncoder` con `WebPQuality::lossy`
//! - Formati lossless: il parametro non si applica
//!
//! ## Semantica di Overwrite
//!
//! Stesso stem + stessa estensione target = stesso path cache: una conversione
//! successiva sovrascrive silenziosamente la precedente. Nessun versioning,
//! nessuna collision detection tra input diversi con lo stesso stem.

use crate::{config::Config, error::ConvertError, format_registry::FormatRegistry};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::{WebPEncoder, WebPQuality};
use image::{ColorType, DynamicImage, ImageFormat, RgbaImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a single conversion: the verified preview plus where the file went
#[derive(Debug)]
pub struct Conversion {
    /// Reopened output, normalized to RGBA for stable preview rendering
    pub preview: RgbaImage,
    /// Deterministic cache path the encoded file was written to
    pub output_path: PathBuf,
}

/// Converts one image at a time into the configured target format.
///
/// Holds no state between calls beyond the shared read-only registry; every
/// filesystem effect lives under the configured cache root.
#[derive(Clone)]
pub struct ImageConverter {
    config: Config,
    registry: Arc<FormatRegistry>,
}

impl ImageConverter {
    /// Creates a new converter from a validated configuration and the shared
    /// format registry.
    pub fn new(config: Config, registry: Arc<FormatRegistry>) -> Self {
        Self { config, registry }
    }

    /// Converts a single image file into the configured target format.
    ///
    /// # Arguments
    /// * `input_path` - Path to the input image file
    ///
    /// # Returns
    /// * `Result<Conversion>` - RGBA preview of the reopened output plus the
    ///   cache path it was written to
    ///
    /// # Errors
    /// Returns an error if:
    /// - The input path has no usable file stem
    /// - The cache directory cannot be created
    /// - The input file is missing, unreadable, or not a decodable image
    /// - The target extension is not in the format registry (checked before
    ///   anything is written)
    /// - The backend rejects the encode call, or the write fails
    /// - The written file does not decode when reopened
    pub fn convert(&self, input_path: &Path) -> Result<Conversion, ConvertError> {
        let output_path = self.cache_path_for(input_path)?;
        fs::create_dir_all(&self.config.cache_dir)?;

        debug!("Opening input image: {}", input_path.display());
        let input_image = image::open(input_path).map_err(ConvertError::InputImage)?;

        let encoder = match self.registry.resolve(&self.config.target_extension) {
            Some(format) => format,
            None => {
                warn!(
                    "Target {} not available, backend supports: {}",
                    self.config.target_extension,
                    self.registry.supported_extensions().join(", ")
                );
                return Err(ConvertError::UnsupportedFormat(
                    self.config.target_extension.clone(),
                ));
            }
        };

        debug!(
            "Encoding {} -> {} ({:?}, quality {})",
            input_path.display(),
            output_path.display(),
            encoder,
            self.config.quality
        );
        self.encode_to(&input_image, encoder, &output_path)?;

        // Reopen and check: catches silent encoder corruption that only
        // manifests on decode.
        let reopened = image::open(&output_path).map_err(ConvertError::Verification)?;
        let preview = reopened.to_rgba8();

        debug!(
            "Verified {} ({}x{})",
            output_path.display(),
            preview.width(),
            preview.height()
        );

        Ok(Conversion {
            preview,
            output_path,
        })
    }

    /// Computes the deterministic cache path for an input file.
    ///
    /// The output name is the input's file stem plus the configured target
    /// extension; converting the same stem twice always lands on the same
    /// path, and the later write overwrites the earlier one.
    pub fn cache_path_for(&self, input_path: &Path) -> Result<PathBuf, ConvertError> {
        let stem = input_path.file_stem().ok_or_else(|| {
            ConvertError::Validation(format!(
                "Input path has no file stem: {}",
                input_path.display()
            ))
        })?;

        let filename = format!("{}{}", stem.to_string_lossy(), self.config.target_extension);
        Ok(self.config.cache_dir.join(filename))
    }

    /// Encodes the image to the output path with the resolved backend encoder.
    ///
    /// JPEG and lossy WebP carry no alpha channel, so those encoders are fed
    /// RGB; every other target is fed RGBA. Lossless encoders ignore the
    /// quality setting.
    fn encode_to(
        &self,
        image: &DynamicImage,
        encoder: ImageFormat,
        output_path: &Path,
    ) -> Result<(), ConvertError> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);

        match encoder {
            ImageFormat::Jpeg => {
                let rgb = image.to_rgb8();
                JpegEncoder::new_with_quality(&mut writer, self.config.quality)
                    .encode_image(&rgb)
                    .map_err(ConvertError::Encode)?;
            }
            ImageFormat::WebP => {
                let rgb = image.to_rgb8();
                let (width, height) = rgb.dimensions();
                WebPEncoder::new_with_quality(
                    &mut writer,
                    WebPQuality::lossy(self.config.quality),
                )
                .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
                .map_err(ConvertError::Encode)?;
            }
            lossless => {
                let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
                rgba.write_to(&mut writer, lossless)
                    .map_err(ConvertError::Encode)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}
