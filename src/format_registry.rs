//! # Format Registry Module
//!
//! Mappa le estensioni file verso i formati di encoding del backend immagini.
//!
//! ## Responsabilità:
//! - Costruisce la tabella (estensione → formato) una volta sola all'avvio
//! - Le estensioni vengono riportate dal backend stesso, non enumerate a mano
//! - Lookup read-only e deterministici per tutta la vita del processo
//!
//! ## Chiavi:
//! - Case-sensitive, con separatore iniziale incluso (es. ".webp", ".tif")

use image::ImageFormat;
use std::collections::HashMap;

/// Immutable extension → encoder table, built once from the imaging backend
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    entries: HashMap<String, ImageFormat>,
}

impl FormatRegistry {
    /// Build the registry from the formats the linked backend can encode.
    ///
    /// The extension strings come from the backend itself
    /// (`ImageFormat::extensions_str`), so the table always reflects what the
    /// compiled codec set actually supports. Keys keep the leading dot.
    pub fn from_backend() -> Self {
        const WRITABLE: &[ImageFormat] = &[
            ImageFormat::WebP,
            ImageFormat::Png,
            ImageFormat::Jpeg,
            ImageFormat::Gif,
            ImageFormat::Bmp,
            ImageFormat::Tiff,
        ];

        let mut entries = HashMap::new();
        for format in WRITABLE {
            for ext in format.extensions_str() {
                entries.insert(format!(".{}", ext), *format);
            }
        }

        Self { entries }
    }

    /// Build a registry from explicit entries (restricted or fake tables in tests)
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ImageFormat)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Pure lookup: same input always yields the same output.
    /// Absence is reported as `None`; deciding what to do with a missing
    /// format is up to the caller.
    pub fn resolve(&self, extension: &str) -> Option<ImageFormat> {
        self.entries.get(extension).copied()
    }

    /// Sorted list of registered extensions, for help text and error messages
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_registry_covers_known_extensions() {
        let registry = FormatRegistry::from_backend();

        for ext in [".webp", ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tiff", ".tif"] {
            assert!(registry.resolve(ext).is_some(), "missing {}", ext);
        }
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_resolve_unknown_extension() {
        let registry = FormatRegistry::from_backend();
        assert!(registry.resolve(".xyz").is_none());
        assert!(registry.resolve("webp").is_none()); // no leading dot
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let registry = FormatRegistry::from_backend();
        assert!(registry.resolve(".WEBP").is_none());
        assert!(registry.resolve(".Jpg").is_none());
    }

    #[test]
    fn test_extension_aliases_share_an_encoder() {
        let registry = FormatRegistry::from_backend();
        assert_eq!(registry.resolve(".jpg"), registry.resolve(".jpeg"));
        assert_eq!(registry.resolve(".tif"), registry.resolve(".tiff"));
        assert_eq!(registry.resolve(".webp"), Some(ImageFormat::WebP));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let registry = FormatRegistry::from_backend();
        assert_eq!(registry.resolve(".png"), registry.resolve(".png"));
    }

    #[test]
    fn test_restricted_registry_from_entries() {
        let registry =
            FormatRegistry::from_entries([(".png".to_string(), ImageFormat::Png)]);

        assert_eq!(registry.resolve(".png"), Some(ImageFormat::Png));
        assert!(registry.resolve(".webp").is_none());
        assert_eq!(registry.supported_extensions(), vec![".png"]);
    }
}
