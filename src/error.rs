//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (creazione directory cache, scrittura fallita)
//! - `InputImage`: File di input mancante, illeggibile o non decodificabile
//! - `UnsupportedFormat`: Estensione target assente dal registry dei formati
//! - `Encode`: Il backend ha rifiutato la chiamata di encoding
//! - `Verification`: Il file appena scritto non si decodifica alla riapertura
//! - `Validation`: Errori di validazione input (es. path senza stem)
//!
//! ## Propagazione:
//! - Il converter non recupera mai da questi errori: fallisce la chiamata
//! - L'orchestratore batch li wrappa con `anyhow` aggiungendo il path
//!
//! ## Esempio:
//! ```ignore
//! if registry.resolve(&ext).is_none() {
//!     return Err(ConvertError::UnsupportedFormat(ext));
//! }
//! ```

/// Custom error types for image conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open input image: {0}")]
    InputImage(#[source] image::ImageError),

    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    #[error("Image encoding error: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Written file failed to decode on reopen: {0}")]
    Verification(#[source] image::ImageError),

    #[error("File validation error: {0}")]
    Validation(String),
}
