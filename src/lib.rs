//! # Batch Image Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per le operazioni di conversione
//! - `format_registry`: Tabella estensione → encoder riportata dal backend
//! - `converter`: Conversione singola immagine con verifica dell'output
//! - `batch`: Orchestratore sequenziale del batch
//! - `file_manager`: Operazioni sui file e discovery immagini
//! - `progress`: Progress tracking e statistiche
//! - `json_output`: Eventi JSON per consumatori programmatici
//!
//! ## Utilizzo:
//! ```no_run
//! use batch_image_converter::{BatchConverter, Config};
//! use std::path::PathBuf;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let converter = BatchConverter::new(config)?;
//! let results = converter.process(&[PathBuf::from("photo.jpg")]).await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod format_registry;
pub mod json_output;
pub mod progress;

pub use batch::{BatchConverter, BatchOutput};
pub use config::Config;
pub use converter::{Conversion, ImageConverter};
pub use error::ConvertError;
pub use format_registry::FormatRegistry;
