//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per consumatori
//! programmatici (wrapper Python/Electron, script di automazione).
//!
//! ## Responsabilità:
//! - Emette messaggi JSON line-delimited su stdout per eventi di conversione
//! - Fornisce interfaccia standardizzata per comunicazione inter-processo
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del batch (totale file, formato target, qualità)
//! - `file_start`: Inizio conversione di un file
//! - `file_complete`: Fine conversione di un file (path output, dimensioni preview)
//! - `complete`: Fine batch con la lista ordinata dei path di output
//! - `error`: Errore durante l'elaborazione

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio del batch di conversione
    #[serde(rename = "start")]
    Start {
        total_files: usize,
        target_extension: String,
        quality: u8,
    },

    /// Inizio conversione di un file specifico
    #[serde(rename = "file_start")]
    FileStart {
        path: PathBuf,
        index: usize,
        total: usize,
    },

    /// Fine conversione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        input: PathBuf,
        output: PathBuf,
        preview_width: u32,
        preview_height: u32,
        output_size: u64,
    },

    /// Batch completato
    #[serde(rename = "complete")]
    Complete {
        files_converted: usize,
        output_paths: Vec<PathBuf>,
        total_input_bytes: u64,
        total_output_bytes: u64,
        duration_seconds: f64,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error {
        message: String,
        path: Option<PathBuf>,
    },
}

impl JsonMessage {
    /// Serializza e stampa il messaggio su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di inizio batch
    pub fn start(total_files: usize, target_extension: String, quality: u8) -> Self {
        Self::Start {
            total_files,
            target_extension,
            quality,
        }
    }

    /// Crea un messaggio di inizio file
    pub fn file_start(path: PathBuf, index: usize, total: usize) -> Self {
        Self::FileStart { path, index, total }
    }

    /// Crea un messaggio di fine file
    pub fn file_complete(
        input: PathBuf,
        output: PathBuf,
        preview_width: u32,
        preview_height: u32,
        output_size: u64,
    ) -> Self {
        Self::FileComplete {
            input,
            output,
            preview_width,
            preview_height,
            output_size,
        }
    }

    /// Crea un messaggio di batch completato
    pub fn complete(
        files_converted: usize,
        output_paths: Vec<PathBuf>,
        total_input_bytes: u64,
        total_output_bytes: u64,
        duration_seconds: f64,
    ) -> Self {
        Self::Complete {
            files_converted,
            output_paths,
            total_input_bytes,
            total_output_bytes,
            duration_seconds,
        }
    }

    /// Crea un messaggio di errore
    pub fn error(message: String, path: Option<PathBuf>) -> Self {
        Self::Error { message, path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_tagged() {
        let msg = JsonMessage::start(3, ".webp".to_string(), 80);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"start\""));
        assert!(json.contains("\"quality\":80"));
    }

    #[test]
    fn test_complete_carries_ordered_paths() {
        let msg = JsonMessage::complete(
            2,
            vec![PathBuf::from("caches/a.gif"), PathBuf::from("caches/b.gif")],
            100,
            60,
            0.5,
        );
        let json = serde_json::to_string(&msg).unwrap();
        let index_a = json.find("a.gif").unwrap();
        let index_b = json.find("b.gif").unwrap();
        assert!(index_a < index_b);
    }
}
