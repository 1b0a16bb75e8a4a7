//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di conversione
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `target_extension`: Estensione di output, con punto iniziale (default: ".webp")
//! - `quality`: Qualità di encoding (1-100, default: 80)
//! - `cache_dir`: Directory cache per i file convertiti (default: "caches")
//! - `json_output`: Output eventi JSON per uso programmatico (default: false)
//!
//! ## Validazione:
//! - Controlla che quality sia 1-100 (valori fuori range vengono rifiutati,
//!   non clampati)
//! - Controlla che target_extension inizi con '.' e non sia vuota
//!
//! ## Esempio:
//! ```rust
//! use batch_image_converter::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     target_extension: ".png".to_string(),
//!     quality: 90,
//!     ..Default::default()
//! };
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for image conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target extension including the leading dot (e.g. ".webp")
    pub target_extension: String,
    /// Encoding quality (1-100), interpreted by the backend encoder
    pub quality: u8,
    /// Cache directory where converted files are written
    pub cache_dir: PathBuf,
    /// Emit progress and results as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_extension: ".webp".to_string(),
            quality: 80,
            cache_dir: PathBuf::from("caches"),
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(anyhow::anyhow!("Quality must be between 1 and 100"));
        }

        if !self.target_extension.starts_with('.') || self.target_extension.len() < 2 {
            return Err(anyhow::anyhow!(
                "Target extension must start with '.' (got: {:?})",
                self.target_extension
            ));
        }

        if self.cache_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Cache directory must not be empty"));
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
