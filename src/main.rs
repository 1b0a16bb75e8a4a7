//! # Batch Image Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Espansione delle directory in liste di file immagine
//! - Creazione della configurazione e avvio del batch converter
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (input, formato target, quality, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Valida che gli input esistano, espandendo le directory
//! 4. Crea un oggetto Config con tutti i parametri
//! 5. Istanzia BatchConverter e avvia la conversione
//!
//! ## Esempio di utilizzo:
//! ```bash
//! image-converter photos/ --format .webp --quality 85 --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use batch_image_converter::file_manager::FileManager;
use batch_image_converter::json_output::JsonMessage;
use batch_image_converter::{BatchConverter, Config};

#[derive(Parser)]
#[command(name = "image-converter")]
#[command(about = "Convert images to a target format with cache-backed verification")]
struct Args {
    /// Image files or directories containing images to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Target extension (.webp, .png, .jpg, .jpeg, .gif, .bmp, .tiff, .tif)
    #[arg(short, long, default_value = ".webp")]
    format: String,

    /// Encoding quality (1-100)
    #[arg(short, long, default_value = "80")]
    quality: u8,

    /// Cache directory for converted files
    #[arg(long, default_value = "caches")]
    cache_dir: PathBuf,

    /// Output progress and results as JSON for programmatic use
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Validate inputs, expanding directories into image file lists
    let mut files = Vec::new();
    for input in &args.inputs {
        if input.is_dir() {
            let mut found = FileManager::find_image_files(input)?;
            info!("Found {} images in {}", found.len(), input.display());
            files.append(&mut found);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            return Err(anyhow::anyhow!("Input does not exist: {}", input.display()));
        }
    }

    // Caller convenience: accept "webp" as well as ".webp". The registry
    // itself is strict about keys.
    let target_extension = if args.format.starts_with('.') {
        args.format.clone()
    } else {
        format!(".{}", args.format)
    };

    let config = Config {
        target_extension,
        quality: args.quality,
        cache_dir: args.cache_dir,
        json_output: args.json,
    };

    let converter = BatchConverter::new(config)?;
    let result = match converter.process(&files).await {
        Ok(result) => result,
        Err(e) => {
            if args.json {
                JsonMessage::error(e.to_string(), None).emit();
            }
            return Err(e);
        }
    };

    if !args.json {
        for (path, preview) in result.output_paths.iter().zip(result.previews.iter()) {
            info!("{} ({}x{})", path.display(), preview.width(), preview.height());
        }
    }

    Ok(())
}
