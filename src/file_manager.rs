//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery delle immagini.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva di immagini decodificabili in directory
//! - Determinazione formato file tramite estensione
//! - Utilità per dimensioni file e formattazione human-readable
//!
//! ## Formati riconosciuti in input:
//! - JPG, JPEG, PNG, WebP, GIF, BMP, TIFF, TIF
//!
//! ## Esempio:
//! ```no_run
//! use batch_image_converter::file_manager::FileManager;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let files = FileManager::find_image_files(Path::new("/path/to/images"))?;
//! for file in files {
//!     // convert image
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Get information about a file (size and modification time)
    pub async fn get_file_info(path: &Path) -> Result<(u64, u64)> {
        let metadata = fs::metadata(path).await?;
        let size = metadata.len();
        let modified = metadata
            .modified()?
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_secs();
        Ok((size, modified))
    }

    /// Find all decodable image files under a directory.
    /// Results are sorted so a directory batch has a stable order.
    pub fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::is_image(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if a file looks like a decodable image (by extension)
    pub fn is_image(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(
                ext_lower.as_str(),
                "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tiff" | "tif"
            )
        } else {
            false
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_image() {
        assert!(FileManager::is_image(Path::new("photo.jpg")));
        assert!(FileManager::is_image(Path::new("photo.JPG")));
        assert!(FileManager::is_image(Path::new("anim.gif")));
        assert!(FileManager::is_image(Path::new("scan.tif")));
        assert!(!FileManager::is_image(Path::new("clip.mp4")));
        assert!(!FileManager::is_image(Path::new("no_extension")));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_find_image_files_is_filtered_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(temp_dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(temp_dir.path().join("a.jpg"), b"x").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(nested.join("c.webp"), b"x").unwrap();

        let files = FileManager::find_image_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(files.len(), 3);
        assert_eq!(names, vec!["a.jpg", "b.png", "c.webp"]);
    }
}
