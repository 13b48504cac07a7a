//! Image assets shown on the catalog.

use std::{io, path::Path};

use vendo_inventory::is_image_file;

/// File names of the images directly under `dir`, sorted.
///
/// A missing directory is an empty catalog of images, not an error.
pub async fn scan_images(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_image_file(name) {
                images.push(name.to_string());
            }
        }
    }
    images.sort();
    Ok(images)
}
