//! Customer-facing catalog: stored items merged with the image assets on disk.

use std::collections::HashSet;

use serde::Serialize;

use vendo_core::{ItemId, Money};

use crate::item::Item;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// One tile on the vending-machine front.
///
/// Placeholders come from image files no item refers to; they have no id or
/// price and can never be purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: Option<ItemId>,
    pub name: String,
    pub price: Option<Money>,
    pub stock: i64,
    pub image: String,
    pub image_available: bool,
}

impl CatalogEntry {
    fn from_item(item: &Item, image_available: bool) -> Self {
        Self {
            id: Some(item.id_typed()),
            name: item.name().to_string(),
            price: Some(item.price()),
            stock: item.stock(),
            image: item.image().to_string(),
            image_available,
        }
    }

    fn placeholder(image: String) -> Self {
        Self {
            id: None,
            name: name_from_filename(&image),
            price: None,
            stock: 0,
            image,
            image_available: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock <= 0
    }
}

/// Whether `file_name` has one of the recognised image extensions.
pub fn is_image_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty() && IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
        .unwrap_or(false)
}

/// Display name for an unmatched image: the file stem with `_`/`-` as spaces.
pub fn name_from_filename(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    stem.replace(['_', '-'], " ").trim().to_string()
}

/// Merge stored items with the image files found on disk.
///
/// Items keep storage order. Images no item references are appended as
/// placeholders, sorted by file name. Non-image files are ignored.
pub fn merge_catalog<I>(items: &[Item], image_files: I) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = String>,
{
    let mut images: Vec<String> = image_files
        .into_iter()
        .filter(|f| is_image_file(f))
        .collect();
    images.sort();
    images.dedup();

    let on_disk: HashSet<&str> = images.iter().map(String::as_str).collect();
    let referenced: HashSet<&str> = items.iter().map(Item::image).collect();

    let mut entries: Vec<CatalogEntry> = items
        .iter()
        .map(|item| CatalogEntry::from_item(item, on_disk.contains(item.image())))
        .collect();

    entries.extend(
        images
            .iter()
            .filter(|f| !referenced.contains(f.as_str()))
            .cloned()
            .map(CatalogEntry::placeholder),
    );

    entries
}
