use std::{path::PathBuf, sync::Arc};

use vendo_infra::{Config, VendingStore};

use crate::app::views::Views;

/// Everything a handler needs, shared behind one `Arc`.
pub struct AppServices {
    pub store: Arc<dyn VendingStore>,
    pub views: Views,
    pub images_dir: PathBuf,
}

impl AppServices {
    pub fn new(store: Arc<dyn VendingStore>, config: &Config) -> Result<Self, tera::Error> {
        Ok(Self {
            store,
            views: Views::load()?,
            images_dir: config.images_dir(),
        })
    }
}
