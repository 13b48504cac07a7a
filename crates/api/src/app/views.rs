//! Page rendering with Tera.
//!
//! Templates are compiled into the binary so the server does not depend on
//! its working directory. `.html` templates are autoescaped.

use tera::{Context, Tera};

use vendo_infra::PurchaseReceipt;
use vendo_inventory::{CatalogEntry, Item};
use vendo_sales::{SaleHistoryEntry, SalesSummary};

use crate::app::dto::{PurchasedView, SaleRowView};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("admin.html", include_str!("../../templates/admin.html")),
    ("purchased.html", include_str!("../../templates/purchased.html")),
    ("sales.html", include_str!("../../templates/sales.html")),
];

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn catalog(&self, entries: &[CatalogEntry]) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("entries", entries);
        self.tera.render("index.html", &ctx)
    }

    pub fn admin(&self, items: &[Item]) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("items", items);
        self.tera.render("admin.html", &ctx)
    }

    pub fn purchased(&self, receipt: &PurchaseReceipt) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("purchase", &PurchasedView::from(receipt));
        self.tera.render("purchased.html", &ctx)
    }

    pub fn sales(&self, history: &[SaleHistoryEntry]) -> Result<String, tera::Error> {
        let rows: Vec<SaleRowView> = history.iter().map(SaleRowView::from).collect();
        let mut ctx = Context::new();
        ctx.insert("sales", &rows);
        ctx.insert("summary", &SalesSummary::from_history(history));
        self.tera.render("sales.html", &ctx)
    }
}
