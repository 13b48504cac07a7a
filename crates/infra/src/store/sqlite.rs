//! SQLite-backed store.
//!
//! ## Purchase atomicity
//!
//! The purchase runs in one transaction whose first statement is the
//! conditional decrement (`stock > 0 AND price <= money`). Making the write
//! first means the transaction takes the write lock before it reads anything,
//! so concurrent purchases queue on the busy timeout instead of racing. When
//! the decrement matches no row the item is re-read in the same transaction to
//! explain why, using the ordinary purchase rules.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    Row, SqliteConnection, SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
};
use tracing::{info, instrument, warn};

use vendo_core::{ItemId, Money, SaleId};
use vendo_inventory::{
    InsertedMoney, Item, NewItem, PurchaseError, RESTOCK_INCREMENT, decide_purchase, seed_items,
};
use vendo_sales::{Sale, SaleHistoryEntry, decode_sold_at, encode_sold_at};

use super::{PurchaseReceipt, VendingStore};
use crate::config::DatabaseConfig;
use crate::error::{PurchaseFailure, StoreError, StoreResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT    NOT NULL,
        price INTEGER NOT NULL CHECK (price >= 0),
        stock INTEGER NOT NULL CHECK (stock >= 0),
        image TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id INTEGER NOT NULL,
        sold_at TEXT    NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS sales_sold_at_idx ON sales (sold_at)",
];

const ITEM_COLUMNS: &str = "id, name, price, stock, image";

#[derive(Debug, Clone)]
pub struct SqliteVendingStore {
    pool: SqlitePool,
}

impl SqliteVendingStore {
    /// Open (creating if missing) the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(StoreError::database("parse_database_url"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        // An in-memory database lives only as long as its connections, so
        // never let the pool retire them.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StoreError::database("connect"))?;

        Ok(Self { pool })
    }

    /// Connect to a private in-memory database and bootstrap it.
    pub async fn in_memory() -> StoreResult<Self> {
        let store = Self::connect(&DatabaseConfig::in_memory()).await?;
        store.bootstrap().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables if needed and seed an empty catalog.
    ///
    /// Returns the number of items seeded (0 on every start after the first).
    #[instrument(skip(self), err)]
    pub async fn bootstrap(&self) -> StoreResult<usize> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(StoreError::database("create_schema"))?;
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::database("begin_transaction"))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::database("count_items"))?;
        if count > 0 {
            tx.rollback()
                .await
                .map_err(StoreError::database("rollback"))?;
            return Ok(0);
        }

        let seeds = seed_items();
        for seed in &seeds {
            insert_item_row(&mut tx, seed).await?;
        }
        tx.commit()
            .await
            .map_err(StoreError::database("commit_transaction"))?;

        info!(seeded = seeds.len(), "seeded initial catalog");
        Ok(seeds.len())
    }

    /// Insert a new item (seeding and test setup; there is no HTTP route).
    pub async fn insert_item(&self, item: &NewItem) -> StoreResult<Item> {
        item.validate()?;
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(StoreError::database("acquire"))?;
        insert_item_row(&mut conn, item).await
    }

    /// Number of rows in `sales`, including sales whose item is gone.
    pub async fn count_sales(&self) -> StoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database("count_sales"))
    }
}

#[async_trait]
impl VendingStore for SqliteVendingStore {
    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query(&format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("list_items"))?;
        rows.iter().map(item_from_row).collect()
    }

    async fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(StoreError::database("acquire"))?;
        fetch_item(&mut conn, id).await
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn restock(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query(&format!(
            "UPDATE items SET stock = stock + ?1 WHERE id = ?2 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(RESTOCK_INCREMENT)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::database("restock"))?;

        let item = row.as_ref().map(item_from_row).transpose()?;
        match &item {
            Some(item) => info!(item_id = %id, stock = item.stock(), "restocked item"),
            None => info!(item_id = %id, "restock matched no item"),
        }
        Ok(item)
    }

    #[instrument(skip(self), fields(item_id = %id, inserted = %inserted))]
    async fn purchase(
        &self,
        id: ItemId,
        inserted: InsertedMoney,
    ) -> Result<PurchaseReceipt, PurchaseFailure> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::database("begin_transaction"))?;

        // RETURNING yields post-update values; add the sold unit back so the
        // purchase rules see the row as it was decided on.
        let decremented = sqlx::query(
            r#"
            UPDATE items
            SET stock = stock - 1
            WHERE id = ?1 AND stock > 0 AND price <= ?2
            RETURNING id, name, price, stock + 1 AS stock, image
            "#,
        )
        .bind(id.get())
        .bind(inserted.amount().map(Money::amount))
        .fetch_optional(&mut *tx)
        .await
        .map_err(StoreError::database("decrement_stock"))?;

        let Some(row) = decremented else {
            let current = fetch_item(&mut tx, id).await?;
            tx.rollback()
                .await
                .map_err(StoreError::database("rollback"))?;
            // The rules can only accept here if the row changed between the two
            // statements; treat that as the unit having been taken.
            let rejection = decide_purchase(current.as_ref(), inserted)
                .err()
                .unwrap_or(PurchaseError::OutOfStock);
            info!(reason = %rejection, "purchase refused");
            return Err(rejection.into());
        };

        let item = item_from_row(&row)?;
        let decision = match decide_purchase(Some(&item), inserted) {
            Ok(decision) => decision,
            Err(rejection) => {
                warn!(reason = %rejection, "conditional decrement disagreed with purchase rules");
                tx.rollback()
                    .await
                    .map_err(StoreError::database("rollback"))?;
                return Err(rejection.into());
            }
        };

        let sold_at = Utc::now();
        let sale_id: i64 =
            sqlx::query_scalar("INSERT INTO sales (item_id, sold_at) VALUES (?1, ?2) RETURNING id")
                .bind(decision.item_id.get())
                .bind(encode_sold_at(sold_at))
                .fetch_one(&mut *tx)
                .await
                .map_err(StoreError::database("insert_sale"))?;

        tx.commit()
            .await
            .map_err(StoreError::database("commit_transaction"))?;

        let receipt = PurchaseReceipt {
            remaining_stock: item.stock() - 1,
            change: decision.change,
            sale: Sale {
                id: SaleId::new(sale_id),
                item_id: decision.item_id,
                sold_at,
            },
            item,
        };
        info!(
            sale_id,
            change = receipt.change.amount(),
            remaining_stock = receipt.remaining_stock,
            "purchase committed"
        );
        Ok(receipt)
    }

    async fn sales_history(&self) -> StoreResult<Vec<SaleHistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT sales.id AS sale_id, sales.item_id, sales.sold_at, items.name, items.price
            FROM sales
            JOIN items ON sales.item_id = items.id
            ORDER BY sales.sold_at DESC, sales.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::database("sales_history"))?;

        rows.iter().map(history_entry_from_row).collect()
    }
}

async fn fetch_item(conn: &mut SqliteConnection, id: ItemId) -> StoreResult<Option<Item>> {
    let row = sqlx::query(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"))
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await
        .map_err(StoreError::database("get_item"))?;
    row.as_ref().map(item_from_row).transpose()
}

async fn insert_item_row(conn: &mut SqliteConnection, item: &NewItem) -> StoreResult<Item> {
    let row = sqlx::query(&format!(
        "INSERT INTO items (name, price, stock, image) VALUES (?1, ?2, ?3, ?4) RETURNING {ITEM_COLUMNS}"
    ))
    .bind(&item.name)
    .bind(item.price.amount())
    .bind(item.stock)
    .bind(&item.image)
    .fetch_one(&mut *conn)
    .await
    .map_err(StoreError::database("insert_item"))?;
    item_from_row(&row)
}

fn item_from_row(row: &SqliteRow) -> StoreResult<Item> {
    let column = StoreError::database("decode_item");
    let id: i64 = row.try_get("id").map_err(column)?;
    Ok(Item::new(
        ItemId::new(id),
        row.try_get::<String, _>("name").map_err(column)?,
        Money::new(row.try_get("price").map_err(column)?),
        row.try_get("stock").map_err(column)?,
        row.try_get::<String, _>("image").map_err(column)?,
    )?)
}

fn history_entry_from_row(row: &SqliteRow) -> StoreResult<SaleHistoryEntry> {
    let column = StoreError::database("decode_sale");
    let sold_at: String = row.try_get("sold_at").map_err(column)?;
    Ok(SaleHistoryEntry {
        sale_id: SaleId::new(row.try_get("sale_id").map_err(column)?),
        item_id: ItemId::new(row.try_get("item_id").map_err(column)?),
        item_name: row.try_get("name").map_err(column)?,
        price: Money::new(row.try_get("price").map_err(column)?),
        sold_at: decode_sold_at(&sold_at)?,
    })
}
