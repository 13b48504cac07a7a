//! Store tests against in-memory SQLite.
//!
//! Verifies:
//! - Bootstrap creates and seeds the catalog once
//! - Purchases enforce the check order and write stock + sale atomically
//! - Refused purchases leave no trace
//! - Concurrent purchases of the last unit sell it exactly once

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vendo_core::{ItemId, Money};
    use vendo_inventory::{InsertedMoney, NewItem, PurchaseError, RESTOCK_INCREMENT};

    use crate::error::PurchaseFailure;
    use crate::store::{SqliteVendingStore, VendingStore};

    async fn store() -> SqliteVendingStore {
        SqliteVendingStore::in_memory().await.unwrap()
    }

    async fn cola(store: &SqliteVendingStore) -> ItemId {
        let items = store.list_items().await.unwrap();
        let cola = items.iter().find(|i| i.name() == "Cola").unwrap();
        cola.id_typed()
    }

    fn rejection(result: Result<crate::store::PurchaseReceipt, PurchaseFailure>) -> PurchaseError {
        match result {
            Err(PurchaseFailure::Rejected(e)) => e,
            other => panic!("expected a refused purchase, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bootstrap_seeds_only_once() {
        let store = store().await;
        assert_eq!(store.list_items().await.unwrap().len(), 2);

        assert_eq!(store.bootstrap().await.unwrap(), 0);
        assert_eq!(store.list_items().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn items_are_listed_in_storage_order() {
        let store = store().await;
        let names: Vec<String> = store
            .list_items()
            .await
            .unwrap()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["Cola", "Green Tea"]);
    }

    #[tokio::test]
    async fn successful_purchase_decrements_and_records_sale() {
        let store = store().await;
        let id = cola(&store).await;

        let receipt = store.purchase(id, InsertedMoney::new(200)).await.unwrap();
        assert_eq!(receipt.item.name(), "Cola");
        assert_eq!(receipt.change, Money::new(50));
        assert_eq!(receipt.remaining_stock, 4);
        assert_eq!(receipt.sale.item_id, id);

        assert_eq!(store.get_item(id).await.unwrap().unwrap().stock(), 4);
        let history = store.sales_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].item_name, "Cola");
        assert_eq!(history[0].price, Money::new(150));
        assert_eq!(history[0].sale_id, receipt.sale.id);
    }

    #[tokio::test]
    async fn sold_out_item_is_refused_without_mutation() {
        let store = store().await;
        let item = store
            .insert_item(&NewItem::new("Cola Zero", 150, 0, "cola_zero.png"))
            .await
            .unwrap();

        let err = rejection(store.purchase(item.id_typed(), InsertedMoney::new(200)).await);
        assert_eq!(err, PurchaseError::OutOfStock);
        assert_eq!(store.get_item(item.id_typed()).await.unwrap().unwrap().stock(), 0);
        assert_eq!(store.count_sales().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insufficient_funds_is_refused_without_mutation() {
        let store = store().await;
        let id = cola(&store).await;

        let err = rejection(store.purchase(id, InsertedMoney::new(100)).await);
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                price: Money::new(150),
                received: InsertedMoney::new(100),
            }
        );
        assert_eq!(store.get_item(id).await.unwrap().unwrap().stock(), 5);
        assert_eq!(store.count_sales().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn invalid_money_is_insufficient_funds() {
        let store = store().await;
        let id = cola(&store).await;

        let err = rejection(store.purchase(id, InsertedMoney::invalid()).await);
        assert!(matches!(err, PurchaseError::InsufficientFunds { .. }));
        assert_eq!(store.count_sales().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let store = store().await;
        let err = rejection(store.purchase(ItemId::new(999), InsertedMoney::new(500)).await);
        assert_eq!(err, PurchaseError::ItemNotFound);
    }

    #[tokio::test]
    async fn last_unit_then_out_of_stock() {
        let store = store().await;
        let item = store
            .insert_item(&NewItem::new("Water", 100, 1, "water.png"))
            .await
            .unwrap();

        store.purchase(item.id_typed(), InsertedMoney::new(100)).await.unwrap();
        let err = rejection(store.purchase(item.id_typed(), InsertedMoney::new(100)).await);
        assert_eq!(err, PurchaseError::OutOfStock);
        assert_eq!(store.get_item(item.id_typed()).await.unwrap().unwrap().stock(), 0);
    }

    #[tokio::test]
    async fn concurrent_purchases_sell_the_last_unit_once() {
        let store = Arc::new(store().await);
        let item = store
            .insert_item(&NewItem::new("Last Can", 100, 1, "can.png"))
            .await
            .unwrap();
        let id = item.id_typed();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.purchase(id, InsertedMoney::new(100)).await
            }));
        }

        let mut sold = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => sold += 1,
                Err(PurchaseFailure::Rejected(PurchaseError::OutOfStock)) => refused += 1,
                Err(other) => panic!("unexpected failure: {other}"),
            }
        }

        assert_eq!(sold, 1);
        assert_eq!(refused, 3);
        assert_eq!(store.get_item(id).await.unwrap().unwrap().stock(), 0);
        assert_eq!(store.count_sales().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn restock_adds_ten() {
        let store = store().await;
        let id = cola(&store).await;

        let restocked = store.restock(id).await.unwrap().unwrap();
        assert_eq!(restocked.stock(), 5 + RESTOCK_INCREMENT);
        assert_eq!(store.get_item(id).await.unwrap().unwrap().stock(), 15);
    }

    #[tokio::test]
    async fn restock_of_unknown_item_is_a_noop() {
        let store = store().await;
        assert_eq!(store.restock(ItemId::new(404)).await.unwrap(), None);
        let stocks: Vec<i64> = store
            .list_items()
            .await
            .unwrap()
            .iter()
            .map(|i| i.stock())
            .collect();
        assert_eq!(stocks, vec![5, 5]);
    }

    #[tokio::test]
    async fn history_counts_successful_purchases_newest_first() {
        let store = store().await;
        let id = cola(&store).await;
        let tea = store
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .find(|i| i.name() == "Green Tea")
            .unwrap()
            .id_typed();

        store.purchase(id, InsertedMoney::new(150)).await.unwrap();
        let _ = store.purchase(id, InsertedMoney::new(10)).await;
        store.purchase(tea, InsertedMoney::new(500)).await.unwrap();

        let history = store.sales_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].item_name, "Green Tea");
        assert_eq!(history[1].item_name, "Cola");
        assert!(history[0].sold_at >= history[1].sold_at);
    }
}
