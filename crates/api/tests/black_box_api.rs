use std::path::PathBuf;
use std::sync::Arc;

use reqwest::{StatusCode, redirect::Policy};

use vendo_core::ItemId;
use vendo_infra::{Config, SqliteVendingStore, VendingStore};

struct TestServer {
    base_url: String,
    store: Arc<SqliteVendingStore>,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public");
        let config = Config::from_lookup(|key| {
            (key == "VENDO_PUBLIC_DIR").then(|| public_dir.to_string_lossy().into_owned())
        });

        let store = Arc::new(SqliteVendingStore::in_memory().await.unwrap());
        let app = vendo_api::app::build_app(store.clone(), &config).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            base_url: format!("http://{}", addr),
            store,
            client,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn buy(&self, id: &str, money: Option<&str>) -> (StatusCode, String) {
        let mut req = self.client.post(self.url(&format!("/purchase/{id}")));
        if let Some(money) = money {
            req = req.form(&[("money", money)]);
        }
        let res = req.send().await.unwrap();
        let status = res.status();
        (status, res.text().await.unwrap())
    }

    async fn stock_of(&self, id: i64) -> i64 {
        self.store.get_item(ItemId::new(id)).await.unwrap().unwrap().stock()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_ok_and_tagged_with_request_id() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn catalog_shows_seeded_items() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Cola"));
    assert!(body.contains("Green Tea"));
    assert!(body.contains("/images/cola.png"));
    assert!(body.contains("action=\"/purchase/1\""));
}

#[tokio::test]
async fn purchase_returns_change_and_records_sale() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.buy("1", Some("200")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Clunk!"));
    assert!(body.contains("<b>Cola</b>"));
    assert!(body.contains("50 yen"));

    assert_eq!(srv.stock_of(1).await, 4);
    assert_eq!(srv.store.count_sales().await.unwrap(), 1);
}

#[tokio::test]
async fn sold_out_item_is_refused() {
    let srv = TestServer::spawn().await;

    for _ in 0..5 {
        let (status, _) = srv.buy("1", Some("200")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = srv.buy("1", Some("200")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "Error: sold out!");
    assert_eq!(srv.stock_of(1).await, 0);
    assert_eq!(srv.store.count_sales().await.unwrap(), 5);
}

#[tokio::test]
async fn insufficient_funds_reports_price_and_amount() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.buy("1", Some("100")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, "Not enough money (price: 150 yen / inserted: 100 yen)");
    assert_eq!(srv.stock_of(1).await, 5);
    assert_eq!(srv.store.count_sales().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_or_garbage_money_is_refused() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.buy("1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("invalid amount"));

    let (status, _) = srv.buy("1", Some("lots")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(srv.store.count_sales().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_items_are_not_found() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.buy("999", Some("500")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Error: item not found");

    let (status, _) = srv.buy("cola", Some("500")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restock_adds_ten_and_redirects_to_admin() {
    let srv = TestServer::spawn().await;

    let res = srv.client.post(srv.url("/admin/restock/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/admin");
    assert_eq!(srv.stock_of(2).await, 15);

    let res = srv.client.post(srv.url("/admin/restock/404")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = srv.client.get(srv.url("/admin")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("<td>15</td>"));
    assert!(body.contains("action=\"/admin/restock/1\""));
}

#[tokio::test]
async fn sales_page_lists_successful_purchases() {
    let srv = TestServer::spawn().await;

    srv.buy("1", Some("150")).await;
    srv.buy("2", Some("10")).await;
    srv.buy("2", Some("120")).await;

    let res = srv.client.get(srv.url("/sales")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("2 sales, 270 yen in total."));
    assert_eq!(body.matches("<td>Cola</td>").count(), 1);
    assert_eq!(body.matches("<td>Green Tea</td>").count(), 1);
}

#[tokio::test]
async fn static_assets_are_served() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/images/tea.png")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv.client.get(srv.url("/nope.png")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
