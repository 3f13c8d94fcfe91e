//! Wire-contract tests for the remote catalog gateway
//!
//! The gateway must swallow every failure mode: a dead server, HTTP
//! errors and unparseable bodies all degrade to empty/absent results or
//! an unconfirmed ack, never to an error.

use shopkeeper::domain::entities::{Product, Rating};
use shopkeeper::domain::traits::{RemoteAck, RemoteCatalog};
use shopkeeper::infrastructure::gateway::HttpCatalogGateway;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn widget(id: u64) -> Product {
    Product {
        id,
        title: "Widget".to_string(),
        price: 9.99,
        description: "A fine widget".to_string(),
        category: "tools".to_string(),
        image: String::new(),
        rating: Rating { rate: 4.5, count: 3 },
    }
}

#[tokio::test]
async fn test_fetch_all_parses_product_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![widget(1), widget(2)]))
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    let products = gateway.fetch_all().await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title, "Widget");
}

#[tokio::test]
async fn test_fetch_all_degrades_to_empty_on_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert!(gateway.fetch_all().await.is_empty());
}

#[tokio::test]
async fn test_fetch_all_degrades_to_empty_on_garbage_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert!(gateway.fetch_all().await.is_empty());
}

#[tokio::test]
async fn test_fetch_all_degrades_to_empty_when_unreachable() {
    // nothing listens here
    let gateway = HttpCatalogGateway::new("http://127.0.0.1:9");
    assert!(gateway.fetch_all().await.is_empty());
}

#[tokio::test]
async fn test_fetch_one_returns_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget(5)))
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    let product = gateway.fetch_one(5).await.unwrap();
    assert_eq!(product.id, 5);
}

#[tokio::test]
async fn test_fetch_one_treats_non_2xx_as_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert!(gateway.fetch_one(42).await.is_none());
}

#[tokio::test]
async fn test_create_posts_product_json() {
    let server = MockServer::start().await;
    let product = widget(7);
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(&product))
        .respond_with(ResponseTemplate::new(200).set_body_json(&product))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert_eq!(gateway.create(&product).await, RemoteAck::Confirmed);
}

#[tokio::test]
async fn test_create_is_unconfirmed_on_failure() {
    let gateway = HttpCatalogGateway::new("http://127.0.0.1:9");
    assert_eq!(gateway.create(&widget(1)).await, RemoteAck::Unconfirmed);
}

#[tokio::test]
async fn test_update_puts_to_product_path() {
    let server = MockServer::start().await;
    let product = widget(3);
    Mock::given(method("PUT"))
        .and(path("/products/3"))
        .and(body_json(&product))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert_eq!(gateway.update(3, &product).await, RemoteAck::Confirmed);
}

#[tokio::test]
async fn test_remove_deletes_product_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert_eq!(gateway.remove(9).await, RemoteAck::Confirmed);
}

#[tokio::test]
async fn test_remove_unconfirmed_on_http_error_but_never_panics() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/9"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gateway = HttpCatalogGateway::new(server.uri());
    assert_eq!(gateway.remove(9).await, RemoteAck::Unconfirmed);
}
