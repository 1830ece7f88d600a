//! API integration tests against a running server with an empty database

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

async fn create_shelf(client: &Client, name: &str, max_capacity: i32) -> Value {
    let response = client
        .post(format!("{}/api/libraries", BASE_URL))
        .json(&json!({ "name": name, "maxCapacity": max_capacity }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn create_book(client: &Client, title: &str) -> Value {
    let response = client
        .post(format!("{}/api/books", BASE_URL))
        .json(&json!({ "isbn": "9876", "title": title, "author": "Khotim" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_add_and_remove_book_round_trip() {
    let client = Client::new();
    let shelf = create_shelf(&client, "Round Trip", 1).await;
    let book = create_book(&client, "Round Trip Book").await;
    let shelf_id = shelf["id"].as_i64().expect("No shelf ID");
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .put(format!("{}/api/libraries/{}/addBook", BASE_URL, shelf_id))
        .json(&json!({ "id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["currentCapacity"], 1);
    assert_eq!(body["books"][0]["status"], "shelved");

    let response = client
        .get(format!("{}/api/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "shelved");
    assert_eq!(body["shelfId"], shelf_id);

    let response = client
        .delete(format!("{}/api/libraries/{}/removeBook", BASE_URL, shelf_id))
        .json(&json!({ "id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["currentCapacity"], 0);
    assert!(body["books"].as_array().expect("No books").is_empty());

    let response = client
        .get(format!("{}/api/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "not_shelved");
    assert!(body["shelfId"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_full_shelf_rejects_book() {
    let client = Client::new();
    let shelf = create_shelf(&client, "Tiny", 1).await;
    let first = create_book(&client, "First").await;
    let second = create_book(&client, "Second").await;
    let shelf_id = shelf["id"].as_i64().expect("No shelf ID");

    let response = client
        .put(format!("{}/api/libraries/{}/addBook", BASE_URL, shelf_id))
        .json(&json!({ "id": first["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/api/libraries/{}/addBook", BASE_URL, shelf_id))
        .json(&json!({ "id": second["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["shelf"], "Shelf Tiny already reached maximum capacity");
}

#[tokio::test]
#[ignore]
async fn test_filter_books_by_title_ignores_case() {
    let client = Client::new();
    create_book(&client, "Filterable Space Odyssey").await;

    let response = client
        .get(format!("{}/api/books?title=SPACE%20ODYSSEY", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array");
    assert!(books
        .iter()
        .any(|b| b["title"] == "Filterable Space Odyssey"));
}

#[tokio::test]
#[ignore]
async fn test_missing_shelf_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/libraries/{}", BASE_URL, i64::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_adds_never_overfill_shelf() {
    let client = Client::new();
    let shelf = create_shelf(&client, "Contended", 1).await;
    let first = create_book(&client, "Contender One").await;
    let second = create_book(&client, "Contender Two").await;
    let shelf_id = shelf["id"].as_i64().expect("No shelf ID");
    let url = format!("{}/api/libraries/{}/addBook", BASE_URL, shelf_id);

    let (a, b) = tokio::join!(
        client.put(&url).json(&json!({ "id": first["id"] })).send(),
        client.put(&url).json(&json!({ "id": second["id"] })).send(),
    );
    let mut statuses = vec![
        a.expect("Failed to send request").status().as_u16(),
        b.expect("Failed to send request").status().as_u16(),
    ];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![200, 409]);

    let response = client
        .get(format!("{}/api/libraries/{}", BASE_URL, shelf_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("No books");
    assert_eq!(body["currentCapacity"], 1);
    assert_eq!(books.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_book_shelved_elsewhere_is_rejected() {
    let client = Client::new();
    let shelf_a = create_shelf(&client, "Elsewhere A", 2).await;
    let shelf_b = create_shelf(&client, "Elsewhere B", 2).await;
    let book = create_book(&client, "Wanderer").await;
    let a_id = shelf_a["id"].as_i64().expect("No shelf ID");
    let b_id = shelf_b["id"].as_i64().expect("No shelf ID");

    let response = client
        .put(format!("{}/api/libraries/{}/addBook", BASE_URL, a_id))
        .json(&json!({ "id": book["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/api/libraries/{}/addBook", BASE_URL, b_id))
        .json(&json!({ "id": book["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "book": "Book Wanderer is already shelved in shelf Elsewhere A" })
    );

    for (id, expected) in [(a_id, 1), (b_id, 0)] {
        let response = client
            .get(format!("{}/api/libraries/{}", BASE_URL, id))
            .send()
            .await
            .expect("Failed to send request");
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["currentCapacity"], expected);
        assert_eq!(body["books"].as_array().expect("No books").len(), expected);
    }
}
