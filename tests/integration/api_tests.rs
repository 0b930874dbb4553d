//! API integration tests
//!
//! These run against a live server with a migrated database:
//! cargo test -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:8080";

/// Client that surfaces redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_author_list_renders() {
    let response = client()
        .get(format!("{}/catalog/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Author list"));
}

#[tokio::test]
#[ignore]
async fn test_author_create_redirects_to_new_author() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[
            ("first_name", "Jane"),
            ("family_name", "Austen"),
            ("date_of_birth", ""),
            ("date_of_death", ""),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No Location header");
    assert!(location.starts_with("/catalog/author/"));
}

#[tokio::test]
#[ignore]
async fn test_author_create_invalid_redraws_form() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[
            ("first_name", "Jane!"),
            ("family_name", "Austen"),
            ("date_of_birth", ""),
            ("date_of_death", ""),
        ])
        .send()
        .await
        .expect("Failed to send request");

    // validation failures redraw the form, they are not HTTP errors
    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("First name has non-alphanumeric characters."));
    assert!(body.contains("Austen"));
}

#[tokio::test]
#[ignore]
async fn test_genre_create_deduplicates_existing_name() {
    let create = || async {
        client()
            .post(format!("{}/catalog/genre/create", BASE_URL))
            .form(&[("name", "Deduplicated Fiction")])
            .send()
            .await
            .expect("Failed to send request")
    };

    let first = create().await;
    assert_eq!(first.status(), StatusCode::FOUND);
    let first_location = first.headers()["location"].to_str().unwrap().to_string();

    let second = create().await;
    assert_eq!(second.status(), StatusCode::FOUND);
    let second_location = second.headers()["location"].to_str().unwrap().to_string();

    assert_eq!(first_location, second_location);
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_genre_redirects_to_list() {
    let response = client()
        .post(format!("{}/catalog/genre/9999999/delete", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/catalog/genres");
}

#[tokio::test]
#[ignore]
async fn test_detail_of_missing_author_is_404() {
    let response = client()
        .get(format!("{}/catalog/author/9999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
