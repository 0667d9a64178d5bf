use crate::helpers::{spawn_app, IMAGE_PATH};
use newsletter::domain::ErrorPanel;
use serde_json::json;
use wiremock::matchers::{any, method, path_regex};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn an_image_preview_returns_a_data_uri() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path_regex(IMAGE_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/png" }]
        })))
        .expect(1)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_image("students planting trees").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["dataUri"], "data:image/png;base64,aGVsbG8=");
}

#[tokio::test]
async fn short_image_prompts_are_rejected() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_image("a cat").await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert!(panel.message.contains("at least 10 characters"));
}

#[tokio::test]
async fn an_empty_prediction_list_is_an_image_error() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path_regex(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_image("students planting trees").await;

    // Assert
    assert_eq!(502, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert_eq!(panel.title, "Image Generation Failed");
}
