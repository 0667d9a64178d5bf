use crate::helpers::{mount_text_answer, spawn_app};
use newsletter::domain::{ErrorPanel, ExtractedStyles};
use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

fn palette() -> serde_json::Value {
    json!({
        "bodyTextColor": "#222222",
        "h2Color": "#0b3d91",
        "h3Color": "#0b3d91",
        "linkColor": "#0b3d91",
        "buttonBackgroundColor": "#f2a900",
        "buttonTextColor": "#000000",
        "bodyFontFamily": "Georgia",
        "h2FontFamily": "Verdana",
        "h3FontFamily": "Verdana"
    })
}

#[tokio::test]
async fn styles_are_extracted_from_a_bare_domain() {
    // Arrange
    let app = spawn_app().await;
    mount_text_answer(&app, palette()).await;

    // Act
    let response = app.post_styles("idss.ba").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let styles: ExtractedStyles = response.json().await.unwrap();
    assert_eq!(styles.h2_font_family, "Verdana");

    let requests = app.ai_requests().await;
    let prompt = requests[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("URL to analyze: https://idss.ba/"));
    assert_eq!(
        requests[0]["generationConfig"]["responseSchema"]["required"]
            .as_array()
            .unwrap()
            .len(),
        9
    );
}

#[tokio::test]
async fn an_empty_url_is_rejected_without_a_call() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_styles("  ").await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert!(panel.message.contains("valid URL"));
}

#[tokio::test]
async fn a_partial_palette_is_malformed() {
    // Arrange
    let app = spawn_app().await;
    mount_text_answer(&app, json!({ "bodyTextColor": "#222222" })).await;

    // Act
    let response = app.post_styles("idss.ba").await;

    // Assert
    assert_eq!(502, response.status().as_u16());
}
