use crate::helpers::{
    bilingual_newsletter, fair_and_spirit_form, mount_text_answer, spawn_app, spawn_app_with,
    text_answer, IMAGE_PATH, TEXT_PATH,
};
use newsletter::domain::{ErrorPanel, ImagePosition};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{any, method, path_regex};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_bilingual_newsletter_is_assembled() {
    // Arrange
    let app = spawn_app().await;
    let mut form = fair_and_spirit_form();
    form.preferences.image_prompt = "a cat".to_string();

    Mock::given(path_regex(TEXT_PATH))
        .and(method("POST"))
        .respond_with(text_answer(bilingual_newsletter()))
        .expect(1)
        .mount(&app.ai_server)
        .await;
    Mock::given(path_regex(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_newsletter(&form).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers()["content-security-policy"].to_str().unwrap(),
        "sandbox"
    );
    let html = response.text().await.unwrap();
    assert!(!html.contains("{{"));
    assert!(html.contains("Fair and Spirit Week"));
    let primary = html.find("The fair is next Friday.").unwrap();
    let translated = html.find("Drage porodice").unwrap();
    let cta = html.find("Volunteer Now").unwrap();
    assert!(primary < translated && translated < cta);
    assert!(!html.contains("data:image"));
}

#[tokio::test]
async fn the_prompt_carries_blocks_and_translation_target() {
    // Arrange
    let app = spawn_app().await;
    mount_text_answer(&app, bilingual_newsletter()).await;

    // Act
    app.post_newsletter(&fair_and_spirit_form()).await;

    // Assert
    let requests = app.ai_requests().await;
    assert_eq!(requests.len(), 1);
    let prompt = requests[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("**Title:** Fair"));
    assert!(prompt.contains("**Title:** Spirit"));
    assert!(prompt.contains("into Bosnian"));
    assert!(requests[0]["systemInstruction"].is_object());
    assert_eq!(
        requests[0]["generationConfig"]["responseSchema"]["required"],
        json!(["headerTitle", "intro", "mainContent", "highlights"])
    );
}

#[tokio::test]
async fn an_image_is_placed_before_the_cta() {
    // Arrange
    let app = spawn_app().await;
    let mut form = fair_and_spirit_form();
    form.preferences.image_prompt = "children running a bake sale".to_string();
    form.preferences.image_position = ImagePosition::BeforeCta;

    mount_text_answer(&app, bilingual_newsletter()).await;
    Mock::given(path_regex(IMAGE_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/png" }]
        })))
        .expect(1)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_newsletter(&form).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    let image = html.find("data:image/png;base64,aGVsbG8=").unwrap();
    assert!(html.find("Wear house colours").unwrap() < image);
    assert!(image < html.find("Volunteer Now").unwrap());
    assert!(html.contains(r#"alt="children running a bake sale""#));
}

#[tokio::test]
async fn an_invalid_cta_url_never_reaches_the_provider() {
    // Arrange
    let app = spawn_app().await;
    let mut form = fair_and_spirit_form();
    form.preferences.cta_url = "ftp://x".to_string();

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_newsletter(&form).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert_eq!(panel.title, "Invalid Input");
    assert!(panel.message.contains("ctaUrl"));
}

#[tokio::test]
async fn blocked_content_is_a_moderation_error() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path_regex(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        )
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_newsletter(&fair_and_spirit_form()).await;

    // Assert
    assert_eq!(422, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert_eq!(panel.title, "Content Moderation Error");
    assert!(panel.message.contains("safety"));
}

#[tokio::test]
async fn non_json_answers_are_reported_as_invalid() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path_regex(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Here is your newsletter!" }] } }]
        })))
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_newsletter(&fair_and_spirit_form()).await;

    // Assert
    assert_eq!(502, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert_eq!(panel.title, "Invalid AI Response");
}

#[tokio::test]
async fn a_missing_api_key_is_a_configuration_error() {
    // Arrange
    let app = spawn_app_with(|c| c.ai.api_key = None).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.ai_server)
        .await;

    // Act
    let response = app.post_newsletter(&fair_and_spirit_form()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert_eq!(panel.title, "Configuration Error");
}

#[tokio::test]
async fn no_translation_when_secondary_language_is_none() {
    // Arrange
    let app = spawn_app().await;
    let mut form = fair_and_spirit_form();
    form.preferences.secondary_language = "None".to_string();
    mount_text_answer(&app, bilingual_newsletter()).await;

    // Act
    let response = app.post_newsletter(&form).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(!html.contains("Drage porodice"));
    let requests = app.ai_requests().await;
    let prompt = requests[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("**Secondary Language:** None"));
}

#[tokio::test]
async fn a_translation_without_highlights_is_invalid() {
    // Arrange
    let app = spawn_app().await;
    let mut answer = bilingual_newsletter();
    answer.as_object_mut().unwrap().remove("translatedHighlights");
    mount_text_answer(&app, answer).await;

    // Act
    let response = app.post_newsletter(&fair_and_spirit_form()).await;

    // Assert
    assert_eq!(502, response.status().as_u16());
    let panel: ErrorPanel = response.json().await.unwrap();
    assert_eq!(panel.title, "Invalid AI Response");
}

#[tokio::test]
async fn a_duplicate_submission_is_turned_away_while_generating() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path_regex(TEXT_PATH))
        .respond_with(text_answer(bilingual_newsletter()).set_delay(Duration::from_millis(500)))
        .expect(2)
        .mount(&app.ai_server)
        .await;
    let form = fair_and_spirit_form();

    // Act
    let (first, second) = tokio::join!(app.post_newsletter(&form), app.post_newsletter(&form));

    // Assert
    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 409]);
    let rejected = if first.status().as_u16() == 409 { first } else { second };
    let panel: ErrorPanel = rejected.json().await.unwrap();
    assert_eq!(panel.title, "Request In Progress");

    // Once the first one is done the form can be submitted again
    assert_eq!(200, app.post_newsletter(&form).await.status().as_u16());
}

#[tokio::test]
async fn a_previewed_image_is_reused_for_the_newsletter() {
    // Arrange
    let app = spawn_app().await;
    mount_text_answer(&app, bilingual_newsletter()).await;
    Mock::given(path_regex(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/png" }]
        })))
        .expect(1)
        .mount(&app.ai_server)
        .await;
    assert_eq!(200, app.post_image("students planting trees").await.status().as_u16());

    let mut form = fair_and_spirit_form();
    form.preferences.image_prompt = "students planting trees".to_string();

    // Act
    let response = app.post_newsletter(&form).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("data:image/png;base64,aGVsbG8="));
}
