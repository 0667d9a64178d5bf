use crate::helpers::{bilingual_newsletter, fair_and_spirit_form, mount_text_answer, spawn_app};

#[tokio::test]
async fn preview_is_empty_before_generation() {
    let app = spawn_app().await;

    let response = app.get_preview().await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn preview_serves_the_latest_newsletter_sandboxed() {
    // Arrange
    let app = spawn_app().await;
    mount_text_answer(&app, bilingual_newsletter()).await;
    let generated = app
        .post_newsletter(&fair_and_spirit_form())
        .await
        .text()
        .await
        .unwrap();

    // Act
    let response = app.get_preview().await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers()["content-security-policy"].to_str().unwrap(),
        "sandbox"
    );
    assert_eq!(
        response.headers()["x-content-type-options"].to_str().unwrap(),
        "nosniff"
    );
    assert_eq!(response.text().await.unwrap(), generated);
}
