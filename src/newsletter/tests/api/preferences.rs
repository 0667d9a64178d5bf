use crate::helpers::test_configuration;
use newsletter::cli::{run, Cli};
use newsletter::domain::{FormData, ImagePosition};
use clap::Parser;

fn write_form(path: &std::path::Path, form: &FormData) {
    std::fs::write(path, serde_json::to_string(form).unwrap()).unwrap();
}

fn read_form(path: &std::path::Path) -> FormData {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn saved_preferences_are_restored_into_another_form() {
    // Arrange
    let workspace = tempfile::tempdir().unwrap();
    let settings = test_configuration("http://127.0.0.1:9".to_string(), workspace.path());

    let source = workspace.path().join("source.json");
    let mut styled = FormData::default();
    styled.preferences.tone = "Formal".to_string();
    styled.preferences.image_position = ImagePosition::TopOfContent;
    write_form(&source, &styled);

    let target = workspace.path().join("target.json");
    let mut fresh = FormData::default();
    fresh.content_blocks[0].title = "Sports Day".to_string();
    write_form(&target, &fresh);

    // Act
    let save = Cli::parse_from(["newsletter", "prefs", "save", "--form", source.to_str().unwrap()]);
    run(save, settings.clone()).await.unwrap();
    let load = Cli::parse_from(["newsletter", "prefs", "load", "--form", target.to_str().unwrap()]);
    run(load, settings).await.unwrap();

    // Assert
    let restored = read_form(&target);
    assert_eq!(restored.preferences, styled.preferences);
    assert_eq!(restored.content_blocks[0].title, "Sports Day");
}

#[tokio::test]
async fn loading_without_a_snapshot_leaves_the_form_alone() {
    // Arrange
    let workspace = tempfile::tempdir().unwrap();
    let settings = test_configuration("http://127.0.0.1:9".to_string(), workspace.path());
    let target = workspace.path().join("target.json");
    write_form(&target, &FormData::default());
    let before = std::fs::read_to_string(&target).unwrap();

    // Act
    let load = Cli::parse_from(["newsletter", "prefs", "load", "--form", target.to_str().unwrap()]);
    run(load, settings).await.unwrap();

    // Assert
    assert_eq!(std::fs::read_to_string(&target).unwrap(), before);
}
