use newsletter::configuration::{get_configuration_from, Environment, Settings};
use newsletter::domain::FormData;
use newsletter::startup::Application;
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::{json, Value};
use std::path::Path;
use telemetry::{get_subscriber, init_subscriber};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub const TEXT_PATH: &str = r"^/v1beta/models/.+:generateContent$";
pub const IMAGE_PATH: &str = r"^/v1beta/models/.+:predict$";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub ai_server: MockServer,
    pub api_client: reqwest::Client,
    /// Keeps the preference file alive for the test.
    pub workspace: tempfile::TempDir,
}

impl TestApp {
    pub async fn post_newsletter(&self, form: &FormData) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/newsletter", &self.address))
            .json(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_image(&self, prompt: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/image", &self.address))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_styles(&self, url: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/styles", &self.address))
            .json(&json!({ "url": url }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_preview(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Bodies of every request the provider mock has received.
    pub async fn ai_requests(&self) -> Vec<Value> {
        self.ai_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub fn test_configuration(ai_base_url: String, workspace: &Path) -> Settings {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut c = get_configuration_from(&manifest_dir.join("configuration"), Environment::Local)
        .expect("Failed to read configuration.");
    // Use a random OS port
    c.application.port = 0;
    c.ai.base_url = ai_base_url;
    c.ai.api_key = Some(Secret::new("test-key".to_string()));
    c.ai.timeout_milliseconds = 2_000;
    c.template.path = Some(manifest_dir.join("templates").join("newsletter.html"));
    c.template.url = None;
    c.preferences.path = workspace.join("prefs.json");
    c
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    // Launch a mock server to stand in for the AI provider
    let ai_server = MockServer::start().await;
    let workspace = tempfile::tempdir().expect("Failed to create a workspace.");

    let mut configuration = test_configuration(ai_server.uri(), workspace.path());
    customise(&mut configuration);

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        port,
        ai_server,
        api_client: reqwest::Client::new(),
        workspace,
    }
}

pub fn text_answer(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": payload.to_string() }] },
            "finishReason": "STOP"
        }]
    }))
}

pub fn bilingual_newsletter() -> Value {
    json!({
        "headerTitle": "Fair and Spirit Week",
        "intro": "Dear families, a busy and joyful week lies ahead.",
        "mainContent": "<h2 style=\"color: #004080;\">Fair</h2><p>The fair is next Friday.</p><h2 style=\"color: #004080;\">Spirit</h2><p>Wear your house colours.</p>",
        "highlights": ["Fair next Friday", "Wear house colours"],
        "translatedIntro": "Drage porodice, pred nama je uzbudljiva sedmica.",
        "translatedMainContent": "<h2>Sajam</h2><p>Sajam je sljedeći petak.</p>",
        "translatedHighlights": ["Sajam u petak"]
    })
}

pub async fn mount_text_answer(app: &TestApp, payload: Value) {
    Mock::given(path_regex(TEXT_PATH))
        .and(method("POST"))
        .respond_with(text_answer(payload))
        .mount(&app.ai_server)
        .await;
}

pub fn fair_and_spirit_form() -> FormData {
    let mut form = FormData::default();
    form.content_blocks[0].title = "Fair".to_string();
    form.content_blocks[0].content = "The fair is next **Friday**.".to_string();
    form.content_blocks[1].title = "Spirit".to_string();
    form.content_blocks[1].content = "Wear your house colours.".to_string();
    form.preferences.secondary_language = "Bosnian".to_string();
    form
}
