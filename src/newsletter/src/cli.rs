//! Command-line front end. Each subcommand reads the form from a JSON file
//! and drives the same session reducer and service as the preview server.

use crate::adapters::{ExternalEditor, JsonFilePreferenceStore};
use crate::configuration::Settings;
use crate::domain::{
    style_warnings, BlockField, ContentBlock, ErrorPanel, FormData, GenerationError, PreferenceStore,
    PreferenceStoreError, SocialNetwork,
};
use crate::service::NewsletterService;
use crate::startup::Application;
use crate::state::{bind_editor, reduce, AppState, Command, FieldUpdate, Session};
use crate::utils::error_chain_fmt;
use anyhow::Context;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "newsletter", version, about = "Generate bilingual school newsletters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate the newsletter HTML from a form file.
    Generate {
        #[arg(long)]
        form: PathBuf,
        /// Write the HTML here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Serve the result on the local preview server.
        #[arg(long)]
        preview: bool,
    },
    /// Generate the illustration described by the form's image prompt.
    Image {
        #[arg(long)]
        form: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read colours and fonts off an existing web page.
    ImportStyles {
        url: String,
        #[arg(long)]
        form: PathBuf,
        /// Write the imported styles back into the form file.
        #[arg(long)]
        apply: bool,
    },
    /// Save or restore the form settings.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Report colour pairs below the 4.5:1 contrast ratio.
    Contrast {
        #[arg(long)]
        form: PathBuf,
    },
    /// Change one thing in a form file.
    Edit {
        #[arg(long)]
        form: PathBuf,
        #[command(subcommand)]
        action: EditAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum EditAction {
    /// Set a preference by its form name, e.g. `h2FontSize 24`.
    Set { field: String, value: String },
    /// Link a social profile; an empty URL removes it.
    Social {
        #[arg(value_parser = parse_network)]
        network: SocialNetwork,
        url: String,
    },
    AddBlock,
    RemoveBlock { id: i64 },
    RenameBlock { id: i64, title: String },
    /// Open the content of a block in an editor.
    EditBlock {
        id: i64,
        #[arg(long, env = "EDITOR", default_value = "vi")]
        editor: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    Save {
        #[arg(long)]
        form: PathBuf,
    },
    Load {
        #[arg(long)]
        form: PathBuf,
    },
}

#[derive(thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Preferences(#[from] PreferenceStoreError),
    #[error("The form file is not valid: {0}")]
    InvalidForm(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<&CliError> for ErrorPanel {
    fn from(error: &CliError) -> Self {
        match error {
            CliError::Generation(e) => ErrorPanel::from(e),
            CliError::Preferences(e) => ErrorPanel {
                title: "Preferences Error".to_string(),
                message: e.to_string(),
            },
            CliError::InvalidForm(_) => ErrorPanel {
                title: "Invalid Input".to_string(),
                message: error.to_string(),
            },
            CliError::Unexpected(e) => ErrorPanel::from_message(&format!("{:#}", e)),
        }
    }
}

pub async fn run(cli: Cli, settings: Settings) -> Result<(), CliError> {
    match cli.command {
        CliCommand::Generate { form, out, preview } => {
            generate(&settings, &form, out.as_deref(), preview).await
        }
        CliCommand::Image { form, out } => {
            let service = NewsletterService::from_settings(&settings)?;
            let form = read_form(&form).await?;
            let image = service
                .generate_image_preview(&form.preferences.image_prompt)
                .await?;
            emit(out.as_deref(), image.as_str()).await
        }
        CliCommand::ImportStyles { url, form, apply } => {
            let service = NewsletterService::from_settings(&settings)?;
            let styles = service.extract_styles(&url).await?;
            let rendered = serde_json::to_string_pretty(&styles)
                .context("Failed to serialize the imported styles")?;
            println!("{}", rendered);

            if apply {
                let state = AppState::new(read_form(&form).await?);
                let state = reduce(state, Command::ApplyImportedStyles(styles));
                write_form(&form, &state.form).await?;
            }
            Ok(())
        }
        CliCommand::Prefs { action } => {
            let store = JsonFilePreferenceStore::new(settings.preferences.path.clone());
            match action {
                PrefsAction::Save { form } => {
                    let form = read_form(&form).await?;
                    store.save(&form.preferences).await?;
                    println!("Preferences saved.");
                }
                PrefsAction::Load { form } => match store.load().await? {
                    Some(preferences) => {
                        let state = AppState::new(read_form(&form).await?);
                        let state = reduce(state, Command::LoadPreferences(preferences));
                        write_form(&form, &state.form).await?;
                        println!("Preferences loaded.");
                    }
                    None => println!("No saved preferences found."),
                },
            }
            Ok(())
        }
        CliCommand::Contrast { form } => {
            let form = read_form(&form).await?;
            let warnings = style_warnings(&form.preferences);
            if warnings.is_empty() {
                println!("All colour pairs meet the 4.5:1 contrast ratio.");
            }
            for warning in warnings {
                println!("{}", warning);
            }
            Ok(())
        }
        CliCommand::Edit { form, action } => edit(&form, action).await,
    }
}

async fn edit(form_path: &Path, action: EditAction) -> Result<(), CliError> {
    let state = AppState::new(read_form(form_path).await?);
    let state = match action {
        EditAction::Set { field, value } => {
            let update = FieldUpdate::parse(&field, &value).map_err(CliError::InvalidForm)?;
            reduce(state, Command::UpdateField(update))
        }
        EditAction::Social { network, url } => {
            reduce(state, Command::UpdateSocial { network, url })
        }
        EditAction::AddBlock => {
            let created_at_ms = chrono::Utc::now().timestamp_millis();
            let state = reduce(state, Command::AddContentBlock { created_at_ms });
            if let Some(block) = state.form.content_blocks.last() {
                println!("Added content block {}.", block.id);
            }
            state
        }
        EditAction::RemoveBlock { id } => {
            require_block(&state, id)?;
            if state.form.content_blocks.len() == 1 {
                println!("The last content block cannot be removed.");
            }
            reduce(state, Command::RemoveContentBlock { id })
        }
        EditAction::RenameBlock { id, title } => {
            require_block(&state, id)?;
            reduce(
                state,
                Command::UpdateContentBlock {
                    id,
                    field: BlockField::Title,
                    value: title,
                },
            )
        }
        EditAction::EditBlock { id, editor } => {
            let content = require_block(&state, id)?.content.clone();
            let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
            let mut editor = ExternalEditor::new(editor, content);
            bind_editor(&mut editor, id, BlockField::Content, sender);
            editor.edit().await?;

            let mut state = state;
            while let Ok(command) = receiver.try_recv() {
                state = reduce(state, command);
            }
            state
        }
    };
    write_form(form_path, &state.form).await
}

fn require_block(state: &AppState, id: i64) -> Result<&ContentBlock, CliError> {
    state
        .form
        .content_blocks
        .iter()
        .find(|block| block.id == id)
        .ok_or_else(|| CliError::InvalidForm(format!("there is no content block {}", id)))
}

fn parse_network(s: &str) -> Result<SocialNetwork, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("{} is not one of facebook, instagram, linkedin", s))
}

async fn generate(
    settings: &Settings,
    form_path: &Path,
    out: Option<&Path>,
    preview: bool,
) -> Result<(), CliError> {
    let service = NewsletterService::from_settings(settings)?;
    let session = Session::default();
    let form = read_form(form_path).await?;

    let (in_flight, state) = session.begin_request(form).ok_or_else(|| {
        GenerationError::InProgress("A newsletter is already being generated.".to_string())
    })?;
    let request = state.request;
    let result = service
        .generate_newsletter(&state.form, chrono::Utc::now().year())
        .await;

    let outcome = match result {
        Ok(generated) => {
            session.dispatch(Command::SetOutput {
                request,
                output: generated.output,
                image: generated.image,
            });
            Ok(())
        }
        Err(e) => {
            session.dispatch(Command::SetError {
                request,
                error: ErrorPanel::from(&e),
            });
            Err(e)
        }
    };
    drop(in_flight);
    outcome?;

    let state = session.snapshot();
    if let Some(output) = &state.output {
        if out.is_some() || !preview {
            emit(out, &output.html).await?;
        }
    }

    if preview {
        let application = Application::build_with(settings.clone(), service, session).await?;
        eprintln!(
            "Preview at http://{}:{}/",
            settings.application.host,
            application.port()
        );
        application
            .run_until_stopped()
            .await
            .context("The preview server stopped unexpectedly")?;
    }
    Ok(())
}

async fn read_form(path: &Path) -> Result<FormData, CliError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| CliError::InvalidForm(e.to_string()))
}

async fn write_form(path: &Path, form: &FormData) -> Result<(), CliError> {
    let contents = serde_json::to_string_pretty(form).context("Failed to serialize the form")?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

async fn emit(out: Option<&Path>, contents: &str) -> Result<(), CliError> {
    match out {
        Some(path) => tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", contents),
    }
    Ok(())
}
