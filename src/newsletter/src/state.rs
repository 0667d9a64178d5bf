//! Session state and the pure reducer that evolves it.

use crate::domain::{
    BlockField, ContentBlock, ErrorPanel, ExtractedStyles, FormData, ImageDataUri, ImagePosition,
    NewsletterOutput, Preferences, RichTextEditor, SeparatorStyle, SocialNetwork,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub form: FormData,
    /// A newsletter generation is running.
    pub is_loading: bool,
    /// Other controls with an operation in flight.
    pub busy: BTreeSet<Control>,
    pub error: Option<ErrorPanel>,
    pub output: Option<NewsletterOutput>,
    /// Generation of the latest request; answers for older ones are dropped.
    pub request: u64,
}

impl AppState {
    pub fn new(form: FormData) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }
}

/// Controls that run one operation at a time, besides newsletter generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Control {
    ImagePreview,
    StyleImport,
}

/// A single-field edit of the preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    PrimaryLanguage(String),
    SecondaryLanguage(String),
    Tone(String),
    Audience(String),
    Length(String),
    CtaText(String),
    CtaUrl(String),
    SeparatorStyle(SeparatorStyle),
    BodyFontFamily(String),
    BodyFontSize(u16),
    BodyTextColor(String),
    H2FontFamily(String),
    H2FontSize(u16),
    H2Color(String),
    H3FontFamily(String),
    H3FontSize(u16),
    H3Color(String),
    LinkColor(String),
    ButtonBackgroundColor(String),
    ButtonTextColor(String),
    ImagePrompt(String),
    ImagePosition(ImagePosition),
}

impl FieldUpdate {
    /// Build an update from the form's field name and a textual value,
    /// e.g. `("h2FontSize", "24")` or `("imagePosition", "Before CTA")`.
    pub fn parse(field: &str, value: &str) -> Result<FieldUpdate, String> {
        let as_text = serde_json::json!({ "field": field, "value": value });
        serde_json::from_value(as_text).or_else(|text_error| {
            let number: u16 = value.trim().parse().map_err(|_| text_error.to_string())?;
            serde_json::from_value(serde_json::json!({ "field": field, "value": number }))
                .map_err(|e| e.to_string())
        })
    }

    fn apply(self, p: &mut Preferences) {
        match self {
            FieldUpdate::PrimaryLanguage(v) => p.primary_language = v,
            FieldUpdate::SecondaryLanguage(v) => p.secondary_language = v,
            FieldUpdate::Tone(v) => p.tone = v,
            FieldUpdate::Audience(v) => p.audience = v,
            FieldUpdate::Length(v) => p.length = v,
            FieldUpdate::CtaText(v) => p.cta_text = v,
            FieldUpdate::CtaUrl(v) => p.cta_url = v,
            FieldUpdate::SeparatorStyle(v) => p.separator_style = v,
            FieldUpdate::BodyFontFamily(v) => p.body_font_family = v,
            FieldUpdate::BodyFontSize(v) => p.body_font_size = v,
            FieldUpdate::BodyTextColor(v) => p.body_text_color = v,
            FieldUpdate::H2FontFamily(v) => p.h2_font_family = v,
            FieldUpdate::H2FontSize(v) => p.h2_font_size = v,
            FieldUpdate::H2Color(v) => p.h2_color = v,
            FieldUpdate::H3FontFamily(v) => p.h3_font_family = v,
            FieldUpdate::H3FontSize(v) => p.h3_font_size = v,
            FieldUpdate::H3Color(v) => p.h3_color = v,
            FieldUpdate::LinkColor(v) => p.link_color = v,
            FieldUpdate::ButtonBackgroundColor(v) => p.button_background_color = v,
            FieldUpdate::ButtonTextColor(v) => p.button_text_color = v,
            FieldUpdate::ImagePrompt(v) => p.image_prompt = v,
            FieldUpdate::ImagePosition(v) => p.image_position = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    UpdateField(FieldUpdate),
    UpdateSocial {
        network: SocialNetwork,
        url: String,
    },
    AddContentBlock {
        created_at_ms: i64,
    },
    RemoveContentBlock {
        id: i64,
    },
    UpdateContentBlock {
        id: i64,
        field: BlockField,
        value: String,
    },
    /// Replace the form with a submitted one. An image generated earlier for
    /// the same prompt is carried over when the submission has none.
    SubmitForm(FormData),
    LoadPreferences(Preferences),
    ApplyImportedStyles(ExtractedStyles),
    /// An image preview for the current prompt.
    SetGeneratedImage(Option<ImageDataUri>),
    BeginRequest,
    SetOutput {
        request: u64,
        output: NewsletterOutput,
        image: Option<ImageDataUri>,
    },
    SetError {
        request: u64,
        error: ErrorPanel,
    },
    FinishRequest {
        request: u64,
    },
    Claim(Control),
    Release(Control),
}

pub fn reduce(state: AppState, command: Command) -> AppState {
    let mut next = state;
    match command {
        Command::UpdateField(FieldUpdate::ImagePrompt(prompt)) => {
            if prompt.trim() != next.form.preferences.image_prompt.trim() {
                next.form.generated_image = None;
            }
            next.form.preferences.image_prompt = prompt;
        }
        Command::UpdateField(update) => update.apply(&mut next.form.preferences),
        Command::UpdateSocial { network, url } => {
            next.form.preferences.socials.set(network, url)
        }
        Command::AddContentBlock { created_at_ms } => {
            let max_id = next.form.content_blocks.iter().map(|b| b.id).max();
            let id = match max_id {
                Some(max_id) => created_at_ms.max(max_id + 1),
                None => created_at_ms,
            };
            next.form.content_blocks.push(ContentBlock {
                id,
                title: String::new(),
                content: String::new(),
            });
        }
        Command::RemoveContentBlock { id } => {
            if next.form.content_blocks.len() > 1 {
                next.form.content_blocks.retain(|block| block.id != id);
            }
        }
        Command::UpdateContentBlock { id, field, value } => {
            if let Some(block) = next.form.content_blocks.iter_mut().find(|b| b.id == id) {
                match field {
                    BlockField::Title => block.title = value,
                    BlockField::Content => block.content = value,
                }
            }
        }
        Command::SubmitForm(mut form) => {
            if next.is_loading {
                tracing::debug!("Ignoring a form submitted while generating");
                return next;
            }
            let same_prompt = form.preferences.image_prompt.trim()
                == next.form.preferences.image_prompt.trim();
            if form.generated_image.is_none() && same_prompt {
                form.generated_image = next.form.generated_image.take();
            }
            next.form = form;
        }
        Command::LoadPreferences(preferences) => next.form.preferences = preferences,
        Command::ApplyImportedStyles(styles) => styles.apply_to(&mut next.form.preferences),
        Command::SetGeneratedImage(image) => next.form.generated_image = image,
        Command::BeginRequest => {
            if next.is_loading {
                tracing::debug!(current = next.request, "A request is already running");
                return next;
            }
            next.request += 1;
            next.is_loading = true;
            next.error = None;
            next.output = None;
        }
        Command::SetOutput {
            request,
            output,
            image,
        } => {
            if request == next.request {
                next.output = Some(output);
                next.form.generated_image = image;
                next.error = None;
            } else {
                tracing::debug!(request, current = next.request, "Dropping stale output");
            }
        }
        Command::SetError { request, error } => {
            if request == next.request {
                next.error = Some(error);
                next.output = None;
            } else {
                tracing::debug!(request, current = next.request, "Dropping stale error");
            }
        }
        Command::FinishRequest { request } => {
            if request == next.request {
                next.is_loading = false;
            }
        }
        Command::Claim(control) => {
            next.busy.insert(control);
        }
        Command::Release(control) => {
            next.busy.remove(&control);
        }
    }
    next
}

/// Shared, serialised access to one session's state.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<AppState>,
}

impl Session {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // The reducer never panics half-way, so a poisoned state is still whole.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `command` and return the resulting state.
    pub fn dispatch(&self, command: Command) -> AppState {
        let mut guard = self.lock();
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, command);
        guard.clone()
    }

    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    /// Submit `form` and start a newsletter request, unless one is already
    /// running. The returned state holds the form to generate from and the
    /// request generation to answer with.
    pub fn begin_request(&self, form: FormData) -> Option<(InFlight<'_>, AppState)> {
        let mut guard = self.lock();
        if guard.is_loading {
            return None;
        }
        let current = std::mem::take(&mut *guard);
        let submitted = reduce(current, Command::SubmitForm(form));
        *guard = reduce(submitted, Command::BeginRequest);

        let in_flight = InFlight {
            session: self,
            operation: Operation::Request(guard.request),
        };
        Some((in_flight, guard.clone()))
    }

    /// Reserve `control`, unless its previous operation is still running.
    pub fn claim(&self, control: Control) -> Option<InFlight<'_>> {
        let mut guard = self.lock();
        if guard.busy.contains(&control) {
            return None;
        }
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, Command::Claim(control));

        Some(InFlight {
            session: self,
            operation: Operation::Control(control),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Request(u64),
    Control(Control),
}

/// A running operation. Dropping it marks the operation finished, also when
/// the caller bails out early.
#[derive(Debug)]
pub struct InFlight<'a> {
    session: &'a Session,
    operation: Operation,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let command = match self.operation {
            Operation::Request(request) => Command::FinishRequest { request },
            Operation::Control(control) => Command::Release(control),
        };
        self.session.dispatch(command);
    }
}

/// Forward every edit of `editor` as an update of block `id`.
pub fn bind_editor(
    editor: &mut dyn RichTextEditor,
    id: i64,
    field: BlockField,
    commands: UnboundedSender<Command>,
) {
    editor.on_change(Box::new(move |content| {
        // The receiving session may already be gone.
        let _ = commands.send(Command::UpdateContentBlock {
            id,
            field,
            value: content.to_string(),
        });
    }));
}
