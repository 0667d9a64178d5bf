use crate::domain::{ErrorPanel, ExtractedStyles, FormData, GenerationError};
use crate::routes::html_preview;
use crate::service::NewsletterService;
use crate::state::{Command, Control, FieldUpdate, Session};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Datelike;

impl ResponseError for GenerationError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerationError::Moderation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GenerationError::InProgress(_) => StatusCode::CONFLICT,
            GenerationError::Provider(_)
            | GenerationError::MalformedResponse(_)
            | GenerationError::ImageGeneration(_) => StatusCode::BAD_GATEWAY,
            GenerationError::Configuration(_)
            | GenerationError::Template(_)
            | GenerationError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorPanel::from(self))
    }
}

#[tracing::instrument(
    name = "Generating a newsletter",
    skip(form, service, session),
    fields(blocks = form.content_blocks.len())
)]
pub async fn generate_newsletter(
    form: web::Json<FormData>,
    service: web::Data<NewsletterService>,
    session: web::Data<Session>,
) -> Result<HttpResponse, GenerationError> {
    let (_in_flight, state) = session.begin_request(form.into_inner()).ok_or_else(|| {
        GenerationError::InProgress("A newsletter is already being generated.".to_string())
    })?;
    let request = state.request;
    let year = chrono::Utc::now().year();

    match service.generate_newsletter(&state.form, year).await {
        Ok(generated) => {
            session.dispatch(Command::SetOutput {
                request,
                output: generated.output.clone(),
                image: generated.image,
            });
            Ok(html_preview(generated.output.html))
        }
        Err(e) => {
            session.dispatch(Command::SetError {
                request,
                error: ErrorPanel::from(&e),
            });
            Err(e)
        }
    }
}

#[derive(serde::Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub data_uri: String,
}

#[tracing::instrument(name = "Generating an image preview", skip(body, service, session))]
pub async fn generate_image(
    body: web::Json<ImageRequest>,
    service: web::Data<NewsletterService>,
    session: web::Data<Session>,
) -> Result<HttpResponse, GenerationError> {
    let _in_flight = session.claim(Control::ImagePreview).ok_or_else(|| {
        GenerationError::InProgress("An image is already being generated.".to_string())
    })?;
    let image = service.generate_image_preview(&body.prompt).await?;
    session.dispatch(Command::UpdateField(FieldUpdate::ImagePrompt(
        body.prompt.clone(),
    )));
    session.dispatch(Command::SetGeneratedImage(Some(image.clone())));

    Ok(HttpResponse::Ok().json(ImageResponse {
        data_uri: image.as_str().to_string(),
    }))
}

#[derive(serde::Deserialize)]
pub struct StyleImportRequest {
    pub url: String,
}

#[tracing::instrument(name = "Importing styles", skip(body, service, session), fields(url = %body.url))]
pub async fn import_styles(
    body: web::Json<StyleImportRequest>,
    service: web::Data<NewsletterService>,
    session: web::Data<Session>,
) -> Result<web::Json<ExtractedStyles>, GenerationError> {
    let _in_flight = session.claim(Control::StyleImport).ok_or_else(|| {
        GenerationError::InProgress("Styles are already being imported.".to_string())
    })?;
    let styles = service.extract_styles(&body.url).await?;
    session.dispatch(Command::ApplyImportedStyles(styles.clone()));
    Ok(web::Json(styles))
}
