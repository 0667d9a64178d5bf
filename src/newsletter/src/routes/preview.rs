use crate::state::Session;
use actix_web::http::header::{ContentType, CONTENT_SECURITY_POLICY, X_CONTENT_TYPE_OPTIONS};
use actix_web::{web, HttpResponse};

/// Generated HTML is shown in a sandbox: no scripts, no sniffing.
pub fn html_preview(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((CONTENT_SECURITY_POLICY, "sandbox"))
        .insert_header((X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(html)
}

#[tracing::instrument(name = "Serving preview", skip(session))]
pub async fn preview(session: web::Data<Session>) -> HttpResponse {
    match session.snapshot().output {
        Some(output) => html_preview(output.html),
        None => HttpResponse::NotFound()
            .content_type(ContentType::plaintext())
            .body("No newsletter has been generated yet."),
    }
}
