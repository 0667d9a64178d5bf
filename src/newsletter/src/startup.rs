use crate::configuration::Settings;
use crate::routes::{generate_image, generate_newsletter, health_check, import_styles, preview};
use crate::service::NewsletterService;
use crate::state::Session;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let service = NewsletterService::from_settings(&configuration)?;
        Self::build_with(configuration, service, Session::default()).await
    }

    /// Serve an existing service and session, e.g. a newsletter generated from the CLI.
    pub async fn build_with(
        configuration: Settings,
        service: NewsletterService,
        session: Session,
    ) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, service, session)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn run(
    listener: TcpListener,
    service: NewsletterService,
    session: Session,
) -> Result<Server, anyhow::Error> {
    let service = Data::new(service);
    let session = Data::new(session);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(preview))
            .route("/health_check", web::get().to(health_check))
            .route("/newsletter", web::post().to(generate_newsletter))
            .route("/image", web::post().to(generate_image))
            .route("/styles", web::post().to(import_styles))
            .app_data(service.clone())
            .app_data(session.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
