use clap::Parser;
use newsletter::cli::{run, Cli};
use newsletter::configuration::get_configuration;
use newsletter::domain::ErrorPanel;
use telemetry::init_from_settings;

#[actix_web::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("Configuration Error\n{}", e);
            return std::process::ExitCode::FAILURE;
        }
    };
    init_from_settings(&configuration.telemetry);

    match run(cli, configuration).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Command failed");
            let panel = ErrorPanel::from(&e);
            eprintln!("{}\n{}", panel.title, panel.message);
            std::process::ExitCode::FAILURE
        }
    }
}
