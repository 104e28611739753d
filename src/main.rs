use contact_form::config::get_configuration;
use contact_form::startup::{Application, ApplicationError};
use contact_form::telemetry::{get_subscriber, init_subscriber};

#[derive(thiserror::Error, Debug)]
enum MainError {
    #[error(transparent)]
    Telemetry(#[from] contact_form::telemetry::TelemetryError),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let subscriber = get_subscriber(
        String::from("contact_form"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber)?;

    let config = get_configuration()?;
    let application = Application::build(config).await?;

    application
        .run_until_stop()
        .await
        .map_err(ApplicationError::from)?;

    Ok(())
}
