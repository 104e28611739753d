use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::email_client::EmailClient;
use crate::routes::{handle_send_email, health_check, json_error_handler, ContactFormOwner};

#[derive(thiserror::Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid email address in configuration: {0}")]
    InvalidMailbox(String),
    #[error("Failed to build the email client.")]
    EmailClientError(#[from] reqwest::Error),
    #[error("Failed to start the HTTP server.")]
    ServerError(#[from] std::io::Error),
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, ApplicationError> {
        let db_pool = get_connection_db_pool(&config.database);
        let sender_email = config
            .get_email_client_sender()
            .map_err(ApplicationError::InvalidMailbox)?;
        let email_client = EmailClient::new(
            config.get_email_client_base_url(),
            sender_email,
            config.get_email_client_api(),
            Some(config.get_email_client_timeout()),
        )?;
        let owner = ContactFormOwner {
            email: config
                .get_contact_form_owner()
                .map_err(ApplicationError::InvalidMailbox)?,
            name: config.get_contact_form_owner_name(),
        };

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}:{}", config.application.get_host(), port);

        let server = run(listener, db_pool, email_client, owner)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    email_client: EmailClient,
    owner: ContactFormOwner,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let email_client = web::Data::new(email_client);
    let owner = web::Data::new(owner);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/send-email", web::post().to(handle_send_email))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(db_pool.clone())
            .app_data(email_client.clone())
            .app_data(owner.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
