use once_cell::sync::Lazy;
use reqwest::Response;
use sqlx::{migrate, Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;
use wiremock::MockServer;

use contact_form::{
    config::{get_configuration, DatabaseSettings},
    domain::contact::Contact,
    startup::{get_connection_db_pool, Application},
    telemetry::{get_subscriber, init_subscriber},
};

// Logs are discarded unless TEST_LOG is set, eg: `TEST_LOG=true cargo test | bunyan`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = String::from("info");
    let subscriber_name = String::from("test");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to init tracing subscriber.");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to init tracing subscriber.");
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub email_server: MockServer,
    pub owner_email: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        Lazy::force(&TRACING);

        let mut config = get_configuration().expect("Missing configuration file.");
        let db_test_name = format!("db_{}", Uuid::new_v4().to_string().replace('-', "_"));
        let email_server = MockServer::start().await;

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_email_client_base_url(email_server.uri());

        let db_pool = configure_db(&mut config.database, db_test_name).await;

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            db_pool,
            email_server,
            owner_email: config.contact_form.owner_email,
        }
    }

    pub async fn post_send_email(&self, body: &serde_json::Value) -> Response {
        reqwest::Client::new()
            .post(&format!("{}/send-email", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contacts(&self) -> Vec<Contact> {
        sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, submitted_at FROM contacts ORDER BY submitted_at;",
        )
        .fetch_all(&self.db_pool)
        .await
        .expect("Query to fetch contacts failed.")
    }

    /// JSON bodies of every request the email API received, in arrival order.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

async fn configure_db(db_config: &mut DatabaseSettings, db_test_name: String) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&db_config.get_server_options())
        .await
        .expect("Failed to connect to Postgres.");

    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_test_name))
        .await
        .expect("Failed to create database.");

    connection
        .close()
        .await
        .expect("Failed to close connection.");

    // Execute migrations
    db_config.set_name(db_test_name);

    let db_pool = get_connection_db_pool(db_config);

    migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations.");

    db_pool
}
