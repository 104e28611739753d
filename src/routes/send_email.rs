use actix_web::{
    error::JsonPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::{
        contact::Contact,
        mailbox::Mailbox,
        new_contact::{ContactFormBody, NewContact},
    },
    email_client::EmailClient,
};

pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission";
pub const AUTO_REPLY_SUBJECT: &str = "Thanks for reaching out!";

const SUCCESS_MESSAGE: &str = "Email sent & saved to DB!";
const VALIDATION_MESSAGE: &str = "Name and Email are required";
const OPERATION_MESSAGE: &str = "Error sending email or saving to DB";

/// The site operator: receives every submission and signs the auto-reply.
pub struct ContactFormOwner {
    pub email: Mailbox,
    pub name: String,
}

#[derive(serde::Serialize)]
pub struct ContactFormResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Answers bodies the JSON extractor rejects with the same envelope as a
/// missing name or email.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    SendEmailError::ValidationError(err.to_string()).into()
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(body, db_pool, email_client, owner),
    fields(
        contact_email = tracing::field::Empty,
        contact_name = tracing::field::Empty
    )
)]
pub async fn handle_send_email(
    body: web::Json<ContactFormBody>,
    db_pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    owner: web::Data<ContactFormOwner>,
) -> Result<HttpResponse, SendEmailError> {
    let new_contact: NewContact = body
        .into_inner()
        .try_into()
        .map_err(SendEmailError::ValidationError)?;

    let span = tracing::Span::current();
    span.record(
        "contact_email",
        &tracing::field::display(new_contact.email.as_ref()),
    );
    span.record(
        "contact_name",
        &tracing::field::display(new_contact.name.as_ref()),
    );

    save_contact_if_new(&db_pool, &new_contact)
        .await
        .map_err(SendEmailError::StoreContactError)?;

    send_owner_notification(&email_client, &owner, &new_contact)
        .await
        .map_err(SendEmailError::NotifyOwnerError)?;

    send_auto_reply(&email_client, &owner, &new_contact)
        .await
        .map_err(SendEmailError::AutoReplyError)?;

    Ok(HttpResponse::Ok().json(ContactFormResponse {
        success: true,
        message: SUCCESS_MESSAGE,
    }))
}

/// Inserts the contact unless one with the same name and email already exists.
///
/// The lookup and the insert are separate statements, so two identical
/// submissions racing each other can both be inserted.
#[tracing::instrument(name = "Saving contact if it is new", skip(new_contact, db_pool))]
async fn save_contact_if_new(
    db_pool: &PgPool,
    new_contact: &NewContact,
) -> Result<Option<Contact>, sqlx::Error> {
    if let Some(existing) = find_contact(db_pool, new_contact).await? {
        tracing::info!(
            contact_id = %existing.id,
            "Duplicate contact detected, skipping DB save."
        );
        return Ok(None);
    }

    let contact = insert_contact(db_pool, new_contact).await?;

    tracing::info!(contact_id = %contact.id, "Contact saved.");

    Ok(Some(contact))
}

#[tracing::instrument(
    name = "Looking for an existing contact in the database",
    skip(new_contact, db_pool)
)]
async fn find_contact(
    db_pool: &PgPool,
    new_contact: &NewContact,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT id, name, email, submitted_at
        FROM contacts
        WHERE name = $1 AND email = $2
        LIMIT 1
        "#,
    )
    .bind(new_contact.name.as_ref())
    .bind(new_contact.email.as_ref())
    .fetch_optional(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })
}

#[tracing::instrument(name = "Insert a new contact into the database", skip(new_contact, db_pool))]
async fn insert_contact(db_pool: &PgPool, new_contact: &NewContact) -> Result<Contact, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (id, name, email, submitted_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, submitted_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_contact.name.as_ref())
    .bind(new_contact.email.as_ref())
    .bind(Utc::now())
    .fetch_one(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })
}

#[tracing::instrument(
    name = "Send a notification email to the owner",
    skip(email_client, owner, new_contact)
)]
async fn send_owner_notification(
    email_client: &EmailClient,
    owner: &ContactFormOwner,
    new_contact: &NewContact,
) -> Result<(), reqwest::Error> {
    let subject = new_contact.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);

    email_client
        .send_email(
            owner.email.as_ref(),
            Some(new_contact.email.as_ref()),
            subject,
            &owner_notification_body(new_contact),
        )
        .await
}

#[tracing::instrument(
    name = "Send an auto-reply email to the sender",
    skip(email_client, owner, new_contact)
)]
async fn send_auto_reply(
    email_client: &EmailClient,
    owner: &ContactFormOwner,
    new_contact: &NewContact,
) -> Result<(), reqwest::Error> {
    email_client
        .send_email(
            new_contact.email.as_ref(),
            None,
            AUTO_REPLY_SUBJECT,
            &auto_reply_body(owner, new_contact),
        )
        .await
}

fn owner_notification_body(new_contact: &NewContact) -> String {
    format!(
        "New contact message:\n\nName: {}\nEmail: {}\nSubject: {}\nMessage: {}",
        new_contact.name.as_ref(),
        new_contact.email.as_ref(),
        new_contact.subject.as_deref().unwrap_or("(none)"),
        new_contact.message.as_deref().unwrap_or("(none)"),
    )
}

fn auto_reply_body(owner: &ContactFormOwner, new_contact: &NewContact) -> String {
    format!(
        r#"Hi {},

Thanks for getting in touch with me! I've received your message and will review it shortly.
You can expect a reply within the next 24-48 hours.

If it's urgent, feel free to reach out to me directly at {}.

Best regards,
{}
"#,
        new_contact.name.as_ref(),
        owner.email.as_ref(),
        owner.name
    )
}

#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to store the contact in the database.")]
    StoreContactError(#[source] sqlx::Error),
    #[error("Failed to send the notification email to the owner.")]
    NotifyOwnerError(#[source] reqwest::Error),
    #[error("Failed to send the auto-reply email to the sender.")]
    AutoReplyError(#[source] reqwest::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            write!(f, "\n\tCaused by: {}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

impl ResponseError for SendEmailError {
    fn status_code(&self) -> StatusCode {
        match self {
            SendEmailError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SendEmailError::StoreContactError(_)
            | SendEmailError::NotifyOwnerError(_)
            | SendEmailError::AutoReplyError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            SendEmailError::ValidationError(_) => VALIDATION_MESSAGE,
            _ => OPERATION_MESSAGE,
        };

        tracing::error!("{:?}", self);

        HttpResponse::build(self.status_code()).json(ContactFormResponse {
            success: false,
            message,
        })
    }
}
