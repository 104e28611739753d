mod health_check;
mod send_email;

pub use health_check::health_check;
pub use send_email::{
    handle_send_email, json_error_handler, ContactFormOwner, ContactFormResponse, SendEmailError,
    AUTO_REPLY_SUBJECT, DEFAULT_SUBJECT,
};
