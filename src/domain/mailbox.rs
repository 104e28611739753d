use validator::validate_email;

/// A validated address owned by the site operator, loaded from configuration.
#[derive(Debug, Clone)]
pub struct Mailbox(String);

impl Mailbox {
    pub fn parse(email: String) -> Result<Mailbox, String> {
        if !validate_email(&email) {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for Mailbox {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
