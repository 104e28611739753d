/// Address typed into the form by the submitter.
///
/// Only presence is checked here. Whether the address can actually receive
/// mail is left to the email API.
#[derive(Debug, Clone)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(email: String) -> Result<ContactEmail, String> {
        if email.is_empty() {
            return Err(String::from("Contact email is missing"));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
