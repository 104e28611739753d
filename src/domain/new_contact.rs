use serde::Deserialize;

use crate::domain::contact_email::ContactEmail;
use crate::domain::contact_name::ContactName;

pub struct NewContact {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: Option<String>,
    pub message: Option<String>,
}

// Every field is optional so that a missing name or email is answered by the
// handler's own validation response instead of the JSON extractor's.
#[derive(Deserialize, Debug, Default)]
pub struct ContactFormBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl TryFrom<ContactFormBody> for NewContact {
    type Error = String;

    fn try_from(body: ContactFormBody) -> Result<Self, Self::Error> {
        let name = ContactName::parse(body.name.unwrap_or_default())?;
        let email = ContactEmail::parse(body.email.unwrap_or_default())?;

        Ok(NewContact {
            name,
            email,
            subject: non_empty(body.subject),
            message: non_empty(body.message),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
