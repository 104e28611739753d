#[derive(Debug, Clone)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(name: String) -> Result<ContactName, String> {
        if name.is_empty() {
            return Err(String::from("Contact name is missing"));
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
