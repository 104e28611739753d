pub mod contact;
pub mod contact_email;
pub mod contact_name;
pub mod mailbox;
pub mod new_contact;
