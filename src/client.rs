mod email_client;

pub use email_client::{Attachment, Email, EmailAuthorizationToken, EmailClient};
