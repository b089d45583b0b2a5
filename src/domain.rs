mod email_address;
mod fiscal_year;
mod rupee_words;

pub use email_address::EmailAddress;
pub use fiscal_year::FiscalYear;
pub use rupee_words::rupees_in_words;
