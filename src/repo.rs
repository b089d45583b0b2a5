mod contributions;
mod donors;

pub use contributions::{ContributionRepo, PgContributionRepo};
pub use donors::{DonorRepo, PgDonorRepo};
