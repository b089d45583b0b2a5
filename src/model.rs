mod certificate;
mod contribution;
mod donor;

pub use certificate::{Certificate, CertificateLineItem, DonorSnapshot, OrganizationSnapshot};
pub use contribution::Contribution;
pub use donor::Donor;
