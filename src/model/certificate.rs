use uuid::Uuid;

use chrono::{DateTime, Utc};

use rust_decimal::Decimal;

use serde::Serialize;

use crate::model::{Contribution, Donor};
use crate::settings::OrganizationSettings;

/// Donor identity captured at generation time, decoupled from the live
/// donor record
#[derive(Debug, Clone, Serialize)]
pub struct DonorSnapshot {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&Donor> for DonorSnapshot {
    fn from(donor: &Donor) -> Self {
        Self {
            name: donor.full_name(),
            email: donor.email.clone(),
            phone: donor.phone.clone(),
        }
    }
}

/// Issuing-organization identity captured at generation time
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationSnapshot {
    pub name: String,
    pub address: String,
    pub pan: String,
    pub registration_80g: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub signatory: String,
}

impl From<&OrganizationSettings> for OrganizationSnapshot {
    fn from(org: &OrganizationSettings) -> Self {
        Self {
            name: org.name.clone(),
            address: org.address.clone(),
            pan: org.pan.clone(),
            registration_80g: org.registration_80g.clone(),
            contact_email: org.contact_email.clone(),
            contact_phone: org.contact_phone.clone(),
            signatory: org.signatory.clone(),
        }
    }
}

/// One qualifying contribution as it appears on the certificate
#[derive(Debug, Clone, Serialize)]
pub struct CertificateLineItem {
    pub contribution_id: Uuid,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub payment_ref: String,
    pub label: String,
    pub donor_name: String,
}

impl CertificateLineItem {
    pub fn new(contribution: &Contribution, account_name: &str) -> Self {
        Self {
            contribution_id: contribution.id,
            amount: contribution.amount,
            date: contribution.occurred_at,
            payment_ref: contribution.payment_ref.clone(),
            label: contribution.display_label().to_string(),
            donor_name: contribution.display_name(account_name).to_string(),
        }
    }
}

/// The assembled 80G certificate payload.
///
/// Built fresh on every request and handed straight to rendering and
/// delivery; never stored and never updated.
#[derive(Debug, Clone, Serialize)]
pub struct Certificate {
    pub certificate_number: String,
    pub issue_date: DateTime<Utc>,
    pub financial_year: String,
    pub donor: DonorSnapshot,
    pub organization: OrganizationSnapshot,
    /// Qualifying contributions, newest first
    pub line_items: Vec<CertificateLineItem>,
    pub total_amount: Decimal,
    pub total_amount_words: String,
}
