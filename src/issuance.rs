//! Assembles and delivers 80G donation certificates.
//!
//! One pass per request: donor lookup, fiscal-year aggregation, payload
//! assembly, rendering, optional email delivery. No retries, no persisted
//! intermediate state; every collaborator failure is folded into the
//! returned [`IssueReport`].

use anyhow::Context;

use chrono::{DateTime, Datelike, Utc};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use serde::Serialize;

use uuid::Uuid;

use crate::client::{Attachment, Email, EmailClient};
use crate::domain::{rupees_in_words, EmailAddress, FiscalYear};
use crate::model::{Certificate, CertificateLineItem, Contribution, Donor};
use crate::render;
use crate::repo::{ContributionRepo, DonorRepo};
use crate::settings::OrganizationSettings;

/// Terminal outcomes reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueError {
    UserNotFound,
    NoDonationsFound,
    /// The certificate was produced; only the notification failed.
    /// Reported alongside `success: true`
    EmailSendFailed,
    UnknownError,
}

/// Structured result of one issuance pass. No error escapes past this
#[derive(Debug, Serialize)]
pub struct IssueReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<IssueError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
}

impl IssueReport {
    fn failure(error: IssueError, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error),
            certificate: None,
        }
    }

    fn unknown(error: anyhow::Error) -> Self {
        Self {
            success: false,
            message: format!("{:#}", error),
            error: Some(IssueError::UnknownError),
            certificate: None,
        }
    }

    fn issued(certificate: Certificate, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            certificate: Some(certificate),
        }
    }

    fn issued_undelivered(certificate: Certificate) -> Self {
        Self {
            success: true,
            message: "Certificate generated, but the notification email could not be sent".into(),
            error: Some(IssueError::EmailSendFailed),
            certificate: Some(certificate),
        }
    }
}

/// Issue an 80G certificate for the donor's contributions in the current
/// fiscal year, optionally emailing it as an attachment.
#[tracing::instrument(
    name = "Issue 80G certificate",
    skip(donors, contributions, email_client, organization)
)]
pub async fn issue_certificate(
    donors: &dyn DonorRepo,
    contributions: &dyn ContributionRepo,
    email_client: &EmailClient,
    organization: &OrganizationSettings,
    donor_id: Uuid,
    deliver: bool,
) -> IssueReport {
    let donor = match donors.find_by_id(donor_id).await {
        Ok(Some(donor)) => donor,
        Ok(None) => {
            return IssueReport::failure(
                IssueError::UserNotFound,
                "No donor account matches the given id",
            )
        }
        Err(e) => return IssueReport::unknown(e.into()),
    };

    let fiscal_year = FiscalYear::containing(Utc::now().date_naive());

    // Lower-bound-only window: backdated entries qualify, future-dated
    // entries within the year do too
    let records = match contributions
        .fetch_since(donor.id, fiscal_year.start_datetime())
        .await
    {
        Ok(records) => records,
        Err(e) => return IssueReport::unknown(e.into()),
    };

    if records.is_empty() {
        return IssueReport::failure(
            IssueError::NoDonationsFound,
            format!("No donations found for financial year {}", fiscal_year),
        );
    }

    let certificate = match assemble(&donor, organization, &fiscal_year, &records) {
        Ok(certificate) => certificate,
        Err(e) => return IssueReport::unknown(e),
    };

    let document = render::certificate_html(&certificate);

    if !deliver {
        return IssueReport::issued(certificate, "Certificate generated");
    }

    match deliver_by_email(email_client, &donor, &certificate, document).await {
        Ok(()) => IssueReport::issued(certificate, "Certificate generated and emailed"),
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                donor_id = %donor.id,
                "Certificate issued but email delivery failed"
            );
            IssueReport::issued_undelivered(certificate)
        }
    }
}

fn assemble(
    donor: &Donor,
    organization: &OrganizationSettings,
    fiscal_year: &FiscalYear,
    records: &[Contribution],
) -> anyhow::Result<Certificate> {
    let account_name = donor.full_name();

    let line_items: Vec<CertificateLineItem> = records
        .iter()
        .map(|contribution| CertificateLineItem::new(contribution, &account_name))
        .collect();

    let total_amount: Decimal = line_items.iter().map(|item| item.amount).sum();
    let total_amount_words = rupees_in_words(whole_rupees(total_amount)?);

    let issue_date = Utc::now();

    Ok(Certificate {
        certificate_number: certificate_number(donor.id, issue_date),
        issue_date,
        financial_year: fiscal_year.label(),
        donor: donor.into(),
        organization: organization.into(),
        line_items,
        total_amount,
        total_amount_words,
    })
}

/// Certificate numbers carry an opaque random suffix rather than a
/// timestamp, so two certificates issued in the same instant for the same
/// donor can never collide
pub fn certificate_number(donor_id: Uuid, issued_at: DateTime<Utc>) -> String {
    format!(
        "80G/{}/{}/{}",
        issued_at.year(),
        donor_id,
        Uuid::new_v4().simple()
    )
}

/// Explicit rounding step before words rendering: round half up
/// (midpoint away from zero) to whole rupees
fn whole_rupees(total: Decimal) -> anyhow::Result<u64> {
    total
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .context("Total amount out of range for words rendering")
}

async fn deliver_by_email(
    email_client: &EmailClient,
    donor: &Donor,
    certificate: &Certificate,
    document: String,
) -> anyhow::Result<()> {
    let recipient: EmailAddress = donor.email.parse()?;

    let subject = format!(
        "Your 80G donation certificate for {}",
        certificate.financial_year
    );
    let text_body = format!(
        "Dear {},\n\nThank you for your generous support. Your 80G donation \
         certificate ({}) for financial year {} is attached.\n\n{}",
        certificate.donor.name,
        certificate.certificate_number,
        certificate.financial_year,
        certificate.organization.name,
    );
    let html_body = format!(
        "<p>Dear {},</p><p>Thank you for your generous support. Your 80G \
         donation certificate (<strong>{}</strong>) for financial year {} is \
         attached.</p><p>{}</p>",
        certificate.donor.name,
        certificate.certificate_number,
        certificate.financial_year,
        certificate.organization.name,
    );

    let email = Email {
        recipient,
        subject,
        html_body,
        text_body,
        attachments: vec![Attachment {
            filename: format!("80G-Certificate-{}.html", certificate.financial_year),
            content: document.into_bytes(),
            content_type: "text/html".into(),
        }],
    };

    email_client.send(&email).await
}

#[cfg(test)]
mod tests {
    use claims::assert_ok_eq;

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn certificate_number_has_expected_shape() {
        let donor_id = Uuid::new_v4();
        let issued_at = Utc::now();

        let number = certificate_number(donor_id, issued_at);
        let parts: Vec<&str> = number.split('/').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "80G");
        assert_eq!(parts[1], issued_at.year().to_string());
        assert_eq!(parts[2], donor_id.to_string());
        assert_eq!(parts[3].len(), 32);
    }

    #[test]
    fn certificate_numbers_are_unique_for_the_same_instant() {
        let donor_id = Uuid::new_v4();
        let issued_at = Utc::now();

        let first = certificate_number(donor_id, issued_at);
        let second = certificate_number(donor_id, issued_at);

        assert_ne!(first, second);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_ok_eq!(whole_rupees(dec!(350.50)), 351);
        assert_ok_eq!(whole_rupees(dec!(350.49)), 350);
        assert_ok_eq!(whole_rupees(dec!(350.00)), 350);
        assert_ok_eq!(whole_rupees(dec!(0)), 0);
    }

    #[test]
    fn decimal_sum_has_no_float_drift() {
        let amounts = vec![dec!(250.00), dec!(100.50), dec!(0.00)];
        let total: Decimal = amounts.iter().copied().sum();

        assert_eq!(total, dec!(350.50));
    }

    #[test]
    fn repeated_fractional_sums_stay_exact() {
        let total: Decimal = std::iter::repeat(dec!(0.10)).take(300).sum();

        assert_eq!(total, dec!(30.00));
    }
}
