use uuid::Uuid;

use chrono::{DateTime, Utc};

use rust_decimal::Decimal;

use serde::Serialize;

use sqlx::FromRow;

/// A single recorded donation.
///
/// `amount` is always non-negative and `occurred_at` is immutable once
/// written; both are enforced by the schema.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contribution {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
    /// Opaque reference into the payment processor's records
    pub payment_ref: String,
    /// Title of the campaign the donation supported, if any
    pub campaign_title: Option<String>,
    /// Display-name override when the donation was made in someone
    /// else's name
    pub personalized_name: Option<String>,
}

impl Contribution {
    /// Label printed on the certificate line, falling back to a generic
    /// one when the donation was not tied to a campaign
    pub fn display_label(&self) -> &str {
        self.campaign_title.as_deref().unwrap_or("General Donation")
    }

    /// Name printed on the certificate line: the personalization override
    /// when present, else the donor's account name
    pub fn display_name<'a>(&'a self, account_name: &'a str) -> &'a str {
        self.personalized_name.as_deref().unwrap_or(account_name)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn contribution(campaign: Option<&str>, personalized: Option<&str>) -> Contribution {
        Contribution {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            amount: dec!(100),
            occurred_at: Utc::now(),
            payment_ref: "pay_123".into(),
            campaign_title: campaign.map(Into::into),
            personalized_name: personalized.map(Into::into),
        }
    }

    #[test]
    fn label_falls_back_to_general_donation() {
        assert_eq!(contribution(None, None).display_label(), "General Donation");
        assert_eq!(
            contribution(Some("Flood Relief"), None).display_label(),
            "Flood Relief"
        );
    }

    #[test]
    fn name_prefers_personalization_override() {
        assert_eq!(
            contribution(None, Some("In memory of R. Rao")).display_name("Asha Rao"),
            "In memory of R. Rao"
        );
        assert_eq!(contribution(None, None).display_name("Asha Rao"), "Asha Rao");
    }
}
