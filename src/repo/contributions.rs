use uuid::Uuid;

use chrono::{DateTime, Utc};

use sqlx::PgPool;

use crate::error::Result;
use crate::model::Contribution;

/// Contribution store seam.
/// NOTE: Intended to facilitate easier testing/mocking
#[async_trait::async_trait]
pub trait ContributionRepo: Send + Sync {
    /// Fetch a donor's contributions recorded at or after `since`,
    /// newest first. Read-only; an empty result is not an error.
    async fn fetch_since(&self, donor_id: Uuid, since: DateTime<Utc>)
        -> Result<Vec<Contribution>>;
}

/// Postgres contribution repository
#[derive(Debug, Clone)]
pub struct PgContributionRepo {
    pool: PgPool,
}

impl PgContributionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContributionRepo for PgContributionRepo {
    #[tracing::instrument(name = "Fetch contributions since date", skip(self))]
    async fn fetch_since(
        &self,
        donor_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Contribution>> {
        let contributions = sqlx::query_as::<_, Contribution>(
            "select id, donor_id, amount, occurred_at, payment_ref, \
                    campaign_title, personalized_name \
             from contributions \
             where donor_id = $1 and occurred_at >= $2 \
             order by occurred_at desc",
        )
        .bind(donor_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(contributions)
    }
}
