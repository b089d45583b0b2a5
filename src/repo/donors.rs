use uuid::Uuid;

use sqlx::PgPool;

use crate::error::Result;
use crate::model::Donor;

/// Donor store seam.
/// NOTE: Intended to facilitate easier testing/mocking
/// TODO: Swap async-trait for std async traits when those become stable
#[async_trait::async_trait]
pub trait DonorRepo: Send + Sync {
    /// Look up a donor account by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>>;
}

/// Postgres donor repository
#[derive(Debug, Clone)]
pub struct PgDonorRepo {
    pool: PgPool,
}

impl PgDonorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DonorRepo for PgDonorRepo {
    #[tracing::instrument(name = "Find donor by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>> {
        let donor = sqlx::query_as::<_, Donor>(
            "select id, email, first_name, last_name, phone, created_at \
             from donors where id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(donor)
    }
}
