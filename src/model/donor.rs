use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::Serialize;

use sqlx::FromRow;

/// Stored donor account record.
/// Created by the registration flow; read-only from this service's
/// perspective.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Donor {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    /// NOTE: Auto-set by the database
    pub created_at: DateTime<Utc>,
}

impl Donor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
