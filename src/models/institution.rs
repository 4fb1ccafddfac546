use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub country: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set written on create and replaced wholesale on update.
#[derive(Debug, Clone)]
pub struct InstitutionData {
    pub name: String,
    pub region: String,
    pub country: String,
    pub user_id: Option<Uuid>,
}
