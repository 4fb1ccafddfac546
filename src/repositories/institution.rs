use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::institution::{Institution, InstitutionData};

use super::{build_list_query, EntityFilters, RepoError, SortField, SortOrder};

/// Persistence contract for institutions. The Postgres implementation below
/// is the production one; tests substitute an in-memory fixture.
#[async_trait]
pub trait InstitutionRepository: Send + Sync {
    async fn create(&self, data: InstitutionData) -> Result<Institution, RepoError>;
    async fn find_all(
        &self,
        filters: &EntityFilters,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Institution>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Institution>, RepoError>;
    async fn update(&self, id: Uuid, data: InstitutionData) -> Result<Institution, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

pub struct PgInstitutionRepository {
    pool: PgPool,
}

impl PgInstitutionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstitutionRepository for PgInstitutionRepository {
    async fn create(&self, data: InstitutionData) -> Result<Institution, RepoError> {
        let now = Utc::now();
        let institution = sqlx::query_as::<_, Institution>(
            "INSERT INTO institutions (id, name, region, country, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.region)
        .bind(&data.country)
        .bind(data.user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(institution)
    }

    async fn find_all(
        &self,
        filters: &EntityFilters,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Institution>, RepoError> {
        let mut builder = build_list_query("institutions", filters, sort_by, sort_order);
        let institutions = builder
            .build_query_as::<Institution>()
            .fetch_all(&self.pool)
            .await?;

        Ok(institutions)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Institution>, RepoError> {
        let institution = sqlx::query_as::<_, Institution>("SELECT * FROM institutions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(institution)
    }

    async fn update(&self, id: Uuid, data: InstitutionData) -> Result<Institution, RepoError> {
        let institution = sqlx::query_as::<_, Institution>(
            "UPDATE institutions
             SET name = $1, region = $2, country = $3, user_id = $4, updated_at = $5
             WHERE id = $6
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.region)
        .bind(&data.country)
        .bind(data.user_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)?;

        Ok(institution)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM institutions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
