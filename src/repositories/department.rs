use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::department::{Department, DepartmentData};

use super::{build_list_query, EntityFilters, RepoError, SortField, SortOrder};

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, data: DepartmentData) -> Result<Department, RepoError>;
    async fn find_all(
        &self,
        filters: &EntityFilters,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Department>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, RepoError>;
    async fn update(&self, id: Uuid, data: DepartmentData) -> Result<Department, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn create(&self, data: DepartmentData) -> Result<Department, RepoError> {
        let now = Utc::now();
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (id, name, region, country, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.region)
        .bind(&data.country)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(department)
    }

    async fn find_all(
        &self,
        filters: &EntityFilters,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Department>, RepoError> {
        let mut builder = build_list_query("departments", filters, sort_by, sort_order);
        let departments = builder
            .build_query_as::<Department>()
            .fetch_all(&self.pool)
            .await?;

        Ok(departments)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, RepoError> {
        let department = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(department)
    }

    async fn update(&self, id: Uuid, data: DepartmentData) -> Result<Department, RepoError> {
        let department = sqlx::query_as::<_, Department>(
            "UPDATE departments
             SET name = $1, region = $2, country = $3, updated_at = $4
             WHERE id = $5
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.region)
        .bind(&data.country)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)?;

        Ok(department)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
