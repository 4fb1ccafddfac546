//! In-memory repository fixtures for handler tests. They mirror the
//! Postgres semantics: case-sensitive substring filters ANDed together,
//! single-column ordering, and name-uniqueness conflicts.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::department::{Department, DepartmentData};
use crate::models::institution::{Institution, InstitutionData};

use super::department::DepartmentRepository;
use super::institution::InstitutionRepository;
use super::{EntityFilters, RepoError, SortField, SortOrder};

fn matches(value: &str, pattern: Option<&str>) -> bool {
    match pattern {
        Some(p) if !p.is_empty() => value.contains(p),
        _ => true,
    }
}

fn ordered<T, F: Fn(&T, &T, SortField) -> Ordering>(
    mut rows: Vec<T>,
    sort_by: SortField,
    sort_order: SortOrder,
    compare: F,
) -> Vec<T> {
    rows.sort_by(|a, b| {
        let ord = compare(a, b, sort_by);
        match sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    rows
}

#[derive(Default)]
pub struct MemoryInstitutionRepository {
    records: Mutex<Vec<Institution>>,
}

fn compare_institutions(a: &Institution, b: &Institution, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Region => a.region.cmp(&b.region),
        SortField::Country => a.country.cmp(&b.country),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl InstitutionRepository for MemoryInstitutionRepository {
    async fn create(&self, data: InstitutionData) -> Result<Institution, RepoError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.name == data.name) {
            return Err(RepoError::Conflict(format!(
                "duplicate key value violates unique constraint: {}",
                data.name
            )));
        }
        let now = Utc::now();
        let institution = Institution {
            id: Uuid::new_v4(),
            name: data.name,
            region: data.region,
            country: data.country,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        records.push(institution.clone());
        Ok(institution)
    }

    async fn find_all(
        &self,
        filters: &EntityFilters,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Institution>, RepoError> {
        let records = self.records.lock().unwrap();
        let rows = records
            .iter()
            .filter(|r| {
                matches(&r.name, filters.name.as_deref())
                    && matches(&r.region, filters.region.as_deref())
                    && matches(&r.country, filters.country.as_deref())
            })
            .cloned()
            .collect();
        Ok(ordered(rows, sort_by, sort_order, compare_institutions))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Institution>, RepoError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: Uuid, data: InstitutionData) -> Result<Institution, RepoError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id != id && r.name == data.name) {
            return Err(RepoError::Conflict(format!(
                "duplicate key value violates unique constraint: {}",
                data.name
            )));
        }
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;
        record.name = data.name;
        record.region = data.region;
        record.country = data.country;
        record.user_id = data.user_id;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDepartmentRepository {
    records: Mutex<Vec<Department>>,
}

fn compare_departments(a: &Department, b: &Department, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Region => a.region.cmp(&b.region),
        SortField::Country => a.country.cmp(&b.country),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl DepartmentRepository for MemoryDepartmentRepository {
    async fn create(&self, data: DepartmentData) -> Result<Department, RepoError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.name == data.name) {
            return Err(RepoError::Conflict(format!(
                "duplicate key value violates unique constraint: {}",
                data.name
            )));
        }
        let now = Utc::now();
        let department = Department {
            id: Uuid::new_v4(),
            name: data.name,
            region: data.region,
            country: data.country,
            created_at: now,
            updated_at: now,
        };
        records.push(department.clone());
        Ok(department)
    }

    async fn find_all(
        &self,
        filters: &EntityFilters,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Department>, RepoError> {
        let records = self.records.lock().unwrap();
        let rows = records
            .iter()
            .filter(|r| {
                matches(&r.name, filters.name.as_deref())
                    && matches(&r.region, filters.region.as_deref())
                    && matches(&r.country, filters.country.as_deref())
            })
            .cloned()
            .collect();
        Ok(ordered(rows, sort_by, sort_order, compare_departments))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, RepoError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: Uuid, data: DepartmentData) -> Result<Department, RepoError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id != id && r.name == data.name) {
            return Err(RepoError::Conflict(format!(
                "duplicate key value violates unique constraint: {}",
                data.name
            )));
        }
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;
        record.name = data.name;
        record.region = data.region;
        record.country = data.country;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Fails every operation; exercises the unclassified-failure paths.
pub struct FailingInstitutionRepository;

#[async_trait]
impl InstitutionRepository for FailingInstitutionRepository {
    async fn create(&self, _data: InstitutionData) -> Result<Institution, RepoError> {
        Err(RepoError::Other("connection reset".to_string()))
    }

    async fn find_all(
        &self,
        _filters: &EntityFilters,
        _sort_by: SortField,
        _sort_order: SortOrder,
    ) -> Result<Vec<Institution>, RepoError> {
        Err(RepoError::Other("connection reset".to_string()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Institution>, RepoError> {
        Err(RepoError::Other("connection reset".to_string()))
    }

    async fn update(&self, _id: Uuid, _data: InstitutionData) -> Result<Institution, RepoError> {
        Err(RepoError::Other("connection reset".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::Other("connection reset".to_string()))
    }
}
