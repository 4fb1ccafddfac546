use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::department::DepartmentData;
use crate::repositories::department::DepartmentRepository;
use crate::repositories::{EntityFilters, RepoError, SortField, SortOrder};
use crate::utils::validation::validate_payload;

use super::unexpected;

#[derive(Deserialize, Validate)]
struct DepartmentPayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(length(min = 1, max = 100))]
    region: String,
    #[validate(length(min = 1, max = 100))]
    country: String,
}

impl DepartmentPayload {
    fn to_data(&self) -> DepartmentData {
        DepartmentData {
            name: self.name.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQueryParams {
    name: Option<String>,
    region: Option<String>,
    country: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid department ID".to_string()))
}

pub async fn create_department(
    repo: web::Data<dyn DepartmentRepository>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    match repo.create(payload.to_data()).await {
        Ok(_) => {
            let departments = repo
                .find_all(&EntityFilters::default(), SortField::default(), SortOrder::default())
                .await
                .map_err(unexpected)?;
            Ok(HttpResponse::Created().json(json!({
                "message": "Department successfully created",
                "data": departments,
            })))
        }
        Err(RepoError::Conflict(_)) => Err(AppError::Conflict(
            "Department with the same name already exists".to_string(),
        )),
        Err(err) => Err(unexpected(err)),
    }
}

pub async fn get_departments(
    repo: web::Data<dyn DepartmentRepository>,
    query: web::Query<ListQueryParams>,
) -> Result<HttpResponse, AppError> {
    let sort_by = SortField::parse(query.sort_by.as_deref()).map_err(AppError::BadRequest)?;
    let sort_order = SortOrder::parse(query.sort_order.as_deref());
    let filters = EntityFilters {
        name: query.name.clone(),
        region: query.region.clone(),
        country: query.country.clone(),
    };

    let departments = repo
        .find_all(&filters, sort_by, sort_order)
        .await
        .map_err(unexpected)?;

    Ok(HttpResponse::Ok().json(json!({ "data": departments })))
}

pub async fn get_department(
    repo: web::Data<dyn DepartmentRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;

    match repo.find_by_id(id).await.map_err(unexpected)? {
        Some(department) => Ok(HttpResponse::Ok().json(json!({ "data": department }))),
        None => Err(AppError::NotFound(format!(
            "No department with the id: {} found",
            id
        ))),
    }
}

pub async fn update_department(
    repo: web::Data<dyn DepartmentRepository>,
    path: web::Path<String>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let id = parse_id(&path.into_inner())?;

    if repo.find_by_id(id).await.map_err(unexpected)?.is_none() {
        return Err(AppError::NotFound(format!(
            "No department with the id: {} found",
            id
        )));
    }

    match repo.update(id, payload.to_data()).await {
        Ok(department) => Ok(HttpResponse::Ok().json(json!({
            "message": format!("Department with the id: {} successfully updated", id),
            "data": department,
        }))),
        Err(RepoError::Conflict(_)) => Err(AppError::Conflict(
            "Department with the same name already exists".to_string(),
        )),
        Err(err) => Err(unexpected(err)),
    }
}

pub async fn delete_department(
    repo: web::Data<dyn DepartmentRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;

    if repo.find_by_id(id).await.map_err(unexpected)?.is_none() {
        return Err(AppError::NotFound(format!(
            "No department with the id: {} found",
            id
        )));
    }

    repo.delete(id).await.map_err(unexpected)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Department with the id: {} successfully deleted", id),
    })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/departments")
            .route(web::post().to(create_department))
            .route(web::get().to(get_departments)),
    )
    .service(
        web::resource("/api/v1/departments/{id}")
            .route(web::get().to(get_department))
            .route(web::put().to(update_department))
            .route(web::delete().to(delete_department)),
    );
}
