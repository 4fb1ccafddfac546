use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::institution::InstitutionData;
use crate::repositories::institution::InstitutionRepository;
use crate::repositories::{EntityFilters, RepoError, SortField, SortOrder};
use crate::utils::validation::validate_payload;

use super::unexpected;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct InstitutionPayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(length(min = 1, max = 100))]
    region: String,
    #[validate(length(min = 1, max = 100))]
    country: String,
    user_id: Option<Uuid>,
}

impl InstitutionPayload {
    fn to_data(&self) -> InstitutionData {
        InstitutionData {
            name: self.name.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
            user_id: self.user_id,
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
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid institution ID".to_string()))
}

pub async fn create_institution(
    repo: web::Data<dyn InstitutionRepository>,
    payload: web::Json<InstitutionPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    match repo.create(payload.to_data()).await {
        Ok(_) => {
            let institutions = repo
                .find_all(&EntityFilters::default(), SortField::default(), SortOrder::default())
                .await
                .map_err(unexpected)?;
            Ok(HttpResponse::Created().json(json!({
                "message": "Institution successfully created",
                "data": institutions,
            })))
        }
        Err(RepoError::Conflict(_)) => Err(AppError::Conflict(
            "Institution with the same name already exists".to_string(),
        )),
        Err(err) => Err(unexpected(err)),
    }
}

pub async fn get_institutions(
    repo: web::Data<dyn InstitutionRepository>,
    query: web::Query<ListQueryParams>,
) -> Result<HttpResponse, AppError> {
    let sort_by = SortField::parse(query.sort_by.as_deref()).map_err(AppError::BadRequest)?;
    let sort_order = SortOrder::parse(query.sort_order.as_deref());
    let filters = EntityFilters {
        name: query.name.clone(),
        region: query.region.clone(),
        country: query.country.clone(),
    };

    let institutions = repo
        .find_all(&filters, sort_by, sort_order)
        .await
        .map_err(unexpected)?;

    Ok(HttpResponse::Ok().json(json!({ "data": institutions })))
}

pub async fn get_institution(
    repo: web::Data<dyn InstitutionRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;

    match repo.find_by_id(id).await.map_err(unexpected)? {
        Some(institution) => Ok(HttpResponse::Ok().json(json!({ "data": institution }))),
        None => Err(AppError::NotFound(format!(
            "No institution with the id: {} found",
            id
        ))),
    }
}

pub async fn update_institution(
    repo: web::Data<dyn InstitutionRepository>,
    path: web::Path<String>,
    payload: web::Json<InstitutionPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let id = parse_id(&path.into_inner())?;

    if repo.find_by_id(id).await.map_err(unexpected)?.is_none() {
        return Err(AppError::NotFound(format!(
            "No institution with the id: {} found",
            id
        )));
    }

    match repo.update(id, payload.to_data()).await {
        Ok(institution) => Ok(HttpResponse::Ok().json(json!({
            "message": format!("Institution with the id: {} successfully updated", id),
            "data": institution,
        }))),
        Err(RepoError::Conflict(_)) => Err(AppError::Conflict(
            "Institution with the same name already exists".to_string(),
        )),
        Err(err) => Err(unexpected(err)),
    }
}

pub async fn delete_institution(
    repo: web::Data<dyn InstitutionRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;

    if repo.find_by_id(id).await.map_err(unexpected)?.is_none() {
        return Err(AppError::NotFound(format!(
            "No institution with the id: {} found",
            id
        )));
    }

    repo.delete(id).await.map_err(unexpected)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Institution with the id: {} successfully deleted", id),
    })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/institutions")
            .route(web::post().to(create_institution))
            .route(web::get().to(get_institutions)),
    )
    .service(
        web::resource("/api/v1/institutions/{id}")
            .route(web::get().to(get_institution))
            .route(web::put().to(update_institution))
            .route(web::delete().to(delete_institution)),
    );
}
