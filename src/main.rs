mod db;
mod errors;
mod handlers;
mod models;
mod repositories;
mod utils;

use std::env;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use repositories::department::{DepartmentRepository, PgDepartmentRepository};
use repositories::institution::{InstitutionRepository, PgInstitutionRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = db::create_pool().await;
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let institutions: Arc<dyn InstitutionRepository> =
        Arc::new(PgInstitutionRepository::new(pool.clone()));
    let departments: Arc<dyn DepartmentRepository> = Arc::new(PgDepartmentRepository::new(pool));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);
    info!("Starting server at {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(institutions.clone()))
            .app_data(web::Data::from(departments.clone()))
            .configure(handlers::institution::configure)
            .configure(handlers::department::configure)
    })
    .bind(addr)?
    .run()
    .await
}
