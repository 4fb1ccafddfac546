use log::error;

use crate::errors::AppError;
use crate::repositories::RepoError;

pub mod department;
pub mod institution;

/// Any repository failure that is not a recognized conflict or absence
/// becomes a 500 carrying the underlying message.
fn unexpected(err: RepoError) -> AppError {
    error!("repository failure: {}", err);
    AppError::Database(err.to_string())
}
