pub mod institution;
pub mod department;
