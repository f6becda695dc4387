pub mod file_repository;
pub mod record;
pub mod repository;
