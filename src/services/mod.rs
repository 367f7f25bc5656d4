pub mod catalog_service;
pub use catalog_service::{CatalogError, CatalogService, DeletionSummary, Entity};

pub mod catalog_service_impl;
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod storage;
pub use storage::MediaStorage;
