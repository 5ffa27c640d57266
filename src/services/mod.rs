pub mod catalog;
pub mod seed;

pub use catalog::CatalogService;
pub use seed::{seed_if_empty, SeedReport, DEMO_USER_ID};
