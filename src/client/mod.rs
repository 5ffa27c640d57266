//! Browser-facing side of the catalog: an HTTP client for the four
//! endpoints and the views built from their responses.

pub mod api;
pub mod carousel;
pub mod render;

pub use api::{CatalogClient, ClientError, ClientResult};
pub use carousel::Carousel;
pub use render::{progress_percentage, render_home_page};
