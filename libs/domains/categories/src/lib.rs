//! Categories Domain
//!
//! Named groupings that products point at through `category_id`. Nothing here
//! enforces that link; a product may reference a category that does not exist.
//!
//! Same layering as `domain_products`: handlers → service → repository.

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryCategoryRepository;
pub use models::{Category, CategoryUpdate, ListQuery, NewCategory};
pub use self::mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
