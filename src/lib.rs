pub mod config;
pub mod content;
pub mod content_cache;
pub mod error;
pub mod loader;
pub mod logger;
pub mod paginator;
pub mod query;
pub mod record;
pub mod repository;
pub mod schema;
pub mod text_utils;
pub mod validation;
mod test_data;
mod util;

pub use content::ContentType;
pub use content_cache::{ContentCache, Expire};
pub use error::{ContentError, FieldError};
pub use query::{Filter, Query};
pub use record::{Collection, Post, Service, Testimonial};
pub use repository::ContentRepository;
pub use validation::ValidationReport;
