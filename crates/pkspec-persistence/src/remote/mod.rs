//! Hosted specification records and the repository seam over them.

mod record;
mod repository;

pub use record::{DEFAULT_TITLE, SpecificationRecord};
pub use repository::{InMemoryRepository, SpecificationRepository, SpecificationUpdate};
