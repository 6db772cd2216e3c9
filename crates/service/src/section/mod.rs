//! Named section documents: names, typed schemas, builtin defaults,
//! storage backends and the caching repository in front of them.

pub mod backend;
pub mod defaults;
pub mod json_file;
pub mod name;
pub mod repository;
pub mod schema;
pub mod seaorm;

pub use backend::{SectionBackend, SectionRecord};
pub use defaults::default_document;
pub use json_file::JsonFileSectionBackend;
pub use name::SectionName;
pub use repository::{ReadOptions, SectionRepository, SectionSummary};
pub use schema::{validate, SectionDocument};
pub use seaorm::SeaOrmSectionBackend;
