//! Section store: named JSON documents behind a TTL cache.
//! - `cache`: process-local time-bounded cache.
//! - `storage`: reusable JSON file map used by the file backend.
//! - `section`: section names, schemas, defaults, backends and the repository.

pub mod errors;
pub mod cache;
pub mod storage;
pub mod section;
#[cfg(test)]
pub mod test_support;
