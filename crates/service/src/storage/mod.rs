//! Storage helpers for the service layer.
//!
//! `JsonMapStore` persists a small ordered map as a JSON file; the file
//! section backend builds on it.

pub mod json_map_store;
