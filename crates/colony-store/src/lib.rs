//! File-backed save storage for the colony simulation.
//!
//! The core crate defines the [`SaveStore`](colony_core::SaveStore) seam and
//! the JSON envelope codec; this crate writes that JSON to disk. A save
//! replaces the previous one atomically: the envelope is written to a
//! sibling temporary file which is then renamed over the save path, so a
//! crash mid-write leaves the old save intact.
//!
//! # Modules
//!
//! - [`json_file`] -- [`JsonFileStore`], one save file per store.

pub mod json_file;

pub use json_file::JsonFileStore;
