//! Sequence module: domain, storage seam, backends and the store itself.

pub mod domain;
pub mod errors;
pub mod storage;
pub mod store;
pub mod repo;

pub use store::SequenceStore;
