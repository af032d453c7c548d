//! Service layer owning the atomic sequence increment.
//! - `sequence::storage` is the transactional seam the store is written against.
//! - `sequence::repo` holds the SeaORM (Postgres) and in-memory backends.
//! - `metrics` exports Prometheus counters for increment outcomes.

pub mod sequence;
pub mod metrics;
#[cfg(test)]
pub mod test_support;
