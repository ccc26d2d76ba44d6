//! Repository layer: one zero-sized struct per table with async query methods.

pub mod kv_repo;

pub use kv_repo::KvRepo;
