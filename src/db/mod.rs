//! Database client.
//!
//! A thin libsql layer owning the schema and all SQL. Uniqueness invariants
//! (`users.username`, `users.email`, `recipes.name`) are backed by
//! storage-level `UNIQUE` constraints; the service-layer checks above are an
//! early-exit optimization, not the sole guard.

#![allow(missing_docs)]

pub mod client;

pub use client::DbClient;
