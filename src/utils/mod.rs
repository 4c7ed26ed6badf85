//! Configuration utilities.

#![allow(missing_docs)]

pub mod config;
