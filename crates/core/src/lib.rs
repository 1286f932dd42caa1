//! Domain types and pure logic for the knowledge repository.
//!
//! This crate has no database or HTTP dependencies so it can be shared by the
//! repository layer, the API server, and any future tooling.

pub mod error;
pub mod permissions;
pub mod roles;
pub mod search;
pub mod storage;
pub mod tags;
pub mod types;
