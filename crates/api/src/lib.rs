//! Service layer for the EAV object store
//!
//! The `ObjectService` is the surface external transports talk to: every
//! HTTP-shaped operation (create, update, render, schema, delete, search)
//! desugars to exactly one validate → hydrate → commit → project pipeline
//! over the engine. Authentication, routing and wire transport stay outside
//! this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod service;

pub use service::{body, ObjectService};
