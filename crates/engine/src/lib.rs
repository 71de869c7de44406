//! Value engine and object graph for the EAV store
//!
//! This crate is the core of the system:
//! - `Payload`: the tagged storage union, selected once per Value from its
//!   Attribute's declared type (no nullable-slot ambiguity, no runtime
//!   type sniffing)
//! - `Value`: typed set/get dispatch, including the canonical string
//!   projection used for uniform text filtering
//! - `ObjectEntity` / `ObjectStore`: an arena of objects with identifier
//!   adjacency lists, symmetric inverse-relation maintenance and
//!   subresource bookkeeping
//! - lifecycle hooks: staged identifier strings resolve to live links on
//!   commit, with not-found as a hard failure
//! - `StoreConfig`: `eav.toml` settings, including inverse auto-creation
//!
//! Every operation is a bounded, synchronous graph walk under one store
//! lock; concurrent writers serialize there.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod file;
pub mod hooks;
pub mod object;
pub mod payload;
pub mod store;
pub mod value;

pub use config::{StoreConfig, CONFIG_FILE_NAME};
pub use file::File;
pub use hooks::ObjectLookup;
pub use object::{ObjectEntity, SubresourceRef};
pub use payload::{ObjectLinks, Payload};
pub use store::ObjectStore;
pub use value::{Value, ValueView};
