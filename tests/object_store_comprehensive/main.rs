//! Comprehensive integration suite for the EAV object store
//!
//! Exercises the public facade end to end, organized by concern:
//! - value_engine: typed set/get dispatch and its documented quirks
//! - relationships: inverse symmetry and subresource bookkeeping
//! - lifecycle: staged reference resolution on commit
//! - projector: schema documents, envelopes and object rendering
//! - service: the validate → hydrate → commit → render pipeline

mod common;

mod lifecycle;
mod projector;
mod relationships;
mod service;
mod value_engine;
