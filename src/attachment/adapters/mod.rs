//! Adapter implementations for attachment metadata and blob storage.

pub mod blob;
pub mod memory;
pub mod postgres;
