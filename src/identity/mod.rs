//! User identity seen by the tracker.
//!
//! Authentication is handled outside this crate. Callers hand every mutating
//! operation an explicit [`domain::Actor`], and services resolve display
//! profiles through the [`ports::UserDirectory`] port when eager-loading
//! owners, authors and uploaders.

pub mod adapters;
pub mod domain;
pub mod ports;
