//! Input validation performed before requests reach the services.
//!
//! [`RequestValidator`] applies field rules and collects every violation
//! into a [`ValidationFailure`]. [`ReferenceValidator`] checks that the
//! records a request points at exist.

mod error;
mod references;
mod rules;

pub use error::{FieldError, ReferenceCheckError, ValidationFailure};
pub use references::ReferenceValidator;
pub use rules::RequestValidator;

#[cfg(test)]
mod tests;
