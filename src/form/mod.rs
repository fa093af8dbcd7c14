//! Generic form state management.
//!
//! This module contains the engine behind every editable form in the
//! application, including:
//! - Value trees with nested groups and structural sharing (`Value`)
//! - Dot-delimited field addressing (`FieldPath`)
//! - Interaction and validation state plus the submission lifecycle (`Form`)

mod engine;
mod path;
mod value;

pub use engine::{
    FieldStatus, Form, FormState, SubmitFn, SubmitFuture, Submission, ValidateFn, ValidationResult,
};
pub use path::FieldPath;
pub use value::Value;
