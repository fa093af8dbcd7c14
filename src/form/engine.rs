//! Form state engine.
//!
//! Every editable form in the application (login, registration, user
//! create/edit) is backed by one [`Form`]. The engine owns a value tree, a
//! sparse per-field error map, and a sparse touched set, and drives the
//! submission lifecycle: edits mark fields touched, blurs revalidate, and a
//! submit runs a full validation pass before the externally supplied handler
//! is invoked with a snapshot of the values.
//!
//! Validation always runs over the whole current tree, even when only one
//! field's message is kept. That costs O(tree size) per blur instead of O(1)
//! per field; the forms here are small enough that the simpler contract wins.

use super::path::FieldPath;
use super::value::Value;
use anyhow::Result;
use log::*;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

/// Mapping from top-level field name to a human-readable error message,
/// produced fresh by each validation pass over the full value tree. Absence
/// of a field means no error was reported for it.
///
pub type ValidationResult = BTreeMap<String, String>;

/// Synchronous, side-effect-free validation function over the full tree.
///
pub type ValidateFn = Box<dyn Fn(&Value) -> ValidationResult + Send>;

/// Outcome of an invoked submit handler.
///
pub type SubmitFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Asynchronous submit handler, invoked with a snapshot of the values.
///
pub type SubmitFn = Box<dyn Fn(Value) -> SubmitFuture + Send>;

/// Derived presentation status of one top-level field.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    /// Never touched since construction or the last reset; no error is shown
    /// even if the current value would not validate.
    Pristine,
    /// Touched and no error is recorded for the field.
    Valid,
    /// Touched with a recorded error message.
    Invalid,
}

/// Snapshot of a form's state: the value tree plus per-field error and
/// touched bookkeeping. Owned and exclusively mutated by [`Form`]; the view
/// layer only reads it through the accessors.
///
pub struct FormState {
    values: Value,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
}

impl FormState {
    /// Return the current value tree.
    ///
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// Return the text of the leaf at the path, or None if the path does not
    /// resolve to a leaf.
    ///
    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        self.values.text_at(path)
    }

    /// Return the recorded error message for a top-level field, if any.
    ///
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Return the full error mapping.
    ///
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Return whether a top-level field has been touched.
    ///
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Return the derived status of a top-level field.
    ///
    pub fn field_status(&self, field: &str) -> FieldStatus {
        if !self.touched.contains(field) {
            FieldStatus::Pristine
        } else if self.errors.contains_key(field) {
            FieldStatus::Invalid
        } else {
            FieldStatus::Valid
        }
    }
}

/// Result of a submit request.
///
pub enum Submission {
    /// Validation produced at least one error; the submit handler was not
    /// invoked. The outcome is communicated only through the updated error
    /// and touched state, never as a failure.
    Rejected,
    /// The handler was invoked with a snapshot of the values; the caller
    /// awaits the outcome. Handler failure passes through unchanged.
    Pending(SubmitFuture),
}

/// Owns and drives the state of one mounted form.
///
/// Constructed with the initial value tree, an optional validation function,
/// and the submit handler, all fixed for the life of the form instance.
///
pub struct Form {
    initial_values: Value,
    validate: Option<ValidateFn>,
    on_submit: SubmitFn,
    state: FormState,
}

impl Form {
    /// Return a new instance with pristine state for the given initial
    /// values.
    ///
    pub fn new(initial_values: Value, validate: Option<ValidateFn>, on_submit: SubmitFn) -> Form {
        let state = FormState {
            values: initial_values.clone(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
        };
        Form {
            initial_values,
            validate,
            on_submit,
            state,
        }
    }

    /// Return a read-only snapshot of the current state.
    ///
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Replace the leaf or branch addressed by the path and mark the owning
    /// top-level field touched. Only the nodes on the root-to-target path are
    /// rebuilt; sibling subtrees are shared with the previous tree.
    ///
    /// # Panics
    /// Panics if the path does not resolve inside the value tree's shape.
    /// The engine never creates new branches.
    pub fn set_field(&mut self, path: &FieldPath, value: Value) {
        self.state.values = self.state.values.with(path, value);
        self.state.touched.insert(path.root().to_owned());
    }

    /// Replace the leaf addressed by the path with a text value.
    ///
    /// # Panics
    /// Panics if the path does not resolve inside the value tree's shape.
    pub fn set_text(&mut self, path: &FieldPath, text: impl Into<String>) {
        self.set_field(path, Value::text(text));
    }

    /// Mark one top-level field touched (idempotent) and, if a validator is
    /// present, rerun it against the current full tree, refreshing only this
    /// field's error entry. Other fields keep whatever their last validation
    /// pass recorded.
    ///
    pub fn mark_touched(&mut self, field: &str) {
        self.state.touched.insert(field.to_owned());
        if let Some(validate) = &self.validate {
            // Validation sees the live tree, with the touch already applied.
            let result = validate(&self.state.values);
            match result.get(field) {
                Some(message) => {
                    self.state.errors.insert(field.to_owned(), message.clone());
                }
                None => {
                    self.state.errors.remove(field);
                }
            }
        }
    }

    /// Request submission. If a validator is present it runs against the
    /// current tree, the error mapping is replaced wholesale, and every
    /// top-level field is marked touched; any recorded error rejects the
    /// request without invoking the handler. Otherwise the handler is invoked
    /// with a snapshot of the values and the pending outcome is returned.
    ///
    /// Edits made while the outcome is pending apply to the live state
    /// immediately but never affect the snapshot already handed to the
    /// handler. A handler failure leaves values, errors, and touched exactly
    /// as they were at invocation time.
    ///
    pub fn submit(&mut self) -> Submission {
        if let Some(validate) = &self.validate {
            let errors = validate(&self.state.values);
            self.state.errors = errors;
            let all_fields: Vec<String> = self
                .state
                .values
                .top_level_keys()
                .into_iter()
                .map(str::to_owned)
                .collect();
            self.state.touched.extend(all_fields);
            if !self.state.errors.is_empty() {
                debug!(
                    "Rejecting form submission with {} validation error(s)...",
                    self.state.errors.len()
                );
                return Submission::Rejected;
            }
        }
        let snapshot = self.state.values.clone();
        Submission::Pending((self.on_submit)(snapshot))
    }

    /// Replace the whole state with the initial values and empty error and
    /// touched bookkeeping. Later edits to the reset form can never corrupt
    /// the initial values held for the next reset.
    ///
    pub fn reset(&mut self) {
        self.state = FormState {
            values: self.initial_values.clone(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
        };
    }
}
