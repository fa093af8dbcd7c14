//! Application state management module.
//!
//! This module contains the core state management for the application,
//! including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View)
//! - Form bindings between terminal input and the form engine
//! - State error handling

mod error;
mod forms;
mod navigation;
mod state_impl;

pub use error::StateError;
pub use forms::{FieldSpec, FormBinding};
pub use navigation::View;
pub use state_impl::State;
