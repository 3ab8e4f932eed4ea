//! Shared application state.

use mensura_validate::Validator;
use std::sync::Arc;

/// Process-wide state handed to every handler.
///
/// The validator is immutable after startup, so sharing is a plain
/// `Arc` with no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<Validator>,
}

impl AppState {
    /// Wrap a validator for sharing across handlers.
    pub fn new(validator: Validator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}
