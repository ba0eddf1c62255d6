//! Address Form Port
//!
//! Abstracts the browser form that the auto-fill integration drives.
//! Implementations may wrap a DOM, a TUI, or a test double.

use serde::Serialize;

/// Notification emitted after a field is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormEvent {
    /// Field content changed (fired on every write)
    Input { selector: String, value: String },
    /// Field committed (fired after `Input`)
    Change { selector: String, value: String },
}

/// Form bound to the auto-fill integration.
pub trait AddressForm: Send + Sync {
    /// Current value of the element matching `selector`,
    /// or None if no element matches.
    fn field_value(&self, selector: &str) -> Option<String>;

    /// Overwrite the element matching `selector`.
    fn set_field_value(&self, selector: &str, value: &str);

    /// Enable or disable the element matching `selector`.
    fn set_enabled(&self, selector: &str, enabled: bool);

    /// Deliver a change notification to dependent listeners.
    fn emit(&self, event: FormEvent);

    /// Show a non-fatal notice to the user.
    fn show_error(&self, message: &str);
}
