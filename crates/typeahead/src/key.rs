//! Key bindings.
//!
//! A [`Binding`] names one action and the key strings that trigger it. Key
//! strings are the [`Display`](std::fmt::Display) form of
//! [`KeyMsg`](typeahead_tea::KeyMsg): `"down"`, `"ctrl+n"`, `"enter"`, `"a"`.
//!
//! ```rust
//! use typeahead::key::{Binding, matches};
//!
//! let next = Binding::new().keys(&["down", "ctrl+n"]).help("↓", "next item");
//! let prev = Binding::new().keys(&["up", "ctrl+p"]).help("↑", "previous item");
//!
//! assert!(matches("ctrl+n", &[&next, &prev]));
//! assert!(!matches("enter", &[&next, &prev]));
//! ```

use typeahead_tea::KeyMsg;

/// Short help for a binding, e.g. `("↓", "next item")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// An action and the keys that trigger it.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<String>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// An empty binding. It matches nothing until keys are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trigger keys.
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.set_keys(keys);
        self
    }

    /// Sets the help label and description.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Replaces the trigger keys.
    pub fn set_keys(&mut self, keys: &[&str]) {
        self.keys = keys.iter().map(|k| (*k).to_string()).collect();
    }

    /// The trigger keys.
    #[must_use]
    pub fn get_keys(&self) -> &[String] {
        &self.keys
    }

    /// The help entry.
    #[must_use]
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// Turns the binding on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding can match: not disabled and has at least one key.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Whether `key` triggers this binding.
    #[must_use]
    pub fn matches_key(&self, key: &KeyMsg) -> bool {
        self.enabled() && {
            let name = key.to_string();
            self.keys.iter().any(|k| *k == name)
        }
    }
}

/// Whether `key` triggers any enabled binding in `bindings`.
#[must_use]
pub fn matches(key: &str, bindings: &[&Binding]) -> bool {
    bindings
        .iter()
        .any(|b| b.enabled() && b.keys.iter().any(|k| k == key))
}
