#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # typeahead
//!
//! A typeahead ("Suggest") component for typeahead-tea applications, and the
//! pieces it is built from:
//!
//! - **key** - Key binding definitions and matching
//! - **style** - Terminal text styles, borders and width helpers
//! - **filter** - Item and list predicates for narrowing candidates
//! - **textinput** - Single-line text input
//! - **query_list** - Filtered list with an active item and keyboard navigation
//! - **popover** - Floating panel with open/close lifecycle events
//! - **suggest** - The typeahead widget composing all of the above
//!
//! ## Example
//!
//! ```rust
//! use typeahead::prelude::*;
//!
//! let mut suggest = Suggest::new(
//!     vec!["Apple", "Banana", "Cherry"],
//!     DefaultItemRenderer::new(),
//!     |fruit: &&str| fruit.to_string(),
//! )
//! .filter(contains_ignore_case(|fruit: &&str| fruit.to_string()));
//!
//! suggest.focus();
//! assert!(suggest.is_open());
//! ```

pub mod filter;
pub mod key;
pub mod popover;
pub mod query_list;
pub mod style;
pub mod suggest;
pub mod textinput;

use std::sync::atomic::{AtomicU64, Ordering};

pub use popover::ConfigError;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique id for routing follow-up messages to the widget that
/// scheduled them.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::filter::{Filter, contains_ignore_case, prefix_ignore_case};
    pub use crate::key::{Binding, matches};
    pub use crate::popover::{ClassList, MINIMAL, Popover, PopoverProps, Position};
    pub use crate::query_list::{
        DefaultItemRenderer, Direction, ItemRenderer, ItemRendererProps, QueryList,
        item_renderer,
    };
    pub use crate::style::{Border, Color, Style};
    pub use crate::suggest::{
        Effect, InputProps, ItemSelectedMsg, SelectSource, Suggest, SuggestConfig,
        SuggestEvent, SuggestState,
    };
    pub use crate::textinput::TextInput;
}
