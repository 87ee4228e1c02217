#![forbid(unsafe_code)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # typeahead-tea
//!
//! A small Elm Architecture runtime for terminal components.
//!
//! Every interaction is a [`Message`]. A [`Model`] folds messages into its
//! state in [`Model::update`], may return a [`Cmd`] for side effects, and
//! renders itself as a string in [`Model::view`]. [`Program`] drives a model
//! against a real terminal; [`simulator::ProgramSimulator`] drives it in
//! tests.
//!
//! ## Example
//!
//! ```rust
//! use typeahead_tea::{Cmd, KeyMsg, KeyType, Message, Model, quit};
//!
//! struct Echo {
//!     last: String,
//! }
//!
//! impl Model for Echo {
//!     fn init(&self) -> Option<Cmd> {
//!         None
//!     }
//!
//!     fn update(&mut self, msg: Message) -> Option<Cmd> {
//!         if let Some(key) = msg.downcast_ref::<KeyMsg>() {
//!             if key.key_type == KeyType::Esc {
//!                 return Some(quit());
//!             }
//!             self.last = key.to_string();
//!         }
//!         None
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("last key: {}", self.last)
//!     }
//! }
//! ```

pub mod command;
pub mod key;
pub mod message;
pub mod mouse;
pub mod program;
pub mod simulator;

pub use command::{Cmd, batch, quit, sequence};
pub use key::{KeyMsg, KeyType};
pub use message::{BlurMsg, FocusMsg, InterruptMsg, Message, QuitMsg, WindowSizeMsg};
pub use mouse::{MouseAction, MouseButton, MouseMsg};
pub use program::{Error, Model, Program, ProgramOptions, Result};
