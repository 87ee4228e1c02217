#![forbid(unsafe_code)]

//! # Film Suggest
//!
//! A terminal film picker built on the typeahead Suggest widget.
//!
//! The binary and the integration tests share these modules:
//!
//! - [`app`] - the application model hosting the widget
//! - [`cli`] - command-line flags
//! - [`config`] - settings resolved from defaults, a TOML file and flags
//! - [`films`] - the catalogue, its filter and its row renderer

pub mod app;
pub mod cli;
pub mod config;
pub mod films;
