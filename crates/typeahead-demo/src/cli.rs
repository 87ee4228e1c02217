//! Command-line interface for `film-suggest`.
//!
//! # Examples
//!
//! ```bash
//! # Pick a film with the default settings
//! film-suggest
//!
//! # Bordered panel above the input, query cleared after each pick
//! film-suggest --no-minimal --position top-left --reset-on-select
//!
//! # Load settings from a file and log to disk
//! film-suggest --config film-suggest.toml --log-file /tmp/film-suggest.log -vv
//! ```

use std::path::PathBuf;

use clap::Parser;
use typeahead::popover::Position;

/// Film Suggest - pick one of the top 100 films by typing.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "film-suggest",
    author,
    version,
    about = "Film Suggest - a typeahead picker over the top 100 films",
    long_about = "Type to filter the film list, move with the arrow keys and press Enter \
                  to pick a film. The chosen film is printed on exit."
)]
pub struct Cli {
    /// Clear the query whenever the panel closes
    #[arg(long, env = "FILM_SUGGEST_RESET_ON_CLOSE")]
    pub reset_on_close: bool,

    /// Clear the query after every selection
    #[arg(long, env = "FILM_SUGGEST_RESET_ON_SELECT")]
    pub reset_on_select: bool,

    /// Draw the panel with a border instead of the minimal style
    #[arg(long, env = "FILM_SUGGEST_NO_MINIMAL")]
    pub no_minimal: bool,

    /// Show the whole list regardless of what is typed
    #[arg(long, env = "FILM_SUGGEST_NOT_FILTERABLE")]
    pub not_filterable: bool,

    /// Where the panel opens relative to the input
    ///
    /// One of bottom-left, bottom-right, top-left, top-right
    #[arg(long, env = "FILM_SUGGEST_POSITION")]
    pub position: Option<Position>,

    /// Rows the panel shows before it scrolls
    #[arg(long, env = "FILM_SUGGEST_MAX_VISIBLE")]
    pub max_visible: Option<usize>,

    /// Path to a TOML settings file
    ///
    /// Flags given on the command line win over the file
    #[arg(long, short = 'c', env = "FILM_SUGGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    ///
    /// Nothing is logged without it since the terminal belongs to the UI
    #[arg(long, env = "FILM_SUGGEST_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable alternate screen mode
    #[arg(long, env = "FILM_SUGGEST_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Disable mouse support
    #[arg(long, env = "FILM_SUGGEST_NO_MOUSE")]
    pub no_mouse: bool,

    /// Print the resolved settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}
