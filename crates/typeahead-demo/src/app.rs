//! The film picker application model.
//!
//! [`App`] hosts one [`Suggest`] over [`TOP_100_FILMS`], mirrors its
//! selection, and lets the user flip the widget's switches while it runs.

use typeahead::key::Binding;
use typeahead::popover::{Position, PopoverProps};
use typeahead::style::{Border, Style};
use typeahead::suggest::{InputProps, ItemSelectedMsg, Suggest, SuggestConfig};
use typeahead_tea::{Cmd, KeyMsg, KeyType, Message, Model, quit};

use crate::config::DemoConfig;
use crate::films::{Film, FilmRenderer, TOP_100_FILMS, film_filter, film_title};

/// Lines drawn above the widget.
const HEADER_LINES: u16 = 2;

/// Option toggles, active whatever the widget is doing.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub toggle_filterable: Binding,
    pub toggle_minimal: Binding,
    pub toggle_reset_on_close: Binding,
    pub toggle_reset_on_select: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            toggle_filterable: Binding::new()
                .keys(&["alt+f"])
                .help("alt+f", "filterable"),
            toggle_minimal: Binding::new().keys(&["alt+m"]).help("alt+m", "minimal"),
            toggle_reset_on_close: Binding::new()
                .keys(&["alt+c"])
                .help("alt+c", "reset on close"),
            toggle_reset_on_select: Binding::new()
                .keys(&["alt+s"])
                .help("alt+s", "reset on select"),
        }
    }
}

/// Sent once at startup to focus the widget.
struct FocusSuggest;

/// The application model.
pub struct App {
    suggest: Suggest<Film, FilmRenderer>,
    film: Option<Film>,
    pub key_map: KeyMap,
    title_style: Style,
    help_style: Style,
}

impl App {
    /// Builds the picker from resolved settings.
    #[must_use]
    pub fn new(config: &DemoConfig) -> Self {
        Self::with_renderer(config, FilmRenderer::new())
    }

    /// Like [`App::new`] without any colors.
    #[must_use]
    pub fn plain(config: &DemoConfig) -> Self {
        let mut app = Self::with_renderer(config, FilmRenderer::plain());
        app.title_style = Style::new();
        app.help_style = Style::new();
        let input = app.suggest.input_mut();
        input.cursor_style = Style::new();
        input.placeholder_style = Style::new();
        input.prompt_style = Style::new();
        app
    }

    fn with_renderer(config: &DemoConfig, renderer: FilmRenderer) -> Self {
        let first = TOP_100_FILMS[0];
        let mut popover = PopoverProps::default()
            .position(config.position)
            .border(Border::rounded(), Style::new().foreground("240"));
        if config.minimal {
            popover = popover.minimal();
        }

        let mut suggest = Suggest::new(TOP_100_FILMS.to_vec(), renderer, film_title)
            .filter(film_filter())
            .with_config(SuggestConfig {
                filterable: config.filterable,
                reset_on_close: config.reset_on_close,
                reset_on_select: config.reset_on_select,
                no_results: Some("No results.".to_string()),
                placeholder: "Search films...".to_string(),
                max_visible: config.max_visible,
            })
            .popover_props(popover)
            .input_props(
                InputProps::default()
                    .prompt("Film: ")
                    .width(config.input_width),
            )
            .selected(first);
        suggest.set_origin(0, HEADER_LINES);

        Self {
            suggest,
            film: Some(first),
            key_map: KeyMap::default(),
            title_style: Style::new().foreground("212").bold(),
            help_style: Style::new().foreground("241"),
        }
    }

    /// The film picked last.
    #[must_use]
    pub fn chosen(&self) -> Option<&Film> {
        self.film.as_ref()
    }

    #[must_use]
    pub fn suggest(&self) -> &Suggest<Film, FilmRenderer> {
        &self.suggest
    }

    fn handle_toggle(&mut self, key: &KeyMsg) -> bool {
        let config = self.suggest.config().clone();
        if self.key_map.toggle_filterable.matches_key(key) {
            self.suggest.set_filterable(!config.filterable);
        } else if self.key_map.toggle_minimal.matches_key(key) {
            let minimal = self.suggest.popover().is_minimal();
            self.suggest.set_minimal(!minimal);
        } else if self.key_map.toggle_reset_on_close.matches_key(key) {
            self.suggest.set_reset_on_close(!config.reset_on_close);
        } else if self.key_map.toggle_reset_on_select.matches_key(key) {
            self.suggest.set_reset_on_select(!config.reset_on_select);
        } else {
            return false;
        }
        tracing::info!(key = %key, config = ?self.suggest.config(), "option toggled");
        true
    }

    fn options_line(&self) -> String {
        let config = self.suggest.config();
        let check = |on: bool| if on { "[x]" } else { "[ ]" };
        let switches = [
            (config.filterable, &self.key_map.toggle_filterable),
            (self.suggest.popover().is_minimal(), &self.key_map.toggle_minimal),
            (config.reset_on_close, &self.key_map.toggle_reset_on_close),
            (config.reset_on_select, &self.key_map.toggle_reset_on_select),
        ];
        switches
            .iter()
            .map(|(on, binding)| {
                let help = binding.get_help();
                format!("{} {} ({})", check(*on), help.desc, help.key)
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn position(&self) -> Position {
        self.suggest.popover().props().position
    }
}

impl Model for App {
    fn init(&self) -> Option<Cmd> {
        Some(Cmd::message(FocusSuggest))
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<FocusSuggest>() {
            return self.suggest.focus();
        }
        if let Some(selected) = msg.downcast_ref::<ItemSelectedMsg<Film>>() {
            if selected.id == self.suggest.id() {
                tracing::info!(film = %selected.item, source = ?selected.source, "film chosen");
                self.film = Some(selected.item);
            }
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.handle_toggle(key) {
                return None;
            }
            if key.key_type == KeyType::Esc && !self.suggest.is_open() {
                return Some(quit());
            }
        }
        self.suggest.update(msg)
    }

    fn view(&self) -> String {
        let chosen = self
            .film
            .map_or_else(|| "(none)".to_string(), |film| film.to_string());
        let help = if self.suggest.is_open() {
            "up/down move • enter pick • esc close"
        } else {
            "up/down open • type to search • esc quit"
        };
        [
            self.title_style.render("Film Suggest"),
            String::new(),
            self.suggest.view(),
            String::new(),
            format!("Selected: {chosen}"),
            format!("Position: {}", self.position()),
            self.options_line(),
            self.help_style.render(help),
        ]
        .join("\n")
    }
}
