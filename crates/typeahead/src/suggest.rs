//! Typeahead input.
//!
//! [`Suggest`] composes a [`TextInput`], a [`QueryList`] and a [`Popover`].
//! Typing filters the list; arrow keys move the active item; Enter or a
//! click commits it as the selection and closes the panel. While the user
//! is typing the input shows the query, otherwise it shows the committed
//! selection through the input value renderer.
//!
//! All state changes go through [`SuggestState::apply`], a pure reducer
//! that returns the next state plus the [`Effect`]s to run (callbacks,
//! scrolling). The widget runs those effects and drives the popover
//! lifecycle.
//!
//! # Example
//!
//! ```rust
//! use typeahead::prelude::*;
//! use typeahead_tea::{KeyMsg, KeyType, Message};
//!
//! let mut suggest = Suggest::new(
//!     vec!["Apple", "Banana", "Cherry"],
//!     DefaultItemRenderer::plain(),
//!     |fruit: &&str| fruit.to_string(),
//! )
//! .filter(contains_ignore_case(|fruit: &&str| fruit.to_string()));
//!
//! let _ = suggest.focus();
//! for c in "an".chars() {
//!     let _ = suggest.update(Message::new(KeyMsg::from_char(c)));
//! }
//! let _ = suggest.update(Message::new(KeyMsg::from_type(KeyType::Enter)));
//!
//! assert_eq!(suggest.selected_item(), Some(&"Banana"));
//! assert!(!suggest.is_open());
//! assert_eq!(suggest.input_value(), "Banana");
//! ```

use std::fmt;

use typeahead_tea::{Cmd, KeyMsg, Message, Model, MouseButton, MouseMsg, batch, sequence};

use crate::filter::Filter;
use crate::key::Binding;
use crate::next_id;
use crate::popover::{Lifecycle, MINIMAL, Popover, PopoverProps, Position};
use crate::query_list::{
    DEFAULT_MAX_VISIBLE, DefaultItemRenderer, Direction, ItemRenderer, ListAction, QueryList,
    reconcile,
};
use crate::style::{Style, visible_width};
use crate::textinput::TextInput;

/// What caused a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectSource {
    Keyboard(KeyMsg),
    Mouse(MouseMsg),
    /// [`Suggest::select_item`].
    Programmatic,
}

/// Sent to the parent model after every confirmed selection.
#[derive(Debug, Clone)]
pub struct ItemSelectedMsg<T> {
    /// Id of the [`Suggest`] that produced it.
    pub id: u64,
    pub item: T,
    pub source: SelectSource,
}

/// Behavior switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    /// When `false` the input ignores edits and the whole list is shown.
    pub filterable: bool,
    /// Clear the query and make the first item active after a selection.
    pub reset_on_select: bool,
    /// Clear the query and make the first item active when the panel
    /// reopens.
    pub reset_on_close: bool,
    /// Row shown when nothing matches. `None` shows an empty panel.
    pub no_results: Option<String>,
    pub placeholder: String,
    /// Rows visible before the list scrolls.
    pub max_visible: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            filterable: true,
            reset_on_select: false,
            reset_on_close: false,
            no_results: None,
            placeholder: "Search...".to_string(),
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

/// Host configuration for the text input.
pub struct InputProps {
    pub prompt: String,
    pub prompt_style: Style,
    /// Columns for the value, not counting prompt and cursor.
    pub width: usize,
    /// Called with the new text after every edit.
    pub on_change: Option<Box<dyn FnMut(&str) + Send>>,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            prompt_style: Style::new(),
            width: 30,
            on_change: None,
        }
    }
}

impl InputProps {
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for InputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProps")
            .field("prompt", &self.prompt)
            .field("width", &self.width)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// Everything that can change a [`SuggestState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestEvent {
    /// The input text was edited.
    QueryChanged(String),
    /// An arrow key on the input while the panel is closed.
    TargetKey(Direction),
    /// The list moved its active item.
    ActiveItemChanged(Option<usize>),
    /// An item was chosen, by source index.
    ItemSelected { index: usize, source: SelectSource },
    PopoverWillOpen,
    PopoverDidOpen,
    PopoverWillClose,
    /// The popover asks to open (`true`) or close (`false`).
    Interaction(bool),
    /// The input lost focus.
    Blur,
}

/// Work the widget performs after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<T> {
    ScrollActiveIntoView,
    /// Forward to the popover's `on_interaction`.
    Interaction(bool),
    /// Run the popover's lifecycle hook.
    Lifecycle(Lifecycle),
    /// Run `on_item_select` and notify the parent.
    Selected { item: T, source: SelectSource },
    /// Forward to the input's `on_change`.
    QueryEdited(String),
    /// The list filtered for `query`, computed while folding the event.
    /// The widget hands it to its [`QueryList`] instead of filtering again.
    Refiltered { query: String, matches: Vec<usize> },
}

/// The widget's state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestState<T> {
    pub selected_item: Option<T>,
    /// Source index of the highlighted item.
    pub active_item: Option<usize>,
    pub is_open: bool,
    /// The input shows `query` rather than the selection.
    pub is_typing: bool,
    pub query: String,
}

impl<T> Default for SuggestState<T> {
    fn default() -> Self {
        Self {
            selected_item: None,
            active_item: None,
            is_open: false,
            is_typing: false,
            query: String::new(),
        }
    }
}

impl<T: Clone> SuggestState<T> {
    /// A closed state with `item` already selected.
    pub fn with_selection(item: T) -> Self {
        Self {
            selected_item: Some(item),
            ..Self::default()
        }
    }

    /// Text the input shows: the query while typing, otherwise the rendered
    /// selection (blank when nothing is selected).
    pub fn display_value(&self, input_value_renderer: &dyn Fn(&T) -> String) -> String {
        if self.is_typing {
            self.query.clone()
        } else {
            self.selected_item
                .as_ref()
                .map(input_value_renderer)
                .unwrap_or_default()
        }
    }

    fn reset_query(&mut self, list: &QueryList<T>, effects: &mut Vec<Effect<T>>) {
        self.query.clear();
        self.active_item = reconcile(&matches_for(list, "", effects), Some(0));
    }

    /// Folds `event` into the state.
    ///
    /// `list` supplies the items and the filter; it is only read. Effects
    /// come back in the order they must run.
    #[must_use]
    pub fn apply(
        &self,
        event: SuggestEvent,
        config: &SuggestConfig,
        list: &QueryList<T>,
    ) -> (Self, Vec<Effect<T>>) {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match event {
            SuggestEvent::QueryChanged(text) => {
                if !config.filterable {
                    return (next, effects);
                }
                next.active_item =
                    reconcile(&matches_for(list, &text, &mut effects), self.active_item);
                next.query.clone_from(&text);
                next.is_typing = true;
                effects.push(Effect::QueryEdited(text));
            }
            SuggestEvent::TargetKey(_) => {
                next.is_open = true;
            }
            SuggestEvent::ActiveItemChanged(active) => {
                next.active_item = active;
            }
            SuggestEvent::ItemSelected { index, source } => {
                let Some(item) = list.items().get(index).cloned() else {
                    tracing::warn!(index, "selection outside the item list ignored");
                    return (next, effects);
                };
                next.selected_item = Some(item.clone());
                next.is_open = false;
                next.is_typing = false;
                if config.reset_on_select {
                    next.reset_query(list, &mut effects);
                }
                effects.push(Effect::Selected { item, source });
            }
            SuggestEvent::PopoverWillOpen => {
                if config.reset_on_close {
                    next.reset_query(list, &mut effects);
                }
                effects.push(Effect::Lifecycle(Lifecycle::WillOpen));
            }
            SuggestEvent::PopoverDidOpen => {
                effects.push(Effect::ScrollActiveIntoView);
                effects.push(Effect::Lifecycle(Lifecycle::DidOpen));
            }
            SuggestEvent::PopoverWillClose => {
                effects.push(Effect::Lifecycle(Lifecycle::WillClose));
            }
            SuggestEvent::Interaction(open) => {
                next.is_open = open;
                effects.push(Effect::Interaction(open));
            }
            SuggestEvent::Blur => {
                if self.is_open {
                    next.is_open = false;
                    effects.push(Effect::Interaction(false));
                }
                next.is_typing = false;
            }
        }

        let opened = next.is_open && !self.is_open;
        let moved = next.is_open && next.active_item != self.active_item;
        if (opened || moved) && !has_scroll(&effects) {
            effects.insert(0, Effect::ScrollActiveIntoView);
        }
        (next, effects)
    }
}

/// Source indices passing for `query`. Reuses the list's sequence when it is
/// current; a fresh one is also reported as [`Effect::Refiltered`].
fn matches_for<T>(list: &QueryList<T>, query: &str, effects: &mut Vec<Effect<T>>) -> Vec<usize> {
    if let Some(matches) = list.cached(query) {
        return matches.to_vec();
    }
    let matches = list.filter_indices(query);
    effects.push(Effect::Refiltered {
        query: query.to_string(),
        matches: matches.clone(),
    });
    matches
}

fn has_scroll<T>(effects: &[Effect<T>]) -> bool {
    effects
        .iter()
        .any(|e| matches!(e, Effect::ScrollActiveIntoView))
}

/// Keys handled on the input itself.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Opens a closed panel.
    pub open: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            open: Binding::new().keys(&["up", "down"]).help("↑/↓", "open"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    target_width: usize,
    input_row: usize,
    panel_top: usize,
    panel_left: usize,
    panel_width: usize,
    panel_height: usize,
    content_width: usize,
    chrome: usize,
    row_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Target,
    Item(usize),
    Panel,
    Outside,
}

/// The typeahead widget.
pub struct Suggest<T, R = DefaultItemRenderer> {
    id: u64,
    state: SuggestState<T>,
    config: SuggestConfig,
    list: QueryList<T>,
    input: TextInput,
    popover: Popover,
    item_renderer: R,
    input_value_renderer: Box<dyn Fn(&T) -> String + Send + Sync>,
    on_item_select: Option<Box<dyn FnMut(&T, &SelectSource) + Send>>,
    on_change: Option<Box<dyn FnMut(&str) + Send>>,
    /// Keys handled on the input while the panel is closed.
    pub key_map: KeyMap,
    origin: (u16, u16),
    focused: bool,
}

impl<T, R> Suggest<T, R>
where
    T: Clone + Send + 'static,
    R: ItemRenderer<T>,
{
    /// A closed, unfocused widget over `items` with every item passing.
    pub fn new(
        items: Vec<T>,
        item_renderer: R,
        input_value_renderer: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        let config = SuggestConfig::default();
        let mut list = QueryList::new(items, Filter::All);
        list.set_max_visible(config.max_visible);
        let mut suggest = Self {
            id: next_id(),
            state: SuggestState::default(),
            config,
            list,
            input: TextInput::new(),
            popover: Popover::new(PopoverProps::default()),
            item_renderer,
            input_value_renderer: Box::new(input_value_renderer),
            on_item_select: None,
            on_change: None,
            key_map: KeyMap::default(),
            origin: (0, 0),
            focused: false,
        };
        suggest.apply_input_props(InputProps::default());
        suggest.apply_config();
        suggest
    }

    /// Sets the filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter<T>) -> Self {
        self.list.set_filter(filter);
        self.sync();
        self
    }

    /// Replaces all behavior switches.
    #[must_use]
    pub fn with_config(mut self, config: SuggestConfig) -> Self {
        self.config = config;
        self.apply_config();
        self
    }

    #[must_use]
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.set_filterable(filterable);
        self
    }

    #[must_use]
    pub fn reset_on_select(mut self, reset: bool) -> Self {
        self.config.reset_on_select = reset;
        self
    }

    #[must_use]
    pub fn reset_on_close(mut self, reset: bool) -> Self {
        self.config.reset_on_close = reset;
        self
    }

    #[must_use]
    pub fn no_results(mut self, text: impl Into<String>) -> Self {
        self.config.no_results = Some(text.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.config.placeholder = text.into();
        self.apply_config();
        self
    }

    #[must_use]
    pub fn max_visible(mut self, rows: usize) -> Self {
        self.config.max_visible = rows;
        self.apply_config();
        self
    }

    /// Replaces the popover configuration. Callbacks in `props` are kept.
    #[must_use]
    pub fn popover_props(mut self, props: PopoverProps) -> Self {
        *self.popover.props_mut() = props;
        self
    }

    #[must_use]
    pub fn input_props(mut self, props: InputProps) -> Self {
        self.apply_input_props(props);
        self
    }

    /// Called with the item and its source on every confirmed selection,
    /// after the state (including any reset) has been updated.
    #[must_use]
    pub fn on_item_select(mut self, f: impl FnMut(&T, &SelectSource) + Send + 'static) -> Self {
        self.on_item_select = Some(Box::new(f));
        self
    }

    /// Starts with `item` selected.
    #[must_use]
    pub fn selected(mut self, item: T) -> Self {
        self.set_selected_item(Some(item));
        self
    }

    fn apply_input_props(&mut self, props: InputProps) {
        self.input.prompt = props.prompt;
        self.input.prompt_style = props.prompt_style;
        self.input.width = props.width;
        self.on_change = props.on_change;
    }

    fn apply_config(&mut self) {
        self.input.placeholder.clone_from(&self.config.placeholder);
        self.list.set_max_visible(self.config.max_visible);
        self.sync();
    }

    /// Instance id, matched by [`ItemSelectedMsg::id`].
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> &SuggestState<T> {
        &self.state
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.state.selected_item.as_ref()
    }

    pub fn active_item(&self) -> Option<usize> {
        self.state.active_item
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn is_typing(&self) -> bool {
        self.state.is_typing
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// The text currently in the input.
    pub fn input_value(&self) -> String {
        self.input.value()
    }

    pub fn list(&self) -> &QueryList<T> {
        &self.list
    }

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    /// The text input, for styling.
    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// Replaces the candidate items.
    ///
    /// The active item is a source index, so it is dropped and the first
    /// match becomes active.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.list.set_items(items);
        self.state.active_item = None;
        self.sync();
    }

    /// Replaces the committed selection without running callbacks.
    pub fn set_selected_item(&mut self, item: Option<T>) {
        self.state.selected_item = item;
        self.state.is_typing = false;
        self.sync();
    }

    pub fn set_filterable(&mut self, filterable: bool) {
        self.config.filterable = filterable;
        if !filterable {
            self.state.query.clear();
            self.state.is_typing = false;
        }
        self.sync();
    }

    pub fn set_reset_on_select(&mut self, reset: bool) {
        self.config.reset_on_select = reset;
    }

    pub fn set_reset_on_close(&mut self, reset: bool) {
        self.config.reset_on_close = reset;
    }

    /// Adds or removes the borderless panel class.
    pub fn set_minimal(&mut self, minimal: bool) {
        let classes = &mut self.popover.props_mut().popover_class_names;
        if minimal {
            classes.push(MINIMAL);
        } else {
            classes.remove(MINIMAL);
        }
    }

    pub fn set_position(&mut self, position: Position) {
        self.popover.props_mut().position = position;
    }

    /// Screen cell of the widget's top-left corner, used to map mouse
    /// events. Defaults to `(0, 0)`.
    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
    }

    /// Focuses the input and opens the panel.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        self.input.focus();
        if self.state.is_open {
            return None;
        }
        self.dispatch(SuggestEvent::Interaction(true))
    }

    /// Unfocuses the input, closes the panel and shows the selection again.
    pub fn blur(&mut self) -> Option<Cmd> {
        self.focused = false;
        self.input.blur();
        self.dispatch(SuggestEvent::Blur)
    }

    /// Selects the item at source `index` as if the user had chosen it.
    pub fn select_item(&mut self, index: usize) -> Option<Cmd> {
        self.dispatch(SuggestEvent::ItemSelected {
            index,
            source: SelectSource::Programmatic,
        })
    }

    /// Runs `event` through the reducer and performs the resulting effects.
    pub fn dispatch(&mut self, event: SuggestEvent) -> Option<Cmd> {
        tracing::debug!(id = self.id, ?event, "suggest event");
        let was_open = self.state.is_open;
        let (next, effects) = self.state.apply(event, &self.config, &self.list);
        self.state = next;
        let effects: Vec<Effect<T>> = effects
            .into_iter()
            .filter(|effect| match effect {
                Effect::Refiltered { query, matches } => {
                    self.list.adopt(query, matches.clone());
                    false
                }
                _ => true,
            })
            .collect();
        self.sync();

        let mut cmds: Vec<Option<Cmd>> = effects.into_iter().map(|e| self.run_effect(e)).collect();
        if was_open != self.state.is_open {
            cmds.push(self.transition_popover());
        }
        batch(cmds)
    }

    /// Brings the list and the input in line with the state.
    fn sync(&mut self) {
        let query = if self.config.filterable {
            self.state.query.as_str()
        } else {
            ""
        };
        self.state.active_item = self.list.recompute(query, self.state.active_item);

        let shown = self.state.display_value(&*self.input_value_renderer);
        if self.input.value() != shown {
            self.input.set_value(&shown);
        }
    }

    fn run_effect(&mut self, effect: Effect<T>) -> Option<Cmd> {
        match effect {
            Effect::ScrollActiveIntoView => {
                self.list.scroll_active_into_view(self.state.active_item);
                None
            }
            Effect::Interaction(open) => {
                self.popover.notify_interaction(open);
                None
            }
            Effect::Lifecycle(step) => {
                self.popover.notify(step);
                None
            }
            Effect::Refiltered { query, matches } => {
                self.list.adopt(&query, matches);
                None
            }
            Effect::QueryEdited(text) => {
                match self.on_change.as_mut() {
                    Some(f) => f(&text),
                    None => tracing::trace!(id = self.id, "no on_change handler"),
                }
                None
            }
            Effect::Selected { item, source } => {
                match self.on_item_select.as_mut() {
                    Some(f) => f(&item, &source),
                    None => tracing::trace!(id = self.id, "no on_item_select handler"),
                }
                Some(Cmd::message(ItemSelectedMsg {
                    id: self.id,
                    item,
                    source,
                }))
            }
        }
    }

    fn transition_popover(&mut self) -> Option<Cmd> {
        match self.popover.set_open(self.state.is_open)? {
            Lifecycle::WillOpen => {
                let will_open = self.dispatch(SuggestEvent::PopoverWillOpen);
                sequence(vec![will_open, Some(self.popover.did_open_cmd())])
            }
            Lifecycle::WillClose => self.dispatch(SuggestEvent::PopoverWillClose),
            Lifecycle::DidOpen => None,
        }
    }

    /// Handles keys, mouse events and the popover's follow-up messages.
    pub fn update(&mut self, msg: Message) -> Option<Cmd> {
        if self.popover.is_did_open(&msg) {
            return self.dispatch(SuggestEvent::PopoverDidOpen);
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }
        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            return self.handle_mouse(mouse);
        }
        None
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }

        if self.state.is_open {
            if let Some(open) = self.popover.interaction_for_key(key) {
                return self.dispatch(SuggestEvent::Interaction(open));
            }
            match self.list.handle_key(key, self.state.active_item) {
                ListAction::Select(index) => {
                    return self.dispatch(SuggestEvent::ItemSelected {
                        index,
                        source: SelectSource::Keyboard(key.clone()),
                    });
                }
                ListAction::Moved(active) => {
                    return self.dispatch(SuggestEvent::ActiveItemChanged(active));
                }
                ListAction::Ignored => {}
            }
        } else if self.key_map.open.matches_key(key) {
            let direction = if key.to_string() == "up" {
                Direction::Up
            } else {
                Direction::Down
            };
            return self.dispatch(SuggestEvent::TargetKey(direction));
        }

        self.edit(key)
    }

    fn edit(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if !self.config.filterable {
            return None;
        }
        // Typing over a committed selection replaces its text.
        let mut changed = false;
        if !self.state.is_typing && self.input.is_edit_key(key) {
            changed = !self.input.value().is_empty();
            self.input.reset();
        }
        changed |= self.input.handle_key(key);
        if !changed {
            return None;
        }
        self.dispatch(SuggestEvent::QueryChanged(self.input.value()))
    }

    fn handle_mouse(&mut self, mouse: &MouseMsg) -> Option<Cmd> {
        if mouse.is_wheel() {
            if !self.state.is_open {
                return None;
            }
            let direction = if mouse.button == MouseButton::WheelUp {
                Direction::Up
            } else {
                Direction::Down
            };
            let active = self.list.next_active(self.state.active_item, direction);
            return self.dispatch(SuggestEvent::ActiveItemChanged(active));
        }
        if !mouse.is_left_click() {
            return None;
        }

        match self.hit_test(mouse.x, mouse.y) {
            Hit::Target => {
                self.focused = true;
                self.input.focus();
                if self.state.is_open {
                    None
                } else {
                    self.dispatch(SuggestEvent::Interaction(true))
                }
            }
            Hit::Item(index) => self.dispatch(SuggestEvent::ItemSelected {
                index,
                source: SelectSource::Mouse(*mouse),
            }),
            Hit::Panel => None,
            Hit::Outside if self.state.is_open => {
                self.dispatch(SuggestEvent::Interaction(false))
            }
            Hit::Outside => None,
        }
    }

    fn target_width(&self) -> usize {
        visible_width(&self.input.prompt) + self.input.width + 1
    }

    fn layout(&self) -> Layout {
        let target_width = self.target_width();
        let position = self.popover.props().position;
        let panel_width = self.popover.panel_width(target_width);
        let chrome = self.popover.top_chrome();
        let row_count = if self.list.is_empty() {
            usize::from(self.config.no_results.is_some())
        } else {
            self.list.visible_len()
        };
        let panel_height = if self.state.is_open {
            row_count + 2 * chrome
        } else {
            0
        };
        let (input_row, panel_top) = if position.is_top() {
            (panel_height, 0)
        } else {
            (0, 1)
        };
        let panel_left = if position.is_right() {
            target_width.saturating_sub(panel_width)
        } else {
            0
        };
        Layout {
            target_width,
            input_row,
            panel_top,
            panel_left,
            panel_width,
            panel_height,
            content_width: panel_width.saturating_sub(2 * chrome),
            chrome,
            row_count,
        }
    }

    fn hit_test(&self, x: u16, y: u16) -> Hit {
        let (Some(col), Some(row)) = (x.checked_sub(self.origin.0), y.checked_sub(self.origin.1))
        else {
            return Hit::Outside;
        };
        let (col, row) = (usize::from(col), usize::from(row));
        let layout = self.layout();

        if row == layout.input_row && col < layout.target_width {
            return Hit::Target;
        }
        let in_rows = (layout.panel_top..layout.panel_top + layout.panel_height).contains(&row);
        let in_cols = (layout.panel_left..layout.panel_left + layout.panel_width).contains(&col);
        if !(in_rows && in_cols) {
            return Hit::Outside;
        }
        let content_row = (row - layout.panel_top)
            .checked_sub(layout.chrome)
            .filter(|r| *r < layout.row_count);
        content_row
            .and_then(|r| self.list.item_at_row(r))
            .map_or(Hit::Panel, Hit::Item)
    }

    /// Renders the input line and, when open, the panel.
    pub fn view(&self) -> String {
        let input_line = self.input.view();
        if !self.state.is_open {
            return input_line;
        }

        let layout = self.layout();
        let rows = self.list.view(
            self.state.active_item,
            &self.item_renderer,
            self.config.no_results.as_deref(),
            layout.content_width,
        );
        let indent = " ".repeat(layout.panel_left);
        let panel = self
            .popover
            .render(&rows, layout.panel_width)
            .into_iter()
            .map(|line| format!("{indent}{line}"));

        let lines: Vec<String> = if self.popover.props().position.is_top() {
            panel.chain(std::iter::once(input_line)).collect()
        } else {
            std::iter::once(input_line).chain(panel).collect()
        };
        lines.join("\n")
    }
}

impl<T, R> Model for Suggest<T, R>
where
    T: Clone + Send + 'static,
    R: ItemRenderer<T>,
{
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        Suggest::update(self, msg)
    }

    fn view(&self) -> String {
        Suggest::view(self)
    }
}

impl<T: fmt::Debug, R> fmt::Debug for Suggest<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suggest")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("list", &self.list)
            .field("popover", &self.popover)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}
