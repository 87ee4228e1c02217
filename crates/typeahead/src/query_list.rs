//! Filtered list with an active item.
//!
//! [`QueryList`] owns the candidate items and a [`Filter`]. It does not own
//! the active item: callers pass it in and get the reconciled or moved
//! value back, so the owner (usually [`Suggest`](crate::suggest::Suggest))
//! keeps a single source of truth. The active item is identified by its
//! index in the source list.

use std::fmt::Display;
use std::marker::PhantomData;

use typeahead_tea::KeyMsg;

use crate::filter::Filter;
use crate::key::{Binding, matches};
use crate::style::{Style, truncate};

/// Everything an item renderer gets to draw one row.
#[derive(Debug)]
pub struct ItemRendererProps<'a, T> {
    pub item: &'a T,
    /// Index in the source list.
    pub index: usize,
    pub is_active: bool,
    /// The query the list was filtered with.
    pub query: &'a str,
    /// Columns available for the row.
    pub width: usize,
}

/// Draws list rows.
pub trait ItemRenderer<T>: Send + 'static {
    /// Renders one row. The result should fit in `props.width` columns.
    fn render(&self, props: &ItemRendererProps<'_, T>) -> String;
}

/// An [`ItemRenderer`] backed by a closure. See [`item_renderer`].
pub struct FnRenderer<T, F> {
    render: F,
    _item: PhantomData<fn(&T)>,
}

impl<T, F> ItemRenderer<T> for FnRenderer<T, F>
where
    T: 'static,
    F: Fn(&ItemRendererProps<'_, T>) -> String + Send + 'static,
{
    fn render(&self, props: &ItemRendererProps<'_, T>) -> String {
        (self.render)(props)
    }
}

/// Wraps a closure as an [`ItemRenderer`].
///
/// ```rust
/// use typeahead::query_list::{ItemRenderer, ItemRendererProps, item_renderer};
///
/// let renderer = item_renderer(|props: &ItemRendererProps<'_, u32>| {
///     format!("{}{}", if props.is_active { "*" } else { " " }, props.item)
/// });
/// let props = ItemRendererProps { item: &7, index: 0, is_active: true, query: "", width: 10 };
/// assert_eq!(renderer.render(&props), "*7");
/// ```
pub fn item_renderer<T, F>(render: F) -> FnRenderer<T, F>
where
    F: Fn(&ItemRendererProps<'_, T>) -> String + Send + 'static,
{
    FnRenderer {
        render,
        _item: PhantomData,
    }
}

/// Renders any [`Display`] item as a marker plus its text.
#[derive(Debug, Clone)]
pub struct DefaultItemRenderer {
    pub active_marker: String,
    pub normal_style: Style,
    pub active_style: Style,
}

impl DefaultItemRenderer {
    /// `"> "` marks the active row, drawn in pink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_marker: "> ".to_string(),
            normal_style: Style::new(),
            active_style: Style::new().foreground("212").bold(),
        }
    }

    /// Uncolored rows, handy for tests and monochrome terminals.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            active_style: Style::new(),
            ..Self::new()
        }
    }
}

impl Default for DefaultItemRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Display + 'static> ItemRenderer<T> for DefaultItemRenderer {
    fn render(&self, props: &ItemRendererProps<'_, T>) -> String {
        let marker_width = self.active_marker.chars().count();
        let text = truncate(
            &props.item.to_string(),
            props.width.saturating_sub(marker_width),
        );
        if props.is_active {
            self.active_style
                .render(&format!("{}{text}", self.active_marker))
        } else {
            self.normal_style
                .render(&format!("{}{text}", " ".repeat(marker_width)))
        }
    }
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What a key press means to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Not a list key.
    Ignored,
    /// The active item moved (or stayed `None` on an empty list).
    Moved(Option<usize>),
    /// The active item was chosen.
    Select(usize),
}

/// List navigation keys.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub next: Binding,
    pub prev: Binding,
    pub select: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next: Binding::new().keys(&["down", "ctrl+n"]).help("↓", "next"),
            prev: Binding::new().keys(&["up", "ctrl+p"]).help("↑", "previous"),
            select: Binding::new().keys(&["enter"]).help("enter", "select"),
        }
    }
}

/// Keeps `active` if it passed the filter, otherwise falls back to the first
/// match (or `None` when nothing matched).
#[must_use]
pub fn reconcile(filtered: &[usize], active: Option<usize>) -> Option<usize> {
    match active {
        Some(a) if filtered.contains(&a) => Some(a),
        _ => filtered.first().copied(),
    }
}

/// Rows shown at once unless configured otherwise.
pub const DEFAULT_MAX_VISIBLE: usize = 10;

/// Candidate items, the current filtered sequence and its scroll window.
pub struct QueryList<T> {
    items: Vec<T>,
    filter: Filter<T>,
    filtered: Vec<usize>,
    query: String,
    /// `filtered` no longer matches `query` (items or filter replaced).
    stale: bool,
    offset: usize,
    max_visible: usize,
    pub key_map: KeyMap,
}

impl<T> QueryList<T> {
    /// A list showing every item. Call [`QueryList::recompute`] after
    /// changing the filter.
    pub fn new(items: Vec<T>, filter: Filter<T>) -> Self {
        let filtered = filter.apply("", &items);
        Self {
            items,
            filter,
            filtered,
            query: String::new(),
            stale: false,
            offset: 0,
            max_visible: DEFAULT_MAX_VISIBLE,
            key_map: KeyMap::default(),
        }
    }

    /// All items, in source order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the items and refilters with the last query.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    /// Replaces the filter and refilters with the last query.
    pub fn set_filter(&mut self, filter: Filter<T>) {
        self.filter = filter;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.stale = true;
        let query = self.query.clone();
        self.recompute(&query, None);
    }

    /// Rows shown at once.
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Sets the number of rows shown at once (at least one).
    pub fn set_max_visible(&mut self, rows: usize) {
        self.max_visible = rows.max(1);
        self.clamp_offset();
    }

    /// Source indices of the items that passed the last recompute.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// The query of the last recompute.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether nothing passed the filter.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Source indices that pass for `query`, without touching list state.
    pub fn filter_indices(&self, query: &str) -> Vec<usize> {
        self.filter.apply(query, &self.items)
    }

    /// The current filtered sequence if it was computed for `query` and the
    /// items and filter have not changed since.
    pub fn cached(&self, query: &str) -> Option<&[usize]> {
        (!self.stale && self.query == query).then_some(self.filtered.as_slice())
    }

    /// Takes a sequence already filtered for `query` by
    /// [`QueryList::filter_indices`].
    pub fn adopt(&mut self, query: &str, filtered: Vec<usize>) {
        self.filtered = filtered;
        query.clone_into(&mut self.query);
        self.stale = false;
        self.clamp_offset();
    }

    /// Refilters for `query` and returns `active` reconciled against the
    /// new sequence. The predicate only runs when the query, the items or
    /// the filter changed since the last call.
    pub fn recompute(&mut self, query: &str, active: Option<usize>) -> Option<usize> {
        if self.cached(query).is_none() {
            let filtered = self.filter.apply(query, &self.items);
            self.adopt(query, filtered);
        }
        let active = reconcile(&self.filtered, active);
        tracing::trace!(query, matches = self.filtered.len(), ?active, "list recomputed");
        active
    }

    /// The neighbour of `active` in the filtered sequence, wrapping at both
    /// ends. An `active` outside the sequence moves to the first (Down) or
    /// last (Up) element. `None` when the sequence is empty.
    pub fn next_active(&self, active: Option<usize>, direction: Direction) -> Option<usize> {
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }
        let position = active.and_then(|a| self.filtered.iter().position(|&i| i == a));
        let next = match (position, direction) {
            (None, Direction::Down) => 0,
            (None, Direction::Up) => len - 1,
            (Some(p), Direction::Down) => (p + 1) % len,
            (Some(p), Direction::Up) => (p + len - 1) % len,
        };
        Some(self.filtered[next])
    }

    /// Maps a navigation key to a [`ListAction`].
    pub fn handle_key(&self, key: &KeyMsg, active: Option<usize>) -> ListAction {
        let key_str = key.to_string();
        if matches(&key_str, &[&self.key_map.next]) {
            ListAction::Moved(self.next_active(active, Direction::Down))
        } else if matches(&key_str, &[&self.key_map.prev]) {
            ListAction::Moved(self.next_active(active, Direction::Up))
        } else if matches(&key_str, &[&self.key_map.select]) {
            match active {
                Some(a) if self.filtered.contains(&a) => ListAction::Select(a),
                _ => ListAction::Moved(active),
            }
        } else {
            ListAction::Ignored
        }
    }

    /// Source index of the item drawn on visible `row`, if any.
    pub fn item_at_row(&self, row: usize) -> Option<usize> {
        if row >= self.max_visible {
            return None;
        }
        self.filtered.get(self.offset + row).copied()
    }

    /// First filtered position shown.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of rows currently drawn (at least one while `no_results` is
    /// shown).
    pub fn visible_len(&self) -> usize {
        self.filtered.len().saturating_sub(self.offset).min(self.max_visible)
    }

    /// Scrolls so `active` is inside the visible window. Returns whether the
    /// window moved.
    pub fn scroll_active_into_view(&mut self, active: Option<usize>) -> bool {
        let before = self.offset;
        if let Some(p) = active.and_then(|a| self.filtered.iter().position(|&i| i == a)) {
            if p < self.offset {
                self.offset = p;
            } else if p >= self.offset + self.max_visible {
                self.offset = p + 1 - self.max_visible;
            }
        }
        self.clamp_offset();
        self.offset != before
    }

    fn clamp_offset(&mut self) {
        let max_offset = self.filtered.len().saturating_sub(self.max_visible);
        self.offset = self.offset.min(max_offset);
    }

    /// Rendered rows of the visible window. When nothing matched, the
    /// `no_results` row (if any) is the only row.
    pub fn view<R>(
        &self,
        active: Option<usize>,
        renderer: &R,
        no_results: Option<&str>,
        width: usize,
    ) -> Vec<String>
    where
        R: ItemRenderer<T> + ?Sized,
    {
        if self.filtered.is_empty() {
            return no_results
                .map(|text| vec![truncate(text, width)])
                .unwrap_or_default();
        }
        self.filtered
            .iter()
            .skip(self.offset)
            .take(self.max_visible)
            .filter_map(|&index| {
                let item = self.items.get(index)?;
                Some(renderer.render(&ItemRendererProps {
                    item,
                    index,
                    is_active: active == Some(index),
                    query: &self.query,
                    width,
                }))
            })
            .collect()
    }
}

impl<T> std::fmt::Debug for QueryList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryList")
            .field("items", &self.items.len())
            .field("filter", &self.filter)
            .field("filtered", &self.filtered)
            .field("query", &self.query)
            .field("stale", &self.stale)
            .field("offset", &self.offset)
            .field("max_visible", &self.max_visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::filter::{contains_ignore_case, prefix_ignore_case};
    use typeahead_tea::KeyType;

    fn fruit() -> QueryList<&'static str> {
        QueryList::new(
            vec!["Apple", "Banana", "Cherry", "Date", "Elderberry"],
            contains_ignore_case(|s: &&str| (*s).to_string()),
        )
    }

    #[test]
    fn test_recompute_keeps_member_active() {
        let mut list = fruit();
        assert_eq!(list.recompute("e", Some(2)), Some(2));
        assert_eq!(list.filtered(), &[0, 2, 3, 4]);
    }

    #[test]
    fn test_recompute_resets_non_member_active() {
        let mut list = fruit();
        assert_eq!(list.recompute("an", Some(0)), Some(1));
        assert_eq!(list.recompute("zzz", Some(1)), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut list = fruit();
        let first = list.recompute("r", Some(4));
        let filtered = list.filtered().to_vec();
        assert_eq!(list.recompute("r", first), first);
        assert_eq!(list.filtered(), filtered.as_slice());
    }

    #[test]
    fn test_next_active_wraps() {
        let mut list = fruit();
        list.recompute("e", None);
        assert_eq!(list.next_active(Some(4), Direction::Down), Some(0));
        assert_eq!(list.next_active(Some(0), Direction::Up), Some(4));
        assert_eq!(list.next_active(Some(0), Direction::Down), Some(2));
    }

    #[test]
    fn test_next_active_from_outside() {
        let mut list = fruit();
        list.recompute("e", None);
        assert_eq!(list.next_active(Some(1), Direction::Down), Some(0));
        assert_eq!(list.next_active(None, Direction::Up), Some(4));
    }

    #[test]
    fn test_next_active_empty_is_noop() {
        let mut list = fruit();
        list.recompute("xyz", None);
        assert_eq!(list.next_active(None, Direction::Down), None);
        assert_eq!(list.next_active(Some(3), Direction::Up), None);
    }

    #[test]
    fn test_handle_key() {
        let list = fruit();
        let down = KeyMsg::from_type(KeyType::Down);
        let enter = KeyMsg::from_type(KeyType::Enter);
        assert_eq!(list.handle_key(&down, Some(0)), ListAction::Moved(Some(1)));
        assert_eq!(
            list.handle_key(&KeyMsg::from_type(KeyType::CtrlP), Some(0)),
            ListAction::Moved(Some(4))
        );
        assert_eq!(list.handle_key(&enter, Some(3)), ListAction::Select(3));
        assert_eq!(list.handle_key(&enter, None), ListAction::Moved(None));
        assert_eq!(
            list.handle_key(&KeyMsg::from_char('a'), Some(0)),
            ListAction::Ignored
        );
    }

    #[test]
    fn test_scroll_window_follows_active() {
        let mut list = fruit();
        list.set_max_visible(2);
        assert!(!list.scroll_active_into_view(Some(1)));
        assert!(list.scroll_active_into_view(Some(3)));
        assert_eq!(list.offset(), 2);
        assert_eq!(list.item_at_row(0), Some(2));
        assert_eq!(list.item_at_row(1), Some(3));
        assert_eq!(list.item_at_row(2), None);
        assert!(list.scroll_active_into_view(Some(0)));
        assert_eq!(list.offset(), 0);
    }

    #[test]
    fn test_narrowing_clamps_window() {
        let mut list = fruit();
        list.set_max_visible(2);
        list.scroll_active_into_view(Some(4));
        assert_eq!(list.offset(), 3);
        list.recompute("an", None);
        assert_eq!(list.offset(), 0);
        assert_eq!(list.visible_len(), 1);
    }

    #[test]
    fn test_view_rows() {
        let mut list = fruit();
        list.recompute("an", Some(1));
        let rows = list.view(Some(1), &DefaultItemRenderer::plain(), None, 20);
        assert_eq!(rows, vec!["> Banana"]);
    }

    #[test]
    fn test_view_no_results() {
        let mut list = fruit();
        list.recompute("qq", None);
        let renderer = DefaultItemRenderer::plain();
        assert_eq!(
            list.view(None, &renderer, Some("No results."), 20),
            vec!["No results."]
        );
        assert!(list.view(None, &renderer, None, 20).is_empty());
    }

    #[test]
    fn test_view_passes_props() {
        let mut list = fruit();
        list.recompute("rr", None);
        let renderer = item_renderer(|p: &ItemRendererProps<'_, &str>| {
            format!("{}:{}:{}:{}", p.index, p.item, p.is_active, p.query)
        });
        let rows = list.view(Some(4), &renderer, None, 30);
        assert_eq!(rows, vec!["2:Cherry:false:rr", "4:Elderberry:true:rr"]);
    }

    #[test]
    fn test_set_items_refilters() {
        let mut list = fruit();
        list.recompute("an", None);
        list.set_items(vec!["Mango", "Kiwi", "Banana"]);
        assert_eq!(list.filtered(), &[0, 2]);
        assert_eq!(list.query(), "an");
    }

    fn counted(calls: &Arc<AtomicUsize>) -> QueryList<&'static str> {
        let calls = Arc::clone(calls);
        QueryList::new(
            vec!["Apple", "Banana", "Cherry"],
            Filter::item(move |query: &str, item: &&str, _: usize| {
                calls.fetch_add(1, Ordering::SeqCst);
                item.to_lowercase().contains(query)
            }),
        )
    }

    #[test]
    fn test_recompute_filters_once_per_query() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut list = counted(&calls);
        calls.store(0, Ordering::SeqCst);

        list.recompute("a", None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        list.recompute("a", Some(1));
        list.recompute("a", None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        list.recompute("an", None);
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_set_filter_invalidates_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut list = counted(&calls);
        list.recompute("a", None);
        assert!(list.cached("a").is_some());

        list.set_filter(prefix_ignore_case(|s: &&str| (*s).to_string()));
        assert_eq!(list.cached("a"), Some(&[0][..]));
        assert!(list.cached("b").is_none());
    }

    #[test]
    fn test_adopt_skips_predicate() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut list = counted(&calls);
        let matches = list.filter_indices("rr");
        calls.store(0, Ordering::SeqCst);

        list.adopt("rr", matches);
        assert_eq!(list.recompute("rr", None), Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(list.query(), "rr");
    }
}
