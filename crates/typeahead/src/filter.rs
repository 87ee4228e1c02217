//! Candidate filtering.
//!
//! A [`Filter`] decides which items stay visible for a query. Most callers
//! want an item predicate, called once per item:
//!
//! ```rust
//! use typeahead::filter::Filter;
//!
//! let filter = Filter::item(|query: &str, fruit: &&str, _index| {
//!     fruit.to_lowercase().contains(&query.to_lowercase())
//! });
//! assert_eq!(filter.apply("an", &["Apple", "Banana", "Cherry"]), vec![1]);
//! ```
//!
//! A list predicate sees the whole list at once and returns the indices to
//! keep, which suits ranking or capped result sets.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Per-item predicate: `(query, item, index) -> keep`.
pub type ItemPredicate<T> = dyn Fn(&str, &T, usize) -> bool + Send + Sync;

/// Whole-list predicate: `(query, items) -> indices to keep, in order`.
pub type ItemListPredicate<T> = dyn Fn(&str, &[T]) -> Vec<usize> + Send + Sync;

/// How candidates are narrowed by the query.
pub enum Filter<T> {
    /// Every item passes.
    All,
    /// Keep items for which the predicate holds. Source order is preserved.
    Item(Arc<ItemPredicate<T>>),
    /// Keep the indices the predicate returns.
    List(Arc<ItemListPredicate<T>>),
}

impl<T> Filter<T> {
    /// Wraps a per-item predicate.
    pub fn item<F>(predicate: F) -> Self
    where
        F: Fn(&str, &T, usize) -> bool + Send + Sync + 'static,
    {
        Self::Item(Arc::new(predicate))
    }

    /// Wraps a whole-list predicate.
    pub fn list<F>(predicate: F) -> Self
    where
        F: Fn(&str, &[T]) -> Vec<usize> + Send + Sync + 'static,
    {
        Self::List(Arc::new(predicate))
    }

    /// Source indices of the items that pass for `query`.
    ///
    /// Indices returned by a list predicate that are out of range or repeated
    /// are dropped.
    pub fn apply(&self, query: &str, items: &[T]) -> Vec<usize> {
        match self {
            Self::All => (0..items.len()).collect(),
            Self::Item(predicate) => items
                .iter()
                .enumerate()
                .filter(|(index, item)| predicate(query, item, *index))
                .map(|(index, _)| index)
                .collect(),
            Self::List(predicate) => {
                let mut seen = HashSet::new();
                predicate(query, items)
                    .into_iter()
                    .filter(|&index| index < items.len() && seen.insert(index))
                    .collect()
            }
        }
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Item(p) => Self::Item(Arc::clone(p)),
            Self::List(p) => Self::List(Arc::clone(p)),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::All => "All",
            Self::Item(_) => "Item",
            Self::List(_) => "List",
        };
        write!(f, "Filter::{kind}")
    }
}

/// Keeps items whose text contains the query, ignoring case.
pub fn contains_ignore_case<T, F>(text: F) -> Filter<T>
where
    F: Fn(&T) -> String + Send + Sync + 'static,
{
    Filter::item(move |query, item, _| {
        text(item).to_lowercase().contains(&query.to_lowercase())
    })
}

/// Keeps items whose text starts with the query, ignoring case.
pub fn prefix_ignore_case<T, F>(text: F) -> Filter<T>
where
    F: Fn(&T) -> String + Send + Sync + 'static,
{
    Filter::item(move |query, item, _| {
        text(item).to_lowercase().starts_with(&query.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUIT: [&str; 4] = ["Apple", "Banana", "Cherry", "Apricot"];

    fn name(s: &&str) -> String {
        (*s).to_string()
    }

    #[test]
    fn test_all_keeps_everything() {
        let filter: Filter<&str> = Filter::default();
        assert_eq!(filter.apply("zzz", &FRUIT), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_contains_ignore_case() {
        let filter = contains_ignore_case(name);
        assert_eq!(filter.apply("AN", &FRUIT), vec![1]);
        assert_eq!(filter.apply("", &FRUIT), vec![0, 1, 2, 3]);
        assert!(filter.apply("kiwi", &FRUIT).is_empty());
    }

    #[test]
    fn test_prefix_ignore_case() {
        let filter = prefix_ignore_case(name);
        assert_eq!(filter.apply("ap", &FRUIT), vec![0, 3]);
    }

    #[test]
    fn test_item_predicate_sees_index() {
        let filter = Filter::item(|_q: &str, _item: &&str, index| index % 2 == 1);
        assert_eq!(filter.apply("", &FRUIT), vec![1, 3]);
    }

    #[test]
    fn test_list_predicate_drops_bad_indices() {
        let filter = Filter::list(|_q: &str, _items: &[&str]| vec![3, 9, 0, 3, 1]);
        assert_eq!(filter.apply("", &FRUIT), vec![3, 0, 1]);
    }

    #[test]
    fn test_clone_shares_predicate() {
        let filter = contains_ignore_case(name);
        let copy = filter.clone();
        assert_eq!(copy.apply("ch", &FRUIT), filter.apply("ch", &FRUIT));
        assert_eq!(format!("{copy:?}"), "Filter::Item");
    }
}
