//! Floating panel with an open/close lifecycle.
//!
//! [`Popover`] is controlled: its owner decides when it is open and calls
//! [`Popover::set_open`], which reports the lifecycle step the panel went
//! through. Opening is two-phase. `WillOpen` happens synchronously and
//! `DidOpen` arrives later as a [`DidOpenMsg`] produced by
//! [`Popover::did_open_cmd`], once the panel has been drawn.

use std::fmt;
use std::str::FromStr;

use typeahead_tea::{Cmd, KeyMsg, KeyType, Message};

use crate::next_id;
use crate::style::{Border, Style, pad_right, truncate, visible_width};

/// Class the library always adds to the panel.
pub const SUGGEST_POPOVER: &str = "typeahead-suggest-popover";

/// Class that draws the panel without a border.
pub const MINIMAL: &str = "typeahead-minimal";

/// Errors in host-provided configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "unknown popover position {0:?} (expected bottom-left, bottom-right, top-left or top-right)"
    )]
    UnknownPosition(String),
}

/// Where the panel sits relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// Below the target, left edges aligned.
    #[default]
    BottomLeft,
    /// Below the target, right edges aligned.
    BottomRight,
    /// Above the target, left edges aligned.
    TopLeft,
    /// Above the target, right edges aligned.
    TopRight,
}

impl Position {
    /// Whether the panel is drawn above the target.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Whether right edges are aligned.
    pub fn is_right(self) -> bool {
        matches!(self, Self::BottomRight | Self::TopRight)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bottom-left" | "bottom" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            "top-left" | "top" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            _ => Err(ConfigError::UnknownPosition(s.to_string())),
        }
    }
}

/// An ordered set of class names.
///
/// ```rust
/// use typeahead::popover::ClassList;
///
/// let classes = ClassList::from("films  dark").with("films");
/// assert_eq!(classes.to_string(), "films dark");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `class` unless it is already present.
    #[must_use]
    pub fn with(mut self, class: impl Into<String>) -> Self {
        self.push(class);
        self
    }

    /// Adds `class` unless it is already present.
    pub fn push(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.contains(&class) {
            self.0.push(class);
        }
    }

    /// Removes `class` if present.
    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ClassList {
    fn from(s: &str) -> Self {
        s.split_whitespace()
            .fold(Self::new(), |list, class| list.with(class))
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

type Hook = Box<dyn FnMut() + Send>;

/// Host configuration for the panel.
pub struct PopoverProps {
    pub position: Position,
    /// Classes for the panel itself. [`SUGGEST_POPOVER`] is added on top.
    pub popover_class_names: ClassList,
    pub border: Border,
    pub border_style: Style,
    /// Panel width in columns. Defaults to the target's width.
    pub width: Option<usize>,
    pub on_interaction: Option<Box<dyn FnMut(bool) + Send>>,
    pub on_will_open: Option<Hook>,
    pub on_did_open: Option<Hook>,
    pub on_will_close: Option<Hook>,
}

impl Default for PopoverProps {
    fn default() -> Self {
        Self {
            position: Position::default(),
            popover_class_names: ClassList::new(),
            border: Border::rounded(),
            border_style: Style::new().foreground("240"),
            width: None,
            on_interaction: None,
            on_will_open: None,
            on_did_open: None,
            on_will_close: None,
        }
    }
}

impl PopoverProps {
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn popover_class_name(mut self, class: impl Into<String>) -> Self {
        self.popover_class_names.push(class);
        self
    }

    /// Draws the panel without a border.
    #[must_use]
    pub fn minimal(self) -> Self {
        self.popover_class_name(MINIMAL)
    }

    #[must_use]
    pub fn border(mut self, border: Border, style: Style) -> Self {
        self.border = border;
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Called whenever the panel wants to open (`true`) or close (`false`).
    #[must_use]
    pub fn on_interaction(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.on_interaction = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_will_open(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_will_open = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_did_open(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_did_open = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_will_close(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_will_close = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for PopoverProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopoverProps")
            .field("position", &self.position)
            .field("popover_class_names", &self.popover_class_names)
            .field("width", &self.width)
            .field("on_interaction", &self.on_interaction.is_some())
            .field("on_will_open", &self.on_will_open.is_some())
            .field("on_did_open", &self.on_did_open.is_some())
            .field("on_will_close", &self.on_will_close.is_some())
            .finish_non_exhaustive()
    }
}

/// A lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    WillOpen,
    DidOpen,
    WillClose,
}

/// Delivered after a panel has opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DidOpenMsg {
    /// The popover that opened.
    pub id: u64,
}

/// A controlled floating panel.
#[derive(Debug)]
pub struct Popover {
    id: u64,
    is_open: bool,
    props: PopoverProps,
}

impl Popover {
    /// A closed popover.
    pub fn new(props: PopoverProps) -> Self {
        Self {
            id: next_id(),
            is_open: false,
            props,
        }
    }

    /// Instance id, used to route [`DidOpenMsg`].
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn props(&self) -> &PopoverProps {
        &self.props
    }

    pub fn props_mut(&mut self) -> &mut PopoverProps {
        &mut self.props
    }

    /// Host classes followed by [`SUGGEST_POPOVER`].
    pub fn popover_classes(&self) -> ClassList {
        self.props.popover_class_names.clone().with(SUGGEST_POPOVER)
    }

    /// Whether the panel is drawn without a border.
    pub fn is_minimal(&self) -> bool {
        self.props.popover_class_names.contains(MINIMAL)
    }

    /// Opens or closes the panel. Returns the lifecycle step taken, or
    /// `None` if the panel was already in that state.
    pub fn set_open(&mut self, open: bool) -> Option<Lifecycle> {
        if self.is_open == open {
            return None;
        }
        self.is_open = open;
        tracing::debug!(id = self.id, open, "popover transition");
        Some(if open {
            Lifecycle::WillOpen
        } else {
            Lifecycle::WillClose
        })
    }

    /// The follow-up command that finishes an open transition.
    pub fn did_open_cmd(&self) -> Cmd {
        Cmd::message(DidOpenMsg { id: self.id })
    }

    /// Whether `msg` finishes this popover's open transition.
    pub fn is_did_open(&self, msg: &Message) -> bool {
        self.is_open && msg.downcast_ref::<DidOpenMsg>().is_some_and(|m| m.id == self.id)
    }

    /// The interaction a key asks for: Esc closes an open panel.
    pub fn interaction_for_key(&self, key: &KeyMsg) -> Option<bool> {
        (self.is_open && key.key_type == KeyType::Esc).then_some(false)
    }

    /// Forwards an interaction to the host.
    pub fn notify_interaction(&mut self, open: bool) {
        match self.props.on_interaction.as_mut() {
            Some(f) => f(open),
            None => tracing::trace!(id = self.id, open, "no on_interaction handler"),
        }
    }

    /// Runs the host hook for a lifecycle step.
    pub fn notify(&mut self, step: Lifecycle) {
        let hook = match step {
            Lifecycle::WillOpen => self.props.on_will_open.as_mut(),
            Lifecycle::DidOpen => self.props.on_did_open.as_mut(),
            Lifecycle::WillClose => self.props.on_will_close.as_mut(),
        };
        match hook {
            Some(f) => f(),
            None => tracing::trace!(id = self.id, ?step, "no lifecycle handler"),
        }
    }

    /// Panel width for a target `target_width` columns wide.
    pub fn panel_width(&self, target_width: usize) -> usize {
        self.props.width.unwrap_or(target_width).max(3)
    }

    /// Rows drawn above the first content row.
    pub fn top_chrome(&self) -> usize {
        usize::from(!self.is_minimal())
    }

    /// Frames `rows` as a panel `width` columns wide.
    pub fn render(&self, rows: &[String], width: usize) -> Vec<String> {
        if self.is_minimal() {
            return rows
                .iter()
                .map(|row| {
                    if visible_width(row) > width && !row.contains('\x1b') {
                        truncate(row, width)
                    } else {
                        pad_right(row, width)
                    }
                })
                .collect();
        }
        self.props
            .border
            .wrap(rows, width.saturating_sub(2), &self.props.border_style)
    }
}
