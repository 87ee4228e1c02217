//! Message types.
//!
//! Everything that reaches a model (keys, mouse, resize, component events,
//! results of commands) arrives as a [`Message`].

use std::any::Any;
use std::fmt;

/// A type-erased message container.
///
/// Any `Send + 'static` value can be wrapped with [`Message::new`] and
/// recovered with [`Message::downcast`] or [`Message::downcast_ref`].
///
/// # Example
///
/// ```rust
/// use typeahead_tea::Message;
///
/// struct Picked(usize);
///
/// let msg = Message::new(Picked(3));
/// assert!(msg.is::<Picked>());
/// assert_eq!(msg.downcast::<Picked>().map(|p| p.0), Some(3));
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Wraps a value as a message.
    pub fn new<M: Any + Send + 'static>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Takes the payload out if it has type `M`.
    pub fn downcast<M: Any + Send + 'static>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Borrows the payload if it has type `M`.
    pub fn downcast_ref<M: Any + Send + 'static>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Whether the payload has type `M`.
    pub fn is<M: Any + Send + 'static>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

/// Ends the program loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitMsg;

/// Ctrl+C was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMsg;

/// Terminal size, sent at startup and on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeMsg {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

/// The terminal window gained focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMsg;

/// The terminal window lost focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurMsg;

/// Commands to run concurrently; unpacked by the program loop.
pub(crate) struct BatchMsg(pub Vec<super::Cmd>);

/// Commands to run one after another; unpacked by the program loop.
pub(crate) struct SequenceMsg(pub Vec<super::Cmd>);
