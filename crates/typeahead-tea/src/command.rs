//! Commands for side effects.
//!
//! A [`Cmd`] is a deferred computation that yields at most one [`Message`].
//! Update functions stay pure by returning commands instead of doing I/O;
//! the program loop runs them off the event thread and feeds the resulting
//! messages back into `update`.

use crate::message::{BatchMsg, Message, QuitMsg, SequenceMsg};

/// A command that produces a message when executed.
///
/// # Example
///
/// ```rust
/// use typeahead_tea::{Cmd, Message};
///
/// struct Loaded(Vec<String>);
///
/// let cmd = Cmd::new(|| Message::new(Loaded(vec!["Alien".into()])));
/// let msg = cmd.execute().unwrap();
/// assert!(msg.is::<Loaded>());
/// ```
pub struct Cmd(Box<dyn FnOnce() -> Option<Message> + Send + 'static>);

impl Cmd {
    /// Creates a command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self(Box::new(move || Some(f())))
    }

    /// Creates a command that may not produce a message.
    pub fn new_optional<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Message> + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// A command that immediately yields `msg`.
    pub fn message<M: Send + 'static>(msg: M) -> Self {
        Self::new(move || Message::new(msg))
    }

    /// No command.
    pub fn none() -> Option<Self> {
        None
    }

    /// Runs the command.
    pub fn execute(self) -> Option<Message> {
        (self.0)()
    }
}

impl std::fmt::Debug for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmd").finish_non_exhaustive()
    }
}

/// Runs several commands concurrently, without ordering guarantees.
pub fn batch(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let mut valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.pop(),
        _ => Some(Cmd::new(move || Message::new(BatchMsg(valid)))),
    }
}

/// Runs several commands one at a time, in order.
///
/// Use this when a later message must observe the effects of an earlier one.
pub fn sequence(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let mut valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.pop(),
        _ => Some(Cmd::new(move || Message::new(SequenceMsg(valid)))),
    }
}

/// Unpacks batch and sequence messages into the plain messages they carry.
///
/// Used by executors that run commands synchronously, such as the
/// simulator.
pub(crate) fn flatten(msg: Message) -> Vec<Message> {
    let cmds = if msg.is::<BatchMsg>() {
        msg.downcast::<BatchMsg>().map(|b| b.0).unwrap_or_default()
    } else if msg.is::<SequenceMsg>() {
        msg.downcast::<SequenceMsg>().map(|s| s.0).unwrap_or_default()
    } else {
        return vec![msg];
    };

    cmds.into_iter()
        .filter_map(Cmd::execute)
        .flat_map(flatten)
        .collect()
}

/// Tells the program to exit.
pub fn quit() -> Cmd {
    Cmd::new(|| Message::new(QuitMsg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_new() {
        let msg = Cmd::new(|| Message::new(42i32)).execute().unwrap();
        assert_eq!(msg.downcast::<i32>(), Some(42));
    }

    #[test]
    fn test_cmd_message() {
        let msg = Cmd::message("done").execute().unwrap();
        assert_eq!(msg.downcast::<&str>(), Some("done"));
    }

    #[test]
    fn test_cmd_none() {
        assert!(Cmd::none().is_none());
        assert!(Cmd::new_optional(|| None).execute().is_none());
    }

    #[test]
    fn test_batch_empty_and_single() {
        assert!(batch(vec![None, None]).is_none());
        let single = batch(vec![None, Some(Cmd::message(1u8))]).unwrap();
        assert_eq!(single.execute().unwrap().downcast::<u8>(), Some(1));
    }

    #[test]
    fn test_sequence_flattens_in_order() {
        let cmd = sequence(vec![Some(Cmd::message(1u8)), Some(Cmd::message(2u8))]).unwrap();
        let msgs = flatten(cmd.execute().unwrap());
        let values: Vec<u8> = msgs.into_iter().filter_map(|m| m.downcast::<u8>()).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_sequence_of_one_is_that_command() {
        let cmd = sequence(vec![None, Some(Cmd::message(7u8))]).unwrap();
        let msg = cmd.execute().unwrap();
        assert_eq!(msg.downcast::<u8>(), Some(7));
    }

    #[test]
    fn test_nested_batch_flattens() {
        let inner = batch(vec![Some(Cmd::message(1u8)), Some(Cmd::message(2u8))]);
        let outer = batch(vec![inner, Some(Cmd::message(3u8))]).unwrap();
        let msgs = flatten(outer.execute().unwrap());
        assert_eq!(msgs.len(), 3);
    }

    #[test]
    fn test_quit() {
        assert!(quit().execute().unwrap().is::<QuitMsg>());
    }
}
