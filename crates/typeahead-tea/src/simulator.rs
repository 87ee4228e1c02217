//! Headless program driver for tests.
//!
//! [`ProgramSimulator`] runs the same init → update → view cycle as
//! [`Program`](crate::Program) but without a terminal. Commands returned by
//! the model are executed synchronously and their messages are queued behind
//! the ones already pending, which keeps runs deterministic.

use std::collections::VecDeque;

use crate::command::{Cmd, flatten};
use crate::key::{KeyMsg, KeyType};
use crate::message::{InterruptMsg, Message, QuitMsg};
use crate::mouse::MouseMsg;
use crate::Model;

/// Upper bound on messages processed by [`ProgramSimulator::run_until_empty`].
///
/// Guards against models that keep scheduling commands forever.
pub const MAX_STEPS: usize = 10_000;

/// Counters collected during a simulation.
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    /// Calls to `init`.
    pub init_calls: usize,
    /// Calls to `update`.
    pub update_calls: usize,
    /// Calls to `view`.
    pub view_calls: usize,
    /// Commands returned from `init`/`update`.
    pub commands_returned: usize,
    /// A quit or interrupt message was seen.
    pub quit_requested: bool,
}

/// Drives a [`Model`] without a terminal.
///
/// # Example
///
/// ```rust
/// use typeahead_tea::{Cmd, Message, Model, simulator::ProgramSimulator};
///
/// struct Counter {
///     count: i32,
/// }
///
/// impl Model for Counter {
///     fn init(&self) -> Option<Cmd> {
///         None
///     }
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(n) = msg.downcast::<i32>() {
///             self.count += n;
///         }
///         None
///     }
///     fn view(&self) -> String {
///         format!("Count: {}", self.count)
///     }
/// }
///
/// let mut sim = ProgramSimulator::new(Counter { count: 0 });
/// sim.send(Message::new(5));
/// sim.send(Message::new(3));
/// sim.run_until_empty();
///
/// assert_eq!(sim.model().count, 8);
/// assert_eq!(sim.last_view(), Some("Count: 8"));
/// ```
pub struct ProgramSimulator<M: Model> {
    model: M,
    queue: VecDeque<Message>,
    views: Vec<String>,
    stats: SimulationStats,
    initialized: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Wraps `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            views: Vec::new(),
            stats: SimulationStats::default(),
            initialized: false,
        }
    }

    /// Calls `init` once and queues whatever its command produces.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.stats.init_calls += 1;

        let cmd = self.model.init();
        self.enqueue(cmd);
        self.render();
    }

    /// Queues a message.
    pub fn send(&mut self, msg: Message) {
        self.queue.push_back(msg);
    }

    /// Queues a key press.
    pub fn press(&mut self, key_type: KeyType) {
        self.send(Message::new(KeyMsg::from_type(key_type)));
    }

    /// Queues one key press per character of `text`.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let key = if c == ' ' {
                KeyMsg::from_type(KeyType::Space)
            } else {
                KeyMsg::from_char(c)
            };
            self.send(Message::new(key));
        }
    }

    /// Queues a left click.
    pub fn click(&mut self, x: u16, y: u16) {
        self.send(Message::new(MouseMsg::click(x, y)));
    }

    /// Processes one queued message.
    ///
    /// Returns `false` when nothing was processed (empty queue or quit).
    pub fn step(&mut self) -> bool {
        if !self.initialized {
            self.init();
        }
        if self.stats.quit_requested {
            return false;
        }
        let Some(msg) = self.queue.pop_front() else {
            return false;
        };

        if msg.is::<QuitMsg>() || msg.is::<InterruptMsg>() {
            self.stats.quit_requested = true;
            return true;
        }

        self.stats.update_calls += 1;
        let cmd = self.model.update(msg);
        self.enqueue(cmd);
        self.render();
        true
    }

    /// Processes messages until the queue drains, quit is requested or
    /// [`MAX_STEPS`] is reached. Returns the number processed.
    pub fn run_until_empty(&mut self) -> usize {
        let mut processed = 0;
        while processed < MAX_STEPS && self.step() {
            processed += 1;
        }
        processed
    }

    fn enqueue(&mut self, cmd: Option<Cmd>) {
        let Some(cmd) = cmd else {
            return;
        };
        self.stats.commands_returned += 1;
        if let Some(msg) = cmd.execute() {
            self.queue.extend(flatten(msg));
        }
    }

    fn render(&mut self) {
        self.stats.view_calls += 1;
        self.views.push(self.model.view());
    }

    /// The model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The model, mutably.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consumes the simulator and returns the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Collected counters.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Every rendered view, oldest first.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// The most recent view.
    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }

    /// Whether quit was requested.
    pub fn is_quit(&self) -> bool {
        self.stats.quit_requested
    }

    /// Number of queued messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{batch, quit};

    #[derive(Default)]
    struct Recorder {
        keys: Vec<String>,
        total: i32,
    }

    struct Ping;

    impl Model for Recorder {
        fn init(&self) -> Option<Cmd> {
            Some(Cmd::message(Ping))
        }

        fn update(&mut self, msg: Message) -> Option<Cmd> {
            if msg.is::<Ping>() {
                self.keys.push("ping".into());
                return None;
            }
            if let Some(n) = msg.downcast_ref::<i32>() {
                self.total += n;
                if *n == 10 {
                    return batch(vec![Some(Cmd::message(1i32)), Some(Cmd::message(2i32))]);
                }
                return None;
            }
            if let Some(key) = msg.downcast_ref::<KeyMsg>() {
                if key.key_type == KeyType::Esc {
                    return Some(quit());
                }
                self.keys.push(key.to_string());
            }
            None
        }

        fn view(&self) -> String {
            format!("{} {}", self.total, self.keys.join(","))
        }
    }

    #[test]
    fn test_init_runs_once_and_queues_command() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.init();
        sim.init();
        assert_eq!(sim.stats().init_calls, 1);
        assert_eq!(sim.pending_count(), 1);

        sim.run_until_empty();
        assert_eq!(sim.model().keys, vec!["ping"]);
    }

    #[test]
    fn test_type_text_and_press() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.type_text("a b");
        sim.press(KeyType::Enter);
        sim.run_until_empty();
        // init runs lazily, so its command lands behind the typed keys
        assert_eq!(sim.model().keys, vec!["a", " ", "b", "enter", "ping"]);
    }

    #[test]
    fn test_commands_feed_back_in_order() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.send(Message::new(10i32));
        sim.run_until_empty();
        assert_eq!(sim.model().total, 13);
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.press(KeyType::Esc);
        sim.run_until_empty();
        assert!(sim.is_quit());

        sim.type_text("x");
        assert_eq!(sim.run_until_empty(), 0);
        assert!(!sim.model().keys.contains(&"x".to_string()));
    }

    #[test]
    fn test_views_recorded_per_update() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.send(Message::new(4i32));
        sim.run_until_empty();
        // init view + ping + the i32
        assert_eq!(sim.stats().view_calls, 3);
        assert_eq!(sim.last_view(), Some("4 ping"));
    }
}
