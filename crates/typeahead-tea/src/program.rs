//! Program lifecycle and event loop.
//!
//! [`Program`] owns the terminal for the lifetime of a model: it enters raw
//! mode, translates crossterm events into messages, runs commands on worker
//! threads and redraws the view whenever it changes.

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyEventKind,
    },
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::command::Cmd;
use crate::key::{KeyMsg, KeyType, from_crossterm_key};
use crate::message::{
    BatchMsg, BlurMsg, FocusMsg, InterruptMsg, Message, QuitMsg, SequenceMsg, WindowSizeMsg,
};
use crate::mouse::from_crossterm_mouse;

/// Errors that can occur while running a program.
///
/// Terminal state is restored on a best-effort basis before any of these is
/// returned.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error during terminal operations.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable or disable raw mode.
    #[error("failed to {action} raw mode: {source}")]
    RawModeFailure {
        /// "enable" or "disable".
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to enter or leave the alternate screen.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreenFailure {
        /// "enter" or "leave".
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Polling or reading terminal events failed.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Writing the view failed.
    #[error("failed to render view: {0}")]
    Render(io::Error),
}

/// Result type for program operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The Model trait for terminal applications and components.
///
/// # Example
///
/// ```rust
/// use typeahead_tea::{Cmd, Message, Model};
///
/// struct Counter {
///     count: i32,
/// }
///
/// impl Model for Counter {
///     fn init(&self) -> Option<Cmd> {
///         None
///     }
///
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(n) = msg.downcast::<i32>() {
///             self.count += n;
///         }
///         None
///     }
///
///     fn view(&self) -> String {
///         format!("Count: {}", self.count)
///     }
/// }
/// ```
pub trait Model: Send + 'static {
    /// Returns an optional startup command. Called once.
    fn init(&self) -> Option<Cmd>;

    /// Folds a message into the model.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Renders the model.
    fn view(&self) -> String;
}

/// Program options.
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Report mouse presses, releases and wheel events.
    pub mouse: bool,
    /// Deliver pastes as a single key message.
    pub bracketed_paste: bool,
    /// Upper bound on redraws per second.
    pub fps: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: false,
            mouse: false,
            bracketed_paste: true,
            fps: 60,
        }
    }
}

/// The program runner.
///
/// ```rust,ignore
/// let final_model = Program::new(model).with_alt_screen().run()?;
/// ```
pub struct Program<M: Model> {
    model: M,
    options: ProgramOptions,
}

impl<M: Model> Program<M> {
    /// Creates a program for `model` with default options.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ProgramOptions::default(),
        }
    }

    /// Replaces all options at once.
    pub fn with_options(mut self, options: ProgramOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses the alternate screen buffer.
    pub fn with_alt_screen(mut self) -> Self {
        self.options.alt_screen = true;
        self
    }

    /// Enables mouse capture.
    pub fn with_mouse(mut self) -> Self {
        self.options.mouse = true;
        self
    }

    /// Sets the redraw rate limit.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.options.fps = fps.clamp(1, 120);
        self
    }

    /// Disables bracketed paste.
    pub fn without_bracketed_paste(mut self) -> Self {
        self.options.bracketed_paste = false;
        self
    }

    /// Runs on stdout and returns the final model.
    pub fn run(self) -> Result<M> {
        self.run_with_writer(io::stdout())
    }

    /// Runs with a custom writer and returns the final model.
    pub fn run_with_writer<W: Write>(self, mut writer: W) -> Result<M> {
        let options = self.options.clone();

        enable_raw_mode().map_err(|source| Error::RawModeFailure {
            action: "enable",
            source,
        })?;

        if options.alt_screen {
            execute!(writer, EnterAlternateScreen).map_err(|source| {
                Error::AltScreenFailure {
                    action: "enter",
                    source,
                }
            })?;
        }
        execute!(writer, Hide)?;
        if options.mouse {
            execute!(writer, EnableMouseCapture)?;
        }
        if options.bracketed_paste {
            execute!(writer, EnableBracketedPaste)?;
        }

        tracing::debug!(?options, "program started");
        let result = self.event_loop(&mut writer);

        if options.bracketed_paste {
            let _ = execute!(writer, DisableBracketedPaste);
        }
        if options.mouse {
            let _ = execute!(writer, DisableMouseCapture);
        }
        let _ = execute!(writer, Show);
        if options.alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();

        match &result {
            Ok(_) => tracing::debug!("program exited"),
            Err(err) => tracing::warn!(error = %err, "program exited with error"),
        }
        result
    }

    fn event_loop<W: Write>(mut self, writer: &mut W) -> Result<M> {
        let (tx, rx): (Sender<Message>, Receiver<Message>) = mpsc::channel();

        if let Ok((width, height)) = terminal::size() {
            let _ = tx.send(Message::new(WindowSizeMsg { width, height }));
        }

        if let Some(cmd) = self.model.init() {
            Self::handle_command(cmd, tx.clone());
        }

        let mut last_view = String::new();
        self.render(writer, &mut last_view)?;

        let frame = Duration::from_secs_f64(1.0 / f64::from(self.options.fps));

        loop {
            if event::poll(frame).map_err(Error::EventPoll)? {
                match event::read().map_err(Error::EventPoll)? {
                    Event::Key(key_event) => {
                        if key_event.kind != KeyEventKind::Press {
                            continue;
                        }
                        let key = from_crossterm_key(key_event.code, key_event.modifiers);
                        if key.key_type == KeyType::CtrlC {
                            let _ = tx.send(Message::new(InterruptMsg));
                        } else {
                            let _ = tx.send(Message::new(key));
                        }
                    }
                    Event::Mouse(mouse_event) => {
                        let _ = tx.send(Message::new(from_crossterm_mouse(mouse_event)));
                    }
                    Event::Resize(width, height) => {
                        let _ = tx.send(Message::new(WindowSizeMsg { width, height }));
                    }
                    Event::FocusGained => {
                        let _ = tx.send(Message::new(FocusMsg));
                    }
                    Event::FocusLost => {
                        let _ = tx.send(Message::new(BlurMsg));
                    }
                    Event::Paste(text) => {
                        let key = KeyMsg::from_runes(text.chars().collect()).with_paste();
                        let _ = tx.send(Message::new(key));
                    }
                }
            }

            let mut needs_render = false;
            while let Ok(msg) = rx.try_recv() {
                if msg.is::<QuitMsg>() || msg.is::<InterruptMsg>() {
                    return Ok(self.model);
                }

                if let Some(cmd) = self.model.update(msg) {
                    Self::handle_command(cmd, tx.clone());
                }
                needs_render = true;
            }

            if needs_render {
                self.render(writer, &mut last_view)?;
            }
        }
    }

    fn handle_command(cmd: Cmd, tx: Sender<Message>) {
        thread::spawn(move || {
            let Some(msg) = cmd.execute() else {
                return;
            };
            if msg.is::<BatchMsg>() {
                if let Some(batch) = msg.downcast::<BatchMsg>() {
                    for cmd in batch.0 {
                        Self::handle_command(cmd, tx.clone());
                    }
                }
            } else if msg.is::<SequenceMsg>() {
                if let Some(seq) = msg.downcast::<SequenceMsg>() {
                    for msg in seq.0.into_iter().filter_map(Cmd::execute) {
                        let _ = tx.send(msg);
                    }
                }
            } else {
                let _ = tx.send(msg);
            }
        });
    }

    fn render<W: Write>(&self, writer: &mut W, last_view: &mut String) -> Result<()> {
        let view = self.model.view();
        if view == *last_view {
            return Ok(());
        }

        // Raw mode does not translate line feeds into carriage returns.
        let frame = view.replace('\n', "\r\n");
        execute!(writer, MoveTo(0, 0), Clear(ClearType::All)).map_err(Error::Render)?;
        write!(writer, "{frame}").map_err(Error::Render)?;
        writer.flush().map_err(Error::Render)?;

        *last_view = view;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Model for Noop {
        fn init(&self) -> Option<Cmd> {
            None
        }

        fn update(&mut self, _msg: Message) -> Option<Cmd> {
            None
        }

        fn view(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_default_options() {
        let opts = ProgramOptions::default();
        assert!(!opts.alt_screen);
        assert!(!opts.mouse);
        assert!(opts.bracketed_paste);
        assert_eq!(opts.fps, 60);
    }

    #[test]
    fn test_builder_options() {
        let program = Program::new(Noop)
            .with_alt_screen()
            .with_mouse()
            .with_fps(500)
            .without_bracketed_paste();
        assert!(program.options.alt_screen);
        assert!(program.options.mouse);
        assert_eq!(program.options.fps, 120);
        assert!(!program.options.bracketed_paste);
    }

    #[test]
    fn test_error_display() {
        let err = Error::RawModeFailure {
            action: "enable",
            source: io::Error::other("not a tty"),
        };
        assert_eq!(err.to_string(), "failed to enable raw mode: not a tty");
    }
}
