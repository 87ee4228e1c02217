//! Keyboard input.
//!
//! Key presses arrive as [`KeyMsg`]. Their [`Display`](fmt::Display) form
//! ("enter", "ctrl+n", "a", "alt+b") is what key bindings match against.

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};

/// A key press.
///
/// # Example
///
/// ```rust
/// use typeahead_tea::{KeyMsg, KeyType};
///
/// assert_eq!(KeyMsg::from_type(KeyType::Down).to_string(), "down");
/// assert_eq!(KeyMsg::from_char('x').with_alt().to_string(), "alt+x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// Which key.
    pub key_type: KeyType,
    /// Typed characters when `key_type` is [`KeyType::Runes`].
    pub runes: Vec<char>,
    /// Alt was held.
    pub alt: bool,
    /// The characters came from a bracketed paste.
    pub paste: bool,
}

impl KeyMsg {
    /// A key press without text.
    pub fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
            paste: false,
        }
    }

    /// A single typed character.
    pub fn from_char(c: char) -> Self {
        Self::from_runes(vec![c])
    }

    /// Several typed characters at once.
    pub fn from_runes(runes: Vec<char>) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes,
            alt: false,
            paste: false,
        }
    }

    /// Marks Alt as held.
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Marks the characters as pasted.
    pub fn with_paste(mut self) -> Self {
        self.paste = true;
        self
    }

    /// Text carried by this key, if it inserts any.
    ///
    /// Space is reported as its own key type but still inserts a space.
    pub fn text(&self) -> Option<String> {
        match self.key_type {
            KeyType::Runes if !self.alt && !self.runes.is_empty() => {
                Some(self.runes.iter().collect())
            }
            KeyType::Space if !self.alt => Some(" ".to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            if self.paste {
                write!(f, "[")?;
            }
            for c in &self.runes {
                write!(f, "{c}")?;
            }
            if self.paste {
                write!(f, "]")?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.key_type)
        }
    }
}

/// Keys the components care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Printable characters (see [`KeyMsg::runes`]).
    Runes,
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab.
    ShiftTab,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Ctrl+Left.
    CtrlLeft,
    /// Ctrl+Right.
    CtrlRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PgUp,
    /// Page Down.
    PgDown,
    /// Ctrl+A.
    CtrlA,
    /// Ctrl+B.
    CtrlB,
    /// Ctrl+C.
    CtrlC,
    /// Ctrl+D.
    CtrlD,
    /// Ctrl+E.
    CtrlE,
    /// Ctrl+F.
    CtrlF,
    /// Ctrl+H.
    CtrlH,
    /// Ctrl+K.
    CtrlK,
    /// Ctrl+N.
    CtrlN,
    /// Ctrl+P.
    CtrlP,
    /// Ctrl+U.
    CtrlU,
    /// Ctrl+W.
    CtrlW,
    /// A key with no binding meaning here.
    Unknown,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::Runes => "runes",
            KeyType::Space => " ",
            KeyType::Enter => "enter",
            KeyType::Tab => "tab",
            KeyType::ShiftTab => "shift+tab",
            KeyType::Esc => "esc",
            KeyType::Backspace => "backspace",
            KeyType::Delete => "delete",
            KeyType::Up => "up",
            KeyType::Down => "down",
            KeyType::Left => "left",
            KeyType::Right => "right",
            KeyType::CtrlLeft => "ctrl+left",
            KeyType::CtrlRight => "ctrl+right",
            KeyType::Home => "home",
            KeyType::End => "end",
            KeyType::PgUp => "pgup",
            KeyType::PgDown => "pgdown",
            KeyType::CtrlA => "ctrl+a",
            KeyType::CtrlB => "ctrl+b",
            KeyType::CtrlC => "ctrl+c",
            KeyType::CtrlD => "ctrl+d",
            KeyType::CtrlE => "ctrl+e",
            KeyType::CtrlF => "ctrl+f",
            KeyType::CtrlH => "ctrl+h",
            KeyType::CtrlK => "ctrl+k",
            KeyType::CtrlN => "ctrl+n",
            KeyType::CtrlP => "ctrl+p",
            KeyType::CtrlU => "ctrl+u",
            KeyType::CtrlW => "ctrl+w",
            KeyType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

impl KeyType {
    /// Arrow, home/end and page keys.
    pub fn is_cursor(&self) -> bool {
        matches!(
            self,
            KeyType::Up
                | KeyType::Down
                | KeyType::Left
                | KeyType::Right
                | KeyType::CtrlLeft
                | KeyType::CtrlRight
                | KeyType::Home
                | KeyType::End
                | KeyType::PgUp
                | KeyType::PgDown
        )
    }
}

/// Converts a crossterm key event into a [`KeyMsg`].
pub fn from_crossterm_key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let key_type = match code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'a' => KeyType::CtrlA,
            'b' => KeyType::CtrlB,
            'c' => KeyType::CtrlC,
            'd' => KeyType::CtrlD,
            'e' => KeyType::CtrlE,
            'f' => KeyType::CtrlF,
            'h' => KeyType::CtrlH,
            'k' => KeyType::CtrlK,
            'm' => KeyType::Enter,
            'n' => KeyType::CtrlN,
            'p' => KeyType::CtrlP,
            'u' => KeyType::CtrlU,
            'w' => KeyType::CtrlW,
            _ => KeyType::Unknown,
        },
        KeyCode::Char(' ') => KeyType::Space,
        KeyCode::Char(c) => {
            let mut key = KeyMsg::from_char(c);
            key.alt = alt;
            return key;
        }
        KeyCode::Enter => KeyType::Enter,
        KeyCode::Tab if shift => KeyType::ShiftTab,
        KeyCode::Tab => KeyType::Tab,
        KeyCode::BackTab => KeyType::ShiftTab,
        KeyCode::Esc => KeyType::Esc,
        KeyCode::Backspace => KeyType::Backspace,
        KeyCode::Delete => KeyType::Delete,
        KeyCode::Up => KeyType::Up,
        KeyCode::Down => KeyType::Down,
        KeyCode::Left if ctrl => KeyType::CtrlLeft,
        KeyCode::Left => KeyType::Left,
        KeyCode::Right if ctrl => KeyType::CtrlRight,
        KeyCode::Right => KeyType::Right,
        KeyCode::Home => KeyType::Home,
        KeyCode::End => KeyType::End,
        KeyCode::PageUp => KeyType::PgUp,
        KeyCode::PageDown => KeyType::PgDown,
        _ => KeyType::Unknown,
    };

    KeyMsg {
        key_type,
        runes: Vec::new(),
        alt,
        paste: false,
    }
}
