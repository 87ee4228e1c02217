//! Single-line text input.
//!
//! [`TextInput`] keeps a value and a cursor, applies editing keys and
//! renders a prompt, the visible slice of the value and a block cursor.
//! When the value is wider than [`TextInput::width`] the view scrolls to
//! keep the cursor visible.
//!
//! ```rust
//! use typeahead::textinput::TextInput;
//! use typeahead_tea::{KeyMsg, KeyType};
//!
//! let mut input = TextInput::new();
//! input.focus();
//! input.handle_key(&KeyMsg::from_char('h'));
//! input.handle_key(&KeyMsg::from_char('i'));
//! input.handle_key(&KeyMsg::from_type(KeyType::Backspace));
//! assert_eq!(input.value(), "h");
//! ```

use typeahead_tea::{Cmd, KeyMsg, Message, Model};
use unicode_width::UnicodeWidthChar;

use crate::key::{Binding, matches};
use crate::style::Style;

/// Editing keys.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub character_forward: Binding,
    pub character_backward: Binding,
    pub word_forward: Binding,
    pub word_backward: Binding,
    pub delete_word_backward: Binding,
    pub delete_character_backward: Binding,
    pub delete_character_forward: Binding,
    pub delete_before_cursor: Binding,
    pub delete_after_cursor: Binding,
    pub line_start: Binding,
    pub line_end: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            character_forward: Binding::new().keys(&["right", "ctrl+f"]),
            character_backward: Binding::new().keys(&["left", "ctrl+b"]),
            word_forward: Binding::new().keys(&["ctrl+right", "alt+f"]),
            word_backward: Binding::new().keys(&["ctrl+left", "alt+b"]),
            delete_word_backward: Binding::new().keys(&["ctrl+w"]),
            delete_character_backward: Binding::new().keys(&["backspace", "ctrl+h"]),
            delete_character_forward: Binding::new().keys(&["delete", "ctrl+d"]),
            delete_before_cursor: Binding::new().keys(&["ctrl+u"]),
            delete_after_cursor: Binding::new().keys(&["ctrl+k"]),
            line_start: Binding::new().keys(&["home", "ctrl+a"]),
            line_end: Binding::new().keys(&["end", "ctrl+e"]),
        }
    }
}

impl KeyMap {
    fn deletions(&self) -> [&Binding; 5] {
        [
            &self.delete_word_backward,
            &self.delete_character_backward,
            &self.delete_character_forward,
            &self.delete_before_cursor,
            &self.delete_after_cursor,
        ]
    }
}

/// Single-line text input.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// Drawn before the value.
    pub prompt: String,
    /// Shown while the value is empty.
    pub placeholder: String,
    /// Columns available for the value. `0` means unlimited.
    pub width: usize,
    /// Maximum number of characters. `0` means unlimited.
    pub char_limit: usize,
    pub prompt_style: Style,
    pub text_style: Style,
    pub placeholder_style: Style,
    pub cursor_style: Style,
    pub key_map: KeyMap,
    value: Vec<char>,
    pos: usize,
    offset: usize,
    focus: bool,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// An empty, unfocused input with a `"> "` prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            width: 0,
            char_limit: 0,
            prompt_style: Style::new(),
            text_style: Style::new(),
            placeholder_style: Style::new().foreground("240"),
            cursor_style: Style::new().reverse(),
            key_map: KeyMap::default(),
            value: Vec::new(),
            pos: 0,
            offset: 0,
            focus: false,
        }
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        let mut value: Vec<char> = s.chars().collect();
        if self.char_limit > 0 {
            value.truncate(self.char_limit);
        }
        self.value = value;
        self.pos = self.value.len();
        self.handle_overflow();
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    /// Whether the input accepts keys.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Accepts keys from now on.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Stops accepting keys.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
        self.offset = 0;
    }

    /// Whether `key` would insert or delete text (as opposed to moving the
    /// cursor or doing nothing).
    #[must_use]
    pub fn is_edit_key(&self, key: &KeyMsg) -> bool {
        key.text().is_some() || matches(&key.to_string(), &self.key_map.deletions())
    }

    /// Applies an editing key. Returns whether the value changed.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        let before = self.value.clone();
        let key_str = key.to_string();
        let km = &self.key_map;

        if matches(&key_str, &[&km.delete_word_backward]) {
            self.delete_word_backward();
        } else if matches(&key_str, &[&km.delete_character_backward]) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if matches(&key_str, &[&km.delete_character_forward]) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if matches(&key_str, &[&km.delete_before_cursor]) {
            self.value.drain(..self.pos);
            self.pos = 0;
        } else if matches(&key_str, &[&km.delete_after_cursor]) {
            self.value.truncate(self.pos);
        } else if matches(&key_str, &[&km.word_backward]) {
            self.pos = self.word_start_before(self.pos);
        } else if matches(&key_str, &[&km.word_forward]) {
            self.word_forward();
        } else if matches(&key_str, &[&km.character_backward]) {
            self.pos = self.pos.saturating_sub(1);
        } else if matches(&key_str, &[&km.character_forward]) {
            self.pos = (self.pos + 1).min(self.value.len());
        } else if matches(&key_str, &[&km.line_start]) {
            self.pos = 0;
        } else if matches(&key_str, &[&km.line_end]) {
            self.pos = self.value.len();
        } else if let Some(text) = key.text() {
            self.insert(&text);
        }

        self.handle_overflow();
        self.value != before
    }

    fn insert(&mut self, text: &str) {
        // Pasted newlines have no place in a single line.
        let mut runes: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if self.char_limit > 0 {
            runes.truncate(self.char_limit.saturating_sub(self.value.len()));
        }
        let count = runes.len();
        self.value.splice(self.pos..self.pos, runes);
        self.pos += count;
    }

    fn word_start_before(&self, mut pos: usize) -> usize {
        while pos > 0 && self.value[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.value[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    fn word_forward(&mut self) {
        let len = self.value.len();
        while self.pos < len && self.value[self.pos].is_whitespace() {
            self.pos += 1;
        }
        while self.pos < len && !self.value[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    fn delete_word_backward(&mut self) {
        let start = self.word_start_before(self.pos);
        self.value.drain(start..self.pos);
        self.pos = start;
    }

    fn handle_overflow(&mut self) {
        if self.width == 0 {
            self.offset = 0;
            return;
        }
        self.offset = self.offset.min(self.pos);
        // One column is kept for the cursor cell.
        while self.offset < self.pos && self.span_width(self.offset, self.pos) + 1 > self.width {
            self.offset += 1;
        }
    }

    fn span_width(&self, from: usize, to: usize) -> usize {
        self.value[from..to]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Renders the prompt, the visible part of the value and the cursor.
    #[must_use]
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() && !self.placeholder.is_empty() {
            return format!("{prompt}{}", self.placeholder_view());
        }

        let mut end = self.offset;
        let mut used = 0;
        while end < self.value.len() {
            let w = self.value[end].width().unwrap_or(0);
            if self.width > 0 && used + w > self.width {
                break;
            }
            used += w;
            end += 1;
        }

        let visible = &self.value[self.offset..end];
        let cursor = self.pos - self.offset;
        let mut out = prompt;

        if !self.focus {
            let text: String = visible.iter().collect();
            out.push_str(&self.text_style.render(&text));
            return out;
        }

        let before: String = visible[..cursor.min(visible.len())].iter().collect();
        out.push_str(&self.text_style.render(&before));
        if let Some(c) = visible.get(cursor) {
            out.push_str(&self.cursor_style.render(&c.to_string()));
            let after: String = visible[cursor + 1..].iter().collect();
            out.push_str(&self.text_style.render(&after));
        } else {
            out.push_str(&self.cursor_style.render(" "));
        }
        out
    }

    fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        let first: String = chars.next().map(String::from).unwrap_or_default();
        let rest: String = chars.collect();
        if self.focus {
            format!(
                "{}{}",
                self.cursor_style.render(&first),
                self.placeholder_style.render(&rest)
            )
        } else {
            self.placeholder_style.render(&self.placeholder)
        }
    }
}

impl Model for TextInput {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key);
        }
        None
    }

    fn view(&self) -> String {
        TextInput::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeahead_tea::KeyType;

    fn focused(value: &str) -> TextInput {
        let mut input = TextInput::new();
        input.cursor_style = Style::new();
        input.placeholder_style = Style::new();
        input.focus();
        input.set_value(value);
        input
    }

    fn press(input: &mut TextInput, key_type: KeyType) -> bool {
        input.handle_key(&KeyMsg::from_type(key_type))
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut input = focused("Hat");
        press(&mut input, KeyType::Left);
        assert!(input.handle_key(&KeyMsg::from_char('e')));
        assert_eq!(input.value(), "Haet");
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = TextInput::new();
        assert!(!input.handle_key(&KeyMsg::from_char('x')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_space_inserts() {
        let mut input = focused("Star");
        assert!(press(&mut input, KeyType::Space));
        assert_eq!(input.value(), "Star ");
    }

    #[test]
    fn test_cursor_moves_report_no_change() {
        let mut input = focused("Up");
        assert!(!press(&mut input, KeyType::Home));
        assert_eq!(input.position(), 0);
        assert!(!press(&mut input, KeyType::End));
        assert_eq!(input.position(), 2);
    }

    #[test]
    fn test_deletions() {
        let mut input = focused("The Third Man");
        assert!(press(&mut input, KeyType::CtrlW));
        assert_eq!(input.value(), "The Third ");
        assert!(press(&mut input, KeyType::Backspace));
        assert_eq!(input.value(), "The Third");
        press(&mut input, KeyType::Home);
        assert!(press(&mut input, KeyType::Delete));
        assert_eq!(input.value(), "he Third");
        press(&mut input, KeyType::CtrlRight);
        assert!(press(&mut input, KeyType::CtrlK));
        assert_eq!(input.value(), "he");
        assert!(press(&mut input, KeyType::CtrlU));
        assert_eq!(input.value(), "");
        assert!(!press(&mut input, KeyType::Backspace));
    }

    #[test]
    fn test_is_edit_key() {
        let input = focused("");
        assert!(input.is_edit_key(&KeyMsg::from_char('a')));
        assert!(input.is_edit_key(&KeyMsg::from_type(KeyType::Backspace)));
        assert!(!input.is_edit_key(&KeyMsg::from_type(KeyType::Left)));
        assert!(!input.is_edit_key(&KeyMsg::from_type(KeyType::Enter)));
    }

    #[test]
    fn test_char_limit_and_paste() {
        let mut input = focused("");
        input.char_limit = 4;
        let paste = KeyMsg::from_runes("ab\ncdef".chars().collect()).with_paste();
        assert!(input.handle_key(&paste));
        assert_eq!(input.value(), "abcd");
    }

    #[test]
    fn test_view_shows_prompt_value_and_cursor_cell() {
        let input = focused("Jaws");
        assert_eq!(input.view(), "> Jaws ");
    }

    #[test]
    fn test_view_placeholder() {
        let mut input = focused("");
        input.placeholder = "Search...".into();
        assert_eq!(input.view(), "> Search...");
        input.blur();
        assert_eq!(input.view(), "> Search...");
    }

    #[test]
    fn test_view_scrolls_to_cursor() {
        let mut input = focused("");
        input.width = 5;
        input.set_value("Casablanca");
        // four columns of text plus the cursor cell
        assert_eq!(input.view(), "> anca ");
        press(&mut input, KeyType::Home);
        assert_eq!(input.view(), "> Casab");
    }

    #[test]
    fn test_model_update() {
        let mut input = focused("");
        let _ = Model::update(&mut input, Message::new(KeyMsg::from_char('z')));
        assert_eq!(input.value(), "z");
    }
}
