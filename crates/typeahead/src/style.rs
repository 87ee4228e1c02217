//! Terminal text styling.
//!
//! A small builder in the spirit of lipgloss: [`Style`] collects colors and
//! attributes and renders them as ANSI sequences through crossterm, and
//! [`Border`] frames a block of lines. The width helpers are ANSI-aware so
//! styled text can be measured and padded.

use std::fmt;

use crossterm::style::{Attribute, ContentStyle, StyledContent};
use unicode_width::UnicodeWidthChar;

/// A terminal color.
///
/// Accepts ANSI 256 palette indices (`"212"`) and hex RGB (`"#ff5f87"`).
/// Anything else renders as the terminal default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Color(pub String);

impl Color {
    /// Creates a color from its string form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The crossterm color, if the value parses.
    pub fn to_crossterm(&self) -> Option<crossterm::style::Color> {
        let value = self.0.trim();
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            return Some(crossterm::style::Color::Rgb {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            });
        }
        value.parse::<u8>().ok().map(crossterm::style::Color::AnsiValue)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text style builder.
///
/// ```rust
/// use typeahead::style::Style;
///
/// let plain = Style::new();
/// assert_eq!(plain.render("Alien"), "Alien");
///
/// let active = Style::new().foreground("212").bold();
/// assert!(active.render("Alien").contains("Alien"));
/// assert_ne!(active.render("Alien"), "Alien");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    foreground: Option<Color>,
    background: Option<Color>,
    bold: bool,
    faint: bool,
    italic: bool,
    underline: bool,
    reverse: bool,
}

impl Style {
    /// A style with no attributes. Renders text unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the foreground color.
    #[must_use]
    pub fn foreground(mut self, color: impl Into<Color>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Bold text.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Dim text.
    #[must_use]
    pub fn faint(mut self) -> Self {
        self.faint = true;
        self
    }

    /// Italic text.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Underlined text.
    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Swapped foreground and background.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Whether rendering would leave text untouched.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    fn content_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.foreground.as_ref().and_then(Color::to_crossterm);
        style.background_color = self.background.as_ref().and_then(Color::to_crossterm);
        for (on, attr) in [
            (self.bold, Attribute::Bold),
            (self.faint, Attribute::Dim),
            (self.italic, Attribute::Italic),
            (self.underline, Attribute::Underlined),
            (self.reverse, Attribute::Reverse),
        ] {
            if on {
                style.attributes.set(attr);
            }
        }
        style
    }

    /// Applies the style to `text`, line by line so multi-line blocks stay
    /// aligned.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let style = self.content_style();
        text.split('\n')
            .map(|line| StyledContent::new(style, line).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Box-drawing characters for a panel frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub top: char,
    pub bottom: char,
    pub left: char,
    pub right: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl Border {
    /// `┌─┐` style.
    pub const fn normal() -> Self {
        Self {
            top: '─',
            bottom: '─',
            left: '│',
            right: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
        }
    }

    /// `╭─╮` style.
    pub const fn rounded() -> Self {
        Self {
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
            ..Self::normal()
        }
    }

    /// Frames `lines` in a box whose inner width is `inner_width` columns.
    ///
    /// Lines are padded or truncated to fit. The frame characters are drawn
    /// with `style`; line content is left as is.
    #[must_use]
    pub fn wrap(&self, lines: &[String], inner_width: usize, style: &Style) -> Vec<String> {
        let horizontal = |c: char| c.to_string().repeat(inner_width);
        let mut out = Vec::with_capacity(lines.len() + 2);
        out.push(style.render(&format!(
            "{}{}{}",
            self.top_left,
            horizontal(self.top),
            self.top_right
        )));
        let left = style.render(&self.left.to_string());
        let right = style.render(&self.right.to_string());
        for line in lines {
            out.push(format!("{left}{}{right}", fit(line, inner_width)));
        }
        out.push(style.render(&format!(
            "{}{}{}",
            self.bottom_left,
            horizontal(self.bottom),
            self.bottom_right
        )));
        out
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::rounded()
    }
}

#[derive(Clone, Copy)]
enum Scan {
    Text,
    Esc,
    Csi,
    Osc,
}

/// Display width of `s` in terminal columns, ignoring ANSI escape sequences.
#[must_use]
pub fn visible_width(s: &str) -> usize {
    let mut state = Scan::Text;
    let mut width = 0;
    for c in s.chars() {
        state = match (state, c) {
            (Scan::Text, '\x1b') => Scan::Esc,
            (Scan::Text, c) => {
                width += c.width().unwrap_or(0);
                Scan::Text
            }
            (Scan::Esc, '[') => Scan::Csi,
            (Scan::Esc, ']') => Scan::Osc,
            (Scan::Esc, _) => Scan::Text,
            (Scan::Csi, '\x40'..='\x7e') => Scan::Text,
            (Scan::Csi, _) => Scan::Csi,
            (Scan::Osc, '\x07') => Scan::Text,
            (Scan::Osc, _) => Scan::Osc,
        };
    }
    width
}

/// Cuts plain text to at most `width` columns, ending in `…` when cut.
#[must_use]
pub fn truncate(s: &str, width: usize) -> String {
    if visible_width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pads `s` with spaces on the right to `width` columns.
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    let w = visible_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// Pads `s` with spaces on the left to `width` columns.
#[must_use]
pub fn pad_left(s: &str, width: usize) -> String {
    let w = visible_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{s}", " ".repeat(width - w))
    }
}

/// Makes `s` exactly `width` columns wide. Styled lines that are too wide are
/// left alone, since cutting them could split an escape sequence.
fn fit(s: &str, width: usize) -> String {
    if visible_width(s) > width && !s.contains('\x1b') {
        return truncate(s, width);
    }
    pad_right(s, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(
            Color::from("212").to_crossterm(),
            Some(crossterm::style::Color::AnsiValue(212))
        );
        assert_eq!(
            Color::from("#ff0080").to_crossterm(),
            Some(crossterm::style::Color::Rgb { r: 255, g: 0, b: 128 })
        );
        assert_eq!(Color::from("#fff").to_crossterm(), None);
        assert_eq!(Color::from("pink").to_crossterm(), None);
    }

    #[test]
    fn test_plain_style_is_identity() {
        assert!(Style::new().is_plain());
        assert_eq!(Style::new().render("a\nb"), "a\nb");
    }

    #[test]
    fn test_styled_render_keeps_visible_width() {
        let s = Style::new().foreground("205").bold().render("Heat");
        assert!(s.contains('\x1b'));
        assert_eq!(visible_width(&s), 4);
    }

    #[test]
    fn test_styled_render_is_per_line() {
        let s = Style::new().reverse().render("ab\ncd");
        let lines: Vec<&str> = s.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(visible_width(lines[1]), 2);
    }

    #[test]
    fn test_visible_width_wide_and_ansi() {
        assert_eq!(visible_width("abc"), 3);
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(visible_width("\x1b]0;title\x07x"), 1);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Casablanca", 20), "Casablanca");
        assert_eq!(truncate("Casablanca", 5), "Casa…");
        assert_eq!(truncate("Casablanca", 0), "");
        assert_eq!(truncate("日本語", 4), "日…");
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_border_wrap() {
        let lines = vec!["one".to_string(), "three".to_string()];
        let framed = Border::rounded().wrap(&lines, 4, &Style::new());
        assert_eq!(
            framed,
            vec!["╭────╮", "│one │", "│thr…│", "╰────╯"]
        );
        let normal = Border::normal().wrap(&[], 2, &Style::new());
        assert_eq!(normal, vec!["┌──┐", "└──┘"]);
    }
}
