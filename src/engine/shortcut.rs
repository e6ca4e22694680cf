//! Shortcut String Parsing
//!
//! Turns shortcut strings like `"ctrl+shift+f1"` into ordered key token
//! lists. Parse results are memoized per distinct input string because
//! mapping actions repeat on every button press but rarely change within
//! a process lifetime.

use crate::engine::error::ShortcutError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Modifier key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Control key
    Ctrl,
    /// Shift key
    Shift,
    /// Alt key
    Alt,
    /// Command / Windows / Super key
    Meta,
}

/// Named non-printable key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NamedKey {
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// An atomic key identity within a parsed shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// Modifier key (ctrl/shift/alt/meta)
    Modifier(Modifier),
    /// Named special key (enter, tab, arrows, ...)
    Named(NamedKey),
    /// Function key f1-f20
    Function(u8),
    /// Single printable character
    Char(char),
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Modifier(m) => {
                let name = match m {
                    Modifier::Ctrl => "ctrl",
                    Modifier::Shift => "shift",
                    Modifier::Alt => "alt",
                    Modifier::Meta => "cmd",
                };
                f.write_str(name)
            }
            KeyToken::Named(k) => {
                let name = match k {
                    NamedKey::Enter => "enter",
                    NamedKey::Tab => "tab",
                    NamedKey::Space => "space",
                    NamedKey::Backspace => "backspace",
                    NamedKey::Delete => "delete",
                    NamedKey::Escape => "escape",
                    NamedKey::Up => "up",
                    NamedKey::Down => "down",
                    NamedKey::Left => "left",
                    NamedKey::Right => "right",
                    NamedKey::Home => "home",
                    NamedKey::End => "end",
                    NamedKey::PageUp => "pageup",
                    NamedKey::PageDown => "pagedown",
                };
                f.write_str(name)
            }
            KeyToken::Function(n) => write!(f, "f{}", n),
            KeyToken::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A parsed shortcut: ordered, non-empty key token list.
///
/// Press order equals list order, so ordering is preserved exactly as
/// written in the shortcut string.
pub type ParsedShortcut = Arc<[KeyToken]>;

/// Memoizing shortcut parser.
///
/// The cache is append-only for the process lifetime and keyed by the
/// exact input string. Parse failures are not cached.
pub struct ShortcutParser {
    cache: Mutex<HashMap<String, ParsedShortcut>>,
}

impl ShortcutParser {
    /// Create a parser with an empty cache
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Parse a shortcut string into an ordered key token list.
    ///
    /// Splits on `+`, trims each part, and classifies it as a modifier,
    /// named key, function key, or single printable character. Matching
    /// is case-insensitive. Empty parts are skipped; an empty result is
    /// an error.
    pub fn parse(&self, shortcut: &str) -> std::result::Result<ParsedShortcut, ShortcutError> {
        if let Some(hit) = self.cache.lock().get(shortcut) {
            return Ok(Arc::clone(hit));
        }

        let mut tokens = Vec::new();
        for part in shortcut.to_lowercase().split('+') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            tokens.push(classify(part)?);
        }

        if tokens.is_empty() {
            return Err(ShortcutError::Empty(shortcut.to_string()));
        }

        let parsed: ParsedShortcut = tokens.into();
        self.cache
            .lock()
            .insert(shortcut.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Number of distinct shortcut strings cached so far
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

impl Default for ShortcutParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a single lowercased, trimmed shortcut part
fn classify(part: &str) -> std::result::Result<KeyToken, ShortcutError> {
    let modifier = match part {
        "ctrl" => Some(Modifier::Ctrl),
        "shift" => Some(Modifier::Shift),
        "alt" => Some(Modifier::Alt),
        "cmd" | "win" => Some(Modifier::Meta),
        _ => None,
    };
    if let Some(m) = modifier {
        return Ok(KeyToken::Modifier(m));
    }

    let named = match part {
        "enter" => Some(NamedKey::Enter),
        "tab" => Some(NamedKey::Tab),
        "space" => Some(NamedKey::Space),
        "backspace" => Some(NamedKey::Backspace),
        "delete" => Some(NamedKey::Delete),
        "escape" | "esc" => Some(NamedKey::Escape),
        "up" => Some(NamedKey::Up),
        "down" => Some(NamedKey::Down),
        "left" => Some(NamedKey::Left),
        "right" => Some(NamedKey::Right),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" => Some(NamedKey::PageUp),
        "pagedown" => Some(NamedKey::PageDown),
        _ => None,
    };
    if let Some(k) = named {
        return Ok(KeyToken::Named(k));
    }

    // Function keys: 'f' followed by digits, valid range f1-f20
    if let Some(digits) = part.strip_prefix('f') {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return match digits.parse::<u8>() {
                Ok(n) if (1..=20).contains(&n) => Ok(KeyToken::Function(n)),
                _ => Err(ShortcutError::InvalidFunctionKey(part.to_string())),
            };
        }
    }

    let mut chars = part.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyToken::Char(c)),
        _ => Err(ShortcutError::UnknownToken(part.to_string())),
    }
}
