//! Key binding parsing and matching.

use crate::error::{Error, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A parsed key binding such as `"q"`, `"Enter"` or `"Ctrl+s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Parse a binding string. Modifiers are joined to the key with `+`.
    pub fn parse(binding: &str) -> Result<Self> {
        let (mods, key) = split_binding(binding.trim());

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => {
                    return Err(Error::config(format!(
                        "unknown modifier '{}' in key binding '{}'",
                        part, binding
                    )));
                }
            };
        }

        let code = parse_key(key)
            .ok_or_else(|| Error::config(format!("unknown key in key binding '{}'", binding)))?;
        Ok(Self { code, modifiers })
    }

    /// Check whether a key event triggers this binding.
    ///
    /// Shift is ignored for characters, where it is already reflected in the
    /// character itself. A lowercase letter also matches its uppercase form.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let significant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        match (self.code, event.code) {
            (KeyCode::Char(want), KeyCode::Char(got)) => {
                (event.modifiers & significant) == (self.modifiers & significant)
                    && (got == want || got == want.to_ascii_uppercase())
            }
            (KeyCode::BackTab, KeyCode::BackTab) => {
                (event.modifiers & significant) == (self.modifiers & significant)
            }
            (want, got) => want == got && event.modifiers == self.modifiers,
        }
    }
}

/// Split off the key; `"+"` and `"Ctrl++"` bind the plus key itself.
fn split_binding(binding: &str) -> (&str, &str) {
    if let Some(rest) = binding.strip_suffix('+')
        && (rest.is_empty() || rest.ends_with('+'))
    {
        return (rest.strip_suffix('+').unwrap_or(rest), "+");
    }
    binding.rsplit_once('+').unwrap_or(("", binding))
}

fn parse_key(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let code = match key.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        s if s.starts_with('f') => KeyCode::F(s[1..].parse().ok()?),
        _ => return None,
    };
    Some(code)
}
