use std::str::FromStr;

use thiserror::Error;

use crate::editor::CropAction;
use crate::session::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

/// A key plus modifiers written as text, e.g. `ctrl+s`, `left`, `plus` or `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: ShortcutKey,
    pub modifiers: ShortcutModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key chord `{0}`")]
pub struct KeyChordParseError(String);

impl FromStr for KeyChord {
    type Err = KeyChordParseError;

    fn from_str(s: &str) -> Result<Self, KeyChordParseError> {
        let invalid = || KeyChordParseError(s.to_string());
        let mut modifiers = ShortcutModifiers::default();
        let mut parts = s.split('+').map(str::trim).peekable();
        let mut key_name = None;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                key_name = Some(part);
                break;
            }
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                _ => return Err(invalid()),
            }
        }

        let key_name = key_name.filter(|name| !name.is_empty()).ok_or_else(invalid)?;
        let key = match key_name.to_ascii_lowercase().as_str() {
            "enter" | "return" => ShortcutKey::Enter,
            "escape" | "esc" => ShortcutKey::Escape,
            "left" => ShortcutKey::Left,
            "right" => ShortcutKey::Right,
            "plus" => ShortcutKey::Character('+'),
            "minus" => ShortcutKey::Character('-'),
            _ => {
                let mut chars = key_name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => ShortcutKey::Character(ch),
                    _ => return Err(invalid()),
                }
            }
        };
        Ok(Self { key, modifiers })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub crop_active: bool,
}

fn resolve_crop_shortcut(key: ShortcutKey) -> Option<Intent> {
    let action = match key {
        ShortcutKey::Character('a') => CropAction::MoveLeft,
        ShortcutKey::Character('d') => CropAction::MoveRight,
        ShortcutKey::Character('w') => CropAction::MoveUp,
        ShortcutKey::Character('s') => CropAction::MoveDown,
        ShortcutKey::Character('+' | '=') => CropAction::Grow,
        ShortcutKey::Character('-') => CropAction::Shrink,
        ShortcutKey::Enter => return Some(Intent::CropCommit),
        ShortcutKey::Escape => return Some(Intent::CropCancel),
        _ => return None,
    };
    Some(Intent::Crop(action))
}

fn resolve_viewer_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<Intent> {
    match (key, modifiers.ctrl) {
        (ShortcutKey::Left, false) => Some(Intent::Previous),
        (ShortcutKey::Right, false) => Some(Intent::Next),
        (ShortcutKey::Character('z'), true) => Some(Intent::Undo),
        (ShortcutKey::Character('s'), true) => Some(Intent::Save),
        (ShortcutKey::Character('r'), true) => Some(Intent::RotateRight),
        (ShortcutKey::Character('c'), true) => Some(Intent::CropActivate),
        (ShortcutKey::Escape, false) => Some(Intent::CropCancel),
        _ => None,
    }
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<Intent> {
    let key = match key {
        ShortcutKey::Character(ch) => ShortcutKey::Character(ch.to_ascii_lowercase()),
        other => other,
    };

    if context.crop_active {
        return if modifiers.ctrl {
            None
        } else {
            resolve_crop_shortcut(key)
        };
    }

    resolve_viewer_shortcut(key, modifiers)
}
