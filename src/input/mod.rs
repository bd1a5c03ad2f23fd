mod pointer;
mod shortcut;

pub use pointer::{resolve_pointer, PointerEvent};
pub use shortcut::{
    resolve_shortcut, InputContext, KeyChord, KeyChordParseError, ShortcutKey, ShortcutModifiers,
};
