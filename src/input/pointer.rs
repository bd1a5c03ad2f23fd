use crate::geometry::ToolPoint;
use crate::session::Intent;

/// Primary-button event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { x: i32, y: i32 },
    Release { x: i32, y: i32 },
}

/// Pointer input only matters while the pointer crop tool is armed.
pub fn resolve_pointer(event: PointerEvent, pointer_crop_active: bool) -> Option<Intent> {
    if !pointer_crop_active {
        return None;
    }
    Some(match event {
        PointerEvent::Press { x, y } => Intent::PointerPress(ToolPoint::new(x, y)),
        PointerEvent::Release { x, y } => Intent::PointerRelease(ToolPoint::new(x, y)),
    })
}
