/// Lifecycle of the single editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Viewing,
    Cropping,
    /// Pointer crop armed or anchored; only press, release and cancel apply.
    PointerCropping,
}

impl SessionState {
    pub const fn has_document(self) -> bool {
        !matches!(self, Self::Empty)
    }

    pub const fn is_cropping(self) -> bool {
        matches!(self, Self::Cropping | Self::PointerCropping)
    }
}
