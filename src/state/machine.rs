use super::error::{StateError, StateResult};
use super::{event::StateTransition, SessionEvent, SessionState};

#[derive(Debug)]
pub struct StateMachine {
    state: SessionState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn can_transition(&self, event: SessionEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: SessionEvent) -> Option<SessionState> {
        use SessionEvent::*;
        match (self.state, event) {
            (SessionState::Empty, OpenDocument) => Some(SessionState::Viewing),
            (SessionState::Viewing, OpenDocument) => Some(SessionState::Viewing),
            (SessionState::Viewing, CloseDocument) => Some(SessionState::Empty),
            (SessionState::Viewing, StartCrop) => Some(SessionState::Cropping),
            (SessionState::Viewing, StartPointerCrop) => Some(SessionState::PointerCropping),
            (SessionState::Cropping | SessionState::PointerCropping, FinishCrop) => {
                Some(SessionState::Viewing)
            }
            _ => None,
        }
    }

    pub fn transition(&mut self, event: SessionEvent) -> StateResult<SessionState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }

    /// Document-level actions only run while an image is shown and no crop is in progress.
    pub fn require_viewing(&self, action: &'static str) -> StateResult<()> {
        match self.state {
            SessionState::Viewing => Ok(()),
            state => Err(StateError::ActionUnavailable { state, action }),
        }
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionState::{:?}", self.state)
    }
}
