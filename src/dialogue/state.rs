//! Per-user dialogue state.

use std::collections::HashMap;

use crate::types::UserId;

/// What the dialogue expects next from a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogueState {
    #[default]
    Idle,
    /// `/convert` was sent; the next text is the amount.
    AwaitingAmount,
    /// The pair menu is showing; a button tap is expected.
    AwaitingPairChoice,
    /// "Other" was tapped; the next text is a `SRC/TGT` pair.
    AwaitingCustomPair,
}

#[derive(Debug, Default)]
pub(super) struct DialogueStates {
    states: HashMap<UserId, DialogueState>,
}

impl DialogueStates {
    pub(super) fn get(&self, user: UserId) -> DialogueState {
        self.states.get(&user).copied().unwrap_or_default()
    }

    pub(super) fn set(&mut self, user: UserId, state: DialogueState) {
        if state == DialogueState::Idle {
            self.states.remove(&user);
        } else {
            self.states.insert(user, state);
        }
    }

    /// Remove and return the user's state, leaving them idle.
    pub(super) fn take(&mut self, user: UserId) -> DialogueState {
        self.states.remove(&user).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_is_idle() {
        let states = DialogueStates::default();
        assert_eq!(states.get(UserId(1)), DialogueState::Idle);
    }

    #[test]
    fn take_consumes_the_state() {
        let mut states = DialogueStates::default();
        states.set(UserId(1), DialogueState::AwaitingAmount);
        assert_eq!(states.take(UserId(1)), DialogueState::AwaitingAmount);
        assert_eq!(states.get(UserId(1)), DialogueState::Idle);
    }
}
