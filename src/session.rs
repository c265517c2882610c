//! Per-user pending amounts.

use std::collections::HashMap;

use crate::types::{Amount, UserId};

/// Amounts waiting for a currency pair, one per user.
///
/// Entries live for the whole process and are only ever overwritten.
#[derive(Debug, Default)]
pub struct SessionStore {
    amounts: HashMap<UserId, Amount>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, user: UserId, amount: Amount) {
        self.amounts.insert(user, amount);
    }

    pub fn get(&self, user: UserId) -> Option<Amount> {
        self.amounts.get(&user).copied()
    }
}
