//! Multi-step conversion dialogue: amount entry, pair selection, result.

mod controller;
mod menu;
mod small_talk;
mod state;

pub use controller::{Dialogue, Inbound};
pub use menu::{OTHER_PAIR, pair_menu};
pub use state::DialogueState;
