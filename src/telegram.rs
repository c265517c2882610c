//! Conversions between teloxide's Telegram types and the dialogue's.

use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, User};

use crate::commands::Command;
use crate::dialogue::Inbound;
use crate::types::{Keyboard, UserId};

impl From<Keyboard> for InlineKeyboardMarkup {
    fn from(keyboard: Keyboard) -> Self {
        InlineKeyboardMarkup::new(keyboard.rows.into_iter().map(|row| {
            row.into_iter()
                .map(|button| InlineKeyboardButton::callback(button.label, button.data))
        }))
    }
}

impl From<&User> for UserId {
    fn from(user: &User) -> Self {
        UserId(user.id.0)
    }
}

/// Classify message text as one of our commands or plain text.
pub fn inbound_from_text(text: &str, bot_username: Option<&str>) -> Inbound {
    match Command::from_text(text, bot_username) {
        Some(command) => Inbound::Command(command),
        None => Inbound::Text(text.to_string()),
    }
}

/// Chat a callback reply goes to: the chat of the tapped message, or the
/// user's private chat when Telegram no longer sends that message.
pub fn callback_chat(message_chat: Option<ChatId>, from: &User) -> ChatId {
    message_chat.unwrap_or(ChatId::from(from.id))
}
