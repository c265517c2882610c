use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{CurrencyCode, UserId};

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid currency pair: {0:?}")]
    InvalidPairFormat(String),

    #[error("No pending amount for user {0}")]
    NoPendingAmount(UserId),

    #[error("Rate service error ({status}): {message}")]
    RateFetch { status: StatusCode, message: String },

    #[error("Rate service unreachable: {0}")]
    RateUnavailable(reqwest::Error),

    #[error("Rate for {0} missing from rate service response")]
    MissingRate(CurrencyCode),

    #[error("Unusable rate {rate} for {code}")]
    InvalidRate { code: CurrencyCode, rate: f64 },

    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Returns a user-friendly error message suitable for sending to the chat
    pub fn user_message(&self) -> String {
        match self {
            BotError::InvalidAmount(_) => "Неверный формат или число <= 0.".to_string(),
            BotError::InvalidPairFormat(_) => {
                "Неверный формат. Введите пару валют через слэш (например, USD/EUR)".to_string()
            }
            BotError::NoPendingAmount(_) => "Произошла ошибка, попробуйте еще раз.".to_string(),
            BotError::RateFetch { .. }
            | BotError::RateUnavailable(_)
            | BotError::MissingRate(_)
            | BotError::InvalidRate { .. } => {
                "Ошибка при получении данных о курсах валют.".to_string()
            }
            BotError::Config(_) | BotError::Io(_) => {
                "Ошибка конфигурации бота. Обратитесь к администратору.".to_string()
            }
            BotError::Telegram(_) => {
                "Проблемы с сетью. Попробуйте еще раз чуть позже.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
