//! Routes commands, text and button taps through the per-user state machine.

use log::{debug, error, info, warn};

use crate::commands::{Command, help_text};
use crate::conversion::convert_pair;
use crate::error::{BotError, Result};
use crate::rates::RateSource;
use crate::session::SessionStore;
use crate::types::{Amount, CurrencyPair, Reply, UserId};

use super::menu::{OTHER_PAIR, pair_menu};
use super::small_talk;
use super::state::{DialogueState, DialogueStates};

const WELCOME: &str = "Добро пожаловать! Я бот для конвертации валют.";
const AMOUNT_PROMPT: &str = "Введите сумму:";
const PAIR_PROMPT: &str = "Выберите пару валют";
const CUSTOM_PAIR_PROMPT: &str = "Введите пару валют через слэш (например, USD/EUR)";

/// One inbound event from a user, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command(Command),
    Text(String),
    /// Data of a tapped inline button.
    Choice(String),
}

/// Conversion dialogue for all users.
///
/// Events are handled one at a time; the controller owns every piece of
/// per-user state.
pub struct Dialogue<R> {
    rates: R,
    sessions: SessionStore,
    states: DialogueStates,
}

impl<R: RateSource> Dialogue<R> {
    pub fn new(rates: R) -> Self {
        Self {
            rates,
            sessions: SessionStore::new(),
            states: DialogueStates::default(),
        }
    }

    pub fn state(&self, user: UserId) -> DialogueState {
        self.states.get(user)
    }

    /// Handle one event and return the reply to send, if any.
    ///
    /// Failures never escape: they are logged and turned into a chat message.
    pub async fn handle(&mut self, user: UserId, inbound: Inbound) -> Option<Reply> {
        match self.dispatch(user, inbound).await {
            Ok(reply) => reply,
            Err(e) => {
                match &e {
                    BotError::InvalidAmount(_) | BotError::InvalidPairFormat(_) => {
                        warn!("User {user} sent bad input: {e}");
                    }
                    _ => error!("Error handling input from user {user}: {e}"),
                }
                Some(Reply::text(e.user_message()))
            }
        }
    }

    async fn dispatch(&mut self, user: UserId, inbound: Inbound) -> Result<Option<Reply>> {
        match inbound {
            Inbound::Command(command) => Ok(Some(self.on_command(user, command))),
            Inbound::Choice(data) => self.on_choice(user, &data).await.map(Some),
            Inbound::Text(text) => match self.states.take(user) {
                DialogueState::AwaitingAmount => self.on_amount(user, &text).map(Some),
                DialogueState::AwaitingCustomPair => {
                    let pair = CurrencyPair::parse(&text)?;
                    self.convert(user, &pair).await.map(Some)
                }
                state @ (DialogueState::Idle | DialogueState::AwaitingPairChoice) => {
                    self.states.set(user, state);
                    Ok(small_talk::reply_to(&text).map(Reply::text))
                }
            },
        }
    }

    fn on_command(&mut self, user: UserId, command: Command) -> Reply {
        debug!("User {user} sent /{command}");
        match command {
            Command::Start => {
                self.states.set(user, DialogueState::Idle);
                Reply::text(WELCOME)
            }
            Command::Help => {
                self.states.set(user, DialogueState::Idle);
                Reply::text(help_text())
            }
            Command::Convert => {
                self.states.set(user, DialogueState::AwaitingAmount);
                Reply::text(AMOUNT_PROMPT)
            }
        }
    }

    fn on_amount(&mut self, user: UserId, text: &str) -> Result<Reply> {
        let amount = Amount::parse(text)?;
        self.sessions.set(user, amount);
        self.states.set(user, DialogueState::AwaitingPairChoice);
        debug!("Stored amount {amount} for user {user}");
        Ok(Reply::with_keyboard(PAIR_PROMPT, pair_menu()))
    }

    async fn on_choice(&mut self, user: UserId, data: &str) -> Result<Reply> {
        if data == OTHER_PAIR {
            self.states.set(user, DialogueState::AwaitingCustomPair);
            return Ok(Reply::text(CUSTOM_PAIR_PROMPT));
        }

        // Buttons from an older menu still work as long as an amount is stored,
        // and leave a pending amount prompt in place.
        if matches!(
            self.states.get(user),
            DialogueState::AwaitingPairChoice | DialogueState::AwaitingCustomPair
        ) {
            self.states.set(user, DialogueState::Idle);
        }
        let pair = CurrencyPair::parse(data)?;
        self.convert(user, &pair).await
    }

    async fn convert(&mut self, user: UserId, pair: &CurrencyPair) -> Result<Reply> {
        let amount = self
            .sessions
            .get(user)
            .ok_or(BotError::NoPendingAmount(user))?;

        let rates = self.rates.latest(&pair.symbols()).await?;
        let conversion = convert_pair(amount, pair, &rates)?;

        info!("Converted for user {user}: {conversion}");
        Ok(Reply::text(conversion.to_string()))
    }
}
