//! Telegram bot startup and update dispatch.

use std::sync::Arc;

use log::{debug, info, warn};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, Me};
use teloxide::utils::command::BotCommands;
use tokio::sync::Mutex;

use crate::commands::Command;
use crate::config::Config;
use crate::dialogue::{Dialogue, Inbound};
use crate::error::Result;
use crate::rates::RateClient;
use crate::telegram::{callback_chat, inbound_from_text};
use crate::types::{Reply, UserId};

// Updates are handled one at a time behind this lock.
type SharedDialogue = Arc<Mutex<Dialogue<RateClient>>>;

/// Run the Telegram bot until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    info!("Initializing bot");

    let bot = Bot::new(&config.telegram_token).set_api_url(config.telegram_api_url.clone());
    let rates = RateClient::new(config.rates_api_url.clone(), config.rates_api_key.clone());

    let me = bot.get_me().await?;
    info!(
        "Connected to Telegram as @{}",
        me.user.username.as_deref().unwrap_or(&me.user.first_name)
    );

    debug!("Registering commands");
    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Commands registered successfully"),
        Err(e) => warn!("Failed to register commands: {e}"),
    }

    let dialogue: SharedDialogue = Arc::new(Mutex::new(Dialogue::new(rates)));

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Polling for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dialogue, me])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Shutdown signal received, shutting down...");
    Ok(())
}

async fn on_message(bot: Bot, msg: Message, me: Me, dialogue: SharedDialogue) -> Result<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        debug!("Ignoring message {} without sender or text", msg.id.0);
        return Ok(());
    };

    let inbound = inbound_from_text(text, me.user.username.as_deref());
    respond(&bot, msg.chat.id, UserId::from(user), inbound, &dialogue).await
}

async fn on_callback(bot: Bot, q: CallbackQuery, dialogue: SharedDialogue) -> Result<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        debug!("Failed to acknowledge callback query: {e}");
    }

    let Some(data) = q.data.clone() else {
        debug!("Ignoring callback {} without data", q.id);
        return Ok(());
    };

    let chat_id = callback_chat(q.message.as_ref().map(|m| m.chat().id), &q.from);
    respond(&bot, chat_id, UserId::from(&q.from), Inbound::Choice(data), &dialogue).await
}

async fn respond(
    bot: &Bot,
    chat_id: ChatId,
    user: UserId,
    inbound: Inbound,
    dialogue: &SharedDialogue,
) -> Result<()> {
    info!("Received {inbound:?} from user {user} in chat {chat_id}");

    let Some(Reply { text, keyboard }) = dialogue.lock().await.handle(user, inbound).await else {
        return Ok(());
    };

    let mut request = bot.send_message(chat_id, text.as_str());
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(InlineKeyboardMarkup::from(keyboard));
    }
    request.await?;
    info!("Replied to user {user} in chat {chat_id}: {text}");

    Ok(())
}
