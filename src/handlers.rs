use std::{fmt::Display, future::Future, sync::Arc};

use log::{debug, info, warn};
use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::ParseMode,
    utils::command::BotCommands,
    RequestError,
};

use crate::error::SessionError;
use crate::keyboard::{self, CallbackAction};
use crate::quiz::{session::AnswerOutcome, Progress, QuizService};

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступні команди:")]
pub enum Command {
    #[command(description = "почати тест")]
    Start,
    #[command(description = "пройти тест ще раз")]
    Restart,
}

/// How the pressed button itself gets acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackReply {
    Empty,
    Toast(&'static str),
    Alert(&'static str),
}

/// Everything the bot sends in response to one button press, in order:
/// keyboard cleanup, feedback, callback acknowledgment, next screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPlan {
    pub remove_keyboard: bool,
    pub feedback: Option<AnswerOutcome>,
    pub reply: CallbackReply,
    pub next: Option<Progress>,
}

impl CallbackPlan {
    pub fn ignore() -> Self {
        Self {
            remove_keyboard: false,
            feedback: None,
            reply: CallbackReply::Empty,
            next: None,
        }
    }

    pub fn restart(progress: Progress) -> Self {
        Self {
            remove_keyboard: true,
            feedback: None,
            reply: CallbackReply::Toast(keyboard::RESTART_TOAST),
            next: Some(progress),
        }
    }

    pub fn answered(result: Result<Option<(AnswerOutcome, Progress)>, SessionError>) -> Self {
        match result {
            Err(SessionError::NoActiveSession) => Self {
                reply: CallbackReply::Alert(keyboard::START_HINT),
                ..Self::ignore()
            },
            Ok(None) => Self::ignore(),
            Ok(Some((outcome, progress))) => Self {
                remove_keyboard: true,
                feedback: Some(outcome),
                reply: CallbackReply::Empty,
                next: Some(progress),
            },
        }
    }
}

/// Where replies to a button press go: the chat holding the pressed message,
/// or the user's private chat when Telegram did not include the message.
pub fn reply_chat(message_chat: Option<ChatId>, user: UserId) -> ChatId {
    message_chat.unwrap_or_else(|| user.into())
}

/// Text sent before the first question, if any.
pub fn command_intro(cmd: &Command, first_name: &str, total: usize) -> Option<String> {
    match cmd {
        Command::Start => Some(keyboard::welcome_text(Some(first_name), total)),
        Command::Restart => None,
    }
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command),
        )
        .branch(Update::filter_callback_query().endpoint(callback))
}

pub async fn run(bot: Bot, quiz: Arc<QuizService>) {
    // Only affects the command menu in clients
    best_effort("Registering bot commands", async {
        bot.set_my_commands(Command::bot_commands()).await
    })
    .await;

    info!("Starting quiz bot...");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![quiz])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn command(bot: Bot, msg: Message, cmd: Command, quiz: Arc<QuizService>) -> HandlerResult {
    let Some(user) = msg.from() else {
        warn!("Command {:?} without a sender in chat {}", cmd, msg.chat.id);
        return Ok(());
    };

    debug!("User {} sent {:?}", user.id, cmd);
    let progress = match cmd {
        Command::Start => quiz.begin(user.id).await,
        Command::Restart => quiz.restart(user.id).await,
    };
    if let Some(intro) = command_intro(&cmd, &user.first_name, quiz.test_length()) {
        bot.send_message(msg.chat.id, intro).await?;
    }
    send_progress(&bot, msg.chat.id, &progress).await?;
    Ok(())
}

async fn callback(bot: Bot, q: CallbackQuery, quiz: Arc<QuizService>) -> HandlerResult {
    let plan = match q.data.as_deref().map(str::parse::<CallbackAction>) {
        Some(Ok(CallbackAction::Restart)) => {
            debug!("User {} restarts via button", q.from.id);
            CallbackPlan::restart(quiz.restart(q.from.id).await)
        }
        Some(Ok(CallbackAction::Answer(chosen))) => {
            debug!("User {} picked {}", q.from.id, chosen);
            CallbackPlan::answered(quiz.answer(q.from.id, chosen).await)
        }
        _ => {
            warn!("Ignoring callback {:?} from user {}", q.data, q.from.id);
            CallbackPlan::ignore()
        }
    };

    let chat_id = reply_chat(q.message.as_ref().map(|message| message.chat.id), q.from.id);
    carry_out(&bot, &q, chat_id, plan).await?;
    Ok(())
}

async fn carry_out(
    bot: &Bot,
    q: &CallbackQuery,
    chat_id: ChatId,
    plan: CallbackPlan,
) -> Result<(), RequestError> {
    if plan.remove_keyboard {
        remove_keyboard(bot, q).await;
    }
    if let Some(outcome) = &plan.feedback {
        bot.send_message(chat_id, keyboard::feedback_text(outcome))
            .await?;
    }
    match plan.reply {
        CallbackReply::Empty => {
            bot.answer_callback_query(&q.id).await?;
        }
        CallbackReply::Toast(text) => {
            bot.answer_callback_query(&q.id).text(text).await?;
        }
        CallbackReply::Alert(text) => {
            bot.answer_callback_query(&q.id)
                .text(text)
                .show_alert(true)
                .await?;
        }
    }
    if let Some(progress) = &plan.next {
        send_progress(bot, chat_id, progress).await?;
    }
    Ok(())
}

/// Strips the buttons from the message that was just pressed so it can't be
/// answered twice. The message may be too old to edit or already stripped.
async fn remove_keyboard(bot: &Bot, q: &CallbackQuery) {
    let Some(message) = &q.message else {
        return;
    };
    best_effort("Removing keyboard", async {
        bot.edit_message_reply_markup(message.chat.id, message.id)
            .await
    })
    .await;
}

/// Awaits a request whose failure must never interrupt the quiz; the error
/// is only logged.
async fn best_effort<T, E, F>(what: &str, request: F)
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    if let Err(err) = request.await {
        debug!("{} failed: {}", what, err);
    }
}

async fn send_progress(bot: &Bot, chat_id: ChatId, progress: &Progress) -> Result<(), RequestError> {
    let screen = keyboard::render(progress);
    bot.send_message(chat_id, screen.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(screen.keyboard)
        .await?;
    Ok(())
}
