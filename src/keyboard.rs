use std::str::FromStr;

use rand::seq::SliceRandom;
use teloxide::{
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::html,
};

use crate::quiz::{session::AnswerOutcome, Progress};

// Telegram cuts long button captions, so keep them well under the limit
pub const BUTTON_TEXT_LIMIT: usize = 60;
pub const FUN_EMOJIS: [&str; 9] = ["🔥", "🚀", "🎯", "💪", "🏆", "😎", "✨", "🥳", "🤟"];

pub const DEFAULT_NAME: &str = "друже/подруго";
pub const RESTART_BUTTON_TEXT: &str = "🔁 Пройти ще раз";
pub const RESTART_TOAST: &str = "Поїхали! 🚀";
pub const START_HINT: &str = "Натисни /start";

const ANSWER_PREFIX: &str = "ans:";
const RESTART_DATA: &str = "restart";

/// What an inline button press asks for. Answer indexes must fit in `usize`;
/// larger numbers are treated as unknown callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Restart,
    Answer(usize),
}

impl CallbackAction {
    pub fn to_data(self) -> String {
        match self {
            CallbackAction::Restart => RESTART_DATA.to_string(),
            CallbackAction::Answer(idx) => format!("{}{}", ANSWER_PREFIX, idx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCallback(pub String);

impl FromStr for CallbackAction {
    type Err = UnknownCallback;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        if data == RESTART_DATA {
            return Ok(CallbackAction::Restart);
        }
        data.strip_prefix(ANSWER_PREFIX)
            .and_then(|idx| idx.parse().ok())
            .map(CallbackAction::Answer)
            .ok_or_else(|| UnknownCallback(data.to_string()))
    }
}

/// Message text plus the buttons to attach to it.
#[derive(Debug, Clone)]
pub struct Screen {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

pub fn truncate_for_button(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn answers_keyboard(answers: &[String]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(answers.iter().enumerate().map(|(idx, answer)| {
        vec![InlineKeyboardButton::callback(
            truncate_for_button(answer, BUTTON_TEXT_LIMIT),
            CallbackAction::Answer(idx).to_data(),
        )]
    }))
}

pub fn restart_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        RESTART_BUTTON_TEXT,
        CallbackAction::Restart.to_data(),
    )]])
}

pub fn welcome_text(first_name: Option<&str>, total: usize) -> String {
    let name = first_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_NAME);
    format!(
        "Привіт, {} 👋\n\nПеревір свої знання відповівши на {} питань.\nОбирай відповідь на кнопці.\n\nГотов(а)? 🚀",
        name, total
    )
}

/// Renders the next question, or the summary once the test is over.
/// The question text is sent with HTML parse mode.
pub fn render(progress: &Progress) -> Screen {
    match progress {
        Progress::Question {
            number,
            total,
            question,
        } => Screen {
            text: format!(
                "Питання {}/{}\n\n<b>{}</b>",
                number,
                total,
                html::escape(question.situation())
            ),
            keyboard: answers_keyboard(question.answers()),
        },
        Progress::Complete { score, total } => Screen {
            text: format!(
                "✅ Тест завершено!\n\nТвій результат: {}/{}\n\nХочеш спробувати ще раз?",
                score, total
            ),
            keyboard: restart_keyboard(),
        },
    }
}

pub fn feedback_text(outcome: &AnswerOutcome) -> String {
    if outcome.is_correct {
        let emoji = FUN_EMOJIS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("🎯");
        format!("{} Вірно!", emoji)
    } else {
        format!("Не вірно.\nПравильна відповідь – {}", outcome.correct_answer)
    }
}
