pub mod bank;
pub mod session;
pub mod store;

use rand::seq::SliceRandom;
use teloxide::types::UserId;

use crate::error::{ConfigError, SessionError};
use session::{AnswerOutcome, Session};
use store::SessionStore;

pub const ANSWERS_PER_QUESTION: usize = 4;

/// A validated multiple-choice question. Only the bank loader builds these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    situation: String,
    answers: [String; ANSWERS_PER_QUESTION],
    correct_idx: usize,
}

impl Question {
    pub fn situation(&self) -> &str {
        &self.situation
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn correct_idx(&self) -> usize {
        self.correct_idx
    }

    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_idx]
    }
}

/// What the user should see next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Question {
        number: usize,
        total: usize,
        question: Question,
    },
    Complete {
        score: usize,
        total: usize,
    },
}

impl Progress {
    fn of(session: &Session) -> Self {
        match session.current_question() {
            Some(question) => Progress::Question {
                number: session.current_index() + 1,
                total: session.total(),
                question: question.clone(),
            },
            None => Progress::Complete {
                score: session.score(),
                total: session.total(),
            },
        }
    }
}

/// Owns the question bank and every user's session.
pub struct QuizService {
    bank: Vec<Question>,
    test_length: usize,
    sessions: SessionStore<UserId>,
}

impl QuizService {
    /// Fails when a test of `test_length` cannot be drawn from `bank`.
    pub fn new(bank: Vec<Question>, test_length: usize) -> Result<Self, ConfigError> {
        if test_length == 0 {
            return Err(ConfigError::EmptyTest);
        }
        if test_length > bank.len() {
            return Err(ConfigError::TestLongerThanBank {
                test_length,
                bank_size: bank.len(),
            });
        }
        Ok(Self {
            bank,
            test_length,
            sessions: SessionStore::new(),
        })
    }

    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    pub fn test_length(&self) -> usize {
        self.test_length
    }

    fn sample_questions(&self) -> Vec<Question> {
        let mut rng = rand::thread_rng();
        let mut picked: Vec<Question> = self
            .bank
            .choose_multiple(&mut rng, self.test_length)
            .cloned()
            .collect();
        picked.shuffle(&mut rng);
        picked
    }

    /// Starts a fresh test for `user`, discarding any previous one.
    pub async fn begin(&self, user: UserId) -> Progress {
        let session = Session::new(self.sample_questions());
        let progress = Progress::of(&session);
        self.sessions.put(user, session).await;
        progress
    }

    pub async fn restart(&self, user: UserId) -> Progress {
        self.begin(user).await
    }

    /// Returns `Ok(None)` when the user's test is already over.
    pub async fn answer(
        &self,
        user: UserId,
        chosen_index: usize,
    ) -> Result<Option<(AnswerOutcome, Progress)>, SessionError> {
        self.sessions
            .update(&user, |session| {
                session
                    .submit_answer(chosen_index)
                    .map(|outcome| (outcome, Progress::of(session)))
            })
            .await
            .ok_or(SessionError::NoActiveSession)
    }

    #[cfg(test)]
    pub(crate) async fn progress(&self, user: UserId) -> Option<Progress> {
        self.sessions.get(&user).await.map(|session| Progress::of(&session))
    }

    #[cfg(test)]
    pub(crate) async fn session(&self, user: UserId) -> Option<Session> {
        self.sessions.get(&user).await
    }
}
