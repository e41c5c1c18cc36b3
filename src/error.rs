use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set")]
    MissingToken,

    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("questions per test must be at least 1")]
    EmptyTest,

    #[error("questions per test ({test_length}) exceeds the question bank size ({bank_size})")]
    TestLongerThanBank { test_length: usize, bank_size: usize },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("question bank is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question #{index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("question #{index}: `situation` is empty")]
    EmptySituation { index: usize },

    #[error("question #{index}: expected exactly 4 answers, got {count}")]
    AnswerCount { index: usize, count: usize },

    #[error("question #{index}: every answer must be a string")]
    AnswerNotText { index: usize },

    #[error("question #{index}: answer {answer:?} appears more than once")]
    DuplicateAnswer { index: usize, answer: String },

    #[error("question #{index}: correct_idx must be 0..3, got {value}")]
    CorrectIdx { index: usize, value: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active session")]
    NoActiveSession,
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid question bank: {0}")]
    Validation(#[from] ValidationError),

    #[error("health server failed: {0}")]
    Health(#[from] std::io::Error),
}
