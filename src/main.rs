use std::{process::ExitCode, sync::Arc};

use dotenv::dotenv;
use log::{error, info};
use right_questions_bot::{
    config::Config,
    error::StartupError,
    handlers, health,
    quiz::{bank::load_questions_from_path, QuizService},
};
use teloxide::Bot;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine, the variables may come from the environment
    dotenv().ok();
    pretty_env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    info!("Loading questions from {}", config.questions_file.display());
    let questions = load_questions_from_path(&config.questions_file)?;
    let quiz = Arc::new(QuizService::new(questions, config.questions_per_test)?);
    info!(
        "Loaded {} questions, {} per test",
        quiz.bank_size(),
        quiz.test_length()
    );

    let listener = health::bind(config.port).await?;
    info!("Health server listening on port {}", config.port);
    tokio::spawn(async move {
        if let Err(err) = health::serve(listener).await {
            error!("Health server stopped: {}", err);
        }
    });

    let bot = Bot::new(config.bot_token);
    handlers::run(bot, quiz).await;
    Ok(())
}
