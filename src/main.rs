//! Quizpot API server
//!
//! Boots the engine with in-memory collaborators and serves the game
//! operations over HTTP. `--seed-demo` loads a demo level and a few
//! funded accounts so the API is playable out of the box.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use quizpot::api::create_router;
use quizpot::config::EngineConfig;
use quizpot::ledger::InMemoryLedger;
use quizpot::questions::{AnswerOption, InMemoryQuestionBank, Question};
use quizpot::secrets::InMemorySecrets;
use quizpot::services::EngineBuilder;

#[derive(Parser, Debug)]
#[command(name = "quizpot", about = "Wagered multiplayer quiz settlement engine")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// Seed a demo level and demo accounts
    #[arg(long, default_value_t = false)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };

    let ledger = Arc::new(InMemoryLedger::new());
    let secrets = Arc::new(InMemorySecrets::new());
    let questions = Arc::new(InMemoryQuestionBank::new());
    if args.seed_demo {
        seed_demo_data(&ledger, &secrets, &questions);
        tracing::info!("demo level and accounts seeded");
    }

    let bind = args.bind.unwrap_or_else(|| {
        format!(
            "{}:{}",
            config.server.bind_address, config.server.bind_port
        )
    });

    let services = Arc::new(
        EngineBuilder::new(config)
            .with_ledger(ledger)
            .with_secrets(secrets)
            .with_question_bank(questions)
            .build(),
    );

    // Finish any settlement a previous process left interrupted.
    let resumed = services.settlement.resume_all().await?;
    if resumed > 0 {
        tracing::info!(resumed, "resumed interrupted settlements");
    }

    let router = create_router(Arc::clone(&services));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "quizpot listening");
    axum::serve(listener, router).await?;
    Ok(())
}

fn seed_demo_data(
    ledger: &InMemoryLedger,
    secrets: &InMemorySecrets,
    questions: &InMemoryQuestionBank,
) {
    for (user, balance) in [
        ("alice", 1_000_000),
        ("bob", 1_000_000),
        ("carol", 1_000_000),
        ("dave", 250_000),
    ] {
        ledger.open_account(user, balance);
        secrets.set_secret(user, "1234");
    }

    let bank: Vec<(&str, &str, &str, AnswerOption)> = vec![
        ("Which planet is closest to the sun?", "Mercury", "Venus", AnswerOption::A),
        ("What is the chemical symbol for gold?", "Ag", "Au", AnswerOption::B),
        ("How many continents are there?", "Seven", "Six", AnswerOption::A),
        ("Which ocean is the largest?", "Atlantic", "Pacific", AnswerOption::B),
        ("What gas do plants absorb?", "Carbon dioxide", "Oxygen", AnswerOption::A),
        ("Which language has the most native speakers?", "English", "Mandarin", AnswerOption::B),
        ("What is the tallest mountain on Earth?", "Everest", "K2", AnswerOption::A),
        ("Which metal is liquid at room temperature?", "Lead", "Mercury", AnswerOption::B),
        ("How many sides does a hexagon have?", "Six", "Eight", AnswerOption::A),
        ("Which country hosted the 2016 Olympics?", "Argentina", "Brazil", AnswerOption::B),
        ("What is the largest mammal?", "Blue whale", "Elephant", AnswerOption::A),
        ("Which element has atomic number 1?", "Helium", "Hydrogen", AnswerOption::B),
        ("How many minutes are in a day?", "1440", "1400", AnswerOption::A),
        ("Which river is the longest?", "Amazon", "Nile", AnswerOption::B),
        ("What is the speed of light, roughly?", "300,000 km/s", "150,000 km/s", AnswerOption::A),
    ];
    let level: Vec<Question> = bank
        .into_iter()
        .enumerate()
        .map(|(i, (text, a, b, correct))| Question {
            id: format!("demo-{}", i + 1),
            text: text.to_string(),
            option_a: a.to_string(),
            option_b: b.to_string(),
            correct_option: correct,
            time_limit_seconds: 15,
        })
        .collect();
    questions.insert_level("general-knowledge", level);
}
