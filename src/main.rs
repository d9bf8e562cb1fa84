mod cli;

use instalearn::config::{self, Config};
use instalearn::playback::{PlaybackController, PlaybackEvent};
use instalearn::quiz::{HttpQuizClient, QuestionDraft, QuizApi, QuizSession, MIN_OPTIONS};
use instalearn_common::TopicId;
use instalearn_reels::{RandomChooser, Reel};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, QuizCommands};
use std::io::{Read, Write};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "instalearn=trace,instalearn_reels=debug,reqwest=debug".to_string()
        } else {
            "instalearn=info".to_string()
        }
    });

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Reels { file, json, seed } => print_reels(file.as_deref(), json, seed),
        Commands::Play { file, seed, loops } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let text = read_input(file.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(play(config, text, seed, loops))
        }
        Commands::Quiz { command } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_quiz(config, command))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("instalearn {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_reel(reel: &Reel, index: usize, total: usize) {
    let style = reel.style();
    println!(
        "[{}/{}] {:.1}s  {}",
        index + 1,
        total,
        reel.duration(),
        reel.content()
    );
    println!(
        "        {} {} {} {} {}",
        style.font_weight.as_css(),
        style.font_style.as_css(),
        style.text_align.as_css(),
        style.color.hex(),
        style.font_size.as_css()
    );
}

fn print_reels(file: Option<&Path>, json: bool, seed: Option<u64>) -> Result<()> {
    let text = read_input(file)?;
    let reels = match seed {
        Some(seed) => instalearn_reels::generate_with(&text, &mut RandomChooser::seeded(seed)),
        None => instalearn_reels::generate(&text),
    };
    tracing::info!(reels = reels.len(), "Generated reels");

    if json {
        println!("{}", serde_json::to_string_pretty(&reels)?);
        return Ok(());
    }

    if reels.is_empty() {
        println!("No sentences found in input.");
        return Ok(());
    }
    for (i, reel) in reels.iter().enumerate() {
        print_reel(reel, i, reels.len());
    }
    let total: f64 = reels.iter().map(Reel::duration).sum();
    println!("\n{} reels, {:.1}s total", reels.len(), total);
    Ok(())
}

async fn play(config: Config, text: String, seed: Option<u64>, loops: u32) -> Result<()> {
    let (handle, task) = PlaybackController::spawn(config.playback.clone());
    let mut events = handle.subscribe();

    handle.set_input(text).await?;
    match seed {
        Some(seed) => handle.regenerate_seeded(seed).await?,
        None => handle.regenerate().await?,
    }

    let snapshot = handle.snapshot().await?;
    if snapshot.reels.is_empty() {
        println!("No sentences found in input.");
        handle.shutdown().await?;
        task.await?;
        return Ok(());
    }

    let total = snapshot.reels.len();
    tracing::info!(reels = total, loops, "Starting playback");

    let mut passes = 0;
    let mut started = false;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(PlaybackEvent::ReelActivated { index, .. }) => {
                    if index == 0 && started {
                        passes += 1;
                        if passes >= loops {
                            break;
                        }
                    }
                    started = true;
                    if let Some(reel) = snapshot.reels.get(index) {
                        print_reel(reel, index, total);
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Playback events lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping playback");
                break;
            }
        }
    }

    // The controller may already be gone if the channel closed
    let _ = handle.shutdown().await;
    task.await?;
    Ok(())
}

async fn run_quiz(config: Config, command: QuizCommands) -> Result<()> {
    let client = HttpQuizClient::new(&config.quiz);

    match command {
        QuizCommands::Topics => {
            let topics = client.list_topics().await?;
            if topics.is_empty() {
                println!("No topics yet.");
            }
            for topic in topics {
                println!("{:>4}  {}", topic.id, topic.name);
            }
        }
        QuizCommands::AddTopic { name } => {
            let topic = client.create_topic(&name).await?;
            println!("Created topic {} ({})", topic.name, topic.id);
        }
        QuizCommands::Questions { topic } => {
            let questions = client.list_questions(topic).await?;
            if questions.is_empty() {
                println!("No questions yet.");
            }
            for question in questions {
                println!(
                    "{:>4}  [{}] {} ({} options)",
                    question.id,
                    question.topic_name.as_deref().unwrap_or("-"),
                    question.text,
                    question.options.len()
                );
            }
        }
        QuizCommands::AddQuestion {
            text,
            topic,
            options,
            correct,
            explanations,
            image_url,
            lecture,
        } => {
            let draft = question_draft(
                text,
                topic,
                &options,
                correct,
                &explanations,
                image_url,
                lecture,
            )?;
            let question = draft.build()?;
            let id = client.create_question(&question).await?;
            println!("Created question {}", id);
        }
        QuizCommands::Take { topic, count } => {
            let count = count.unwrap_or(config.quiz.question_count);
            take_quiz(&client, topic, count).await?;
        }
        QuizCommands::Stats => {
            let stats = client.stats().await?;
            if stats.is_empty() {
                println!("No statistics yet.");
            }
            for stat in stats {
                let last = stat
                    .last_attempt_date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{:>5.1}%  {:>3} ok {:>3} wrong  last {}  [{}] {}",
                    stat.success_rate,
                    stat.correct_attempts,
                    stat.incorrect_attempts,
                    last,
                    stat.topic_name.as_deref().unwrap_or("-"),
                    stat.question_text
                );
            }
        }
        QuizCommands::Search { query, topic } => {
            let found = client.search(&query, topic).await?;
            println!("{} result(s)", found.count);
            for question in found.results {
                println!(
                    "{:>4}  [{}] {}",
                    question.id,
                    question.topic_name.as_deref().unwrap_or("-"),
                    question.text
                );
            }
        }
    }

    Ok(())
}

fn question_draft(
    text: String,
    topic: Option<TopicId>,
    options: &[String],
    correct: usize,
    explanations: &[String],
    image_url: Option<String>,
    lecture: Option<String>,
) -> Result<QuestionDraft> {
    if options.len() < MIN_OPTIONS {
        anyhow::bail!("A question must have at least {} options", MIN_OPTIONS);
    }
    if explanations.len() > options.len() {
        anyhow::bail!(
            "Got {} explanations for {} options",
            explanations.len(),
            options.len()
        );
    }

    let mut draft = QuestionDraft::new();
    draft.text = text;
    draft.topic_id = topic;
    draft.image_url = image_url.unwrap_or_default();
    draft.lecture_reference = lecture.unwrap_or_default();

    while draft.options().len() < options.len() {
        draft.add_option();
    }
    for (i, option) in options.iter().enumerate() {
        draft.set_option_text(i, option.as_str())?;
    }
    for (i, explanation) in explanations.iter().enumerate() {
        draft.set_explanation(i, explanation.as_str())?;
    }

    let index = correct
        .checked_sub(1)
        .filter(|&i| i < options.len())
        .with_context(|| format!("--correct must be between 1 and {}", options.len()))?;
    draft.mark_correct(index)?;

    Ok(draft)
}

async fn take_quiz(client: &HttpQuizClient, topic: Option<TopicId>, count: u32) -> Result<()> {
    let questions = client.random_quiz(count, topic).await?;
    if questions.is_empty() {
        println!("No questions available.");
        return Ok(());
    }

    let mut session = QuizSession::new(questions);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    'questions: while let Some(question) = session.current().cloned() {
        println!(
            "\nQuestion {}/{}: {}",
            session.index() + 1,
            session.len(),
            question.text
        );
        if let Some(reference) = &question.lecture_reference {
            println!("  (see {})", reference);
        }
        if let Some(url) = client.image_url(&question) {
            println!("  Image: {}", url);
        }
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.text);
        }

        let outcome = loop {
            print!("Answer [1-{}, q to quit]: ", question.options.len());
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break 'questions;
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                break 'questions;
            }

            let choice = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| question.options.get(i));
            match choice {
                Some(option) => break session.answer(option.id)?,
                None => println!("Please enter a number between 1 and {}.", question.options.len()),
            }
        };

        if outcome.is_correct {
            println!("Correct!");
        } else {
            println!("Incorrect. The answer is: {}", outcome.correct_answer);
        }
        if let Some(explanation) = &outcome.explanation {
            println!("  {}", explanation);
        }

        if let Err(e) = client
            .record_attempt(outcome.question_id, outcome.is_correct)
            .await
        {
            tracing::warn!(question_id = %outcome.question_id, "Failed to record attempt: {}", e);
        }

        session.next();
    }

    let (correct, answered) = session.score();
    println!("\nScore: {}/{}", correct, answered);

    match client.stats().await {
        Ok(stats) => {
            for stat in session.filter_stats(&stats) {
                println!(
                    "  {:>5.1}%  {}",
                    stat.success_rate, stat.question_text
                );
            }
        }
        Err(e) => tracing::warn!("Failed to fetch stats: {}", e),
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!(
        "  Playback: tick {}ms, advance delay {}ms",
        config.playback.tick_interval_ms, config.playback.advance_delay_ms
    );
    println!(
        "  Quiz API: {} (timeout {}s, {} questions)",
        config.quiz.api_url, config.quiz.timeout_secs, config.quiz.question_count
    );
}
