use clap::{Parser, Subcommand};
use instalearn_common::TopicId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "instalearn")]
#[command(author, version, about = "Turn lesson text into timed microlearning reels")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split text into reels and print them
    Reels {
        /// Text file to read (reads stdin if omitted)
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Seed for reproducible styling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play reels with auto-advance, printing each one as it becomes active
    Play {
        /// Text file to read (reads stdin if omitted)
        file: Option<PathBuf>,

        /// Seed for reproducible styling
        #[arg(long)]
        seed: Option<u64>,

        /// Number of full passes through the batch before stopping
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        loops: u32,
    },

    /// Work with the quiz service
    Quiz {
        #[command(subcommand)]
        command: QuizCommands,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum QuizCommands {
    /// List topics
    Topics,

    /// Create a topic
    AddTopic {
        /// Topic name
        name: String,
    },

    /// List questions
    Questions {
        /// Restrict questions to a topic
        #[arg(long)]
        topic: Option<TopicId>,
    },

    /// Create a multiple-choice question
    AddQuestion {
        /// Question text
        text: String,

        /// Topic the question belongs to
        #[arg(long)]
        topic: Option<TopicId>,

        /// Answer option, in order (repeat for each option, at least two)
        #[arg(long = "option", required = true)]
        options: Vec<String>,

        /// 1-based number of the correct option
        #[arg(long, default_value = "1")]
        correct: usize,

        /// Explanation for the option at the same position (repeatable)
        #[arg(long = "explanation")]
        explanations: Vec<String>,

        /// URL of an image shown with the question
        #[arg(long)]
        image_url: Option<String>,

        /// Lecture the question refers to
        #[arg(long)]
        lecture: Option<String>,
    },

    /// Take a random quiz, answering on stdin
    Take {
        /// Restrict questions to a topic
        #[arg(long)]
        topic: Option<TopicId>,

        /// Number of questions (defaults to the configured count)
        #[arg(long)]
        count: Option<u32>,
    },

    /// Show attempt statistics
    Stats,

    /// Search question text
    Search {
        /// Text to look for
        query: String,

        /// Restrict results to a topic
        #[arg(long)]
        topic: Option<TopicId>,
    },
}
