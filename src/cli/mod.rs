//! Command-line interface
//!
//! Subcommands:
//! - `ingest`: load PDF/TXT files into the knowledge base
//! - `generate`: produce educational content for a topic
//! - `query`: show the context retrieved for a question
//! - `clear`: empty the knowledge base
//! - `seed`: ingest the built-in sample documents
//! - `status`: record count and per-source breakdown

pub mod clear;
pub mod generate;
pub mod ingest;
pub mod query;
pub mod seed;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::AppContext;

/// Educational content generator with retrieval-augmented prompts
#[derive(Parser)]
#[command(name = "edu-content-rag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add PDF or text files to the knowledge base
    Ingest(ingest::IngestArgs),

    /// Generate a study guide, quiz, explanation, summary or practice problems
    Generate(generate::GenerateArgs),

    /// Print the context retrieved for a query
    Query(query::QueryArgs),

    /// Delete everything in the knowledge base
    Clear,

    /// Load the sample documents into the knowledge base
    Seed,

    /// Show what the knowledge base contains
    Status,
}

/// Dispatch a parsed command against an initialized context
pub async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Ingest(args) => ingest::run(ctx, args).await,
        Command::Generate(args) => generate::run(ctx, args).await,
        Command::Query(args) => query::run(ctx, args).await,
        Command::Clear => clear::run(ctx).await,
        Command::Seed => seed::run(ctx).await,
        Command::Status => status::run(ctx).await,
    }
}
