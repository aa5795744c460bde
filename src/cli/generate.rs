//! `generate` command - produce educational content

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::domain::prompt::{ContentRequest, ContentType, GenerationOutcome};
use crate::AppContext;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// study_guide, quiz, explanation, summary or practice_problems
    #[arg(long = "type", value_name = "CONTENT_TYPE", default_value = "explanation")]
    pub content_type: String,

    /// Subject to write about
    #[arg(long)]
    pub topic: String,

    /// Extra constraints such as audience or length
    #[arg(long)]
    pub requirements: Option<String>,

    /// Skip knowledge base retrieval
    #[arg(long)]
    pub no_rag: bool,

    /// Also print the retrieved context
    #[arg(long)]
    pub show_context: bool,

    /// Save to <content_type>_<topic>.txt in the current directory
    #[arg(long, conflicts_with = "output")]
    pub save: bool,

    /// Save to the given path
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> anyhow::Result<()> {
    let content_type = ContentType::parse(&args.content_type);

    let mut request = ContentRequest::new(content_type, args.topic.clone()).with_retrieval(!args.no_rag);
    if let Some(requirements) = &args.requirements {
        request = request.with_requirements(requirements.clone());
    }

    let result = ctx.content.generate(request).await?;

    let text = match &result.content {
        GenerationOutcome::Generated { text, .. } => text,
        outcome => anyhow::bail!(outcome.display_text()),
    };

    if args.show_context {
        let context = result.context_used.as_deref().unwrap_or("(no context used)");
        println!("{}\nContext\n{}\n{}\n", rule(), rule(), context);
    }

    println!("{}\nGenerated {}\n{}\n", rule(), content_type.display_name(), rule());
    println!("{}", text);

    let target = match (args.output, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(save_file_name(content_type, &args.topic))),
        (None, false) => None,
    };

    if let Some(path) = target {
        tokio::fs::write(&path, render_saved(content_type, &args.topic, text))
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nSaved to: {}", path.display());
    }

    Ok(())
}

fn rule() -> String {
    "=".repeat(60)
}

/// `quiz` + `Cell Biology` gives `quiz_Cell_Biology.txt`
pub fn save_file_name(content_type: ContentType, topic: &str) -> String {
    format!("{}_{}.txt", content_type.as_str(), topic.replace(' ', "_"))
}

/// File body: topic and type header, a rule, then the content
pub fn render_saved(content_type: ContentType, topic: &str, content: &str) -> String {
    format!(
        "Topic: {}\nType: {}\n{}\n\n{}",
        topic,
        content_type.display_name(),
        rule(),
        content
    )
}
