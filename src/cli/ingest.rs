//! `ingest` command - load files into the knowledge base

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::warn;

use crate::domain::ingestion::Document;
use crate::AppContext;

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// PDF or TXT files to ingest
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Topic recorded in each chunk's metadata
    #[arg(long)]
    pub topic: Option<String>,
}

/// Ingest each file independently; a failing file does not stop the rest
pub async fn run(ctx: &AppContext, args: IngestArgs) -> anyhow::Result<()> {
    let mut failed = 0;

    for path in &args.files {
        match ingest_file(ctx, path, args.topic.as_deref()).await {
            Ok((documents, chunks)) => {
                println!(
                    "Added {} ({} document(s), {} chunk(s))",
                    path.display(),
                    documents,
                    chunks
                );
            }
            Err(e) => {
                failed += 1;
                warn!(path = %path.display(), error = %e, "Failed to ingest file");
                eprintln!("Error: {}: {}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed to ingest", failed, args.files.len());
    }

    Ok(())
}

async fn ingest_file(
    ctx: &AppContext,
    path: &Path,
    topic: Option<&str>,
) -> anyhow::Result<(usize, usize)> {
    let documents = ctx.loader.load(path).await?;
    let documents = with_topic(documents, topic);

    let result = ctx.rag.ingest(&documents, None).await?;

    Ok((documents.len(), result.chunks))
}

fn with_topic(documents: Vec<Document>, topic: Option<&str>) -> Vec<Document> {
    match topic {
        Some(topic) => documents
            .into_iter()
            .map(|doc| doc.with_metadata("topic", topic))
            .collect(),
        None => documents,
    }
}
