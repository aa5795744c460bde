//! `query` command - show retrieved context

use clap::Args;

use crate::infrastructure::services::RagService;
use crate::AppContext;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Question or topic to search for
    pub text: String,

    /// Number of chunks to retrieve (defaults to knowledge_base.top_k)
    #[arg(short = 'k', long)]
    pub k: Option<usize>,
}

pub async fn run(ctx: &AppContext, args: QueryArgs) -> anyhow::Result<()> {
    let k = args.k.unwrap_or_else(|| ctx.rag.top_k());
    let matches = ctx.rag.query(&args.text, k).await?;

    println!("{}", RagService::format_context(&matches));

    Ok(())
}
