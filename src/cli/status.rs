//! `status` command - knowledge base contents

use crate::AppContext;

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let stats = ctx.rag.stats().await?;

    println!("Backend: {}", ctx.rag.knowledge_base().provider_type());
    println!("Records: {}", stats.total);

    if !stats.sources.is_empty() {
        println!("Sources:");
        for source in &stats.sources {
            println!("  {} ({} chunk(s))", source.source, source.document_count);
        }
    }

    Ok(())
}
