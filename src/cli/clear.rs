//! `clear` command

use crate::AppContext;

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let removed = ctx.rag.clear().await?;
    println!("Knowledge base cleared ({} record(s) removed)", removed);
    Ok(())
}
