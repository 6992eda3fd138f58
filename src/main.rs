use anyhow::Result;
use dexview::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
