use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    strive_cli::run_cli().await
}
