use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = firefly_auto_savings::args::parse();
    firefly_auto_savings::cli::main(args).await
}
