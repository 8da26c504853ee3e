use anyhow::{Context, Result};
use generate::{OpenAiClient, ProductGenerator, to_data_uri};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: describe_image <image-file>")?;

    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {path}"))?;
    let data_uri = to_data_uri(&bytes, None)?;

    let client = OpenAiClient::from_env()?;
    let generator = ProductGenerator::new(client);

    let facts = generator.describe_product_image(&data_uri).await?;

    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}
