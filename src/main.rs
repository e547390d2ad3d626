use anyhow::{bail, Context, Result};
use tracing::info;

use traffic_flow::{Pipeline, TypeHint};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: traffic_flow <image-path> [auto|traffic_map|chart|screenshot|table]");
    };
    let hint = args
        .next()
        .map(|h| TypeHint::from_hint(&h))
        .unwrap_or(TypeHint::Auto);

    info!("Starting TrafficFlow...");
    let result = Pipeline::new().process_path(&path, hint);

    // Processing failures are part of the envelope, not a process exit code.
    let json = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}
