//! Full share round trip against an in-process block cache.
//!
//! Run with: cargo run --example share_roundtrip

use blind_blockcache::MemoryBlockCache;
use blind_client::{Config, DownloadSession, UploadSession};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let cache = Arc::new(MemoryBlockCache::new());

    // sender side
    let mut session = UploadSession::new(cache.clone(), Config::default());
    session.stage_bytes("hello.txt", &b"Hello from the blind side."[..]);
    session.stage_bytes("pattern.bin", (0..1_500_000u32).map(|i| i as u8).collect::<Vec<_>>());
    let share = session.run().await?;

    println!("long link:  {}", share.long_url());
    println!("short link: {}", share.short_url());
    println!("code:       {}", share.code());
    println!("blocks stored: {}", cache.len());

    // recipient side, long form
    let download = DownloadSession::new(cache.clone());
    let index = download.open_anchor(&share.long_anchor(), None).await?;
    for entry in &index {
        let bytes = download.fetch_file(entry).await?;
        println!("fetched {} ({} bytes)", entry.name, bytes.len());
    }

    // recipient side, short form with the spoken code
    let index = download
        .open_anchor(&share.short_anchor(), Some(&share.code()))
        .await?;
    println!("short form resolved {} files", index.len());

    Ok(())
}
