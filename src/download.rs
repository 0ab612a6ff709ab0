use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::{Settings, BASE_URL, THREADS};

pub fn user_agent() -> String {
    let platform = "N/A";
    let software = format!(
        "{}:{}:v{}",
        platform,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    format!("{} (by {})", software, env!("CARGO_PKG_AUTHORS"))
}

pub fn thread_url(path: &str) -> String {
    format!("{}/{}/.json", BASE_URL, path)
}

/// Download one thread unless it is already on disk. Existing files are
/// cached data that can only be invalidated by deleting them.
pub async fn download_thread(client: &reqwest::Client, url: &str, path: &Path) -> Result<bool> {
    if tokio::fs::try_exists(path).await? {
        debug!("{} already exists, skipping download", path.display());
        return Ok(false);
    }

    info!("Downloading {}", url);
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let data: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON from {}", url))?;
    let pretty = serde_json::to_string_pretty(&data)?;
    tokio::fs::write(path, pretty)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Download every configured thread concurrently. Each thread is its own
/// file, so one failure doesn't stop the others from being written.
pub async fn download_all(settings: &Settings) -> Result<usize> {
    tokio::fs::create_dir_all(&settings.data_dir)
        .await
        .with_context(|| format!("Failed to create {}", settings.data_dir.display()))?;

    let client = reqwest::Client::builder().user_agent(user_agent()).build()?;
    let mut tasks = JoinSet::new();

    for thread in THREADS {
        let client = client.clone();
        let url = thread_url(thread.path);
        let path: PathBuf = settings.thread_file(thread);
        tasks.spawn(async move {
            let result = download_thread(&client, &url, &path).await;
            (url, result)
        });
    }

    let mut downloaded = 0usize;
    let mut errors = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            (_, Ok(true)) => downloaded += 1,
            (_, Ok(false)) => {}
            (url, Err(e)) => {
                warn!("Download failed for {}: {:#}", url, e);
                errors += 1;
            }
        }
    }

    if errors > 0 {
        bail!("{} of {} thread downloads failed", errors, THREADS.len());
    }
    Ok(downloaded)
}
