use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::denormalize::{self, SizeRecord, ThreadComments};

pub fn read_thread(path: &Path) -> Result<ThreadComments> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read thread {}", path.display()))?;
    let thread = denormalize::parse_thread(&contents)
        .with_context(|| format!("Failed to parse thread {}", path.display()))?;
    debug!(
        "{}: r/{} thread {} posted {}",
        path.display(),
        thread.op.subreddit,
        thread.op.id,
        thread
            .op
            .created_utc
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "at an unknown date".into())
    );
    Ok(thread)
}

/// Downloaded thread files, sorted by name so output order is stable.
pub fn thread_files(settings: &Settings) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(&settings.data_dir)
        .with_context(|| format!("Failed to list {}", settings.data_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && settings.is_thread_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract every downloaded thread. Threads are independent, so they are
/// processed in parallel and concatenated in file order.
pub fn read_all(settings: &Settings) -> Result<Vec<SizeRecord>> {
    let files = thread_files(settings)?;
    if files.is_empty() {
        warn!(
            "No thread files in {}. Run 'download' first.",
            settings.data_dir.display()
        );
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} threads")?
            .progress_chars("=> "),
    );

    let per_thread: Vec<Vec<SizeRecord>> = files
        .par_iter()
        .map(|path| -> Result<Vec<SizeRecord>> {
            let thread = read_thread(path)?;
            let records = denormalize::extract(&thread)
                .with_context(|| format!("Failed to extract sizes from {}", path.display()))?;
            info!("{}: {} size records", path.display(), records.len());
            pb.inc(1);
            Ok(records)
        })
        .collect::<Result<_>>()?;

    pb.finish_and_clear();
    Ok(per_thread.into_iter().flatten().collect())
}

pub fn write_records(records: &[SizeRecord], path: &Path) -> Result<()> {
    let data = serde_json::to_string_pretty(records)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Extract every thread and replace the records file, even when nothing was
/// found, so it never outlives the threads it came from.
pub fn extract_records(settings: &Settings) -> Result<Vec<SizeRecord>> {
    let records = read_all(settings)?;
    write_records(&records, &settings.records_file())?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(dir: &Path) -> Settings {
        Settings {
            data_dir: dir.to_path_buf(),
            build_dir: dir.join("build"),
            prefix: "last-sizing-thread-".into(),
        }
    }

    #[test]
    fn reads_only_thread_files() -> Result<()> {
        let temp = tempfile::TempDir::new()?;
        let fixture = fs::read_to_string("tests/fixtures/thread.json")?;
        fs::write(temp.path().join("last-sizing-thread-2018.json"), &fixture)?;
        fs::write(temp.path().join("last-sizing-thread-2017.json"), &fixture)?;
        fs::write(temp.path().join("size-records.json"), "not a thread")?;

        let s = settings(temp.path());
        let files = thread_files(&s)?;
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("last-sizing-thread-2017.json"));

        let records = read_all(&s)?;
        assert_eq!(records.len(), 10);
        Ok(())
    }

    #[test]
    fn broken_thread_fails_the_run() -> Result<()> {
        let temp = tempfile::TempDir::new()?;
        fs::write(temp.path().join("last-sizing-thread-2018.json"), "[]")?;

        let err = read_all(&settings(temp.path())).unwrap_err();
        assert!(format!("{err:#}").contains("listing was not found"));
        Ok(())
    }

    #[test]
    fn writes_records_as_json() -> Result<()> {
        let temp = tempfile::TempDir::new()?;
        let thread = read_thread(Path::new("tests/fixtures/thread.json"))?;
        let records = denormalize::extract(&thread)?;

        let out = temp.path().join("size-records.json");
        write_records(&records, &out)?;

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(written.as_array().map(Vec::len), Some(records.len()));
        assert_eq!(written[0]["label"], "Alden Barrie");
        Ok(())
    }

    #[test]
    fn records_file_is_replaced_when_nothing_is_found() -> Result<()> {
        let temp = tempfile::TempDir::new()?;
        let s = settings(temp.path());
        fs::write(s.records_file(), r#"[{"label": "stale"}]"#)?;

        let records = extract_records(&s)?;
        assert!(records.is_empty());
        assert_eq!(fs::read_to_string(s.records_file())?, "[]");
        Ok(())
    }

    #[test]
    fn extract_records_writes_every_record() -> Result<()> {
        let temp = tempfile::TempDir::new()?;
        let fixture = fs::read_to_string("tests/fixtures/thread.json")?;
        fs::write(temp.path().join("last-sizing-thread-2018.json"), fixture)?;

        let s = settings(temp.path());
        let records = extract_records(&s)?;
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(s.records_file())?)?;
        assert_eq!(written.as_array().map(Vec::len), Some(records.len()));
        assert_eq!(records.len(), 5);
        Ok(())
    }
}
