mod config;
mod corpus;
mod denormalize;
mod download;
mod error;
mod parser;
mod reddit;
mod reference_size;
mod render;

use std::time::Instant;

use clap::{Parser, Subcommand};

use config::Settings;

#[derive(Parser)]
#[command(
    name = "last_sizing",
    about = "Collect r/goodyearwelt last sizing threads into browsable tables"
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the sizing threads that are not cached yet
    Download,
    /// Extract size records from downloaded threads into JSON
    Extract,
    /// Extract size records and render the static site
    Build,
    /// Download + extract + build in one pipeline
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = cli.settings;

    match cli.command {
        Commands::Download => {
            download(&settings).await?;
        }
        Commands::Extract => {
            extract(&settings)?;
        }
        Commands::Build => {
            build(&settings)?;
        }
        Commands::Run => {
            let t_download = Instant::now();
            download(&settings).await?;
            println!("Downloaded in {:.1}s", t_download.elapsed().as_secs_f64());
            build(&settings)?;
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

async fn download(settings: &Settings) -> anyhow::Result<()> {
    let fetched = download::download_all(settings).await?;
    println!(
        "Downloaded {} threads ({} configured) into {}",
        fetched,
        config::THREADS.len(),
        settings.data_dir.display()
    );
    Ok(())
}

fn extract(settings: &Settings) -> anyhow::Result<Vec<denormalize::SizeRecord>> {
    let records = corpus::extract_records(settings)?;
    println!(
        "Saved {} size records to {}",
        records.len(),
        settings.records_file().display()
    );
    Ok(records)
}

fn build(settings: &Settings) -> anyhow::Result<()> {
    let records = extract(settings)?;
    let pages = render::write_pages(&records, &settings.build_dir)?;
    for page in &pages {
        println!("Wrote {}", page.display());
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
