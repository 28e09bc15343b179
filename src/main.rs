use burrow::headless::{self, HeadlessOptions, OutputFormat};
use burrow_core::config::Config;
use burrow_feeds::{AnySource, ElasticSource, FileSource, HttpLogSource};
use clap::Parser;
use std::path::PathBuf;

const DEBUG_LOG: &str = "/tmp/burrow-debug.log";

#[derive(Parser)]
#[command(name = "burrow", about = "burrow — honeypot log dashboard for the terminal")]
struct Cli {
    /// Base URL of the log backend (or of Elasticsearch with --elastic).
    #[arg(long)]
    url: Option<String>,

    /// Query Elasticsearch directly instead of the backend proxy.
    #[arg(long, conflicts_with = "file")]
    elastic: bool,

    /// Elasticsearch index to search.
    #[arg(long, requires = "elastic")]
    index: Option<String>,

    /// Replay logs from a saved JSON file.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Refresh whenever the --file changes.
    #[arg(long, requires = "file")]
    watch: bool,

    /// Print one fetch to stdout instead of starting the dashboard.
    #[arg(long)]
    headless: bool,

    /// Search query applied before printing (headless only).
    #[arg(long, requires = "headless")]
    query: Option<String>,

    /// Page to print, starting at 1 (headless only).
    #[arg(long, requires = "headless", value_parser = clap::value_parser!(u64).range(1..))]
    page: Option<u64>,

    /// Output format (headless only).
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, requires = "headless")]
    format: OutputFormat,

    /// Write debug logs to /tmp/burrow-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config: falling back to defaults");
        Config::defaults()
    });
    apply_overrides(&mut config, &cli);

    let source = build_source(&config, &cli)?;
    tracing::info!(source = %burrow_core::LogSource::describe(&source), "burrow starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if cli.headless {
        let options = HeadlessOptions {
            query: cli.query.clone(),
            page: cli.page.map(|p| p as usize),
            format: cli.format,
        };
        return runtime.block_on(headless::run(&config, &source, &options, std::io::stdout().lock()));
    }

    let watch = if cli.watch {
        source.as_file().map(FileSource::watch).transpose()?
    } else {
        None
    };

    burrow_tui::run(config, source, watch, runtime.handle().clone())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("burrow debug log started — tail -f {DEBUG_LOG}");
    } else if cli.headless {
        // The dashboard owns the terminal, so only headless mode logs to stderr.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.url {
        if cli.elastic {
            config.elastic.url = url.clone();
        } else {
            config.backend.base_url = url.clone();
        }
    }
    if let Some(index) = &cli.index {
        config.elastic.index = index.clone();
    }
}

fn build_source(config: &Config, cli: &Cli) -> anyhow::Result<AnySource> {
    let source = if let Some(path) = &cli.file {
        FileSource::new(path).into()
    } else if cli.elastic {
        ElasticSource::new(&config.elastic.url, &config.elastic.index, config.elastic.size)?.into()
    } else {
        HttpLogSource::new(&config.backend.base_url, &config.backend.logs_path)?.into()
    };
    Ok(source)
}
