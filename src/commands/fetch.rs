//! `gramexport fetch`: fetch every comment on a post and export it.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::export::{self, ExportFormat};
use crate::infra::instagram::{
    CancelFlag, Comment, CommentPager, CommentTreeFetcher, GraphqlClient, extract_shortcode,
};
use crate::shared::config::{Config, load_config};

#[derive(Args, Clone, PartialEq, Eq)]
pub struct FetchArgs {
    /// Instagram post or reel URL
    pub url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
    pub format: ExportFormat,

    /// Output file (defaults to comments.<ext> in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: &FetchArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = GraphqlClient::new(config.credentials.clone());
    run_with_client(args, &config, client).await
}

/// Split out from [`run`] so tests can substitute a client pointed at a mock
/// server.
async fn run_with_client(
    args: &FetchArgs,
    config: &Config,
    client: GraphqlClient,
) -> anyhow::Result<()> {
    let Some(shortcode) = extract_shortcode(&args.url) else {
        bail!("not an Instagram post URL: {}", args.url);
    };
    config
        .credentials
        .ensure_complete()
        .context("add your Instagram session cookies to the config file")?;

    // Ctrl-C stops cleanly at the next page boundary instead of killing the
    // process mid-request.
    let cancel = CancelFlag::default();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::Relaxed);
            }
        }
    });

    let fetcher = CommentTreeFetcher::new(client)
        .with_page_size(config.fetch.page_size)
        .with_request_delay(Duration::from_millis(config.fetch.request_delay_ms))
        .with_max_pages(config.fetch.max_pages)
        .with_cancel_flag(cancel);

    let comments = fetch_with_spinner(&fetcher, shortcode).await?;
    info!(count = comments.len(), shortcode, "fetch complete");

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(export::DEFAULT_FILE_STEM));
    let path = export::export_to_file(&comments, args.format, &output)?;
    println!("Exported {} comments to {}", comments.len(), path.display());

    Ok(())
}

async fn fetch_with_spinner<P: CommentPager>(
    fetcher: &CommentTreeFetcher<P>,
    shortcode: &str,
) -> anyhow::Result<Vec<Comment>> {
    let spinner = if std::io::stderr().is_terminal() {
        let s = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // static template string
        s.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner} {msg}")
                .expect("valid template"),
        );
        s.set_message(format!("Fetching comments for {shortcode}..."));
        s.enable_steady_tick(Duration::from_millis(80));
        s
    } else {
        ProgressBar::hidden()
    };

    let result = fetcher.fetch_all(shortcode).await;
    spinner.finish_and_clear();

    result.with_context(|| format!("failed to fetch comments for {shortcode}"))
}
