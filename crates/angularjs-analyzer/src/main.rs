use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use angularjs_analyzer::build_service;
use clap::Parser;
use tower_lsp::Server;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "angularjs-analyzer.log";

#[derive(Parser, Debug)]
#[command(name = "angularjs-analyzer", version, about)]
struct Args {
    /// Log at debug level.
    #[arg(long, short)]
    verbose: bool,

    /// Mirror index summaries to the editor's output panel.
    #[arg(long)]
    log_messages: bool,

    /// Where to write the log file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = PathBuf::from(home).join(".angularjs-analyzer");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir.join(LOG_FILE_NAME);
        }
    }
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("angularjs_analyzer=debug,tower_lsp=info")
    } else {
        EnvFilter::new("angularjs_analyzer=info,tower_lsp=warn")
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(OsStr::new(LOG_FILE_NAME)),
    );
    let file_layer =
        fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(env_filter(args.verbose));
    // stdout carries the protocol, so console logs go to stderr.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(env_filter(args.verbose));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    info!("Starting angularjs-analyzer v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    let (service, socket) = build_service(args.log_messages);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket).serve(service).await;

    info!("angularjs-analyzer stopped");
}
