//! Binary entry point for `starter-bot`.
//!
//! Parses the command line, sets up logging, loads the Slack tokens and hands
//! over to [`starter_bot::start`], which polls until Ctrl-C.

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use starter_bot::base::{config::Config, types::Void};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Starter-bot – answers `@bot do ...` in Slack with a canned reply.
///
/// Every poll interval the bot reads the messages it received, takes the
/// first one that opens with a mention of the bot, and replies in the same
/// channel. Anything other than `do` gets a hint to try `do`.
///
/// Needs `SLACK_BOT_TOKEN` and `SLACK_APP_TOKEN` (socket mode), either from
/// the environment or from a TOML config file. `POLL_INTERVAL_MS` is optional.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// TOML file with `slack_bot_token`, `slack_app_token` and `poll_interval_ms`.
    ///
    /// Falls back to `.hidden/config.toml` when present.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Log polled batches and parsed mentions (-v), or everything (-vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Also export spans to an OTLP collector over HTTP.
    #[arg(long)]
    otlp: bool,
}

/// Installs the stdout log layer and, with `--otlp`, the span exporter.
fn init_tracing(args: &Args) -> Void {
    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let stdout = tracing_subscriber::fmt::layer().with_target(false).with_span_events(FmtSpan::NONE);

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("starter-bot");
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(otel)
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .with(stdout)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    init_tracing(&args)?;

    let config = Config::load(args.config.as_deref())?;

    starter_bot::start(config).await
}
