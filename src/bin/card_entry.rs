//! CLI tool for exercising the card entry field.
//!
//! # Usage
//!
//! ```bash
//! # Replay field snapshots as if typed, then blur
//! card-entry type 4147 41474 41479344 --blur
//!
//! # Simulate a slow lookup service (skipped lookups become visible)
//! card-entry type 3 34 347 3471 34712 347123456789012 --latency-ms 50 --blur
//!
//! # Dash-separated field
//! card-entry type 4147-9344 4147-9344-2346-9281 -s "[-\s]" -d "-" --blur
//!
//! # Format a value for a brand
//! card-entry format 347123456789012 --brand amex
//!
//! # Check a value on blur
//! card-entry check "4111 1111 1111 1111"
//! ```
//!
//! Set `RUST_LOG=card_entry=debug` to see every state transition.

use card_entry::format::format_card_number;
use card_entry::lookup::{BinLookup, LookupResponse, PrefixLookup};
use card_entry::validate::Validator;
use card_entry::{
    CardBrand, CardInput, CardInputConfig, CardInputView, Classification, LookupError,
    LookupRequest, ResolutionPolicy, ValidationStatus,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::future::Future;
use std::pin::Pin;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "card-entry")]
#[command(author, version, about = "Credit card entry field simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed successive field values through a controller
    Type {
        /// Field values, in the order they were typed
        #[arg(required = true)]
        snapshots: Vec<String>,

        /// Blur the field after the last value
        #[arg(short, long)]
        blur: bool,

        /// Separator pattern stripped from input (regex fragment)
        #[arg(short, long, default_value = r"\s")]
        separator: String,

        /// Text inserted between groups (must be stripped by the separator)
        #[arg(short, long, default_value = " ")]
        delimiter: String,

        /// Simulated lookup latency in milliseconds
        #[arg(short, long, default_value = "0")]
        latency_ms: u64,

        /// Ignore lookup results for input that has since changed
        #[arg(long)]
        discard_stale: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Format a value for a brand
    Format {
        /// Field value
        value: String,

        /// Card brand (unknown if omitted)
        #[arg(short, long)]
        brand: Option<BrandArg>,
    },

    /// Validate a value as the field would on blur
    Check {
        /// Field value
        value: String,

        /// Card brand (unknown if omitted)
        #[arg(short, long)]
        brand: Option<BrandArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum BrandArg {
    Visa,
    Mastercard,
    Discover,
    Amex,
    Generic,
}

impl From<BrandArg> for CardBrand {
    fn from(arg: BrandArg) -> Self {
        match arg {
            BrandArg::Visa => CardBrand::Visa,
            BrandArg::Mastercard => CardBrand::Mastercard,
            BrandArg::Discover => CardBrand::Discover,
            BrandArg::Amex => CardBrand::Amex,
            BrandArg::Generic => CardBrand::Generic,
        }
    }
}

/// The in-memory lookup with an artificial delay.
struct DelayedLookup {
    inner: PrefixLookup,
    latency: Duration,
}

impl BinLookup for DelayedLookup {
    async fn lookup(&self, number: &str) -> Result<LookupResponse, LookupError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.inner.lookup(number).await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Type {
            snapshots,
            blur,
            separator,
            delimiter,
            latency_ms,
            discard_stale,
            output,
        } => {
            let config = type_config(separator, delimiter, discard_stale);
            let lookup = DelayedLookup {
                inner: PrefixLookup::standard(),
                latency: Duration::from_millis(latency_ms),
            };
            cmd_type(lookup, &config, &snapshots, blur, output).await
        }
        Commands::Format { value, brand } => {
            println!("{}", format_card_number(&value, brand.map(Into::into)));
            ExitCode::SUCCESS
        }
        Commands::Check { value, brand } => cmd_check(&value, brand.map(Into::into)),
    }
}

fn type_config(separator: String, delimiter: String, discard_stale: bool) -> CardInputConfig {
    let policy = if discard_stale {
        ResolutionPolicy::DiscardStale
    } else {
        ResolutionPolicy::LastWriteWins
    };
    CardInputConfig::new()
        .separator(separator)
        .delimiter(delimiter)
        .resolution(policy)
}

/// A lookup running alongside the keystrokes that follow it.
type PendingLookup<'a> = Pin<Box<dyn Future<Output = Classification> + 'a>>;

fn start_lookup<'a>(lookup: &'a DelayedLookup, request: &LookupRequest) -> PendingLookup<'a> {
    let request = request.clone();
    Box::pin(async move { request.resolve(lookup).await })
}

/// Replays the snapshots one keystroke apart.
///
/// Each snapshot is applied immediately; a lookup issued by one snapshot runs
/// concurrently with the following ones, so a slow service makes the
/// controller skip lookups exactly as it would in a browser.
async fn cmd_type(
    lookup: DelayedLookup,
    config: &CardInputConfig,
    snapshots: &[String],
    blur: bool,
    output: OutputFormat,
) -> ExitCode {
    let mut field = match CardInput::new(&lookup, config) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let keystroke = Duration::from_millis(10);
    let mut pending: Option<(LookupRequest, PendingLookup<'_>)> = None;

    for snapshot in snapshots {
        if let Some(request) = field.on_input_change(snapshot) {
            let future = start_lookup(&lookup, &request);
            pending = Some((request, future));
        }
        print_view(snapshot, &field.view(), output);

        let settled = match pending.as_mut() {
            Some((_, future)) => tokio::select! {
                outcome = future => Some(outcome),
                _ = tokio::time::sleep(keystroke) => None,
            },
            None => None,
        };

        if let Some(outcome) = settled {
            if let Some((request, _)) = pending.take() {
                if let Some(next) = field.on_lookup_complete(request, outcome) {
                    let future = start_lookup(&lookup, &next);
                    pending = Some((next, future));
                }
                print_view("(lookup settled)", &field.view(), output);
            }
        }
    }

    while let Some((request, future)) = pending.take() {
        let outcome = future.await;
        if let Some(next) = field.on_lookup_complete(request, outcome) {
            let future = start_lookup(&lookup, &next);
            pending = Some((next, future));
        }
        print_view("(lookup settled)", &field.view(), output);
    }

    if blur {
        let display = field.state().display().to_string();
        let status = field.on_blur(&display);
        print_view("(blur)", &field.view(), output);
        if status != ValidationStatus::Pass {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn cmd_check(value: &str, brand: Option<CardBrand>) -> ExitCode {
    match Validator::default().validate(value, brand) {
        ValidationStatus::Pass => {
            println!("Valid: yes");
            ExitCode::SUCCESS
        }
        _ => {
            println!("Valid: no");
            ExitCode::FAILURE
        }
    }
}

fn print_view(event: &str, view: &CardInputView, output: OutputFormat) {
    match output {
        OutputFormat::Text => {
            let brand = view.logo.map(|logo| logo.src).unwrap_or("-");
            let status = view.status.map(|icon| icon.src()).unwrap_or("-");
            let message = view.error_message.as_deref().unwrap_or("");
            println!(
                "{:<20} display={:<20} logo={:<16} status={:<11} {}",
                event, view.display, brand, status, message
            );
        }
        OutputFormat::Json => match serde_json::to_string(view) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        },
    }
}
