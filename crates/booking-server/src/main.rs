//! `booking` — studio availability server and one-shot resolver.
//!
//! ## Usage
//!
//! ```sh
//! # Serve GET /api/availability (mock data unless credentials are set)
//! booking serve --bind 0.0.0.0:3000
//!
//! # Live mode
//! GOOGLE_CALENDAR_ID=studio@example.com \
//! GOOGLE_SERVICE_ACCOUNT_KEY="$(cat key.json)" \
//! booking serve
//!
//! # Resolve once from a JSON list of busy intervals (stdin → stdout)
//! booking resolve --start 2026-03-16 --end 2026-03-22 < busy.json
//!
//! # Print the fallback schedule
//! booking resolve --start 2026-03-16 --end 2026-03-22 --mock
//! ```

use std::io::{self, Read};

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use booking_server::api::{self, AppState, AvailabilityResponse, Source};
use booking_server::settings::{CalendarArgs, SlotArgs};
use booking_server::{logging, Availability};
use clap::{Parser, Subcommand};
use slot_engine::resolver::available_slots;
use slot_engine::{mock_availability, BusyInterval, DateRange};

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Studio booking availability server"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the availability HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
        bind: String,
        #[command(flatten)]
        slots: SlotArgs,
        #[command(flatten)]
        calendar: CalendarArgs,
    },
    /// Resolve availability once from a JSON array of busy intervals
    Resolve {
        /// First date, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Last date (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: String,
        /// Busy-interval JSON file (reads from stdin if omitted)
        #[arg(short, long, conflicts_with = "mock")]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print the fallback schedule instead of resolving
        #[arg(long)]
        mock: bool,
        #[command(flatten)]
        slots: SlotArgs,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match cli.command {
        Commands::Serve {
            bind,
            slots,
            calendar,
        } => serve(bind, slots, calendar).await,
        Commands::Resolve {
            start,
            end,
            input,
            output,
            mock,
            slots,
        } => resolve(&start, &end, input.as_deref(), output.as_deref(), mock, &slots),
    }
}

async fn serve(bind: String, slots: SlotArgs, calendar: CalendarArgs) -> Result<()> {
    let config = slots.to_config().context("Invalid slot configuration")?;
    let availability = Availability::from_args(&calendar, config.timezone)
        .context("Invalid calendar configuration")?;

    let state = web::Data::new(AppState {
        config,
        time_format: slots.time_format,
        availability,
    });

    tracing::info!(%bind, timezone = %state.config.timezone, "starting availability server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(api::cors_headers())
            .configure(api::configure)
    })
    .bind(&bind)
    .with_context(|| format!("Failed to bind {}", bind))?
    .run()
    .await
    .context("Server error")
}

fn resolve(
    start: &str,
    end: &str,
    input: Option<&str>,
    output: Option<&str>,
    mock: bool,
    slots: &SlotArgs,
) -> Result<()> {
    let config = slots.to_config().context("Invalid slot configuration")?;
    let range = DateRange::parse(start, end).context("Invalid date range")?;

    let response = if mock {
        AvailabilityResponse {
            days: mock_availability(&range, &config),
            source: Source::Mock,
        }
    } else {
        let raw = read_input(input)?;
        let busy: Vec<BusyInterval> =
            serde_json::from_str(&raw).context("Failed to parse busy intervals")?;
        AvailabilityResponse {
            days: available_slots(&range, &busy, &config)
                .iter()
                .map(|day| day.format(&config.timezone, slots.time_format))
                .collect(),
            source: Source::Live,
        }
    };

    let mut json = serde_json::to_string_pretty(&response)?;
    json.push('\n');
    write_output(output, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
