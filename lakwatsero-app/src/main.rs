use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lakwatsero_app::navigation::Route;
use lakwatsero_app::notice::{notice_channel, spawn_drain};
use lakwatsero_app::views::details::FlightDetailsView;
use lakwatsero_app::views::results::ResultsView;
use lakwatsero_app::views::LoadState;
use lakwatsero_app::AppState;
use lakwatsero_core::countdown::{format_mm_ss, PaymentDeadline};
use lakwatsero_core::identity::{Session, SessionHandle};
use lakwatsero_core::locations;
use lakwatsero_core::search::{FlightSearchRequest, SearchTripType};
use lakwatsero_shared::models::{Flight, UserDetails};
use lakwatsero_shared::Masked;
use lakwatsero_store::app_config::Config;

#[derive(Parser)]
#[command(name = "lakwatsero")]
#[command(version)]
#[command(about = "Flight search, seat maps and booking status from the Tiket Lakwatsero backend", long_about = None)]
struct Cli {
    /// Bearer token for endpoints that need a signed-in user
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one flight
    Flight { id: String },
    /// Print the seat map of a flight
    Seats { id: String },
    /// Search flights between two airport codes
    Search {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Departure date, YYYY-MM-DD
        #[arg(long)]
        departure: NaiveDate,
        /// Return date for a round trip
        #[arg(long = "return")]
        return_date: Option<NaiveDate>,
    },
    /// Time left to pay a pending booking
    Payment { booking_id: String },
}

fn print_flight(flight: &Flight) {
    println!(
        "{} {}  {} -> {}",
        flight.airline, flight.flight_number, flight.from, flight.to
    );
    println!(
        "  departs {}  arrives {}  {}",
        flight.departure_time.format("%Y-%m-%d %H:%M"),
        flight.arrival_time.format("%Y-%m-%d %H:%M"),
        flight.duration.as_deref().unwrap_or("")
    );
    println!("  PHP {:.2}  [{}]", flight.price, flight.id);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lakwatsero_app=debug,lakwatsero_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load config")?;

    let session = SessionHandle::new();
    if let Some(token) = cli.token {
        session
            .sign_in(Session {
                token: Masked::new(token),
                user: UserDetails::default(),
            })
            .await;
    }

    let (notices, notice_rx) = notice_channel();
    let drain = spawn_drain(notice_rx, |notice| {
        eprintln!("[{:?}] {}", notice.level, notice.message)
    });

    // The state owns every sender, so the drain ends once `run` returns.
    let result = match AppState::connect(&config, session, notices) {
        Ok(state) => run(cli.command, state).await,
        Err(err) => Err(err.into()),
    };
    if let Err(err) = drain.await {
        tracing::warn!("Notice drain stopped early: {}", err);
    }
    result
}

async fn run(command: Commands, state: AppState) -> anyhow::Result<()> {
    match command {
        Commands::Flight { id } => {
            let flight = state.flights.get_flight(&id).await?;
            print_flight(&flight);
        }
        Commands::Seats { id } => {
            let mut view = FlightDetailsView::new(state);
            view.activate(&id).await;
            if let LoadState::Ready(flight) = view.flight() {
                print_flight(flight);
            }
            print!("{}", view.seat_preview());
        }
        Commands::Search {
            from,
            to,
            departure,
            return_date,
        } => {
            let trip_type = if return_date.is_some() {
                SearchTripType::RoundTrip
            } else {
                SearchTripType::OneWay
            };
            let mut view = ResultsView::new(state);
            view.activate(FlightSearchRequest {
                from: locations::city_label(&from.to_uppercase()),
                to: locations::city_label(&to.to_uppercase()),
                departure,
                return_date,
                trip_type,
            })
            .await?;

            if let LoadState::Ready(found) = view.load_state() {
                println!("Outbound ({})", found.outbound.len());
                found.outbound.iter().for_each(print_flight);
                if trip_type == SearchTripType::RoundTrip {
                    println!("Return ({})", found.return_flights.len());
                    found.return_flights.iter().for_each(print_flight);
                }
            }
        }
        Commands::Payment { booking_id } => {
            let booking = state.bookings.get_booking(&booking_id).await?;
            let deadline = PaymentDeadline::new(booking.booked_at, state.rules.payment_window());
            let left = deadline.remaining_seconds(Utc::now());
            println!("Booking {} is {}", booking.id, booking.status.as_str());
            if left == 0 {
                println!("Payment window expired at {}", deadline.deadline());
            } else {
                println!(
                    "{} left to pay PHP {:.2} at {}",
                    format_mm_ss(left),
                    booking.total_price,
                    Route::Payment { booking_id }.path()
                );
            }
        }
    }

    Ok(())
}
