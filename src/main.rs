#[cfg(feature = "gui")]
mod app;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use roomboard::{config::AppConfig, fetch::ScheduleClient, viewer::Viewer};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[cfg(feature = "gui")]
use roomboard::SystemClock;

#[cfg(feature = "gui")]
use crate::app::{Message, RoomboardApp};

#[derive(Parser, Debug)]
#[command(name = "roomboard")]
#[command(about = "Room availability viewer - GUI or headless table dump")]
struct Args {
    /// Print the availability table to stdout instead of starting the GUI
    #[arg(long)]
    headless: bool,

    /// Room to show in headless mode (defaults to the first room)
    #[arg(long)]
    room: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .parse_lossy("roomboard=debug,fontdb=error,wgpu=warn,naga=warn");

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let config = Arc::new(config);

    if args.headless {
        run_headless(config, args.room)
    } else {
        #[cfg(feature = "gui")]
        {
            run_gui(config)
        }
        #[cfg(not(feature = "gui"))]
        {
            anyhow::bail!("GUI mode not available. Build with --features gui or run with --headless")
        }
    }
}

/// Run headless - one load, table printed to stdout
fn run_headless(config: Arc<AppConfig>, room: Option<String>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(async {
        let client = ScheduleClient::new(
            config.data.schedule_url.clone(),
            config.data.timestamp_url.clone(),
            &config.network,
        )?;

        tracing::info!("Fetching schedule from {}", config.data.schedule_url);
        let records = client.fetch_schedule().await?;
        let timestamp = client.fetch_timestamp().await;

        let mut viewer = Viewer::from_records(records);
        if let Some(room) = room {
            viewer.select_room(&room);
        }

        print_table(&viewer, timestamp.as_deref());
        Ok(())
    })
}

fn print_table(viewer: &Viewer, timestamp: Option<&str>) {
    println!("Last updated: {}", timestamp.unwrap_or("unknown"));

    let Some(room) = viewer.current_room() else {
        println!("No rooms in data set");
        return;
    };
    println!("Room: {}", room);

    if let Some(range) = viewer.range() {
        println!("Dates: {} to {}", range.min, range.max);
    }

    println!(
        "{:<8} {:<4} {:^8} {:^10} {:^8}",
        "Date", "Day", "Morning", "Afternoon", "Evening"
    );
    if viewer.rendered().is_empty() {
        println!("(no data found)");
    }
    for row in viewer.rendered() {
        println!(
            "{:<8} {:<4} {:^8} {:^10} {:^8}",
            row.display_date,
            row.weekday,
            row.morning.mark(),
            row.afternoon.mark(),
            row.evening.mark()
        );
    }

    println!(
        "Available slots: {}  Occupied slots: {}",
        viewer.available_count(),
        viewer.occupied_count()
    );
}

/// Run in GUI mode - desktop viewer
#[cfg(feature = "gui")]
fn run_gui(config: Arc<AppConfig>) -> Result<()> {
    let client = ScheduleClient::new(
        config.data.schedule_url.clone(),
        config.data.timestamp_url.clone(),
        &config.network,
    )?;

    let window_width = config.window.width;
    let window_height = config.window.height;
    let title = config.window.title.clone();

    let app = iced::application(
        move || RoomboardApp::new(client.clone(), config.clone(), Arc::new(SystemClock)),
        update,
        view,
    )
    .title(move |_: &RoomboardApp| title.clone())
    .theme(theme)
    .window(iced::window::Settings {
        size: iced::Size::new(window_width, window_height),
        ..Default::default()
    })
    .antialiasing(true);

    app.run().context("Failed to run application")?;

    Ok(())
}

#[cfg(feature = "gui")]
fn update(app: &mut RoomboardApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

#[cfg(feature = "gui")]
fn view(app: &RoomboardApp) -> iced::Element<'_, Message> {
    app.view()
}

#[cfg(feature = "gui")]
fn theme(app: &RoomboardApp) -> iced::Theme {
    app.theme()
}
