use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{
    validate::within_business_hours,
    view::{format_time_slot, SearchResultsView},
    HttpReservationApi, ReservationFormController, UiEvent,
};
use shared::domain::BuildingId;

#[derive(Parser, Debug)]
#[command(about = "Room reservation client")]
struct Args {
    #[arg(long)]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List buildings.
    Buildings,
    /// List the floors of one building.
    Floors {
        #[arg(long)]
        building: i64,
    },
    /// Search for available rooms in a slot.
    Search {
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        building: String,
        #[arg(long, default_value = "")]
        floor: String,
    },
    /// Search the slot, then reserve one of the returned rooms.
    Reserve {
        #[arg(long)]
        room: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        name: String,
    },
}

fn print_results(results: &SearchResultsView) {
    match results {
        SearchResultsView::Empty => {
            println!("No rooms match your search criteria. Try adjusting your filters.");
        }
        SearchResultsView::Rooms(cards) => {
            for card in cards {
                println!(
                    "room {:>4}  {}  floor {}  capacity {}",
                    card.room.room_num, card.room.building_name, card.room.floor, card.room.capacity
                );
                if let (Ok(start), Ok(end)) =
                    (card.start_hour.parse::<u8>(), card.end_hour.parse::<u8>())
                {
                    let mut line = format!("           {}", format_time_slot(start, end));
                    if !within_business_hours(start) || !within_business_hours(end.saturating_sub(1))
                    {
                        line.push_str("  (outside 07:00-16:00 business hours)");
                    }
                    println!("{line}");
                }
            }
        }
        SearchResultsView::Error(message) => println!("{message}"),
        SearchResultsView::Idle | SearchResultsView::Loading => {}
    }
}

fn print_events(rx: &mut tokio::sync::broadcast::Receiver<UiEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            UiEvent::Alert(message) => println!("! {message}"),
            UiEvent::Notice(message) => println!("{message}"),
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let api = Arc::new(HttpReservationApi::new(args.server_url));
    let controller = ReservationFormController::new(api);
    let mut events = controller.subscribe_events();

    match args.command {
        Command::Buildings => {
            controller.load_buildings().await;
            for option in controller.building_options().await {
                if !option.value.is_empty() {
                    println!("{:>4}  {}", option.value, option.label);
                }
            }
        }
        Command::Floors { building } => {
            controller.load_floors(BuildingId(building)).await;
            for option in controller.floor_options().await {
                if !option.value.is_empty() {
                    println!("{}", option.label);
                }
            }
        }
        Command::Search {
            date,
            start,
            end,
            building,
            floor,
        } => {
            controller.select_building(building).await;
            controller.select_floor(floor).await;
            controller.set_slot_date(date).await;
            controller.set_time_range(start, end).await;
            controller.search_rooms().await;
            print_events(&mut events);
            print_results(&controller.results().await);
        }
        Command::Reserve {
            room,
            date,
            start,
            end,
            name,
        } => {
            controller.set_slot_date(date).await;
            controller.set_time_range(start, end).await;
            controller.search_rooms().await;
            print_events(&mut events);

            let results = controller.results().await;
            let card = results
                .cards()
                .iter()
                .find(|card| card.room.room_id.0 == room)
                .cloned()
                .ok_or_else(|| anyhow!("room {room} is not available for that slot"))?;

            controller.open_reservation_modal(&card).await;
            controller.set_reserved_by(name).await;
            controller.submit_reservation().await;
            print_events(&mut events);
        }
    }

    Ok(())
}
