//! # Seed Inventory Generator
//!
//! Writes a sample inventory file for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default) into ./inventory.txt
//! cargo run -p shelf-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-store --bin seed -- --count 1000
//!
//! # Specify inventory path
//! cargo run -p shelf-store --bin seed -- --out ./data/inventory.txt
//! ```
//!
//! ## Generated Products
//! Products are spread across four categories:
//! - Game
//! - Subscription
//! - Boardgame
//! - Accessory
//!
//! Each product has:
//! - Unique name: `{TITLE} {EDITION}`
//! - Price: $4.99 - $12.98 plus an edition surcharge
//! - Stock: 0 - 60

use std::env;
use std::time::Instant;

use shelf_core::{Money, Product};
use shelf_store::InventoryStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 200;
const DEFAULT_OUT: &str = "./inventory.txt";

/// Titles per category.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Game",
        &[
            "Chess",
            "Tetris",
            "Minecraft",
            "Stardew Valley",
            "Celeste",
            "Hades",
            "Portal",
            "Terraria",
            "Factorio",
            "Rocket League",
        ],
    ),
    (
        "Subscription",
        &[
            "Netflix",
            "Game Pass",
            "PlayStation Plus",
            "Nintendo Online",
            "Humble Choice",
            "EA Play",
            "Ubisoft Plus",
            "Apple Arcade",
        ],
    ),
    (
        "Boardgame",
        &[
            "Catan",
            "Carcassonne",
            "Ticket to Ride",
            "Pandemic",
            "Azul",
            "Wingspan",
            "Codenames",
            "Splendor",
            "Dixit",
            "Gloomhaven",
        ],
    ),
    (
        "Accessory",
        &[
            "Dice Set",
            "Card Sleeves",
            "Controller",
            "Headset",
            "Playmat",
            "Meeple Pack",
            "Charging Dock",
            "Carry Case",
        ],
    ),
];

/// Edition variants with their price surcharge in cents.
const EDITIONS: &[(&str, i64)] = &[
    ("Standard", 0),
    ("Deluxe", 1000),
    ("Collector", 2500),
    ("Travel", -200),
    ("Bundle", 1500),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut out = String::from(DEFAULT_OUT);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.get(i + 1) {
                    count = value
                        .parse()
                        .map_err(|_| format!("invalid --count value: {}", value))?;
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if let Some(value) = args.get(i + 1) {
                    out = value.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Inventory Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -c, --count <N>     Number of products to generate (default: {})",
                    DEFAULT_COUNT
                );
                println!(
                    "  -o, --out <PATH>    Inventory file path (default: {})",
                    DEFAULT_OUT
                );
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    println!("Shelf Seed Inventory Generator");
    println!("==============================");
    println!("Inventory: {}", out);
    println!("Products:  {}", count);
    println!();

    let mut store = InventoryStore::open(&out);

    if !store.inventory().is_empty() {
        println!("Inventory already has {} products", store.inventory().len());
        println!("  Skipping seed to avoid overwriting it.");
        println!("  Delete the file to regenerate.");
        return Ok(());
    }

    let start = Instant::now();
    let products = CATEGORIES
        .iter()
        .enumerate()
        .flat_map(|(category_idx, (category, titles))| {
            titles.iter().enumerate().flat_map(move |(title_idx, title)| {
                EDITIONS
                    .iter()
                    .enumerate()
                    .map(move |(edition_idx, (edition, surcharge))| {
                        generate_product(
                            category,
                            title,
                            edition,
                            *surcharge,
                            category_idx * 1000 + title_idx * 20 + edition_idx,
                        )
                    })
            })
        })
        .take(count);

    let mut generated = 0;
    for product in products {
        store.add(product);
        generated += 1;
    }

    if generated < count {
        warn!(
            requested = count,
            generated, "Ran out of distinct product names"
        );
    }

    store.save()?;

    let elapsed = start.elapsed();
    info!(generated, ?elapsed, path = %out, "Seed inventory written");

    match store.inventory().total_value() {
        Some(value) => println!("Generated {} products worth {} in {:?}", generated, value, elapsed),
        None => println!("Generated {} products in {:?}", generated, elapsed),
    }
    println!();
    println!("Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic data.
fn generate_product(category: &str, title: &str, edition: &str, surcharge: i64, seed: usize) -> Product {
    let base_cents = 499 + ((seed * 37) % 800) as i64;
    let price = Money::from_cents(base_cents + surcharge);
    let quantity = (seed % 61) as i64;

    Product::new(
        category,
        format!("{} {}", title, edition),
        format!("{} edition of {}", edition, title),
        price,
        quantity,
    )
}

/// Initializes tracing with `RUST_LOG`, falling back to a sensible default.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,shelf=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
