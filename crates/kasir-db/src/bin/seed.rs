//! # Seed Data Generator
//!
//! Populates the database with the demo catalog used during development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Skips any table that already has rows, so running it twice is harmless.

use std::env;

use kasir_core::{CategoryInput, ProductInput};
use kasir_db::{Database, DbConfig};

/// (nama, harga, stok)
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("Indomie", 1500, 10),
    ("KitKat", 8000, 28),
    ("LifeBoy", 5000, 41),
];

/// (nama, description)
const CATEGORIES: &[(&str, &str)] = &[
    ("Makanan", "Kategori makanan ringan dan berat"),
    ("Minuman", "Kategori minuman dingin dan hangat"),
    ("Sabun Mandi", "Kategori Peralatan Sabun Mandi dan Cuci Muka"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("DATABASE_URL").unwrap_or_else(|_| String::from("kasir.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $DATABASE_URL or ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::from_url(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products, skipping", existing);
    } else {
        for &(name, price, stock) in PRODUCTS {
            let product = db
                .products()
                .create(&ProductInput {
                    name: name.to_string(),
                    price,
                    stock,
                })
                .await?;
            println!("  + produk #{} {}", product.id, product.name);
        }
    }

    let existing = db.categories().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} categories, skipping", existing);
    } else {
        for &(name, description) in CATEGORIES {
            let category = db
                .categories()
                .create(&CategoryInput {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .await?;
            println!("  + kategori #{} {}", category.id, category.name);
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
