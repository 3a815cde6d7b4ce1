//! # Seed Data Generator
//!
//! Populates the database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 products (default)
//! cargo run -p tienda-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p tienda-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p tienda-db --bin seed -- --db ./data/tienda.db
//! ```
//!
//! ## Generated Products
//! Creates inventory rows combining a garment name with a material:
//! - Names: Camisa, Gorras, Pantalon, ...
//! - Materials: algodon, lana, cuero, ...
//! - Price: $4.99 - $29.99
//! - Quantity: 0 - 99 (some rows are deliberately out of stock)

use std::env;
use tienda_core::{Product, UNASSIGNED_PRODUCT_ID};
use tienda_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Garment names for test data
const NAMES: &[&str] = &[
    "Camisa",
    "Gorras",
    "Pantalon",
    "Chamarra",
    "Sudadera",
    "Bufanda",
    "Calcetines",
    "Guantes",
    "Falda",
    "Vestido",
    "Cinturon",
    "Chaleco",
];

/// Materials for test data
const MATERIALS: &[&str] = &["algodon", "lana", "cuero", "poliester", "mezclilla", "seda"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./tienda_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tienda Inventory Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./tienda_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tienda Inventory Seed Data Generator");
    println!("=======================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let dao = db.products();
    let existing = dao.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    for n in 0..count {
        let name = NAMES[n % NAMES.len()];
        let material = MATERIALS[(n / NAMES.len() + n) % MATERIALS.len()];
        // Deterministic pseudo-variety; good enough for dev data.
        let price = 4.99 + (n % 26) as f64;
        let quantity = ((n * 7) % 100) as i64;

        let product = Product {
            id: UNASSIGNED_PRODUCT_ID,
            name: format!("{} {}", name, n / NAMES.len() + 1),
            material: material.to_string(),
            price,
            quantity,
        };

        dao.insert(&product).await?;
    }

    println!("✓ Inserted {} products", count);
    println!();
    println!("Done.");

    Ok(())
}
