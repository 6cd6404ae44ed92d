//! # Seed Data Generator
//!
//! Populates the database with the example register for demos and
//! manual testing.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p cantina-db --bin seed
//!
//! # Specify database path
//! cargo run -p cantina-db --bin seed -- --db ./data/cantina.db
//! ```
//!
//! ## Generated Data
//! - 5 example customers with guardians and class groups
//! - 10 example products across all categories
//!
//! The seeder refuses to run against a database that already has
//! customers, to avoid duplicating the register.

use std::env;

use cantina_core::{Category, Guardian, NewCustomer, NewProduct};
use cantina_db::{Store, StoreConfig};

/// Example customers: name, class group, contact.
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ana Silva", "3º Ano A", "(67) 98765-4321"),
    ("Bruno Costa", "4º Ano B", "(67) 97654-3210"),
    ("Carla Souza", "2º Ano A", "(67) 96543-2109"),
    ("Daniel Lima", "5º Ano C", "(67) 95432-1098"),
    ("Elena Martins", "3º Ano B", "(67) 94321-0987"),
];

/// Example products: name, category, price in centavos, stock.
const PRODUCTS: &[(&str, Category, i64, i64)] = &[
    ("Salgado de Carne", Category::Savory, 350, 50),
    ("Salgado de Queijo", Category::Savory, 300, 45),
    ("Pão de Queijo", Category::Savory, 250, 60),
    ("Brigadeiro", Category::Sweet, 200, 40),
    ("Beijinho", Category::Sweet, 200, 35),
    ("Coca-Cola Lata", Category::Drink, 500, 30),
    ("Suco Natural", Category::Drink, 400, 25),
    ("Água Mineral", Category::Drink, 250, 50),
    ("Sanduíche Natural", Category::Snack, 600, 20),
    ("Bolo Caseiro", Category::Sweet, 450, 15),
];

/// Low-stock alert threshold applied to every seeded product.
const DEFAULT_THRESHOLD: i64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./cantina_dev.db");

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
                println!("Cantina POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./cantina_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Cantina POS Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::new(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to duplicate an existing register
    let existing = store.customers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} customers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding customers...");

    for (name, class_group, contact) in CUSTOMERS {
        let customer = store
            .customers()
            .create(NewCustomer {
                name: name.to_string(),
                class_group: class_group.to_string(),
                contact: contact.to_string(),
                photo: None,
                father: Some(Guardian {
                    name: format!("Pai de {}", first_name(name)),
                    contact: contact.to_string(),
                }),
                mother: Some(Guardian {
                    name: format!("Mãe de {}", first_name(name)),
                    contact: contact.to_string(),
                }),
                notes: String::new(),
                credit_blocked: false,
            })
            .await?;
        println!("  + {} ({})", customer.name, customer.class_group);
    }

    println!();
    println!("Seeding products...");

    for (name, category, price_cents, stock) in PRODUCTS {
        let product = store
            .products()
            .create(NewProduct {
                name: name.to_string(),
                category: *category,
                price_cents: *price_cents,
                stock_quantity: *stock,
                low_stock_threshold: DEFAULT_THRESHOLD,
                image: None,
            })
            .await?;
        println!("  + {} ({})", product.name, product.price());
    }

    println!();
    println!(
        "✓ Seed complete: {} customers, {} products",
        store.customers().count().await?,
        store.products().count().await?
    );

    Ok(())
}

/// First word of a full name, for the guardian placeholder labels.
fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}
