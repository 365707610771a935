//! Seed data script - creates the products table and fills it with demo data
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates 100 products, 25 in each of Electronics, Supplies, Furniture
//! and Groceries, with random prices and stock levels. Existing SKUs are
//! left untouched so the script can be re-run.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect,
    Set,
};
use tracing::info;

use inventory_api::{
    config, db,
    entities::product::{self, Column, Entity as Product},
};

/// Category name, price range in cents, and (name, description) pairs
type CategorySeed = (&'static str, (i64, i64), &'static [(&'static str, &'static str)]);

const CATALOG: &[CategorySeed] = &[
    (
        "Electronics",
        (50_000, 1_500_000),
        &[
            ("Wireless Headphones", "Premium wireless headphones with noise cancellation"),
            ("Gaming Mouse", "High-precision gaming mouse with RGB lighting"),
            ("Bluetooth Speaker", "Portable Bluetooth speaker with excellent sound quality"),
            ("Smartphone Charger", "Fast charging USB-C smartphone charger"),
            ("Laptop Stand", "Adjustable aluminum laptop stand"),
            ("Webcam HD", "Full HD 1080p webcam for video calls"),
            ("Wireless Keyboard", "Compact wireless keyboard with backlight"),
            ("Power Bank", "20000mAh portable power bank"),
            ("USB Hub", "4-port USB 3.0 hub"),
            ("Monitor Cable", "HDMI to DisplayPort cable 2m"),
            ("Phone Case", "Protective silicone phone case"),
            ("Screen Protector", "Tempered glass screen protector"),
            ("Tablet Stylus", "Precision stylus for digital drawing"),
            ("Earbuds", "True wireless earbuds with charging case"),
            ("Smart Watch", "Fitness tracking smartwatch"),
            ("Memory Card", "64GB microSD card"),
            ("Cable Organizer", "Desk cable management organizer"),
            ("Phone Holder", "Adjustable phone stand"),
            ("Laptop Bag", "Waterproof laptop carrying bag"),
            ("Wireless Charger", "Qi wireless charging pad"),
            ("Bluetooth Adapter", "USB Bluetooth 5.0 adapter"),
            ("External HDD", "1TB portable external hard drive"),
            ("Graphics Tablet", "Digital drawing tablet"),
            ("Desk Lamp LED", "USB powered LED desk lamp"),
            ("Gaming Headset", "Professional gaming headset with microphone"),
        ],
    ),
    (
        "Supplies",
        (5_000, 100_000),
        &[
            ("Ballpoint Pens", "Pack of 12 blue ballpoint pens"),
            ("Sticky Notes", "Colorful sticky note pads"),
            ("Printer Paper", "A4 white printer paper 500 sheets"),
            ("Stapler", "Heavy-duty office stapler"),
            ("Paper Clips", "Box of 100 metal paper clips"),
            ("Highlighters", "Set of 6 fluorescent highlighters"),
            ("Notebooks", "Spiral bound lined notebooks"),
            ("Folders", "Manila file folders pack of 25"),
            ("Scissors", "Stainless steel office scissors"),
            ("Tape Dispenser", "Desktop tape dispenser with tape"),
            ("Rubber Bands", "Assorted rubber bands 1lb bag"),
            ("Binders", "3-ring binders 1 inch"),
            ("Correction Fluid", "White correction fluid pen"),
            ("Markers", "Permanent markers black pack of 12"),
            ("Calculator", "Scientific calculator"),
            ("Hole Punch", "3-hole punch for documents"),
            ("Desk Organizer", "Multi-compartment desk organizer"),
            ("Envelopes", "White business envelopes pack of 100"),
            ("Labels", "Address labels sheet pack"),
            ("Rubber Stamps", "Custom rubber stamps set"),
            ("Pencils", "No. 2 pencils pack of 24"),
            ("Erasers", "Pink pearl erasers pack of 10"),
            ("Ruler", "12-inch plastic ruler"),
            ("Glue Sticks", "School glue sticks pack of 6"),
            ("Index Cards", "Ruled index cards 3x5 pack of 100"),
        ],
    ),
    (
        "Furniture",
        (200_000, 2_500_000),
        &[
            ("Office Chair", "Ergonomic office chair with lumbar support"),
            ("Desk", "Modern computer desk with drawers"),
            ("Bookshelf", "5-tier wooden bookshelf"),
            ("Filing Cabinet", "4-drawer metal filing cabinet"),
            ("Coffee Table", "Glass top coffee table"),
            ("Floor Lamp", "Adjustable floor reading lamp"),
            ("Storage Ottoman", "Fabric storage ottoman with lid"),
            ("Computer Stand", "Mobile computer cart with wheels"),
            ("Coat Rack", "Wooden coat rack stand"),
            ("Whiteboard", "Magnetic dry erase whiteboard"),
            ("Waste Basket", "Mesh metal waste basket"),
            ("Plant Stand", "Bamboo plant display stand"),
            ("Shoe Rack", "3-tier shoe storage rack"),
            ("Monitor Riser", "Wooden monitor stand with storage"),
            ("Side Table", "Round side table with drawer"),
            ("Bar Stool", "Adjustable height bar stool"),
            ("Folding Chair", "Padded folding chair"),
            ("TV Stand", "Entertainment center TV stand"),
            ("Nightstand", "Bedside table with drawer"),
            ("Dresser", "6-drawer bedroom dresser"),
            ("Wardrobe", "Portable clothes wardrobe"),
            ("Bench", "Storage bench with cushion"),
            ("Desk Pad", "Large leather desk mat"),
            ("Mirror", "Full-length standing mirror"),
            ("Storage Box", "Plastic storage container with lid"),
        ],
    ),
    (
        "Groceries",
        (2_000, 50_000),
        &[
            ("Rice", "Long grain white rice 5kg bag"),
            ("Cooking Oil", "Vegetable cooking oil 2L bottle"),
            ("Sugar", "Granulated white sugar 2kg"),
            ("Salt", "Iodized table salt 1kg"),
            ("Flour", "All-purpose wheat flour 2kg"),
            ("Tea Bags", "Black tea bags pack of 100"),
            ("Coffee", "Instant coffee jar 200g"),
            ("Milk Powder", "Full cream milk powder 1kg"),
            ("Pasta", "Spaghetti pasta 500g pack"),
            ("Canned Tomatoes", "Diced tomatoes 400g can"),
            ("Bread", "Whole wheat bread loaf"),
            ("Eggs", "Fresh eggs dozen pack"),
            ("Onions", "Yellow onions 2kg bag"),
            ("Potatoes", "Irish potatoes 5kg bag"),
            ("Carrots", "Fresh carrots 1kg bag"),
            ("Chicken", "Frozen chicken pieces 1kg"),
            ("Fish", "Frozen tilapia fillets 500g"),
            ("Beef", "Lean ground beef 500g"),
            ("Cheese", "Cheddar cheese block 250g"),
            ("Butter", "Salted butter 500g pack"),
            ("Yogurt", "Natural yogurt 500ml"),
            ("Bananas", "Fresh bananas per kg"),
            ("Apples", "Red apples per kg"),
            ("Oranges", "Fresh oranges per kg"),
            ("Tomatoes", "Fresh tomatoes per kg"),
        ],
    ),
];

const MAX_SEED_STOCK: i32 = 100;

/// `ELE001`, `SUP012`, ...
fn seed_sku(category: &str, index: usize) -> String {
    let prefix: String = category.chars().take(3).collect::<String>().to_uppercase();
    format!("{}{:03}", prefix, index + 1)
}

fn generate_products<R: Rng>(rng: &mut R) -> Vec<product::ActiveModel> {
    let now = Utc::now();
    let mut products = Vec::new();

    for (category, (min_cents, max_cents), items) in CATALOG {
        for (index, (name, description)) in items.iter().enumerate() {
            let cents = rng.gen_range(*min_cents..=*max_cents);
            products.push(product::ActiveModel {
                name: Set(name.to_string()),
                category: Set(category.to_string()),
                price: Set(Decimal::new(cents, 2)),
                stock_quantity: Set(rng.gen_range(0..=MAX_SEED_STOCK)),
                sku: Set(seed_sku(category, index)),
                description: Set(Some(description.to_string())),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
                ..Default::default()
            });
        }
    }

    products
}

async fn category_breakdown(db: &DatabaseConnection) -> anyhow::Result<Vec<(String, i64)>> {
    let rows = Product::find()
        .select_only()
        .column(Column::Category)
        .column_as(Column::Id.count(), "count")
        .group_by(Column::Category)
        .order_by_asc(Column::Category)
        .into_tuple::<(String, i64)>()
        .all(db)
        .await?;
    Ok(rows)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("=== Inventory Seed Data ===");

    let db = db::establish_connection_from_app_config(&cfg).await?;
    info!("Connected!");

    db::run_migrations(&db).await?;
    info!("Products table ready");

    info!("Generating dummy products...");
    let products = generate_products(&mut rand::thread_rng());
    let generated = products.len();

    info!("Inserting products into database...");
    let inserted = Product::insert_many(products)
        .on_conflict(OnConflict::column(Column::Sku).do_nothing().to_owned())
        .exec_without_returning(&db)
        .await?;
    info!(
        "Inserted {} of {} products (existing SKUs skipped)",
        inserted, generated
    );

    let breakdown = category_breakdown(&db).await?;
    let total: i64 = breakdown.iter().map(|(_, count)| count).sum();
    info!("Total products in database: {}", total);
    info!("Products by category:");
    for (category, count) in breakdown {
        info!("  {}: {} products", category, count);
    }

    info!("Database setup completed successfully!");
    info!("Try: curl http://localhost:{}/api/products", cfg.port);

    Ok(())
}
