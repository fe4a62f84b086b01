//! Database seeder for development and testing.
//!
//! Seeds the default admin account and a small demo data set so the
//! dashboard has something to show on a fresh database.
//!
//! Usage: cargo run --bin seeder

use sea_orm::DatabaseConnection;

use coveted_core::auth::hash_password;
use coveted_db::entities::sea_orm_active_enums::UserRole;
use coveted_db::repositories::UserRepository;
use coveted_db::seed::ensure_default_admin;

const ADMIN_NAME: &str = "Administrator";
const ADMIN_EMAIL: &str = "admin@covetedcollection.com";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = coveted_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding default admin...");
    seed_admin(&db).await;

    println!("Seeding demo employees...");
    seed_demo_employees(&db).await;

    println!("Seeding complete!");
}

async fn seed_admin(db: &DatabaseConnection) {
    let password =
        std::env::var("COVETED__BOOTSTRAP__ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    let hash = hash_password(&password).expect("Failed to hash admin password");

    match ensure_default_admin(db, ADMIN_NAME, ADMIN_EMAIL, &hash).await {
        Ok(true) => println!("  Created default admin: {ADMIN_EMAIL}"),
        Ok(false) => println!("  Users already exist, skipping..."),
        Err(e) => eprintln!("Failed to seed admin: {e}"),
    }
}

async fn seed_demo_employees(db: &DatabaseConnection) {
    let users = UserRepository::new(db.clone());
    let demo = [
        ("Avery Quinn", "avery@covetedcollection.com", UserRole::Manager, "Operations"),
        ("Blake Rowan", "blake@covetedcollection.com", UserRole::Employee, "Housekeeping"),
    ];

    for (name, email, role, department) in demo {
        match users.email_exists(email).await {
            Ok(true) => {
                println!("  {email} already exists, skipping...");
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("Failed to check {email}: {e}");
                continue;
            }
        }

        let hash = match hash_password("welcome1") {
            Ok(h) => h,
            Err(e) => {
                eprintln!("Failed to hash demo password: {e}");
                continue;
            }
        };

        match users.create(name, email, &hash, role, department).await {
            Ok(user) => println!("  Created {} ({})", user.name, user.email),
            Err(e) => eprintln!("Failed to insert {email}: {e}"),
        }
    }
}
