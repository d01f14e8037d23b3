//! Database seeder for Coinmerch development and testing.
//!
//! Seeds demo users (each with a provisioned wallet), a few transfers, and
//! a few purchases for local development.
//!
//! Usage: cargo run --bin seeder

use coinmerch_core::catalog::Catalog;
use coinmerch_db::entities::users;
use coinmerch_db::repositories::{
    ProfileRepository, PurchaseRepository, TransferRepository, UserError, UserRepository,
};
use coinmerch_shared::AppConfig;

/// Demo usernames seeded for local development.
const DEMO_USERS: [&str; 3] = ["alice", "bob", "carol"];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = coinmerch_db::connect_with(&config.database)
        .await
        .expect("Failed to connect to database");

    let catalog = if config.catalog.items.is_empty() {
        Catalog::standard()
    } else {
        Catalog::new(config.catalog.items.clone()).expect("Invalid catalog configuration")
    };

    println!("Seeding demo users...");
    let users_repo = UserRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(DEMO_USERS.len());
    let mut any_existing = false;
    for username in DEMO_USERS {
        let (user, created) =
            seed_user(&users_repo, username, config.wallet.starting_balance).await;
        any_existing |= !created;
        seeded.push(user);
    }

    // Transfers and purchases are not idempotent; only run them against a
    // freshly seeded set of users.
    if any_existing {
        println!("Demo users already present, skipping transfers and purchases...");
    } else {
        println!("Seeding demo transfers...");
        let transfers = TransferRepository::new(db.clone());
        transfers
            .send_coins(seeded[0].id, &seeded[1].username, 150)
            .await
            .expect("Failed to seed transfer");
        transfers
            .send_coins(seeded[1].id, &seeded[2].username, 40)
            .await
            .expect("Failed to seed transfer");

        println!("Seeding demo purchases...");
        let purchases = PurchaseRepository::new(db.clone(), catalog);
        purchases
            .buy_item(seeded[0].id, "t-shirt")
            .await
            .expect("Failed to seed purchase");
        purchases
            .buy_item(seeded[1].id, "cup")
            .await
            .expect("Failed to seed purchase");
    }

    println!("Seeded balances:");
    let profiles = ProfileRepository::new(db);
    for user in &seeded {
        let profile = profiles
            .get_profile(user.id)
            .await
            .expect("Failed to load profile");
        println!("  {}: {} coins", user.username, profile.balance);
    }

    println!("Seeding complete!");
}

/// Creates a demo user, or looks them up if already seeded.
///
/// Returns the user row and whether it was created by this run.
async fn seed_user(
    repo: &UserRepository,
    username: &str,
    starting_balance: i64,
) -> (users::Model, bool) {
    match repo.create_with_wallet(username, starting_balance).await {
        Ok((user, wallet)) => {
            println!("  Created {} with {} coins", user.username, wallet.balance);
            (user, true)
        }
        Err(UserError::UsernameTaken(_)) => {
            println!("  User {username} already exists, skipping...");
            let user = repo
                .find_by_username(username)
                .await
                .expect("Failed to look up user")
                .expect("User should exist");
            (user, false)
        }
        Err(e) => panic!("Failed to seed user {username}: {e}"),
    }
}
