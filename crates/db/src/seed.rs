//! First-run seeding.

use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::entities::sea_orm_active_enums::UserRole;
use crate::repositories::UserRepository;

/// Creates the default admin account when the users table is empty.
///
/// Returns true when an account was created. The password hash must be
/// produced by the caller (hashing lives in `coveted-core`).
///
/// # Errors
///
/// Returns an error if any database operation fails.
pub async fn ensure_default_admin(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<bool, DbErr> {
    let users = UserRepository::new(db.clone());
    if users.count().await? > 0 {
        return Ok(false);
    }

    let admin = users
        .create(name, email, password_hash, UserRole::Admin, "")
        .await?;
    info!(user_id = %admin.id, email = %admin.email, "Seeded default admin account");
    Ok(true)
}
