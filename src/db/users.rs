//! User database queries.
//!
//! Users carry no data of their own; a row exists so memories have an owner
//! to cascade from. Rows are created implicitly on first write.

use crate::Result;

use super::DbPool;

/// Insert the user if it does not exist yet.
pub async fn ensure_user(pool: &DbPool, user_id: &str) -> Result<()> {
    sqlx::query("INSERT INTO users (id) VALUES (?) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
