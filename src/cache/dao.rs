use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::Result;
use crate::models::CachedUser;

/// Data-access surface over the cache's `user` table
#[derive(Debug, Clone)]
pub struct UserDao {
    pool: SqlitePool,
}

impl UserDao {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check the connection with a trivial query
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<CachedUser>> {
        let users = sqlx::query_as::<_, CachedUser>(
            r#"SELECT uid, username, password FROM "user" ORDER BY uid"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Load every row whose uid is in `uids`; unknown uids are skipped
    pub async fn load_all_by_ids(&self, uids: &[i64]) -> Result<Vec<CachedUser>> {
        if uids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(r#"SELECT uid, username, password FROM "user" WHERE uid IN ("#);
        let mut separated = query.separated(", ");
        for uid in uids {
            separated.push_bind(*uid);
        }
        separated.push_unseparated(") ORDER BY uid");

        let users = query
            .build_query_as::<CachedUser>()
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// First row matching both patterns with SQL `LIKE` semantics
    /// (`%` and `_` wildcards, ASCII case-insensitive)
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<CachedUser>> {
        let user = sqlx::query_as::<_, CachedUser>(
            r#"SELECT uid, username, password FROM "user"
               WHERE username LIKE ? AND password LIKE ?
               LIMIT 1"#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert one row; a duplicate uid is an error
    pub async fn insert_user(&self, user: &CachedUser) -> Result<()> {
        sqlx::query(r#"INSERT INTO "user" (uid, username, password) VALUES (?, ?, ?)"#)
            .bind(user.uid)
            .bind(&user.username)
            .bind(&user.password)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Cached user {}", user.uid);
        Ok(())
    }

    /// Insert several rows in one transaction: either all land or none do
    pub async fn insert_all(&self, users: &[CachedUser]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for user in users {
            sqlx::query(r#"INSERT INTO "user" (uid, username, password) VALUES (?, ?, ?)"#)
                .bind(user.uid)
                .bind(&user.username)
                .bind(&user.password)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!("Cached {} users", users.len());
        Ok(())
    }

    /// Delete the row with the same uid; returns the number of rows removed
    pub async fn delete(&self, user: &CachedUser) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE uid = ?"#)
            .bind(user.uid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
