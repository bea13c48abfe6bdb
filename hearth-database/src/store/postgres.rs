use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::model::player::{
    DEFAULT_CREDITS, DEFAULT_EXP, DEFAULT_LEVEL, NewPlayer, Player, Registration,
};

#[derive(sqlx::FromRow)]
struct PlayerRow {
    user_id: i64,
    username: Option<String>,
    first_name: Option<String>,
    level: i64,
    exp: i64,
    credits: i64,
    joined_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn get(&self, user_id: u64) -> Result<Option<Player>, StoreError> {
        let user_id_i64 = to_i64(user_id, "user_id")?;

        let row: Option<PlayerRow> = sqlx::query_as(
            "SELECT user_id, username, first_name, level, exp, credits, joined_at
             FROM players
             WHERE user_id = $1",
        )
        .bind(user_id_i64)
        .fetch_optional(&self.pool)
        .await?;

        row.map(to_player).transpose()
    }

    pub async fn create(&self, new_player: &NewPlayer) -> Result<Player, StoreError> {
        let user_id_i64 = to_i64(new_player.user_id, "user_id")?;

        let row: PlayerRow = sqlx::query_as(
            "INSERT INTO players (user_id, username, first_name, level, exp, credits)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING user_id, username, first_name, level, exp, credits, joined_at",
        )
        .bind(user_id_i64)
        .bind(new_player.username.as_deref())
        .bind(new_player.first_name.as_deref())
        .bind(DEFAULT_LEVEL)
        .bind(DEFAULT_EXP)
        .bind(DEFAULT_CREDITS)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicatePlayer(new_player.user_id)
            }
            other => StoreError::Database(other),
        })?;

        to_player(row)
    }

    pub async fn register(&self, new_player: &NewPlayer) -> Result<Registration, StoreError> {
        let user_id_i64 = to_i64(new_player.user_id, "user_id")?;

        let inserted: Option<PlayerRow> = sqlx::query_as(
            "INSERT INTO players (user_id, username, first_name, level, exp, credits)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING user_id, username, first_name, level, exp, credits, joined_at",
        )
        .bind(user_id_i64)
        .bind(new_player.username.as_deref())
        .bind(new_player.first_name.as_deref())
        .bind(DEFAULT_LEVEL)
        .bind(DEFAULT_EXP)
        .bind(DEFAULT_CREDITS)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok(Registration {
                player: to_player(row)?,
                created: true,
            });
        }

        // Conflict: the row was committed by this or a concurrent registration.
        let existing = self
            .get(new_player.user_id)
            .await?
            .ok_or(StoreError::PlayerVanished(new_player.user_id))?;

        Ok(Registration {
            player: existing,
            created: false,
        })
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|_| StoreError::OutOfRange { field: "count" })
    }
}

fn to_i64(value: u64, field: &'static str) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::OutOfRange { field })
}

fn to_player(row: PlayerRow) -> Result<Player, StoreError> {
    Ok(Player {
        user_id: u64::try_from(row.user_id).map_err(|_| StoreError::OutOfRange {
            field: "user_id row",
        })?,
        username: row.username,
        first_name: row.first_name,
        level: row.level,
        exp: row.exp,
        credits: row.credits,
        joined_at: row.joined_at,
    })
}
