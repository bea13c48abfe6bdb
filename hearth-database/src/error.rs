/// Failures of the player store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("player {0} is already registered")]
    DuplicatePlayer(u64),

    #[error("player {0} disappeared during registration")]
    PlayerVanished(u64),

    #[error("{field} out of range")]
    OutOfRange { field: &'static str },

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
