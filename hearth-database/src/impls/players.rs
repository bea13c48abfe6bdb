use tracing::{debug, info};

use crate::database::{Database, PlayerBackend};
use crate::error::StoreError;
use crate::model::player::{NewPlayer, Player, Registration};

/// Look up a player by id. Absence is `Ok(None)`.
pub async fn get_player(db: &Database, user_id: u64) -> Result<Option<Player>, StoreError> {
    let player = match db.backend() {
        PlayerBackend::Postgres(store) => store.get(user_id).await,
        PlayerBackend::Memory(store) => store.get(user_id).await,
    }?;

    debug!(user_id, found = player.is_some(), "player lookup");
    Ok(player)
}

/// Insert a player with default stats. Fails with `DuplicatePlayer` if the id exists.
pub async fn create_player(db: &Database, new_player: &NewPlayer) -> Result<Player, StoreError> {
    let player = match db.backend() {
        PlayerBackend::Postgres(store) => store.create(new_player).await,
        PlayerBackend::Memory(store) => store.create(new_player).await,
    }?;

    info!(user_id = player.user_id, "player created");
    Ok(player)
}

/// Insert the player if absent, else return the stored row untouched.
pub async fn register_player(
    db: &Database,
    new_player: &NewPlayer,
) -> Result<Registration, StoreError> {
    let registration = match db.backend() {
        PlayerBackend::Postgres(store) => store.register(new_player).await,
        PlayerBackend::Memory(store) => store.register(new_player).await,
    }?;

    if registration.created {
        info!(user_id = new_player.user_id, "player registered");
    } else {
        debug!(user_id = new_player.user_id, "player already registered");
    }

    Ok(registration)
}

pub async fn count_players(db: &Database) -> Result<u64, StoreError> {
    match db.backend() {
        PlayerBackend::Postgres(store) => store.count().await,
        PlayerBackend::Memory(store) => store.count().await,
    }
}

#[cfg(test)]
mod tests {
    use super::{count_players, create_player, get_player, register_player};
    use crate::model::player::{DEFAULT_CREDITS, DEFAULT_EXP, DEFAULT_LEVEL, NewPlayer};
    use crate::{Database, MemoryPlayerStore, StoreError};

    fn ann() -> NewPlayer {
        NewPlayer {
            user_id: 42,
            username: Some("ann_k".to_owned()),
            first_name: Some("Ann".to_owned()),
        }
    }

    #[tokio::test]
    async fn missing_player_is_none() {
        let db = Database::from_memory(MemoryPlayerStore::new());
        assert_eq!(get_player(&db, 7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_uses_defaults_and_rejects_duplicates() {
        let store = MemoryPlayerStore::new();
        let db = Database::from_memory(store.clone());

        let player = create_player(&db, &ann()).await.unwrap();
        assert_eq!(player.user_id, 42);
        assert_eq!(player.level, DEFAULT_LEVEL);
        assert_eq!(player.exp, DEFAULT_EXP);
        assert_eq!(player.credits, DEFAULT_CREDITS);
        assert_eq!(player.first_name.as_deref(), Some("Ann"));

        let err = create_player(&db, &ann()).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePlayer(42)));
        assert_eq!(store.len(), 1);
        assert_eq!(get_player(&db, 42).await.unwrap(), Some(player));
    }

    #[tokio::test]
    async fn register_is_insert_if_absent() {
        let store = MemoryPlayerStore::new();
        let db = Database::from_memory(store.clone());

        let original = ann();
        let first = register_player(&db, &original).await.unwrap();
        assert!(first.created);

        let renamed = NewPlayer {
            first_name: Some("Anna".to_owned()),
            ..ann()
        };
        let second = register_player(&db, &renamed).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.player, first.player);
        assert_eq!(second.player.first_name.as_deref(), Some("Ann"));
        assert_eq!(count_players(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_create_one_row() {
        let store = MemoryPlayerStore::new();
        let db = Database::from_memory(store.clone());

        let (first, second) = (ann(), ann());
        let (left, right) = tokio::join!(register_player(&db, &first), register_player(&db, &second));
        let created = [left.unwrap().created, right.unwrap().created];

        assert_eq!(created.iter().filter(|created| **created).count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn memory_store_counts_accesses() {
        let store = MemoryPlayerStore::new();
        let db = Database::from_memory(store.clone());
        assert_eq!(db.backend_name(), "memory");
        assert!(db.pool().is_none());
        db.run_migrations().await.unwrap();

        get_player(&db, 1).await.unwrap();
        register_player(&db, &ann()).await.unwrap();

        assert_eq!(store.reads(), 1);
        assert_eq!(store.writes(), 1);
        assert!(store.snapshot(42).is_some());
        assert_eq!(store.reads(), 1);
    }
}
