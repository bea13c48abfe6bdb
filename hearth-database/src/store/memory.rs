use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::error::StoreError;
use crate::model::player::{NewPlayer, Player, Registration};

/// In-process player store with access counters. Selected with `DATABASE_URL=memory`; tests use it too.
#[derive(Clone, Debug, Default)]
pub struct MemoryPlayerStore {
    players: Arc<Mutex<HashMap<u64, Player>>>,
    reads: Arc<AtomicU64>,
    writes: Arc<AtomicU64>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups performed so far.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of insert attempts performed so far, successful or not.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a row without counting it as an access.
    pub fn snapshot(&self, user_id: u64) -> Option<Player> {
        self.lock().get(&user_id).cloned()
    }

    pub async fn get(&self, user_id: u64) -> Result<Option<Player>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.lock().get(&user_id).cloned())
    }

    pub async fn create(&self, new_player: &NewPlayer) -> Result<Player, StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut players = self.lock();

        if players.contains_key(&new_player.user_id) {
            return Err(StoreError::DuplicatePlayer(new_player.user_id));
        }

        let player = Player::fresh(new_player, Utc::now());
        players.insert(player.user_id, player.clone());
        Ok(player)
    }

    pub async fn register(&self, new_player: &NewPlayer) -> Result<Registration, StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut players = self.lock();

        if let Some(existing) = players.get(&new_player.user_id) {
            return Ok(Registration {
                player: existing.clone(),
                created: false,
            });
        }

        let player = Player::fresh(new_player, Utc::now());
        players.insert(player.user_id, player.clone());
        Ok(Registration {
            player,
            created: true,
        })
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        u64::try_from(self.lock().len()).map_err(|_| StoreError::OutOfRange { field: "count" })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Player>> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
