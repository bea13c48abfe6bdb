use chrono::{DateTime, Utc};

pub const DEFAULT_LEVEL: i64 = 1;
pub const DEFAULT_EXP: i64 = 0;
pub const DEFAULT_CREDITS: i64 = 1000;
/// Experience needed to fill one level; only displayed, leveling is not implemented.
pub const EXP_PER_LEVEL: i64 = 100;

/// Persisted profile of one bot user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub user_id: u64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub level: i64,
    pub exp: i64,
    pub credits: i64,
    pub joined_at: DateTime<Utc>,
}

impl Player {
    /// A freshly registered player with the default stats.
    pub fn fresh(new_player: &NewPlayer, joined_at: DateTime<Utc>) -> Self {
        Self {
            user_id: new_player.user_id,
            username: new_player.username.clone(),
            first_name: new_player.first_name.clone(),
            level: DEFAULT_LEVEL,
            exp: DEFAULT_EXP,
            credits: DEFAULT_CREDITS,
            joined_at,
        }
    }
}

/// Identity captured from the first `/start` of a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlayer {
    pub user_id: u64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

/// Outcome of an insert-if-absent registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub player: Player,
    pub created: bool,
}
