use serde::{Serialize, Deserialize};

/// A row mapping a game's name to its cumulative play count.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameStat {
    pub game_name: String,
    pub play_count: i32,
}
