use std::time::Duration;

use sqlx::{Connection, PgConnection};

use crate::config::DbConfig;
use crate::models::GameStat;

const INIT_RETRIES: u32 = 5;
const INIT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Each request gets its own connection; callers close it before returning.
async fn connect(config: &DbConfig) -> Result<PgConnection, sqlx::Error> {
    PgConnection::connect_with(&config.connect_options()).await
}

pub async fn fetch_stats(config: &DbConfig) -> Result<Vec<GameStat>, sqlx::Error> {
    let mut conn = connect(config).await?;
    let rows = sqlx::query_as::<_, GameStat>(
        r#"SELECT game_name, play_count FROM game_stats ORDER BY game_name"#,
    )
    .fetch_all(&mut conn)
    .await;
    conn.close().await.ok();
    rows
}

/// Atomically bumps a game's play count, returning the updated row or `None`
/// when no row matches. Increment never creates a row; the roster is
/// seed-only.
pub async fn increment_play_count(
    config: &DbConfig,
    game_name: &str,
) -> Result<Option<GameStat>, sqlx::Error> {
    let mut conn = connect(config).await?;
    let row = sqlx::query_as::<_, GameStat>(
        r#"UPDATE game_stats SET play_count = play_count + 1
           WHERE game_name = $1
           RETURNING game_name, play_count"#,
    )
    .bind(game_name)
    .fetch_optional(&mut conn)
    .await;
    conn.close().await.ok();
    row
}

/// Liveness probe: connect, run a trivial query, disconnect.
pub async fn ping(config: &DbConfig) -> Result<(), sqlx::Error> {
    let mut conn = connect(config).await?;
    let result = sqlx::query("SELECT 1").execute(&mut conn).await;
    conn.close().await.ok();
    result.map(|_| ())
}

async fn init_once(config: &DbConfig) -> Result<(), sqlx::Error> {
    let mut conn = connect(config).await?;
    let result = async {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS game_stats (
                   game_name VARCHAR(50) PRIMARY KEY,
                   play_count INTEGER DEFAULT 0
               )"#,
        )
        .execute(&mut conn)
        .await?;

        sqlx::query(
            r#"INSERT INTO game_stats (game_name, play_count)
               VALUES ('DOOM', 0), ('CIVILIZATION', 0)
               ON CONFLICT (game_name) DO NOTHING"#,
        )
        .execute(&mut conn)
        .await?;

        Ok(())
    }
    .await;
    conn.close().await.ok();
    result
}

/// Ensures the schema and seed rows exist, retrying on a fixed delay.
/// Exhausting retries is logged but non-fatal; the service keeps serving.
pub async fn init_database(config: &DbConfig) {
    for attempt in 1..=INIT_RETRIES {
        match init_once(config).await {
            Ok(()) => {
                tracing::info!("Database initialized successfully");
                return;
            }
            Err(err) => {
                tracing::error!(
                    "Database initialization error ({} retries left): {}",
                    INIT_RETRIES - attempt,
                    err
                );
                if attempt < INIT_RETRIES {
                    tokio::time::sleep(INIT_RETRY_DELAY).await;
                }
            }
        }
    }

    tracing::error!("Failed to initialize database after all retries");
}
