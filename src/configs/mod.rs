use deadpool_redis::{
    Runtime,
    redis::{self, AsyncCommands},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::collections::VecDeque;

use crate::{ENV, api::error};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let database_url = &ENV.database_url;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database migrations applied");

    Ok(pool)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    /// Seconds until the oldest logged request leaves the window.
    Throttled { retry_after: u64 },
}

/// Sliding log of admitted requests backing the rate limiter.
///
/// Only admitted requests are recorded, so a throttled caller frees up as soon as
/// their oldest admitted request is `window_secs` old.
#[async_trait::async_trait]
pub trait ThrottleLog: Send + Sync {
    async fn admit(
        &self,
        key: &str,
        limit: u64,
        window_secs: u64,
    ) -> Result<Admission, error::SystemError>;
}

fn window_ms(window_secs: u64) -> i64 {
    i64::try_from(window_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
}

fn retry_after_secs(oldest_ms: i64, now_ms: i64, window_ms: i64) -> u64 {
    let wait = oldest_ms.saturating_add(window_ms).saturating_sub(now_ms).max(0);
    (wait.saturating_add(999) / 1000).max(1) as u64
}

/// Admission over an in-process log of millisecond timestamps, oldest first.
pub fn admit_at(
    history: &mut VecDeque<i64>,
    now_ms: i64,
    limit: u64,
    window_secs: u64,
) -> Admission {
    let window = window_ms(window_secs);
    while history.front().is_some_and(|&t| t <= now_ms.saturating_sub(window)) {
        history.pop_front();
    }

    if (history.len() as u64) < limit {
        history.push_back(now_ms);
        return Admission::Allowed;
    }

    let oldest = history.front().copied().unwrap_or(now_ms);
    Admission::Throttled { retry_after: retry_after_secs(oldest, now_ms, window) }
}

#[derive(Clone)]
pub struct RedisCache {
    pool: deadpool_redis::Pool,
}

impl RedisCache {
    pub async fn new() -> Result<Self, error::SystemError> {
        Self::from_url(&ENV.redis_url)
    }

    pub fn from_url(url: &str) -> Result<Self, error::SystemError> {
        let mut cfg = deadpool_redis::Config::from_url(url);
        cfg.pool = Some(deadpool_redis::PoolConfig { max_size: 16, ..Default::default() });
        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl ThrottleLog for RedisCache {
    async fn admit(
        &self,
        key: &str,
        limit: u64,
        window_secs: u64,
    ) -> Result<Admission, error::SystemError> {
        let mut conn = self.pool.get().await?;
        let now = chrono::Utc::now().timestamp_millis();
        let window = window_ms(window_secs);
        let member = uuid::Uuid::now_v7().to_string();

        // one MULTI block; every hit re-asserts the TTL
        let (count, oldest): (u64, Vec<(String, f64)>) = redis::pipe()
            .atomic()
            .zrembyscore(key, "-inf", now.saturating_sub(window))
            .ignore()
            .zadd(key, &member, now)
            .ignore()
            .zcard(key)
            .zrange_withscores(key, 0, 0)
            .pexpire(key, window)
            .ignore()
            .query_async(&mut conn)
            .await?;

        if count <= limit {
            return Ok(Admission::Allowed);
        }

        // throttled requests stay out of the log
        if let Err(e) = conn.zrem::<_, _, ()>(key, &member).await {
            log::warn!("Failed to drop throttled entry from {key}: {e}");
        }

        let oldest = oldest.first().map(|(_, score)| *score as i64).unwrap_or(now);
        Ok(Admission::Throttled { retry_after: retry_after_secs(oldest, now, window) })
    }
}
