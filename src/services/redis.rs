//! Redis service for the server-side session store

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service and verify the connection
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Connectivity probe for the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis ping failed: {}", e)))?;
        Ok(())
    }

    /// Store a session payload under its hashed token with expiration
    pub async fn store_session(
        &self,
        token_hash: &str,
        payload: &str,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let key = format!("session:{}", token_hash);
        conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session in Redis: {}", e)))?;
        Ok(())
    }

    /// Fetch a session payload and refresh its TTL (sliding expiration)
    pub async fn fetch_session(
        &self,
        token_hash: &str,
        ttl_seconds: u64,
    ) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        let key = format!("session:{}", token_hash);

        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get session from Redis: {}", e)))?;

        if payload.is_some() {
            let _: () = conn.expire(&key, ttl_seconds as i64).await.map_err(|e| {
                AppError::Internal(format!("Failed to refresh session TTL: {}", e))
            })?;
        }

        Ok(payload)
    }

    /// Delete a session (logout)
    pub async fn delete_session(&self, token_hash: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let key = format!("session:{}", token_hash);
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete session from Redis: {}", e)))?;
        Ok(())
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}
