use async_trait::async_trait;
use jiff::Timestamp;
use mailmask_core::{Storage, StorageError, StorageResult};
use redis::{AsyncCommands, Script};
use tracing::{debug, trace};

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_connection_refusal() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

// Checks both uniqueness directions and inserts in one server-side step.
// KEYS: forward key, reverse key, expiry zset. ARGV: value, raw key, score.
const SET_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
  return 'DUPLICATED_KEY'
end
if redis.call('EXISTS', KEYS[2]) == 1 then
  return 'DUPLICATED_VALUE'
end
redis.call('SET', KEYS[1], ARGV[1])
redis.call('SET', KEYS[2], ARGV[2])
redis.call('ZADD', KEYS[3], ARGV[3], ARGV[2])
return 'OK'
"#;

// KEYS: forward key, expiry zset. ARGV: raw key, reverse prefix.
const UNSET_BY_KEY_SCRIPT: &str = r#"
local value = redis.call('GET', KEYS[1])
if not value then
  return false
end
redis.call('DEL', KEYS[1])
redis.call('DEL', ARGV[2] .. value)
redis.call('ZREM', KEYS[2], ARGV[1])
return value
"#;

// KEYS: reverse key, expiry zset. ARGV: raw value, forward prefix.
const UNSET_BY_VALUE_SCRIPT: &str = r#"
local key = redis.call('GET', KEYS[1])
if not key then
  return false
end
redis.call('DEL', KEYS[1])
redis.call('DEL', ARGV[2] .. key)
redis.call('ZREM', KEYS[2], key)
return ARGV[1]
"#;

// KEYS: expiry zset. ARGV: exclusive max score, forward prefix, reverse prefix.
const UNSET_EXPIRED_SCRIPT: &str = r#"
local keys = redis.call('ZRANGEBYSCORE', KEYS[1], '-inf', ARGV[1])
local values = {}
for _, key in ipairs(keys) do
  local value = redis.call('GET', ARGV[2] .. key)
  if value then
    redis.call('DEL', ARGV[2] .. key)
    redis.call('DEL', ARGV[3] .. value)
    table.insert(values, value)
  end
  redis.call('ZREM', KEYS[1], key)
end
return values
"#;

/// Redis-backed implementation of the [`Storage`] trait.
///
/// Entries live in a forward mapping (`<prefix>key:<key>` → value), a
/// reverse mapping (`<prefix>addr:<value>` → key) used for the value
/// uniqueness check and [`unset_by_value`](Storage::unset_by_value), and a
/// sorted set scored by millisecond expiry for the sweep. Every mutation
/// runs as a Lua script, which gives the check-then-insert sequence the
/// same single-critical-section guarantee the in-memory store gets from
/// its lock.
#[derive(Debug, Clone)]
pub struct RedisStorage {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

impl RedisStorage {
    /// Creates a Redis store over an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, "mm:")
    }

    /// Creates a Redis store with a custom key prefix.
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connects to the given Redis URL and wraps the connection.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|err| StorageError::Unavailable(format!("invalid redis url: {err}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| map_redis_error("failed to connect to Redis", err))?;
        Ok(Self::new(conn))
    }

    fn forward_prefix(&self) -> String {
        format!("{}key:", self.key_prefix)
    }

    fn reverse_prefix(&self) -> String {
        format!("{}addr:", self.key_prefix)
    }

    fn forward_key(&self, key: &str) -> String {
        format!("{}{}", self.forward_prefix(), key)
    }

    fn reverse_key(&self, value: &str) -> String {
        format!("{}{}", self.reverse_prefix(), value)
    }

    fn expiry_key(&self) -> String {
        format!("{}expiry", self.key_prefix)
    }
}

#[async_trait]
impl Storage for RedisStorage {
    async fn get(&self, key: &str) -> StorageResult<String> {
        trace!(key = %key, "fetching entry from Redis");

        let mut conn = self.conn.clone();
        let value = conn
            .get::<_, Option<String>>(self.forward_key(key))
            .await
            .map_err(|err| map_redis_error("failed to fetch entry from Redis", err))?;

        value.ok_or_else(|| StorageError::UndefinedKey(key.to_owned()))
    }

    async fn set(&self, key: &str, value: &str, expires_at: Timestamp) -> StorageResult<()> {
        trace!(key = %key, "inserting entry into Redis");

        let mut conn = self.conn.clone();
        let outcome: String = Script::new(SET_SCRIPT)
            .key(self.forward_key(key))
            .key(self.reverse_key(value))
            .key(self.expiry_key())
            .arg(value)
            .arg(key)
            .arg(expires_at.as_millisecond())
            .invoke_async(&mut conn)
            .await
            .map_err(|err| map_redis_error("failed to write entry to Redis", err))?;

        match outcome.as_str() {
            "OK" => {
                debug!(key = %key, "inserted entry into Redis");
                Ok(())
            }
            "DUPLICATED_KEY" => Err(StorageError::DuplicatedKey(key.to_owned())),
            "DUPLICATED_VALUE" => Err(StorageError::DuplicatedValue(value.to_owned())),
            other => Err(StorageError::Operation(format!(
                "unexpected insert outcome: {other}"
            ))),
        }
    }

    async fn unset_by_key(&self, key: &str) -> StorageResult<String> {
        trace!(key = %key, "deleting entry from Redis by key");

        let mut conn = self.conn.clone();
        let deleted: Option<String> = Script::new(UNSET_BY_KEY_SCRIPT)
            .key(self.forward_key(key))
            .key(self.expiry_key())
            .arg(key)
            .arg(self.reverse_prefix())
            .invoke_async(&mut conn)
            .await
            .map_err(|err| map_redis_error("failed to delete entry from Redis", err))?;

        deleted.ok_or_else(|| StorageError::UndefinedKey(key.to_owned()))
    }

    async fn unset_by_value(&self, value: &str) -> StorageResult<String> {
        trace!(value = %value, "deleting entry from Redis by value");

        let mut conn = self.conn.clone();
        let deleted: Option<String> = Script::new(UNSET_BY_VALUE_SCRIPT)
            .key(self.reverse_key(value))
            .key(self.expiry_key())
            .arg(value)
            .arg(self.forward_prefix())
            .invoke_async(&mut conn)
            .await
            .map_err(|err| map_redis_error("failed to delete entry from Redis", err))?;

        deleted.ok_or_else(|| StorageError::UndefinedValue(value.to_owned()))
    }

    async fn unset_expired(&self, until: Timestamp) -> StorageResult<Vec<String>> {
        trace!(until = %until, "sweeping expired entries from Redis");

        let mut conn = self.conn.clone();
        let values: Vec<String> = Script::new(UNSET_EXPIRED_SCRIPT)
            .key(self.expiry_key())
            // Exclusive bound: only entries expiring strictly before `until`.
            .arg(format!("({}", until.as_millisecond()))
            .arg(self.forward_prefix())
            .arg(self.reverse_prefix())
            .invoke_async(&mut conn)
            .await
            .map_err(|err| map_redis_error("failed to sweep expired entries", err))?;

        if !values.is_empty() {
            debug!(count = values.len(), "swept expired entries from Redis");
        }
        Ok(values)
    }
}
