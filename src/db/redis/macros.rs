/// Read-through caching around an async lookup.
///
/// Returns the cached value when present. Otherwise awaits `$block`, queues
/// the result for a background write with `$ttl` seconds to live, and returns
/// it. A failed cache read is logged and treated as a miss. When `$cache` is
/// `None` the block is awaited directly.
///
/// # Arguments
/// * `$cache`: an `Option<Cache>` (or reference to one).
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) to read and write.
/// * `$ttl`: time-to-live in seconds.
/// * `$block`: a future yielding `Result<T, E>`.
///
/// # Example
/// ```rust,ignore
/// let record = cached!(self.cache, CacheKey::Content(id.to_string()), 3600, async {
///     self.store.find_content(id).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match &$cache {
            Some(cache) => {
                let key = $key;
                let hit = match cache.get_from_cache(&key).await {
                    Ok(hit) => hit,
                    Err(e) => {
                        tracing::warn!(error = %e, key = %key, "Cache read failed, using store");
                        None
                    }
                };

                match hit {
                    Some(cached) => Ok(cached),
                    None => match $block.await {
                        Ok(value) => {
                            cache.set_in_background(&key, &value, $ttl);
                            Ok(value)
                        }
                        Err(e) => Err(e),
                    },
                }
            }
            None => $block.await,
        }
    }};
}
