/// Builds the cache key of a remote function call: `"<id>|<stringified_arg>"`.
///
/// `id` is not escaped. Ids containing `|` can make two calls collide
/// under a first-`|` split; [`split_remote_cache_key`] splits on the last
/// `|` instead, which is unambiguous because stringified arguments never
/// contain one.
///
/// # Example
///
/// ```
/// use remote_arg::create_remote_cache_key;
///
/// assert_eq!(create_remote_cache_key("fn1", "abc"), "fn1|abc");
/// assert_eq!(create_remote_cache_key("fn1", ""), "fn1|");
/// ```
pub fn create_remote_cache_key(id: &str, stringified_arg: &str) -> String {
    let mut key = String::with_capacity(id.len() + 1 + stringified_arg.len());
    key.push_str(id);
    key.push('|');
    key.push_str(stringified_arg);
    key
}

/// Splits a key built by [`create_remote_cache_key`] back into
/// `(id, stringified_arg)`.
pub fn split_remote_cache_key(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once('|')
}
