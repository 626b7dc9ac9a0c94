use tracing::debug;

use crate::error::OrderError;

/// Checks that `keys` is strictly increasing, reporting the position of the
/// first key that isn't greater than the one before it.
pub(crate) fn check_strictly_increasing<'a, K, I>(keys: I) -> Result<(), OrderError>
where
    K: Ord + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut keys = keys.into_iter();
    let mut previous = match keys.next() {
        Some(k) => k,
        None => return Ok(()),
    };

    for (position, key) in (1..).zip(keys) {
        if previous >= key {
            debug!(position, "keys out of order");
            return Err(OrderError::OutOfOrder { position });
        }
        previous = key;
    }

    Ok(())
}
