//! Intro loader flag.
//!
//! The loader animation plays once per browsing session.

use crate::models::keys;
use crate::storage::{Storage, StorageError};

/// Whether the loader should play, marking it as shown if so.
///
/// # Errors
///
/// Returns `StorageError` if the session store cannot be read or written.
pub fn first_visit(session: &Storage) -> Result<bool, StorageError> {
    if session.raw(keys::LOADER_SHOWN)?.is_some() {
        return Ok(false);
    }

    session.set_raw(keys::LOADER_SHOWN, "true")?;
    Ok(true)
}

/// Let the loader play again on the next home page visit.
///
/// # Errors
///
/// Returns `StorageError` if the session store cannot be written.
pub fn reset(session: &Storage) -> Result<(), StorageError> {
    session.remove(keys::LOADER_SHOWN)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_once_per_session() {
        let session = Storage::in_memory();
        assert!(first_visit(&session).unwrap());
        assert!(!first_visit(&session).unwrap());

        reset(&session).unwrap();
        assert!(first_visit(&session).unwrap());
    }
}
