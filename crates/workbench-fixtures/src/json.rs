//! JSON fixture loading.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{FixtureError, FixtureResult};

/// Loads a JSON fixture.
///
/// Returns `Ok(None)` if the file does not exist, so a missing fixture can be
/// told apart from one that loaded as an empty collection.
pub fn load_json<T, P>(path: P) -> FixtureResult<Option<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "fixture file not found");
            return Ok(None);
        }
        Err(e) => return Err(FixtureError::io_error(path, e)),
    };
    let reader = BufReader::new(file);
    let value: T = serde_json::from_reader(reader)
        .map_err(|e| FixtureError::malformed(path, e.to_string()))?;
    debug!(path = %path.display(), "fixture loaded");
    Ok(Some(value))
}
