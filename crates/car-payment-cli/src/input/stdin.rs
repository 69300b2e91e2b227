use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a JSON document piped on stdin.
///
/// A terminal on stdin, or a stream holding only whitespace, yields `None`
/// so the caller can fall back to its usage error.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    io::stdin().read_to_string(&mut piped)?;

    match piped.trim() {
        "" => Ok(None),
        json => serde_json::from_str(json)
            .map(Some)
            .map_err(|e| format!("Failed to parse stdin: {e}").into()),
    }
}
