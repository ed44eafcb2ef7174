//! Replaying adapters that serve recorded interactions from cassettes.

pub mod file_host;
pub mod font_source;
pub mod notifier;
pub mod photo_library;
pub mod quote_source;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::PostError;

/// Retrieve the next recorded output for a given port and method.
///
/// # Panics
///
/// Panics if the cassette has no more interactions for the port.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Deserialize a replayed output as `Result<T, PostError>`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, PostError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(PostError::Replay(msg));
    }
    let value = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(ok_val) => ok_val.clone(),
        None => output,
    };
    serde_json::from_value(value)
        .map_err(|e| PostError::Replay(format!("malformed recorded output: {e}")))
}
