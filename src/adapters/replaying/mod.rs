//! Replaying adapters that serve port outcomes from a cassette.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod shell;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;
pub use http::ReplayingHttpClient;
pub use shell::ReplayingShellExecutor;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Pops the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics when the cassette has no more interactions for the pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

/// Decodes a recorded `{"ok": v}` / `{"err": "msg"}` outcome.
///
/// A bare value without either key is treated as `ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = match output {
        serde_json::Value::Object(mut map) if map.contains_key("ok") => {
            map.remove("ok").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replay_result_unwraps_ok_and_bare_values() {
        let wrapped: String = replay_result(json!({"ok": "abc"}), "t").unwrap();
        let bare: String = replay_result(json!("abc"), "t").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn replay_result_surfaces_err() {
        let result: Result<String, _> = replay_result(json!({"err": "boom"}), "t");
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }
}
