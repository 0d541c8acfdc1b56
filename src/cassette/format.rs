//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded call to a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name (`clock`, `fs`, `git`, `shell`, `http`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Call arguments.
    pub input: serde_json::Value,
    /// Call outcome.
    pub output: serde_json::Value,
}

/// An ordered sequence of interactions captured during one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was written.
    pub recorded_at: DateTime<Utc>,
    /// Commit of the tool at recording time.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_round_trip() {
        let cassette = Cassette {
            name: "collect".into(),
            recorded_at: Utc::now(),
            commit: "abc123".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "http".into(),
                    method: "get".into(),
                    input: json!({"url": "https://golang.org/x/mod?go-get=1"}),
                    output: json!({"ok": {"status": 200, "body": "<html/>"}}),
                },
                Interaction {
                    seq: 1,
                    port: "git".into(),
                    method: "log".into(),
                    input: json!({"repo_dir": "/tmp/r"}),
                    output: json!({"ok": "1700000000 a@example.com"}),
                },
            ],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let back: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(cassette, back);
    }
}
