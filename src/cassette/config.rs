//! Cassette loading.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    let cassette: Cassette = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
    Ok(CassetteReplayer::new(&cassette))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn load_valid_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");

        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "quote_source".into(),
                method: "random_quote".into(),
                input: json!({}),
                output: json!({"Ok": {"text": "Stay hungry."}}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let mut replayer = load_cassette(&path).unwrap();
        let i = replayer.next_interaction("quote_source", "random_quote");
        assert_eq!(i.seq, 0);
        assert_eq!(i.output["Ok"]["text"], "Stay hungry.");
    }

    #[test]
    fn interactions_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cassette.yaml");
        std::fs::write(&path, "name: empty\nrecorded_at: \"2026-01-01T00:00:00Z\"\ncommit: x\n")
            .unwrap();
        assert!(load_cassette(&path).is_ok());
    }

    #[test]
    fn load_nonexistent_fails() {
        assert!(load_cassette(Path::new("/nonexistent/cassette.yaml")).is_err());
    }
}
