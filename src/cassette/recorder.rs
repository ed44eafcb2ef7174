//! Captures port interactions and writes them out as a cassette.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::format::{Cassette, Interaction};

/// Collects interactions in call order and writes them as a YAML cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    started: DateTime<Utc>,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Start a session that [`finish`](Self::finish) writes to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            commit: commit.into(),
            started: Utc::now(),
            interactions: Vec::new(),
        }
    }

    /// Append one `port/method` call; `seq` is its position in the session.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Write the cassette, stamped with the session start time.
    ///
    /// The file is staged next to its destination and renamed into place, so
    /// an interrupted write never leaves a truncated cassette behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: self.started,
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let staging = self.path.with_extension("yaml.partial");
        std::fs::write(&staging, yaml)?;
        std::fs::rename(&staging, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            interactions = cassette.interactions.len(),
            "cassette written"
        );
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/run.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        recorder.record(
            "quote_source",
            "random_quote",
            json!({"timeout": {"secs": 5, "nanos": 0}}),
            json!({"Ok": {"text": "Stay hungry.", "author": null}}),
        );
        recorder.record(
            "file_host",
            "upload",
            json!({"file_name": "post.jpg"}),
            json!({"Err": "Network error: timed out"}),
        );

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("random_quote"));
        assert!(content.contains("Stay hungry."));
        assert!(content.contains("timed out"));

        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[1].seq, 1);
        assert_eq!(cassette.interactions[1].port, "file_host");
    }

    #[test]
    fn empty_session_still_writes_a_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cassette.yaml");
        let recorder = CassetteRecorder::new(&path, "empty", "unknown");
        recorder.finish().unwrap();

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(cassette.interactions.is_empty());
    }

    #[test]
    fn stamped_with_start_time_and_no_staging_left() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");
        let before = Utc::now();
        let mut recorder = CassetteRecorder::new(&path, "timed", "unknown");
        recorder.record("webhook", "notify", json!({}), json!({"Ok": null}));
        let after_record = Utc::now();
        recorder.finish().unwrap();

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(cassette.recorded_at >= before && cassette.recorded_at <= after_record);
        assert!(!dir.path().join("run.cassette.yaml.partial").exists());
    }
}
