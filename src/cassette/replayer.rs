//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Pending interactions for one `port/method` call site, in recorded order.
#[derive(Debug, Default)]
struct CallQueue {
    pending: VecDeque<Interaction>,
    served: usize,
}

/// Replays a cassette. Each `port/method` pair has its own queue, so
/// independent ports may interleave differently from how they were recorded.
#[derive(Debug)]
pub struct CassetteReplayer {
    calls: HashMap<(String, String), CallQueue>,
}

impl CassetteReplayer {
    /// Index a loaded cassette by `port/method`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut calls: HashMap<(String, String), CallQueue> = HashMap::new();
        for interaction in &cassette.interactions {
            calls
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .pending
                .push_back(interaction.clone());
        }
        Self { calls }
    }

    /// Take the next recorded `port/method` interaction.
    ///
    /// # Panics
    ///
    /// Panics when the run makes a call the cassette did not script: either
    /// `port/method` never appears in it, or every recorded call has been served.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.calls.get_mut(&key) else {
            let mut scripted: Vec<String> =
                self.calls.keys().map(|(p, m)| format!("{p}/{m}")).collect();
            scripted.sort();
            panic!(
                "unscripted call {port}/{method}: no interactions recorded for it \
                 (cassette scripts: {})",
                scripted.join(", ")
            );
        };

        match queue.pending.pop_front() {
            Some(interaction) => {
                queue.served += 1;
                interaction
            }
            None => panic!(
                "unscripted call {port}/{method}: cassette exhausted after {} recorded call(s)",
                queue.served
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        }
    }

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    #[test]
    fn replay_in_order_per_port() {
        let cassette = make_cassette(vec![
            interaction(0, "quote_source", "random_quote", json!({"Ok": {"text": "first"}})),
            interaction(1, "photo_library", "search", json!({"Ok": []})),
            interaction(2, "quote_source", "random_quote", json!({"Ok": {"text": "second"}})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        // ports have independent cursors
        assert_eq!(replayer.next_interaction("photo_library", "search").seq, 1);
        assert_eq!(replayer.next_interaction("quote_source", "random_quote").seq, 0);
        assert_eq!(replayer.next_interaction("quote_source", "random_quote").seq, 2);
    }

    #[test]
    #[should_panic(expected = "file_host/upload: cassette exhausted after 1")]
    fn exhausted_replayer_panics() {
        let cassette =
            make_cassette(vec![interaction(0, "file_host", "upload", json!({"Ok": {"body": ""}}))]);

        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("file_host", "upload");
        let _ = replayer.next_interaction("file_host", "upload"); // panics
    }

    #[test]
    #[should_panic(expected = "unscripted call telegram/notify")]
    fn unknown_port_panics() {
        let cassette = make_cassette(vec![]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("telegram", "notify");
    }
}
