//! Serves recorded interactions back, one queue per port and method.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

type PortMethod = (String, String);

/// Hands out a cassette's interactions in recorded order, independently for
/// each `port::method` pair.
pub struct CassetteReplayer {
    queues: HashMap<PortMethod, VecDeque<Interaction>>,
    consumed: HashMap<PortMethod, usize>,
}

impl CassetteReplayer {
    /// Creates a replayer over a copy of `cassette`'s interactions.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethod, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, consumed: HashMap::new() }
    }

    /// Returns the next interaction for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair; the
    /// message lists what the cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());

        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let consumed = self.consumed.entry(key).or_default();
        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all {consumed} interactions for port={port:?} \
                 method={method:?} have been consumed."
            );
        };
        *consumed += 1;
        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replays_each_pair_in_order() {
        let cassette = Cassette::new(
            "test",
            vec![
                Interaction::new(0, "llm", "complete", json!({}), json!({"text": "1"})),
                Interaction::new(1, "fs", "exists", json!({}), json!(true)),
                Interaction::new(2, "llm", "complete", json!({}), json!({"text": "2"})),
            ],
        );
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("llm", "complete").seq, 0);
        assert_eq!(replayer.next_interaction("fs", "exists").output, json!(true));
        assert_eq!(replayer.next_interaction("llm", "complete").output, json!({"text": "2"}));
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_pair_panics() {
        let cassette = Cassette::new(
            "test",
            vec![Interaction::new(0, "llm", "complete", json!({}), json!({}))],
        );
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("llm", "complete");
        let _ = replayer.next_interaction("llm", "complete");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_pair_panics() {
        let mut replayer = CassetteReplayer::new(&Cassette::new("empty", vec![]));
        let _ = replayer.next_interaction("clock", "now");
    }
}
