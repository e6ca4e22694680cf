//! Mapping Table and Sequence Matching
//!
//! Holds the active single-key map and chord sequence list, and tests the
//! history window's tail against the configured sequences. The sequence
//! list is kept sorted by length descending so a plain linear scan gives
//! longest-match priority without a trie.

use crate::engine::history::HistoryWindow;
use crate::mappings::MappingRecord;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A chord mapping: ordered button sequence to one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceMapping {
    /// Ordered button identities that make up the chord
    pub sequence: Vec<String>,
    /// Shortcut string to execute on match
    pub action: String,
    /// Human-readable mapping name
    pub name: String,
}

/// A successful sequence match against the history window
#[derive(Debug)]
pub struct SequenceMatch<'a> {
    /// The matched chord mapping
    pub mapping: &'a SequenceMapping,
    /// Number of window entries preceding the matched suffix
    pub remaining: usize,
}

/// Active mapping state: flat single-key map plus chord sequence list.
///
/// Rebuilt wholesale on every load/reload; never mutated in place, so a
/// reload can swap the table atomically under the readers.
#[derive(Debug, Default)]
pub struct MappingTable {
    singles: HashMap<String, String>,
    sequences: Vec<SequenceMapping>,
}

impl MappingTable {
    /// Build a table from raw mapping records.
    ///
    /// Records without an action are skipped with a warning, not fatal.
    /// Records carrying a non-empty `sequence` become chord mappings;
    /// everything else populates the single-key map, last write per
    /// button winning. The sequence list is sorted by length descending
    /// after the build.
    pub fn build(records: &[MappingRecord]) -> Self {
        let mut singles = HashMap::new();
        let mut sequences = Vec::new();

        for record in records {
            let Some(action) = record.action.as_deref().filter(|a| !a.is_empty()) else {
                warn!(?record, "skipping mapping record without action");
                continue;
            };

            match record.sequence.as_deref() {
                Some(sequence) if !sequence.is_empty() => {
                    sequences.push(SequenceMapping {
                        sequence: sequence.to_vec(),
                        action: action.to_string(),
                        name: record.name.clone().unwrap_or_default(),
                    });
                }
                _ => {
                    if let Some(key_type) = record.key_type.as_deref() {
                        singles.insert(key_type.to_string(), action.to_string());
                    } else {
                        warn!(?record, "skipping mapping record without key type");
                    }
                }
            }
        }

        // Longest chord first: encodes most-specific-match-wins as scan order
        sequences.sort_by(|a, b| b.sequence.len().cmp(&a.sequence.len()));

        info!(
            singles = singles.len(),
            sequences = sequences.len(),
            "mapping table built"
        );

        Self { singles, sequences }
    }

    /// Look up the action bound to a single button, if any
    pub fn single_action(&self, key_type: &str) -> Option<&str> {
        self.singles.get(key_type).map(String::as_str)
    }

    /// Number of single-key mappings
    pub fn single_len(&self) -> usize {
        self.singles.len()
    }

    /// Chord mappings in match-priority order (length descending)
    pub fn sequences(&self) -> &[SequenceMapping] {
        &self.sequences
    }

    /// Test the window's tail against all configured chords.
    ///
    /// Candidates are scanned in length-descending order; a candidate
    /// matches when its tokens compare positionally equal against the
    /// window's trailing slice of the same length. The first full match
    /// wins, which makes longest-match priority a structural guarantee
    /// rather than an accident of configuration order.
    pub fn match_sequence(&self, window: &HistoryWindow) -> Option<SequenceMatch<'_>> {
        let window_len = window.len();

        for mapping in &self.sequences {
            let seq_len = mapping.sequence.len();
            if seq_len > window_len {
                continue;
            }

            let tail_matches = window
                .iter()
                .skip(window_len - seq_len)
                .zip(&mapping.sequence)
                .all(|(entry, expected)| entry.key_type == *expected);

            if tail_matches {
                debug!(sequence = ?mapping.sequence, action = %mapping.action, "chord matched");
                return Some(SequenceMatch {
                    mapping,
                    remaining: window_len - seq_len,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    fn record(key_type: &str, action: &str) -> MappingRecord {
        MappingRecord {
            name: None,
            key_type: Some(key_type.to_string()),
            sequence: None,
            action: Some(action.to_string()),
        }
    }

    fn seq_record(sequence: &[&str], action: &str) -> MappingRecord {
        MappingRecord {
            name: Some(format!("seq-{}", action)),
            key_type: None,
            sequence: Some(sequence.iter().map(|s| s.to_string()).collect()),
            action: Some(action.to_string()),
        }
    }

    fn window_of(keys: &[&str]) -> HistoryWindow {
        let mut w = HistoryWindow::new(Duration::from_secs(60), 20);
        let now = Instant::now();
        for (i, key) in keys.iter().enumerate() {
            w.record(key, now + Duration::from_millis(i as u64));
        }
        w
    }

    #[test]
    fn test_build_skips_records_without_action() {
        let records = vec![
            record("button_3", "ctrl+c"),
            MappingRecord {
                name: None,
                key_type: Some("button_4".to_string()),
                sequence: None,
                action: None,
            },
        ];
        let table = MappingTable::build(&records);
        assert_eq!(table.single_len(), 1);
        assert_eq!(table.single_action("button_3"), Some("ctrl+c"));
        assert_eq!(table.single_action("button_4"), None);
    }

    #[test]
    fn test_build_last_write_wins_for_duplicate_singles() {
        let records = vec![record("button_3", "ctrl+c"), record("button_3", "ctrl+v")];
        let table = MappingTable::build(&records);
        assert_eq!(table.single_action("button_3"), Some("ctrl+v"));
    }

    #[test]
    fn test_build_sorts_sequences_longest_first() {
        let records = vec![
            seq_record(&["button_0"], "a"),
            seq_record(&["button_0", "button_1", "button_2"], "b"),
            seq_record(&["button_0", "button_1"], "c"),
        ];
        let table = MappingTable::build(&records);
        let lens: Vec<_> = table.sequences().iter().map(|s| s.sequence.len()).collect();
        assert_eq!(lens, vec![3, 2, 1]);
    }

    #[test]
    fn test_match_prefers_longest_sequence() {
        let records = vec![
            seq_record(&["button_0"], "short"),
            seq_record(&["button_0", "button_1"], "long"),
        ];
        let table = MappingTable::build(&records);

        let w = window_of(&["button_0", "button_1"]);
        let matched = table.match_sequence(&w).unwrap();
        assert_eq!(matched.mapping.action, "long");
        assert_eq!(matched.remaining, 0);
    }

    #[test]
    fn test_match_against_trailing_slice() {
        let records = vec![seq_record(&["button_1", "button_2"], "chord")];
        let table = MappingTable::build(&records);

        // Leading noise before the chord does not prevent the match
        let w = window_of(&["button_9", "button_1", "button_2"]);
        let matched = table.match_sequence(&w).unwrap();
        assert_eq!(matched.mapping.action, "chord");
        assert_eq!(matched.remaining, 1);
    }

    #[test]
    fn test_no_match_when_sequence_longer_than_window() {
        let records = vec![seq_record(&["button_0", "button_1", "button_2"], "chord")];
        let table = MappingTable::build(&records);

        let w = window_of(&["button_0", "button_1"]);
        assert!(table.match_sequence(&w).is_none());
    }

    #[test]
    fn test_no_match_on_positional_mismatch() {
        let records = vec![seq_record(&["button_0", "button_1"], "chord")];
        let table = MappingTable::build(&records);

        let w = window_of(&["button_1", "button_0"]);
        assert!(table.match_sequence(&w).is_none());
    }

    #[test]
    fn test_shared_prefix_sequences_disambiguate() {
        let records = vec![
            seq_record(&["button_0", "button_1"], "ab"),
            seq_record(&["button_0", "button_2"], "ac"),
        ];
        let table = MappingTable::build(&records);

        let w = window_of(&["button_0", "button_2"]);
        assert_eq!(table.match_sequence(&w).unwrap().mapping.action, "ac");
    }
}
