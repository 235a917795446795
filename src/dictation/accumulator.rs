//! Transcript accumulation
//!
//! Turns the raw recognition result stream into exactly-once commits of
//! final text. The recognition engine re-reports results as it revises
//! them, and may re-deliver a final result it already sent; the
//! accumulator tracks the highest index it has committed so each final
//! result lands in the transcript at most once, in index order.

use crate::speech::RecognitionEvent;

/// Per-session dedup state for final recognition results.
#[derive(Debug, Default)]
pub struct TranscriptAccumulator {
    /// Highest result index committed so far, if any.
    last_final_index: Option<usize>,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything committed. Called when a new recording session
    /// starts so indices from the previous session have no effect.
    pub fn reset(&mut self) {
        self.last_final_index = None;
    }

    /// Process one event and return the text newly committed by it, if any.
    ///
    /// Finals with an index at or below the watermark are discarded as
    /// re-deliveries. Interim results never commit; use [`live_preview`]
    /// for transient display.
    pub fn commit(&mut self, event: &RecognitionEvent) -> Option<String> {
        let mut pending: Vec<&str> = Vec::new();

        for result in &event.results {
            if !result.is_final {
                continue;
            }
            if let Some(last) = self.last_final_index {
                if result.index <= last {
                    // Already committed; the engine re-delivered it.
                    continue;
                }
            }
            self.last_final_index = Some(result.index);
            let text = result.text.trim();
            if !text.is_empty() {
                pending.push(text);
            }
        }

        if pending.is_empty() {
            None
        } else {
            Some(pending.join(" "))
        }
    }

    /// Concatenation of the event's interim results, for live feedback only.
    pub fn live_preview(event: &RecognitionEvent) -> Option<String> {
        let preview: Vec<&str> = event
            .results
            .iter()
            .filter(|r| !r.is_final)
            .map(|r| r.text.as_str())
            .collect();
        if preview.is_empty() {
            None
        } else {
            Some(preview.concat())
        }
    }
}

/// Merge a newly committed segment into the existing transcript buffer.
///
/// Trims both sides and inserts exactly one separating space when the
/// existing buffer is non-empty, so whitespace never accumulates across
/// repeated start/stop cycles or manual edits. The existing buffer is only
/// ever appended to, never rewritten.
pub fn merge_committed(existing: &str, segment: &str) -> String {
    let cleaned = existing.trim();
    let segment = segment.trim();
    if cleaned.is_empty() {
        segment.to_string()
    } else if segment.is_empty() {
        cleaned.to_string()
    } else {
        format!("{} {}", cleaned, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{RecognitionEvent, RecognitionResult};

    fn event(results: Vec<RecognitionResult>) -> RecognitionEvent {
        RecognitionEvent::new(results)
    }

    #[test]
    fn test_interim_then_final_commits_once() {
        let mut acc = TranscriptAccumulator::new();

        let none = acc.commit(&event(vec![RecognitionResult::interim_at(0, "hello")]));
        assert_eq!(none, None);

        let committed = acc.commit(&event(vec![RecognitionResult::final_at(0, "hello world")]));
        assert_eq!(committed.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_redelivered_final_is_discarded() {
        let mut acc = TranscriptAccumulator::new();

        let first = acc.commit(&event(vec![RecognitionResult::final_at(0, "a")]));
        assert_eq!(first.as_deref(), Some("a"));

        let second = acc.commit(&event(vec![RecognitionResult::final_at(0, "a")]));
        assert_eq!(second, None);
    }

    #[test]
    fn test_commits_follow_index_order() {
        let mut acc = TranscriptAccumulator::new();

        let committed = acc.commit(&event(vec![
            RecognitionResult::final_at(0, " one "),
            RecognitionResult::final_at(1, "two"),
        ]));
        assert_eq!(committed.as_deref(), Some("one two"));

        let committed = acc.commit(&event(vec![RecognitionResult::final_at(2, "three")]));
        assert_eq!(committed.as_deref(), Some("three"));
    }

    #[test]
    fn test_mixed_event_commits_only_fresh_finals() {
        let mut acc = TranscriptAccumulator::new();
        acc.commit(&event(vec![RecognitionResult::final_at(0, "kept")]));

        let committed = acc.commit(&event(vec![
            RecognitionResult::final_at(0, "kept"),
            RecognitionResult::final_at(1, "new"),
            RecognitionResult::interim_at(2, "still thinking"),
        ]));
        assert_eq!(committed.as_deref(), Some("new"));
    }

    #[test]
    fn test_whitespace_only_final_advances_watermark_without_commit() {
        let mut acc = TranscriptAccumulator::new();

        let committed = acc.commit(&event(vec![RecognitionResult::final_at(0, "   ")]));
        assert_eq!(committed, None);

        // Index 0 is consumed even though nothing was committed.
        let committed = acc.commit(&event(vec![RecognitionResult::final_at(0, "late edit")]));
        assert_eq!(committed, None);
    }

    #[test]
    fn test_reset_forgets_previous_session_indices() {
        let mut acc = TranscriptAccumulator::new();
        acc.commit(&event(vec![RecognitionResult::final_at(3, "first session")]));

        acc.reset();

        let committed = acc.commit(&event(vec![RecognitionResult::final_at(0, "second session")]));
        assert_eq!(committed.as_deref(), Some("second session"));
    }

    #[test]
    fn test_live_preview_collects_interims_only() {
        let e = event(vec![
            RecognitionResult::final_at(0, "done"),
            RecognitionResult::interim_at(1, "in "),
            RecognitionResult::interim_at(2, "progress"),
        ]);
        assert_eq!(
            TranscriptAccumulator::live_preview(&e).as_deref(),
            Some("in progress")
        );

        let finals_only = event(vec![RecognitionResult::final_at(0, "done")]);
        assert_eq!(TranscriptAccumulator::live_preview(&finals_only), None);
    }

    #[test]
    fn test_merge_into_empty_buffer() {
        assert_eq!(merge_committed("", "hello world"), "hello world");
        assert_eq!(merge_committed("   ", " hello "), "hello");
    }

    #[test]
    fn test_merge_adds_single_separating_space() {
        assert_eq!(
            merge_committed("Morning note.", "feeling okay"),
            "Morning note. feeling okay"
        );
        assert_eq!(
            merge_committed("Morning note.  ", "  feeling okay"),
            "Morning note. feeling okay"
        );
    }

    #[test]
    fn test_merge_empty_segment_leaves_buffer_trimmed() {
        assert_eq!(merge_committed("kept text ", ""), "kept text");
    }

    #[test]
    fn test_strictly_increasing_finals_concatenate_in_order() {
        let mut acc = TranscriptAccumulator::new();
        let mut buffer = String::new();

        for (i, word) in ["alpha", " beta ", "gamma"].iter().enumerate() {
            if let Some(segment) = acc.commit(&event(vec![RecognitionResult::final_at(i, *word)])) {
                buffer = merge_committed(&buffer, &segment);
            }
        }

        assert_eq!(buffer, "alpha beta gamma");
    }
}
