//! Journal history shaping
//!
//! Prepares fetched entries for the history screen: chart points for the
//! mood trend and short excerpts for the entry list. Chart rendering is the
//! UI shell's job; this module only shapes the data.

use crate::api::JournalEntry;

/// Characters of entry content shown next to a chart point.
const EXCERPT_LEN: usize = 50;

/// One point on the mood trend chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodPoint {
    /// Short date label, e.g. "Jun 01".
    pub date: String,
    /// Mood score 1 (very low) to 5 (very good).
    pub score: u8,
    /// Leading excerpt of the entry content.
    pub excerpt: String,
}

/// Build chart points from entries as the backend returns them (newest
/// first). Entries without a mood are skipped; output is chronological.
pub fn mood_chart_points(entries: &[JournalEntry]) -> Vec<MoodPoint> {
    let mut points: Vec<MoodPoint> = entries
        .iter()
        .filter_map(|entry| {
            let mood = entry.mood?;
            Some(MoodPoint {
                date: entry.created_at.format("%b %d").to_string(),
                score: mood.score(),
                excerpt: excerpt(&entry.content),
            })
        })
        .collect();
    points.reverse();
    points
}

/// Leading excerpt of entry content, ellipsized when truncated.
pub fn excerpt(content: &str) -> String {
    if content.chars().count() <= EXCERPT_LEN {
        return content.to_string();
    }
    let head: String = content.chars().take(EXCERPT_LEN).collect();
    format!("{}...", head)
}
