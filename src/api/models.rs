//! Backend API data models
//!
//! Mirrors the journaling backend's request and response shapes. Field names
//! follow the wire format; enums are lowercase snake_case on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, drives which dashboard a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Therapist,
    Admin,
}

/// Self-reported mood attached to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    VeryLow,
    Low,
    Neutral,
    Good,
    VeryGood,
}

impl MoodLevel {
    /// Numeric value used by the mood chart (1 = very low .. 5 = very good).
    pub fn score(self) -> u8 {
        match self {
            MoodLevel::VeryLow => 1,
            MoodLevel::Low => 2,
            MoodLevel::Neutral => 3,
            MoodLevel::Good => 4,
            MoodLevel::VeryGood => 5,
        }
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoodLevel::VeryLow => "Very Low",
            MoodLevel::Low => "Low",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::Good => "Good",
            MoodLevel::VeryGood => "Very Good",
        };
        write!(f, "{}", label)
    }
}

/// Authenticated user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Response to login and signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub role: UserRole,
}

/// Payload for creating a journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntryCreate {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub is_voice: bool,
}

/// A stored journal entry as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub mood: Option<MoodLevel>,
    pub tags: Option<Vec<String>>,
    pub is_voice: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub ai_analysis: Option<MoodAnalysis>,
}

/// AI mood analysis attached to an entry by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub mood: MoodLevel,
    /// Sentiment in [-1, 1].
    pub sentiment: f64,
    pub summary: String,
    pub keywords: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AffirmationRequest<'a> {
    pub user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
}

/// Daily affirmation generated for the client dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct Affirmation {
    pub affirmation: String,
}

/// Suggested wellbeing activity for the client dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySuggestion {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub category: String,
}

/// Aggregates for the therapist dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct TherapistDashboard {
    pub total_clients: u32,
    pub active_clients: u32,
    pub recent_entries: Vec<JournalEntry>,
    pub mood_trends: std::collections::HashMap<String, u32>,
    pub engagement_rate: f64,
}

/// One client row in the therapist's client list.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub last_entry_date: Option<DateTime<Utc>>,
    pub entry_count: u32,
    pub average_mood: Option<MoodLevel>,
    pub engagement_score: f64,
}

/// Payload for therapist feedback on a client or entry.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackCreate {
    pub client_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub is_encouragement: bool,
}

/// Stored therapist feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub therapist_id: String,
    pub client_id: String,
    pub message: String,
    pub entry_id: Option<String>,
    pub is_encouragement: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_level_wire_format() {
        let json = serde_json::to_string(&MoodLevel::VeryGood).unwrap();
        assert_eq!(json, r#""very_good""#);

        let parsed: MoodLevel = serde_json::from_str(r#""very_low""#).unwrap();
        assert_eq!(parsed, MoodLevel::VeryLow);
    }

    #[test]
    fn test_mood_level_scores() {
        assert_eq!(MoodLevel::VeryLow.score(), 1);
        assert_eq!(MoodLevel::Neutral.score(), 3);
        assert_eq!(MoodLevel::VeryGood.score(), 5);
    }

    #[test]
    fn test_entry_create_omits_unset_fields() {
        let payload = JournalEntryCreate {
            content: "note".to_string(),
            mood: None,
            tags: None,
            is_voice: true,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("mood"));
        assert!(!json.contains("tags"));
        assert!(json.contains(r#""is_voice":true"#));
    }

    #[test]
    fn test_journal_entry_deserialization() {
        let json = r#"{
            "id": "e1",
            "user_id": "u1",
            "content": "Slept well.",
            "mood": "good",
            "tags": null,
            "is_voice": false,
            "created_at": "2025-06-01T09:30:00Z"
        }"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood, Some(MoodLevel::Good));
        assert!(entry.ai_analysis.is_none());
    }

    #[test]
    fn test_user_role_wire_format() {
        let parsed: UserRole = serde_json::from_str(r#""therapist""#).unwrap();
        assert_eq!(parsed, UserRole::Therapist);
    }
}
