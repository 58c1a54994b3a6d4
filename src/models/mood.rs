use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Every mood value the service has ever stored. The two taxonomies share a
/// column; `Mood::taxonomy` says which set a value belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "mood_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    // classic
    Excited,
    Happy,
    Neutral,
    Sad,
    Stressed,
    // extended
    Amazing,
    Great,
    Good,
    Okay,
    Meh,
    Bad,
    Terrible,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoodTaxonomy {
    /// excited, happy, neutral, sad, stressed
    #[default]
    Classic,
    /// amazing, great, good, okay, meh, bad, terrible
    Extended,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodDescriptor {
    pub label: &'static str,
    pub color: &'static str,
    pub emoji: &'static str,
}

impl Mood {
    pub const CLASSIC: [Mood; 5] = [
        Mood::Excited,
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Stressed,
    ];

    pub const EXTENDED: [Mood; 7] = [
        Mood::Amazing,
        Mood::Great,
        Mood::Good,
        Mood::Okay,
        Mood::Meh,
        Mood::Bad,
        Mood::Terrible,
    ];

    pub fn taxonomy(self) -> MoodTaxonomy {
        match self {
            Mood::Excited | Mood::Happy | Mood::Neutral | Mood::Sad | Mood::Stressed => {
                MoodTaxonomy::Classic
            }
            _ => MoodTaxonomy::Extended,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Excited => "excited",
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
            Mood::Amazing => "amazing",
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Meh => "meh",
            Mood::Bad => "bad",
            Mood::Terrible => "terrible",
        }
    }

    /// Display mapping shared by the dashboard, trend strip and calendar cells.
    pub fn descriptor(self) -> MoodDescriptor {
        let (label, color, emoji) = match self {
            Mood::Excited => ("Excited", "green-500", "🤩"),
            Mood::Happy => ("Happy", "yellow-400", "😊"),
            Mood::Neutral => ("Neutral", "gray-400", "😐"),
            Mood::Sad => ("Sad", "blue-500", "😢"),
            Mood::Stressed => ("Stressed", "red-500", "😰"),
            Mood::Amazing => ("Amazing", "emerald-500", "🤩"),
            Mood::Great => ("Great", "green-400", "😄"),
            Mood::Good => ("Good", "lime-400", "🙂"),
            Mood::Okay => ("Okay", "yellow-400", "😐"),
            Mood::Meh => ("Meh", "orange-400", "😕"),
            Mood::Bad => ("Bad", "red-400", "😞"),
            Mood::Terrible => ("Terrible", "red-600", "😫"),
        };
        MoodDescriptor {
            label,
            color,
            emoji,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MoodTaxonomy {
    pub fn moods(self) -> &'static [Mood] {
        match self {
            MoodTaxonomy::Classic => &Mood::CLASSIC,
            MoodTaxonomy::Extended => &Mood::EXTENDED,
        }
    }

    pub fn contains(self, mood: Mood) -> bool {
        mood.taxonomy() == self
    }
}

impl FromStr for MoodTaxonomy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "5" => Ok(MoodTaxonomy::Classic),
            "extended" | "7" => Ok(MoodTaxonomy::Extended),
            other => Err(format!("unknown mood taxonomy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: Mood,
    pub productivity: i32,
    pub task: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert; `id` and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub user_id: Uuid,
    pub fields: MoodFields,
}

/// The user-editable part of a mood entry, overwritten on a same-day resubmit.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodFields {
    pub mood: Mood,
    pub productivity: i32,
    pub task: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckInRequest {
    pub mood: Mood,

    #[validate(range(min = 1, max = 10, message = "Productivity must be between 1 and 10"))]
    pub productivity: i32,

    #[validate(length(min = 1, max = 500, message = "Task must be 1-500 characters"))]
    pub task: String,

    #[validate(length(max = 5000, message = "Notes must be under 5000 characters"))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomies_are_disjoint() {
        for mood in Mood::CLASSIC {
            assert_eq!(mood.taxonomy(), MoodTaxonomy::Classic);
            assert!(!MoodTaxonomy::Extended.contains(mood));
        }
        for mood in Mood::EXTENDED {
            assert_eq!(mood.taxonomy(), MoodTaxonomy::Extended);
            assert!(!MoodTaxonomy::Classic.contains(mood));
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Mood::Stressed).unwrap();
        assert_eq!(json, "\"stressed\"");
        let parsed: Mood = serde_json::from_str("\"meh\"").unwrap();
        assert_eq!(parsed, Mood::Meh);
        for mood in Mood::CLASSIC.iter().chain(Mood::EXTENDED.iter()) {
            assert_eq!(
                serde_json::to_string(mood).unwrap(),
                format!("\"{}\"", mood.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_mood_is_rejected() {
        assert!(serde_json::from_str::<Mood>("\"ecstatic\"").is_err());
    }

    #[test]
    fn test_taxonomy_from_str() {
        assert_eq!("classic".parse::<MoodTaxonomy>(), Ok(MoodTaxonomy::Classic));
        assert_eq!(" Extended ".parse::<MoodTaxonomy>(), Ok(MoodTaxonomy::Extended));
        assert!("weird".parse::<MoodTaxonomy>().is_err());
        assert_eq!(MoodTaxonomy::default(), MoodTaxonomy::Classic);
    }

    #[test]
    fn test_descriptor_table() {
        assert_eq!(Mood::Happy.descriptor().color, "yellow-400");
        assert_eq!(Mood::Sad.descriptor().emoji, "😢");
        assert_eq!(Mood::Terrible.descriptor().label, "Terrible");
    }
}
