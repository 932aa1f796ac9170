use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily review goal used when a profile does not carry one.
pub const DEFAULT_DAILY_GOAL: u32 = 10;

/// Category label that stands for "no category"; it matches every item.
pub const DEFAULT_CATEGORY: &str = "all";

/// One scheduling checkpoint in an item's Leitner history.
///
/// Entries are appended over the item's lifetime and never removed; a review
/// outcome advances an existing entry in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBox {
    pub box_number: u32,
    pub last_reviewed: DateTime<Utc>,
}

/// A learnable unit owned by exactly one user.
///
/// The answer payload is opaque JSON; the engines read only the box history,
/// the category label, and the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub question: String,
    pub answer: serde_json::Value,
    pub question_source: Option<String>,
    pub boxes: Vec<ReviewBox>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Most recent checkpoint, the one the aggregator classifies by.
    pub fn latest_box(&self) -> Option<&ReviewBox> {
        self.boxes.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL
}

/// Review outcome reported by the learner.
///
/// A closed set so the scheduler's transition is exhaustive; `default` is
/// accepted on the wire as an alias for `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
    #[serde(alias = "default")]
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

/// Per-category slice of a progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub category_id: String,
    pub category: String,
    pub words_count: usize,
    pub words_not_learned_yet: usize,
}

/// Derived learning summary; recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub total_words: usize,
    pub vocabs_by_box: [usize; 5],
    pub completed_reviews: usize,
    pub words_not_learned_yet: usize,
    pub days_to_learn_remaining_words: u64,
    pub user_rank: usize,
    pub new_cards_count: usize,
    pub review_days_count: usize,
    /// Signed: review days can exceed the item set's age.
    pub missed_days_count: i64,
    pub user: UserProfile,
    pub categories: Vec<CategoryProgress>,
}

/// One population member for ranking: a user together with a snapshot of
/// their items.
#[derive(Debug, Clone)]
pub struct UserItems {
    pub profile: UserProfile,
    pub items: Vec<Item>,
}
