//! Leitner-box scheduling: the due predicate, due-item selection for a
//! session, and review application.
//!
//! Review intervals double per box: box 1 is due the day after its last
//! review, box 2 after two days, box 3 after four, and so on. Harder-earned
//! boxes are checked less often.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::dates::whole_days_between;
use crate::types::{Difficulty, Item, ReviewBox, DEFAULT_CATEGORY};

/// Box assigned to every item at creation.
pub const FIRST_BOX: u32 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// A review was submitted for an item with no outstanding due box.
    /// Recoverable; surface to the learner as a rejection.
    #[error("item has no box due for review")]
    NotDue,
    /// An item with an empty box history reached the engine. Cannot happen
    /// through [`create_item`]; defensive only.
    #[error("item {0} has no review boxes")]
    MalformedItem(String),
}

/// Whether a single checkpoint is due at `now`.
///
/// Due once the elapsed whole days reach 2^(box_number - 1). With the
/// round-up rule in [`whole_days_between`], a due box stays due until the
/// day it became due on has passed.
pub fn is_due(review_box: &ReviewBox, now: DateTime<Utc>) -> bool {
    let elapsed_days = whole_days_between(review_box.last_reviewed, now);
    let interval_days = 2i64.saturating_pow(review_box.box_number.saturating_sub(1));
    elapsed_days >= interval_days
}

/// Whether any checkpoint in the item's history is due.
///
/// The scan covers the full history, not just the latest entry, so an old
/// superseded checkpoint can keep an item eligible.
pub fn has_due_box(item: &Item, now: DateTime<Utc>) -> bool {
    item.boxes.iter().any(|review_box| is_due(review_box, now))
}

/// Pick the items for one review session.
///
/// Iterates `items` in their given order, keeps every item with a due box,
/// and stops once `daily_goal` items are collected. The result preserves the
/// input's relative order and never exceeds the goal.
pub fn select_due_items<'a>(
    items: &'a [Item],
    daily_goal: u32,
    now: DateTime<Utc>,
) -> Vec<&'a Item> {
    let goal = daily_goal as usize;
    let mut due = Vec::new();

    for item in items {
        if has_due_box(item, now) {
            due.push(item);
        }
        if due.len() >= goal {
            break;
        }
    }

    due
}

/// Apply a review outcome to the first due checkpoint.
///
/// Easy jumps two boxes, hard drops one (floored at box 1), normal advances
/// one; the matched entry's `last_reviewed` resets to `now`. Exactly one
/// entry changes and the history does not grow. Fails with
/// [`SchedulerError::NotDue`] when nothing is due, leaving the item
/// untouched.
pub fn apply_review(
    item: &mut Item,
    difficulty: Difficulty,
    now: DateTime<Utc>,
) -> Result<(), SchedulerError> {
    if item.boxes.is_empty() {
        return Err(SchedulerError::MalformedItem(item.id.clone()));
    }

    let slot = item
        .boxes
        .iter_mut()
        .find(|review_box| is_due(review_box, now))
        .ok_or(SchedulerError::NotDue)?;

    slot.box_number = match difficulty {
        Difficulty::Easy => slot.box_number + 2,
        Difficulty::Hard => slot.box_number.saturating_sub(1).max(FIRST_BOX),
        Difficulty::Normal => slot.box_number + 1,
    };
    slot.last_reviewed = now;
    item.updated_at = now;

    Ok(())
}

/// Create a new item with exactly one checkpoint in the first box.
pub fn create_item(
    question: impl Into<String>,
    answer: serde_json::Value,
    category: Option<String>,
    question_source: Option<String>,
    user_id: impl Into<String>,
    now: DateTime<Utc>,
) -> Item {
    Item {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.into(),
        category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        question: question.into(),
        answer,
        question_source,
        boxes: vec![ReviewBox {
            box_number: FIRST_BOX,
            last_reviewed: now,
        }],
        created_at: now,
        updated_at: now,
    }
}
