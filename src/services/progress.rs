//! Progress analytics: histogram, completion projection, review-day counts,
//! and population ranking.
//!
//! Classification looks at the latest checkpoint of each item only, while the
//! scheduler scans full histories; that asymmetry is part of the contract
//! here, not an accident to unify.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::dates::{calendar_date, whole_days_between};
use crate::types::{
    Category, CategoryProgress, Item, ProgressReport, ReviewBox, UserItems, UserProfile,
};

/// Latest box number at which an item counts as learned. Boxes can grow past
/// it through repeated easy reviews; anything at or above still counts.
pub const COMPLETED_BOX: u32 = 5;

/// Expected remaining reviews for an item sitting in box 1..=5.
const EXPECTED_REVIEWS_BY_BOX: [u64; 5] = [1, 2, 4, 7, 15];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    /// Ranking was requested against zero users, or the user is not part of
    /// the supplied population; either way the rank is undefined.
    #[error("rank is undefined for this population")]
    EmptyPopulation,
    /// An item with an empty box history reached the aggregator.
    #[error("item {0} has no review boxes")]
    MalformedItem(String),
}

fn latest_box(item: &Item) -> Result<&ReviewBox, ProgressError> {
    item.latest_box()
        .ok_or_else(|| ProgressError::MalformedItem(item.id.clone()))
}

/// Count of items whose latest box has reached [`COMPLETED_BOX`].
pub fn completed_items(items: &[Item]) -> Result<usize, ProgressError> {
    let mut count = 0;
    for item in items {
        if latest_box(item)?.box_number >= COMPLETED_BOX {
            count += 1;
        }
    }
    Ok(count)
}

/// 1-based position of `user_id` when the population is ordered by completed
/// items, descending. The sort is stable, so ties keep the input order.
pub fn rank_user(population: &[UserItems], user_id: &str) -> Result<usize, ProgressError> {
    if population.is_empty() {
        return Err(ProgressError::EmptyPopulation);
    }

    let mut standings: Vec<(&str, usize)> = Vec::with_capacity(population.len());
    for member in population {
        standings.push((member.profile.id.as_str(), completed_items(&member.items)?));
    }
    standings.sort_by(|a, b| b.1.cmp(&a.1));

    standings
        .iter()
        .position(|(id, _)| *id == user_id)
        .map(|index| index + 1)
        .ok_or(ProgressError::EmptyPopulation)
}

/// Build the full progress report for one user. Read-only: nothing in
/// `items`, `population`, or `categories` is mutated.
pub fn compute_report(
    items: &[Item],
    profile: &UserProfile,
    population: &[UserItems],
    categories: &[Category],
    now: DateTime<Utc>,
) -> Result<ProgressReport, ProgressError> {
    let mut vocabs_by_box = [0usize; 5];
    let mut completed_reviews = 0;
    let mut words_not_learned_yet = 0;
    let mut new_cards_count = 0;
    let mut review_days_count = 0;
    let mut total_expected_reviews: u64 = 0;

    for item in items {
        let latest = latest_box(item)?;

        // Boxes past the terminal bucket land in the top bin.
        let bucket = (latest.box_number.saturating_sub(1) as usize).min(vocabs_by_box.len() - 1);
        vocabs_by_box[bucket] += 1;

        if latest.box_number >= COMPLETED_BOX {
            completed_reviews += 1;
        } else {
            words_not_learned_yet += 1;
            total_expected_reviews +=
                EXPECTED_REVIEWS_BY_BOX[latest.box_number.saturating_sub(1) as usize];
        }

        if item.boxes.len() == 1 && item.boxes[0].box_number == 1 {
            new_cards_count += 1;
        }

        // Recomputed from scratch each item; only the last item's set
        // survives. Known quirk, kept deliberately.
        let distinct_days: HashSet<NaiveDate> = item
            .boxes
            .iter()
            .map(|review_box| calendar_date(review_box.last_reviewed))
            .collect();
        review_days_count = distinct_days.len();
    }

    let daily_goal = u64::from(profile.daily_goal.max(1));
    let days_to_learn_remaining_words = if total_expected_reviews == 0 {
        0
    } else {
        total_expected_reviews.div_ceil(daily_goal)
    };

    let total_days = items
        .iter()
        .map(|item| item.created_at)
        .min()
        .map(|earliest| whole_days_between(earliest, now))
        .unwrap_or(0);
    let missed_days_count = total_days - review_days_count as i64;

    let user_rank = rank_user(population, &profile.id)?;

    let mut category_rollup = Vec::with_capacity(categories.len());
    for category in categories {
        let mut words_count = 0;
        let mut not_learned = 0;
        for item in items.iter().filter(|item| item.category == category.name) {
            words_count += 1;
            if latest_box(item)?.box_number < COMPLETED_BOX {
                not_learned += 1;
            }
        }
        category_rollup.push(CategoryProgress {
            category_id: category.id.clone(),
            category: category.name.clone(),
            words_count,
            words_not_learned_yet: not_learned,
        });
    }

    Ok(ProgressReport {
        total_words: items.len(),
        vocabs_by_box,
        completed_reviews,
        words_not_learned_yet,
        days_to_learn_remaining_words,
        user_rank,
        new_cards_count,
        review_days_count,
        missed_days_count,
        user: profile.clone(),
        categories: category_rollup,
    })
}
