//! Request-level flows composed from the scheduler, the aggregator, and the
//! injected collaborators. Each method mirrors one caller operation: add an
//! item, fetch today's due set, submit a review, list items, build a report.

use thiserror::Error;
use tracing::debug;

use crate::services::progress::{self, ProgressError};
use crate::services::scheduler::{self, SchedulerError};
use crate::store::{Clock, Identity, ItemFilter, ItemStore, StoreError};
use crate::types::{Difficulty, Item, ProgressReport, UserItems, UserProfile};

#[derive(Debug, Error)]
pub enum VocabularyError {
    /// The item does not exist or belongs to someone else; the two cases are
    /// indistinguishable to the caller on purpose.
    #[error("item not found")]
    ItemNotFound,
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct VocabularyService<S, C> {
    store: S,
    clock: C,
}

impl<S: ItemStore, C: Clock> VocabularyService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Create an item in box 1 and register its category on first use.
    pub fn add_item(
        &self,
        identity: &dyn Identity,
        question: &str,
        answer: serde_json::Value,
        category: Option<String>,
        question_source: Option<String>,
    ) -> Result<Item, VocabularyError> {
        let now = self.clock.now();
        let item = scheduler::create_item(
            question,
            answer,
            category,
            question_source,
            identity.user_id(),
            now,
        );
        self.store.save_item(&item)?;
        self.store.ensure_category(identity.user_id(), &item.category)?;
        debug!(item_id = %item.id, category = %item.category, "item created");
        Ok(item)
    }

    /// Today's review session: due items in stable order, capped by the
    /// profile's daily goal.
    pub fn due_items(
        &self,
        profile: &UserProfile,
        filter: &ItemFilter,
    ) -> Result<Vec<Item>, VocabularyError> {
        let items = self.store.load_items(&profile.id, filter)?;
        let due: Vec<Item> = scheduler::select_due_items(&items, profile.daily_goal, self.clock.now())
            .into_iter()
            .cloned()
            .collect();
        debug!(user_id = %profile.id, due = due.len(), "due items selected");
        Ok(due)
    }

    /// Apply a review outcome and persist the advanced item.
    pub fn submit_review(
        &self,
        identity: &dyn Identity,
        item_id: &str,
        difficulty: Difficulty,
    ) -> Result<Item, VocabularyError> {
        let mut item = self
            .store
            .load_item(item_id)?
            .ok_or(VocabularyError::ItemNotFound)?;
        if item.user_id != identity.user_id() {
            return Err(VocabularyError::ItemNotFound);
        }

        scheduler::apply_review(&mut item, difficulty, self.clock.now())?;
        self.store.save_item(&item)?;
        debug!(item_id = %item.id, ?difficulty, "review applied");
        Ok(item)
    }

    pub fn list_items(
        &self,
        identity: &dyn Identity,
        category: Option<String>,
    ) -> Result<Vec<Item>, VocabularyError> {
        let filter = ItemFilter {
            category,
            question_source: None,
        };
        Ok(self.store.load_items(identity.user_id(), &filter)?)
    }

    /// Build the user's progress report against the whole population.
    pub fn progress_report(
        &self,
        profile: &UserProfile,
    ) -> Result<ProgressReport, VocabularyError> {
        let items = self.store.load_items(&profile.id, &ItemFilter::default())?;

        let mut population = Vec::new();
        for user in self.store.load_users()? {
            let user_items = self.store.load_items(&user.id, &ItemFilter::default())?;
            population.push(UserItems {
                profile: user,
                items: user_items,
            });
        }

        let categories = self.store.load_categories(&profile.id)?;
        let report =
            progress::compute_report(&items, profile, &population, &categories, self.clock.now())?;
        Ok(report)
    }
}
