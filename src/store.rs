//! Collaborator seams.
//!
//! Persistence, time, and identity are supplied by the caller behind these
//! traits; the engines only ever see materialized snapshots. Storage
//! failures cross the boundary wrapped but untranslated.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{Category, Item, UserProfile, DEFAULT_CATEGORY};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure raised by a storage collaborator, passed through as-is.
#[derive(Debug, Error)]
#[error("storage collaborator failed: {message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<BoxedError>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: BoxedError) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Selection narrowing applied by the storage collaborator before the
/// scheduler sees the items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub question_source: Option<String>,
}

impl ItemFilter {
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            question_source: None,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(DEFAULT_CATEGORY) => true,
            Some(category) => item.category == category,
        };
        let source_ok = match self.question_source.as_deref() {
            None => true,
            Some(source) => item.question_source.as_deref() == Some(source),
        };
        category_ok && source_ok
    }
}

/// Document persistence, owned by the caller. Load order is the stable
/// iteration order the scheduler preserves.
pub trait ItemStore {
    fn load_items(&self, user_id: &str, filter: &ItemFilter) -> Result<Vec<Item>, StoreError>;
    fn load_item(&self, item_id: &str) -> Result<Option<Item>, StoreError>;
    fn save_item(&self, item: &Item) -> Result<(), StoreError>;
    fn load_users(&self) -> Result<Vec<UserProfile>, StoreError>;
    fn load_categories(&self, user_id: &str) -> Result<Vec<Category>, StoreError>;
    /// Create the category on first use; returns the existing one otherwise.
    fn ensure_category(&self, user_id: &str, name: &str) -> Result<Category, StoreError>;
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn load_items(&self, user_id: &str, filter: &ItemFilter) -> Result<Vec<Item>, StoreError> {
        (**self).load_items(user_id, filter)
    }

    fn load_item(&self, item_id: &str) -> Result<Option<Item>, StoreError> {
        (**self).load_item(item_id)
    }

    fn save_item(&self, item: &Item) -> Result<(), StoreError> {
        (**self).save_item(item)
    }

    fn load_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        (**self).load_users()
    }

    fn load_categories(&self, user_id: &str) -> Result<Vec<Category>, StoreError> {
        (**self).load_categories(user_id)
    }

    fn ensure_category(&self, user_id: &str, name: &str) -> Result<Category, StoreError> {
        (**self).ensure_category(user_id, name)
    }
}

/// Time source. Injected so every due-date decision is deterministic under
/// test.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time for production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An already-authenticated caller. The core trusts the id unconditionally;
/// verifying credentials is the transport's job, configured with the secret
/// from [`crate::config::Config`].
pub trait Identity {
    fn user_id(&self) -> &str;
}

/// Identity fixed ahead of time, for tests and single-user wiring.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl Identity for StaticIdentity {
    fn user_id(&self) -> &str {
        &self.user_id
    }
}
