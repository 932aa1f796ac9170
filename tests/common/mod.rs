//! Shared fixtures: an in-memory storage collaborator and timestamp helpers.
#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use wordbox::store::{ItemFilter, ItemStore, StoreError};
use wordbox::types::{Category, Item, ReviewBox, UserProfile};

/// Midnight UTC `n` days after the epoch.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(n * 86_400, 0).unwrap()
}

pub fn profile(id: &str, daily_goal: u32) -> UserProfile {
    UserProfile {
        id: id.into(),
        username: id.into(),
        daily_goal,
    }
}

pub fn item_in_box(id: &str, user_id: &str, box_number: u32, last_reviewed: DateTime<Utc>) -> Item {
    Item {
        id: id.into(),
        user_id: user_id.into(),
        category: "all".into(),
        question: id.into(),
        answer: json!([{ "type": "noun", "translations": [id] }]),
        question_source: None,
        boxes: vec![ReviewBox {
            box_number,
            last_reviewed,
        }],
        created_at: last_reviewed,
        updated_at: last_reviewed,
    }
}

/// Storage collaborator backed by plain vectors, preserving insertion order
/// the way the engines expect the real store to.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    users: Mutex<Vec<UserProfile>>,
    categories: Mutex<Vec<Category>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        let store = Self::new();
        *store.items.lock().unwrap() = items;
        store
    }

    pub fn add_user(&self, user: UserProfile) {
        self.users.lock().unwrap().push(user);
    }

    pub fn category_names(&self, user_id: &str) -> Vec<String> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .filter(|category| category.user_id == user_id)
            .map(|category| category.name.clone())
            .collect()
    }
}

impl ItemStore for MemoryStore {
    fn load_items(&self, user_id: &str, filter: &ItemFilter) -> Result<Vec<Item>, StoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.user_id == user_id && filter.matches(item))
            .cloned()
            .collect())
    }

    fn load_item(&self, item_id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == item_id)
            .cloned())
    }

    fn save_item(&self, item: &Item) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    fn load_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    fn load_categories(&self, user_id: &str) -> Result<Vec<Category>, StoreError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect())
    }

    fn ensure_category(&self, user_id: &str, name: &str) -> Result<Category, StoreError> {
        let mut categories = self.categories.lock().unwrap();
        if let Some(existing) = categories
            .iter()
            .find(|category| category.user_id == user_id && category.name == name)
        {
            return Ok(existing.clone());
        }

        let created = Category {
            id: format!("cat-{user_id}-{name}"),
            user_id: user_id.into(),
            name: name.into(),
        };
        categories.push(created.clone());
        Ok(created)
    }
}
