//! Browser-side persistence for the board.
//!
//! The board never touches `localStorage` directly: it owns a [`PostStore`]
//! and every counter, map and flag that outlives a page load goes through it.

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Identity of a post on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostKey {
    /// Local number handed out by [`PostStore::allocate_draft`].
    Draft(u64),
    /// Identifier assigned by the server.
    Saved(i64),
}

impl PostKey {
    pub fn server_id(&self) -> Option<i64> {
        match self {
            Self::Saved(id) => Some(*id),
            Self::Draft(_) => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft(n) => write!(f, "draft-{}", n),
            Self::Saved(id) => write!(f, "blog-{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPost {
    pub key: PostKey,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

pub trait PostStore {
    fn entries(&self) -> Result<Vec<StoredPost>, StoreError>;
    fn upsert(&mut self, post: &StoredPost) -> Result<(), StoreError>;
    fn remove(&mut self, key: PostKey) -> Result<(), StoreError>;
    /// Drops every entry and restarts draft numbering at 1.
    fn clear(&mut self) -> Result<(), StoreError>;
    fn allocate_draft(&mut self) -> Result<PostKey, StoreError>;
    fn is_dark(&self) -> bool;
    fn set_dark(&mut self, dark: bool) -> Result<(), StoreError>;

    /// Re-keys the draft as the server-assigned `id`. A draft that is no
    /// longer stored is not an error.
    fn reconcile(&mut self, draft: u64, id: i64) -> Result<(), StoreError> {
        let draft_key = PostKey::Draft(draft);
        let Some(mut post) = self.entries()?.into_iter().find(|p| p.key == draft_key) else {
            return Ok(());
        };

        self.remove(draft_key)?;
        post.key = PostKey::Saved(id);
        self.upsert(&post)
    }
}

/// Store that lives as long as the board. Used by tests and by sessions that
/// should leave nothing behind.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    posts: BTreeMap<PostKey, StoredPost>,
    next_draft: u64,
    dark: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            posts: BTreeMap::new(),
            next_draft: 1,
            dark: true,
        }
    }

    pub fn get(&self, key: PostKey) -> Option<&StoredPost> {
        self.posts.get(&key)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore for MemoryStore {
    fn entries(&self) -> Result<Vec<StoredPost>, StoreError> {
        Ok(self.posts.values().cloned().collect())
    }

    fn upsert(&mut self, post: &StoredPost) -> Result<(), StoreError> {
        self.posts.insert(post.key, post.clone());
        Ok(())
    }

    fn remove(&mut self, key: PostKey) -> Result<(), StoreError> {
        self.posts.remove(&key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.posts.clear();
        self.next_draft = 1;
        Ok(())
    }

    fn allocate_draft(&mut self) -> Result<PostKey, StoreError> {
        let key = PostKey::Draft(self.next_draft);
        self.next_draft += 1;
        Ok(key)
    }

    fn is_dark(&self) -> bool {
        self.dark
    }

    fn set_dark(&mut self, dark: bool) -> Result<(), StoreError> {
        self.dark = dark;
        Ok(())
    }
}

const BLOGS_KEY: &str = "blogs";
const COUNT_KEY: &str = "count";
const DARK_KEY: &str = "isDark";

/// Store backed by the browser's `localStorage`.
///
/// Posts live as one JSON map under `blogs` keyed by [`PostKey`]'s display
/// form, the draft counter under `count`, the color mode under `isDark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn read_map(&self) -> Result<BTreeMap<String, StoredPost>, StoreError> {
        match LocalStorage::get(BLOGS_KEY) {
            Ok(map) => Ok(map),
            Err(StorageError::KeyNotFound(_)) => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, StoredPost>) -> Result<(), StoreError> {
        LocalStorage::set(BLOGS_KEY, map)?;
        Ok(())
    }
}

impl PostStore for LocalStorageStore {
    fn entries(&self) -> Result<Vec<StoredPost>, StoreError> {
        Ok(self.read_map()?.into_values().collect())
    }

    fn upsert(&mut self, post: &StoredPost) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(post.key.to_string(), post.clone());
        self.write_map(&map)
    }

    fn remove(&mut self, key: PostKey) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(&key.to_string()).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        LocalStorage::delete(BLOGS_KEY);
        LocalStorage::delete(COUNT_KEY);
        Ok(())
    }

    fn allocate_draft(&mut self) -> Result<PostKey, StoreError> {
        let next = LocalStorage::get::<u64>(COUNT_KEY).unwrap_or(1).max(1);
        LocalStorage::set(COUNT_KEY, next + 1)?;
        Ok(PostKey::Draft(next))
    }

    fn is_dark(&self) -> bool {
        LocalStorage::get(DARK_KEY).unwrap_or(true)
    }

    fn set_dark(&mut self, dark: bool) -> Result<(), StoreError> {
        LocalStorage::set(DARK_KEY, dark)?;
        Ok(())
    }
}
