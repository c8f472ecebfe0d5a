//! View model of the blog page.
//!
//! [`Board`] is driven by [`BoardMsg`] values (user actions and network
//! outcomes) and answers with [`Effect`] values describing the requests the
//! caller has to make. It never performs I/O besides the injected
//! [`PostStore`], so the whole draft/persisted lifecycle is testable without a
//! browser.

use crate::models::{ApiError, Blog, CreateBlogRequest, CreatedBlog, SaveBlogRequest};
use crate::store::{PostKey, PostStore, StoreError, StoredPost};
use std::cmp::Reverse;

pub const TITLE_PLACEHOLDER: &str = "Enter Title";
pub const CONTENT_PLACEHOLDER: &str = "Enter Content";

/// Where saved posts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Through the REST API; the store caches what the board shows.
    Remote,
    /// Only in the store.
    Local,
}

impl SyncMode {
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("local") => Self::Local,
            _ => Self::Remote,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: PostKey,
    pub title: String,
    pub content: String,
    pub created_at: String,
    /// Edited since the last save.
    pub dirty: bool,
    /// Filtered out by the active search.
    pub hidden: bool,
    render_key: String,
    pending_create: bool,
    resave_after_create: bool,
}

impl Entry {
    fn from_stored(post: StoredPost) -> Self {
        Self {
            key: post.key,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            dirty: false,
            hidden: false,
            render_key: post.key.to_string(),
            pending_create: false,
            resave_after_create: false,
        }
    }

    fn from_blog(blog: Blog) -> Self {
        Self::from_stored(StoredPost {
            key: PostKey::Saved(blog.id),
            title: blog.title,
            content: blog.content,
            created_at: blog.created_at,
        })
    }

    fn to_stored(&self) -> StoredPost {
        StoredPost {
            key: self.key,
            title: self.title.clone(),
            content: self.content.clone(),
            created_at: self.created_at.clone(),
        }
    }

    pub fn title_placeholder(&self) -> String {
        match self.key {
            PostKey::Draft(n) => format!("{} [{}]", TITLE_PLACEHOLDER, n),
            PostKey::Saved(_) => TITLE_PLACEHOLDER.to_string(),
        }
    }

    pub fn has_text(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }

    pub fn can_save(&self) -> bool {
        self.dirty && self.has_text()
    }

    /// Stays the same when a draft becomes a saved post, so the view keeps
    /// the element (and its focus) across reconciliation.
    pub fn render_key(&self) -> &str {
        &self.render_key
    }

    /// Waiting for the server to assign an id.
    pub fn is_pending(&self) -> bool {
        self.pending_create
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.content.to_lowercase().contains(query_lower)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardMsg {
    Load,
    Loaded(Vec<Blog>),
    NewDraft { created_at: String },
    Edit { key: PostKey, field: Field, value: String },
    Save(PostKey),
    Created { draft: u64, blog: CreatedBlog },
    CreateFailed { draft: u64, message: String },
    Saved(i64),
    SaveFailed { id: i64, message: String },
    Delete(PostKey),
    Deleted(i64),
    DeleteAll,
    AllDeleted,
    /// `force` repeats the previous query (search icon) instead of skipping it
    /// (Enter key).
    Search { query: String, force: bool },
    SearchResults { query: String, ids: Vec<i64> },
    ShowAll,
    ToggleTheme,
    RequestFailed(String),
}

impl BoardMsg {
    /// A 400 on the full listing means the server has no posts yet.
    pub fn loaded(result: Result<Vec<Blog>, ApiError>) -> Self {
        match result {
            Ok(blogs) => Self::Loaded(blogs),
            Err(ApiError::BadRequest(_)) => Self::Loaded(Vec::new()),
            Err(e) => Self::RequestFailed(e.to_string()),
        }
    }

    pub fn searched(query: String, result: Result<Vec<Blog>, ApiError>) -> Self {
        match result {
            Ok(blogs) => Self::SearchResults {
                query,
                ids: blogs.into_iter().map(|b| b.id).collect(),
            },
            Err(e) => Self::RequestFailed(e.to_string()),
        }
    }

    pub fn created(draft: u64, result: Result<CreatedBlog, ApiError>) -> Self {
        match result {
            Ok(blog) => Self::Created { draft, blog },
            Err(e) => Self::CreateFailed {
                draft,
                message: e.to_string(),
            },
        }
    }

    pub fn saved(id: i64, result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::Saved(id),
            Err(e) => Self::SaveFailed {
                id,
                message: e.to_string(),
            },
        }
    }

    pub fn deleted(id: i64, result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::Deleted(id),
            Err(e) => Self::RequestFailed(e.to_string()),
        }
    }

    pub fn all_deleted(result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::AllDeleted,
            Err(e) => Self::RequestFailed(e.to_string()),
        }
    }
}

/// Network work requested by the board.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchAll,
    Search(String),
    Create {
        draft: u64,
        request: CreateBlogRequest,
    },
    Save(SaveBlogRequest),
    Delete(i64),
    DeleteAll,
}

fn restore_entries<S: PostStore>(store: &S) -> Vec<Entry> {
    let mut entries: Vec<Entry> = match store.entries() {
        Ok(posts) => posts.into_iter().map(Entry::from_stored).collect(),
        Err(e) => {
            log::warn!("Failed to restore posts: {}", e);
            Vec::new()
        }
    };
    entries.sort_by_key(|e| match e.key {
        PostKey::Draft(n) => (0, Reverse(String::new()), Reverse(n as i64)),
        PostKey::Saved(id) => (1, Reverse(e.created_at.clone()), Reverse(id)),
    });
    entries
}

pub struct Board<S: PostStore> {
    store: S,
    mode: SyncMode,
    entries: Vec<Entry>,
    last_query: Option<String>,
    error: Option<String>,
    loading: bool,
    dark: bool,
}

impl<S: PostStore> Board<S> {
    /// Restores whatever the store holds: drafts first (newest first), then
    /// saved posts by creation time.
    pub fn new(store: S, mode: SyncMode) -> Self {
        let entries = restore_entries(&store);
        let dark = store.is_dark();

        Self {
            store,
            mode,
            entries,
            last_query: None,
            error: None,
            loading: false,
            dark,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.hidden)
    }

    pub fn entry(&self, key: PostKey) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn update(&mut self, msg: BoardMsg) -> Vec<Effect> {
        match msg {
            BoardMsg::Load => self.load(),
            BoardMsg::Loaded(blogs) => {
                self.apply_loaded(blogs);
                Vec::new()
            }
            BoardMsg::NewDraft { created_at } => {
                self.new_draft(created_at);
                Vec::new()
            }
            BoardMsg::Edit { key, field, value } => {
                self.edit(key, field, value);
                Vec::new()
            }
            BoardMsg::Save(key) => self.save(key),
            BoardMsg::Created { draft, blog } => self.reconcile(draft, blog),
            BoardMsg::CreateFailed { draft, message } => {
                let Some(entry) = self.pending_draft_mut(draft) else {
                    log::debug!("Dropping create failure for stale draft {}", draft);
                    return Vec::new();
                };
                entry.pending_create = false;
                entry.resave_after_create = false;
                entry.dirty = true;
                self.error = Some(message);
                Vec::new()
            }
            BoardMsg::Saved(id) => {
                log::debug!("Blog {} saved", id);
                Vec::new()
            }
            BoardMsg::SaveFailed { id, message } => {
                if let Some(entry) = self.entry_mut(PostKey::Saved(id)) {
                    entry.dirty = true;
                }
                self.error = Some(message);
                Vec::new()
            }
            BoardMsg::Delete(key) => self.delete(key),
            BoardMsg::Deleted(id) => {
                log::debug!("Blog {} deleted", id);
                Vec::new()
            }
            BoardMsg::DeleteAll => match self.mode {
                SyncMode::Remote => vec![Effect::DeleteAll],
                SyncMode::Local => {
                    self.clear_all();
                    Vec::new()
                }
            },
            BoardMsg::AllDeleted => {
                self.clear_all();
                Vec::new()
            }
            BoardMsg::Search { query, force } => self.search(query, force),
            BoardMsg::SearchResults { query, ids } => {
                if self.last_query.as_deref() != Some(query.as_str()) {
                    log::debug!("Dropping results for stale search {:?}", query);
                    return Vec::new();
                }
                for entry in &mut self.entries {
                    entry.hidden = !entry.key.server_id().is_some_and(|id| ids.contains(&id));
                }
                Vec::new()
            }
            BoardMsg::ShowAll => {
                self.last_query = None;
                self.error = None;
                for entry in &mut self.entries {
                    entry.hidden = false;
                }
                Vec::new()
            }
            BoardMsg::ToggleTheme => {
                self.dark = !self.dark;
                let dark = self.dark;
                self.persist(|store| store.set_dark(dark));
                Vec::new()
            }
            BoardMsg::RequestFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                Vec::new()
            }
        }
    }

    fn entry_mut(&mut self, key: PostKey) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    /// Draft numbers restart after delete-all, so a create response only
    /// belongs to a draft that is still waiting for it.
    fn pending_draft_mut(&mut self, draft: u64) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.key == PostKey::Draft(draft) && e.pending_create)
    }

    /// Store failures are logged; the board keeps working from memory.
    fn persist(&mut self, op: impl FnOnce(&mut S) -> Result<(), StoreError>) {
        if let Err(e) = op(&mut self.store) {
            log::warn!("Failed to persist board state: {}", e);
        }
    }

    fn persist_entry(&mut self, key: PostKey) {
        if let Some(post) = self.entry(key).map(Entry::to_stored) {
            self.persist(|store| store.upsert(&post));
        }
    }

    fn load(&mut self) -> Vec<Effect> {
        match self.mode {
            SyncMode::Remote => {
                self.loading = true;
                vec![Effect::FetchAll]
            }
            SyncMode::Local => {
                self.entries = restore_entries(&self.store);
                Vec::new()
            }
        }
    }

    /// Server listing replaces saved entries; drafts stay on top. Saved
    /// entries with unsaved edits keep the local text.
    fn apply_loaded(&mut self, blogs: Vec<Blog>) {
        self.loading = false;

        let mut previous = std::mem::take(&mut self.entries);
        let mut next: Vec<Entry> = previous
            .iter()
            .filter(|e| e.key.is_draft())
            .cloned()
            .collect();

        for blog in blogs {
            let key = PostKey::Saved(blog.id);
            let entry = match previous.iter().position(|e| e.key == key) {
                Some(idx) if previous[idx].dirty => previous.swap_remove(idx),
                Some(idx) => Entry {
                    render_key: previous[idx].render_key.clone(),
                    ..Entry::from_blog(blog)
                },
                None => Entry::from_blog(blog),
            };
            next.push(entry);
        }

        let stale: Vec<PostKey> = previous
            .iter()
            .filter(|e| !e.key.is_draft())
            .map(|e| e.key)
            .filter(|key| !next.iter().any(|e| e.key == *key))
            .collect();

        self.entries = next;

        for key in stale {
            self.persist(|store| store.remove(key));
        }
        let saved: Vec<StoredPost> = self
            .entries
            .iter()
            .filter(|e| !e.key.is_draft())
            .map(Entry::to_stored)
            .collect();
        for post in saved {
            self.persist(|store| store.upsert(&post));
        }
    }

    fn new_draft(&mut self, created_at: String) {
        let key = match self.store.allocate_draft() {
            Ok(key) => key,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        self.entries.insert(
            0,
            Entry::from_stored(StoredPost {
                key,
                title: String::new(),
                content: String::new(),
                created_at,
            }),
        );
        self.persist_entry(key);
    }

    fn edit(&mut self, key: PostKey, field: Field, value: String) {
        let Some(entry) = self.entry_mut(key) else {
            return;
        };

        match field {
            Field::Title => entry.title = value,
            Field::Content => entry.content = value,
        }
        entry.dirty = true;

        self.persist_entry(key);
    }

    fn save(&mut self, key: PostKey) -> Vec<Effect> {
        let mode = self.mode;
        let Some(entry) = self.entry_mut(key) else {
            return Vec::new();
        };
        if !entry.has_text() {
            return Vec::new();
        }

        let effects = match (mode, key) {
            (SyncMode::Local, _) => {
                entry.dirty = false;
                Vec::new()
            }
            (SyncMode::Remote, PostKey::Draft(_)) if entry.pending_create => {
                entry.resave_after_create = true;
                entry.dirty = false;
                Vec::new()
            }
            (SyncMode::Remote, PostKey::Draft(draft)) => {
                entry.pending_create = true;
                entry.dirty = false;
                vec![Effect::Create {
                    draft,
                    request: CreateBlogRequest {
                        title: entry.title.clone(),
                        content: entry.content.clone(),
                        created_at: Some(entry.created_at.clone()).filter(|d| !d.is_empty()),
                    },
                }]
            }
            (SyncMode::Remote, PostKey::Saved(id)) => {
                entry.dirty = false;
                vec![Effect::Save(SaveBlogRequest {
                    id,
                    title: Some(entry.title.clone()),
                    content: Some(entry.content.clone()),
                })]
            }
        };

        self.persist_entry(key);
        effects
    }

    /// Swaps the draft's identity for the server id. Edits made while the
    /// create was in flight are replayed against the new id.
    fn reconcile(&mut self, draft: u64, blog: CreatedBlog) -> Vec<Effect> {
        let saved_key = PostKey::Saved(blog.id);

        let Some(entry) = self.pending_draft_mut(draft) else {
            // Deleted while the create was in flight.
            log::debug!("Created blog {} has no pending draft", blog.id);
            return vec![Effect::Delete(blog.id)];
        };

        entry.key = saved_key;
        entry.pending_create = false;
        if let Some(created_at) = blog.created_at {
            entry.created_at = created_at;
        }

        let mut effects = Vec::new();
        if std::mem::take(&mut entry.resave_after_create) && entry.has_text() {
            effects.push(Effect::Save(SaveBlogRequest {
                id: blog.id,
                title: Some(entry.title.clone()),
                content: Some(entry.content.clone()),
            }));
        }

        self.persist(|store| store.reconcile(draft, blog.id));
        self.persist_entry(saved_key);
        effects
    }

    fn delete(&mut self, key: PostKey) -> Vec<Effect> {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        if self.entries.len() == before {
            return Vec::new();
        }

        self.persist(|store| store.remove(key));

        match (self.mode, key) {
            (SyncMode::Remote, PostKey::Saved(id)) => vec![Effect::Delete(id)],
            _ => Vec::new(),
        }
    }

    fn clear_all(&mut self) {
        self.entries.clear();
        self.last_query = None;
        self.persist(|store| store.clear());
    }

    fn search(&mut self, query: String, force: bool) -> Vec<Effect> {
        let query = query.trim().to_string();
        if query.is_empty() {
            return Vec::new();
        }
        if !force && self.last_query.as_deref() == Some(query.as_str()) {
            return Vec::new();
        }

        self.last_query = Some(query.clone());
        self.error = None;

        match self.mode {
            SyncMode::Remote => vec![Effect::Search(query)],
            SyncMode::Local => {
                let needle = query.to_lowercase();
                for entry in &mut self.entries {
                    entry.hidden = !entry.matches(&needle);
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const NOW: &str = "2022-12-19 10:00:00";

    fn blog(id: i64, title: &str, content: &str, created_at: &str) -> Blog {
        Blog {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: created_at.to_string(),
        }
    }

    fn remote() -> Board<MemoryStore> {
        Board::new(MemoryStore::new(), SyncMode::Remote)
    }

    fn write(board: &mut Board<MemoryStore>, key: PostKey, title: &str, content: &str) {
        board.update(BoardMsg::Edit {
            key,
            field: Field::Title,
            value: title.to_string(),
        });
        board.update(BoardMsg::Edit {
            key,
            field: Field::Content,
            value: content.to_string(),
        });
    }

    fn new_draft(board: &mut Board<MemoryStore>) -> PostKey {
        board.update(BoardMsg::NewDraft {
            created_at: NOW.to_string(),
        });
        board.entries()[0].key
    }

    #[test]
    fn sync_mode_defaults_to_remote() {
        assert_eq!(SyncMode::from_name(None), SyncMode::Remote);
        assert_eq!(SyncMode::from_name(Some("LOCAL ")), SyncMode::Local);
        assert_eq!(SyncMode::from_name(Some("anything")), SyncMode::Remote);
    }

    #[test]
    fn remote_load_fetches_and_bad_request_means_empty() {
        let mut board = remote();

        assert_eq!(board.update(BoardMsg::Load), vec![Effect::FetchAll]);
        assert!(board.is_loading());

        let msg = BoardMsg::loaded(Err(ApiError::BadRequest("Undefined input".into())));
        board.update(msg);

        assert!(!board.is_loading());
        assert!(board.entries().is_empty());
        assert!(board.error().is_none());
    }

    #[test]
    fn loaded_posts_are_cached_below_drafts() {
        let mut board = remote();
        let draft = new_draft(&mut board);

        board.update(BoardMsg::Loaded(vec![
            blog(2, "b", "two", "2022-12-19 09:00:00"),
            blog(1, "a", "one", "2022-12-18 09:00:00"),
        ]));

        let keys: Vec<PostKey> = board.entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![draft, PostKey::Saved(2), PostKey::Saved(1)]);
        assert_eq!(board.store().len(), 3);
    }

    #[test]
    fn new_draft_gets_numbered_placeholder() {
        let mut board = remote();

        let first = new_draft(&mut board);
        let second = new_draft(&mut board);

        assert_eq!(first, PostKey::Draft(1));
        assert_eq!(second, PostKey::Draft(2));
        assert_eq!(board.entries()[0].key, second);
        assert_eq!(board.entries()[0].title_placeholder(), "Enter Title [2]");
        assert!(board.store().get(second).is_some());
    }

    #[test]
    fn edit_enables_save_only_with_both_fields() {
        let mut board = remote();
        let key = new_draft(&mut board);

        board.update(BoardMsg::Edit {
            key,
            field: Field::Title,
            value: "Hello".into(),
        });
        assert!(!board.entry(key).unwrap().can_save());
        assert!(board.update(BoardMsg::Save(key)).is_empty());

        board.update(BoardMsg::Edit {
            key,
            field: Field::Content,
            value: "World".into(),
        });
        assert!(board.entry(key).unwrap().can_save());
        assert_eq!(board.store().get(key).unwrap().content, "World");
    }

    #[test]
    fn saved_draft_targets_server_id_afterwards() {
        let mut board = remote();
        let key = new_draft(&mut board);
        write(&mut board, key, "Hello", "World");

        let effects = board.update(BoardMsg::Save(key));
        assert_eq!(
            effects,
            vec![Effect::Create {
                draft: 1,
                request: CreateBlogRequest {
                    title: "Hello".into(),
                    content: "World".into(),
                    created_at: Some(NOW.into()),
                },
            }]
        );
        assert!(board.entry(key).unwrap().is_pending());

        let created = CreatedBlog {
            id: 7,
            created_at: None,
        };
        assert!(board.update(BoardMsg::created(1, Ok(created))).is_empty());

        let saved = PostKey::Saved(7);
        assert!(board.entry(key).is_none());
        assert!(board.store().get(key).is_none());
        assert_eq!(board.store().get(saved).unwrap().title, "Hello");

        board.update(BoardMsg::Edit {
            key: saved,
            field: Field::Content,
            value: "Again".into(),
        });
        assert_eq!(
            board.update(BoardMsg::Save(saved)),
            vec![Effect::Save(SaveBlogRequest {
                id: 7,
                title: Some("Hello".into()),
                content: Some("Again".into()),
            })]
        );
    }

    #[test]
    fn save_during_pending_create_is_replayed() {
        let mut board = remote();
        let key = new_draft(&mut board);
        write(&mut board, key, "Hello", "World");
        board.update(BoardMsg::Save(key));

        board.update(BoardMsg::Edit {
            key,
            field: Field::Title,
            value: "Hello again".into(),
        });
        assert!(board.update(BoardMsg::Save(key)).is_empty());

        let effects = board.update(BoardMsg::Created {
            draft: 1,
            blog: CreatedBlog {
                id: 3,
                created_at: Some("2022-12-19 10:00:01".into()),
            },
        });

        assert_eq!(
            effects,
            vec![Effect::Save(SaveBlogRequest {
                id: 3,
                title: Some("Hello again".into()),
                content: Some("World".into()),
            })]
        );
        assert_eq!(
            board.entry(PostKey::Saved(3)).unwrap().created_at,
            "2022-12-19 10:00:01"
        );
    }

    #[test]
    fn draft_deleted_during_create_is_deleted_on_server() {
        let mut board = remote();
        let key = new_draft(&mut board);
        write(&mut board, key, "t", "c");
        board.update(BoardMsg::Save(key));

        assert!(board.update(BoardMsg::Delete(key)).is_empty());
        let effects = board.update(BoardMsg::Created {
            draft: 1,
            blog: CreatedBlog {
                id: 11,
                created_at: None,
            },
        });

        assert_eq!(effects, vec![Effect::Delete(11)]);
        assert!(board.entries().is_empty());
        assert!(board.store().is_empty());
    }

    #[test]
    fn failed_create_keeps_draft_editable() {
        let mut board = remote();
        let key = new_draft(&mut board);
        write(&mut board, key, "t", "c");
        board.update(BoardMsg::Save(key));

        board.update(BoardMsg::created(
            1,
            Err(ApiError::Server("Something went wrong with the server".into())),
        ));

        let entry = board.entry(key).unwrap();
        assert!(!entry.is_pending());
        assert!(entry.can_save());
        assert_eq!(board.error(), Some("Something went wrong with the server"));
    }

    #[test]
    fn delete_saved_entry_emits_request() {
        let mut board = remote();
        board.update(BoardMsg::Loaded(vec![blog(5, "t", "c", NOW)]));

        assert_eq!(
            board.update(BoardMsg::Delete(PostKey::Saved(5))),
            vec![Effect::Delete(5)]
        );
        assert!(board.entries().is_empty());
        assert!(board.store().is_empty());
    }

    #[test]
    fn delete_all_waits_for_server_in_remote_mode() {
        let mut board = remote();
        board.update(BoardMsg::Loaded(vec![blog(1, "t", "c", NOW)]));
        new_draft(&mut board);

        assert_eq!(board.update(BoardMsg::DeleteAll), vec![Effect::DeleteAll]);
        assert_eq!(board.entries().len(), 2);

        board.update(BoardMsg::all_deleted(Ok(())));

        assert!(board.entries().is_empty());
        assert!(board.store().is_empty());
        assert_eq!(new_draft(&mut board), PostKey::Draft(1));
    }

    #[test]
    fn remote_search_hides_unmatched_entries() {
        let mut board = remote();
        board.update(BoardMsg::Loaded(vec![
            blog(2, "rust", "x", NOW),
            blog(1, "go", "y", NOW),
        ]));
        new_draft(&mut board);

        let effects = board.update(BoardMsg::Search {
            query: "  rust ".into(),
            force: false,
        });
        assert_eq!(effects, vec![Effect::Search("rust".into())]);

        board.update(BoardMsg::searched(
            "rust".into(),
            Ok(vec![blog(2, "rust", "x", NOW)]),
        ));
        let visible: Vec<PostKey> = board.visible_entries().map(|e| e.key).collect();
        assert_eq!(visible, vec![PostKey::Saved(2)]);

        // Enter on the same query does nothing, the icon repeats it.
        let repeat = BoardMsg::Search {
            query: "rust".into(),
            force: false,
        };
        assert!(board.update(repeat).is_empty());
        let forced = BoardMsg::Search {
            query: "rust".into(),
            force: true,
        };
        assert_eq!(board.update(forced), vec![Effect::Search("rust".into())]);

        board.update(BoardMsg::ShowAll);
        assert_eq!(board.visible_entries().count(), 3);
        assert_eq!(board.search_query(), None);
    }

    #[test]
    fn empty_search_is_ignored() {
        let mut board = remote();

        let effects = board.update(BoardMsg::Search {
            query: "   ".into(),
            force: true,
        });

        assert!(effects.is_empty());
        assert_eq!(board.search_query(), None);
    }

    #[test]
    fn local_mode_never_emits_effects() {
        let mut board = Board::new(MemoryStore::new(), SyncMode::Local);
        let key = new_draft(&mut board);
        write(&mut board, key, "Rust", "Ownership");

        assert!(board.update(BoardMsg::Load).is_empty());
        assert!(board.update(BoardMsg::Save(key)).is_empty());
        assert!(!board.entry(key).unwrap().dirty);

        let other = new_draft(&mut board);
        write(&mut board, other, "Go", "Goroutines");

        let effects = board.update(BoardMsg::Search {
            query: "OWNER".into(),
            force: false,
        });
        assert!(effects.is_empty());
        let visible: Vec<PostKey> = board.visible_entries().map(|e| e.key).collect();
        assert_eq!(visible, vec![key]);

        assert!(board.update(BoardMsg::DeleteAll).is_empty());
        assert!(board.entries().is_empty());
    }

    #[test]
    fn board_restores_from_store() {
        let mut board = Board::new(MemoryStore::new(), SyncMode::Local);
        let first = new_draft(&mut board);
        write(&mut board, first, "a", "b");
        new_draft(&mut board);
        board.update(BoardMsg::ToggleTheme);

        let restored = Board::new(board.store().clone(), SyncMode::Local);

        let keys: Vec<PostKey> = restored.entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![PostKey::Draft(2), PostKey::Draft(1)]);
        assert_eq!(restored.entry(first).unwrap().title, "a");
        assert!(!restored.is_dark());
    }

    #[test]
    fn request_failure_is_shown_until_show_all() {
        let mut board = remote();
        board.update(BoardMsg::Load);

        board.update(BoardMsg::loaded(Err(ApiError::Network("offline".into()))));
        assert_eq!(board.error(), Some("Network error: offline"));
        assert!(!board.is_loading());

        board.update(BoardMsg::ShowAll);
        assert!(board.error().is_none());
    }

    #[test]
    fn late_create_after_delete_all_leaves_new_draft_alone() {
        let mut board = remote();
        let old = new_draft(&mut board);
        write(&mut board, old, "old", "text");
        board.update(BoardMsg::Save(old));

        board.update(BoardMsg::DeleteAll);
        board.update(BoardMsg::AllDeleted);
        let fresh = new_draft(&mut board);
        assert_eq!(fresh, old);
        write(&mut board, fresh, "new", "words");

        let effects = board.update(BoardMsg::Created {
            draft: 1,
            blog: CreatedBlog {
                id: 42,
                created_at: None,
            },
        });

        assert_eq!(effects, vec![Effect::Delete(42)]);
        let keys: Vec<PostKey> = board.entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![fresh]);
        assert_eq!(board.store().get(fresh).unwrap().title, "new");
        assert!(board.store().get(PostKey::Saved(42)).is_none());
    }

    #[test]
    fn late_create_failure_leaves_new_draft_alone() {
        let mut board = remote();
        let old = new_draft(&mut board);
        write(&mut board, old, "old", "text");
        board.update(BoardMsg::Save(old));
        board.update(BoardMsg::AllDeleted);
        let fresh = new_draft(&mut board);

        board.update(BoardMsg::CreateFailed {
            draft: 1,
            message: "Something went wrong with the server".into(),
        });

        assert!(board.error().is_none());
        assert!(!board.entry(fresh).unwrap().dirty);
    }

    #[test]
    fn search_results_for_an_abandoned_query_are_dropped() {
        let mut board = remote();
        board.update(BoardMsg::Loaded(vec![
            blog(2, "apple", "x", NOW),
            blog(1, "banana", "y", NOW),
        ]));

        board.update(BoardMsg::Search {
            query: "apple".into(),
            force: false,
        });
        board.update(BoardMsg::ShowAll);
        board.update(BoardMsg::searched(
            "apple".into(),
            Ok(vec![blog(2, "apple", "x", NOW)]),
        ));
        assert_eq!(board.visible_entries().count(), 2);

        board.update(BoardMsg::Search {
            query: "apple".into(),
            force: false,
        });
        board.update(BoardMsg::Search {
            query: "banana".into(),
            force: false,
        });
        board.update(BoardMsg::searched(
            "banana".into(),
            Ok(vec![blog(1, "banana", "y", NOW)]),
        ));
        board.update(BoardMsg::searched(
            "apple".into(),
            Ok(vec![blog(2, "apple", "x", NOW)]),
        ));

        let visible: Vec<PostKey> = board.visible_entries().map(|e| e.key).collect();
        assert_eq!(visible, vec![PostKey::Saved(1)]);
        assert_eq!(board.search_query(), Some("banana"));
    }

    #[test]
    fn local_search_folds_non_ascii_case() {
        let mut board = Board::new(MemoryStore::new(), SyncMode::Local);
        let key = new_draft(&mut board);
        write(&mut board, key, "Éclair", "ÜBER");
        let other = new_draft(&mut board);
        write(&mut board, other, "Eclair", "uber");

        board.update(BoardMsg::Search {
            query: "éclair".into(),
            force: false,
        });
        let visible: Vec<PostKey> = board.visible_entries().map(|e| e.key).collect();
        assert_eq!(visible, vec![key]);

        board.update(BoardMsg::Search {
            query: "über".into(),
            force: false,
        });
        let visible: Vec<PostKey> = board.visible_entries().map(|e| e.key).collect();
        assert_eq!(visible, vec![key]);
    }

    #[test]
    fn render_key_survives_reconciliation_and_reload() {
        let mut board = remote();
        let key = new_draft(&mut board);
        write(&mut board, key, "t", "c");
        let render_key = board.entry(key).unwrap().render_key().to_string();
        board.update(BoardMsg::Save(key));

        board.update(BoardMsg::Created {
            draft: 1,
            blog: CreatedBlog {
                id: 9,
                created_at: None,
            },
        });
        assert_eq!(
            board.entry(PostKey::Saved(9)).unwrap().render_key(),
            render_key
        );

        board.update(BoardMsg::Loaded(vec![blog(9, "t", "c", NOW)]));
        assert_eq!(
            board.entry(PostKey::Saved(9)).unwrap().render_key(),
            render_key
        );
    }
}
