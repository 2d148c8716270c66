use crate::*;
use crate::folders::nested;
use chrono::Utc;
use notes_auth::Member;
use notes_core::ID;
use notes_core::Unique;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Shelves {
    notes: BTreeMap<ID<Note>, Note>,
    folders: BTreeMap<ID<Folder>, Folder>,
    sequence: i64,
}

impl Shelves {
    fn next(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }
    /// Whether filing `id` under `parent` would close a loop. A repeated
    /// ancestor counts as one, so a corrupted chain cannot spin the walk.
    fn encloses(&self, id: ID<Folder>, parent: ID<Folder>) -> bool {
        let mut seen = BTreeSet::new();
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == id || !seen.insert(ancestor) {
                return true;
            }
            cursor = self.folders.get(&ancestor).and_then(|f| f.parent());
        }
        false
    }
    /// The folder and everything nested beneath it.
    fn subtree(&self, root: ID<Folder>) -> BTreeSet<ID<Folder>> {
        let mut doomed = BTreeSet::from([root]);
        loop {
            let more = self
                .folders
                .values()
                .filter(|f| f.parent().is_some_and(|p| doomed.contains(&p)))
                .map(|f| f.id())
                .filter(|id| !doomed.contains(id))
                .collect::<Vec<_>>();
            if more.is_empty() {
                return doomed;
            }
            doomed.extend(more);
        }
    }
}

/// In-memory note and folder store, mirroring the cascade rules of the
/// PostgreSQL schema.
#[derive(Debug, Default)]
pub struct Shelf(RwLock<Shelves>);

impl Shelf {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl NoteStore for Shelf {
    async fn create(&self, note: Note) -> Result<Note, ApiError> {
        let mut shelves = self.0.write().await;
        let note = note.assign(ID::from(shelves.next()));
        shelves.notes.insert(note.id(), note.clone());
        Ok(note)
    }
    async fn by_id(&self, id: ID<Note>) -> Result<Option<Note>, ApiError> {
        Ok(self.0.read().await.notes.get(&id).cloned())
    }
    async fn by_owner(&self, owner: ID<Member>) -> Result<Vec<Note>, ApiError> {
        Ok(self
            .0
            .read()
            .await
            .notes
            .values()
            .filter(|n| n.owner() == owner)
            .cloned()
            .collect())
    }
    async fn update(&self, note: Note) -> Result<Note, ApiError> {
        let mut shelves = self.0.write().await;
        let stored = shelves
            .notes
            .get_mut(&note.id())
            .ok_or(ApiError::NotFound("note"))?;
        *stored = note.touch(Utc::now());
        Ok(stored.clone())
    }
    async fn delete(&self, id: ID<Note>) -> Result<(), ApiError> {
        match self.0.write().await.notes.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound("note")),
        }
    }
    async fn owner(&self, id: ID<Note>) -> Result<Option<ID<Member>>, ApiError> {
        Ok(self.0.read().await.notes.get(&id).map(|n| n.owner()))
    }
}

#[async_trait::async_trait]
impl FolderStore for Shelf {
    async fn create(&self, folder: Folder) -> Result<Folder, ApiError> {
        let mut shelves = self.0.write().await;
        let folder = folder.assign(ID::from(shelves.next()));
        shelves.folders.insert(folder.id(), folder.clone());
        Ok(folder)
    }
    async fn by_id(&self, id: ID<Folder>) -> Result<Option<Folder>, ApiError> {
        Ok(self.0.read().await.folders.get(&id).cloned())
    }
    async fn by_owner(&self, owner: ID<Member>) -> Result<Vec<Folder>, ApiError> {
        Ok(self
            .0
            .read()
            .await
            .folders
            .values()
            .filter(|f| f.owner() == owner)
            .cloned()
            .collect())
    }
    async fn update(&self, folder: Folder) -> Result<Folder, ApiError> {
        let mut shelves = self.0.write().await;
        if !shelves.folders.contains_key(&folder.id()) {
            return Err(ApiError::NotFound("folder"));
        }
        if folder.parent().is_some_and(|p| shelves.encloses(folder.id(), p)) {
            return Err(nested());
        }
        let stored = shelves
            .folders
            .get_mut(&folder.id())
            .ok_or(ApiError::NotFound("folder"))?;
        *stored = folder.touch(Utc::now());
        Ok(stored.clone())
    }
    async fn delete(&self, id: ID<Folder>) -> Result<(), ApiError> {
        let mut shelves = self.0.write().await;
        if !shelves.folders.contains_key(&id) {
            return Err(ApiError::NotFound("folder"));
        }
        let doomed = shelves.subtree(id);
        shelves.folders.retain(|id, _| !doomed.contains(id));
        for note in shelves.notes.values_mut() {
            if note.folder().is_some_and(|f| doomed.contains(&f)) {
                *note = note.clone().refile(None);
            }
        }
        Ok(())
    }
    async fn owner(&self, id: ID<Folder>) -> Result<Option<ID<Member>>, ApiError> {
        Ok(self.0.read().await.folders.get(&id).map(|f| f.owner()))
    }
}
