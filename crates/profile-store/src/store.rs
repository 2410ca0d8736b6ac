use crate::error::StoreError;
use core_types::UserProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The on-disk shape of the store: the profile plus the backend session
/// token, kept together so one `clear` wipes both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    user: Option<UserProfile>,
    session_token: Option<String>,
}

/// The persisted user record, with an explicit hydrate-then-read lifecycle.
///
/// Constructed cold; call `hydrate` before reading. All mutations write
/// through to disk immediately.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    document: StoreDocument,
    hydrated: bool,
}

impl ProfileStore {
    /// Creates a cold store backed by the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: StoreDocument::default(),
            hydrated: false,
        }
    }

    /// Loads the document from disk and marks the store ready.
    ///
    /// A missing file is a first run, not an error: it hydrates to an empty
    /// store. Calling `hydrate` on an already-hydrated store re-reads disk.
    pub fn hydrate(&mut self) -> Result<(), StoreError> {
        self.document = match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No profile document yet; starting empty.");
                StoreDocument::default()
            }
            Err(e) => return Err(e.into()),
        };
        self.hydrated = true;
        Ok(())
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The stored profile, if a user is logged in.
    pub fn profile(&self) -> Result<Option<&UserProfile>, StoreError> {
        self.ensure_hydrated()?;
        Ok(self.document.user.as_ref())
    }

    /// The backend session token, if present.
    pub fn session_token(&self) -> Result<Option<&str>, StoreError> {
        self.ensure_hydrated()?;
        Ok(self.document.session_token.as_deref())
    }

    /// Replaces the stored profile and persists.
    pub fn set_profile(&mut self, profile: UserProfile) -> Result<(), StoreError> {
        self.ensure_hydrated()?;
        self.document.user = Some(profile);
        self.persist()
    }

    /// Replaces the session token and persists.
    pub fn set_session_token(&mut self, token: String) -> Result<(), StoreError> {
        self.ensure_hydrated()?;
        self.document.session_token = Some(token);
        self.persist()
    }

    /// Patches only the streak field of the stored profile and persists.
    ///
    /// Errors with `NoProfile` when nobody is logged in.
    pub fn update_streak(&mut self, streak: u32) -> Result<(), StoreError> {
        self.ensure_hydrated()?;
        let user = self.document.user.as_mut().ok_or(StoreError::NoProfile)?;
        user.streak = streak;
        self.persist()
    }

    /// Wipes the profile and session token and deletes the document (logout).
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.ensure_hydrated()?;
        self.document = StoreDocument::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn ensure_hydrated(&self) -> Result<(), StoreError> {
        if self.hydrated {
            Ok(())
        } else {
            Err(StoreError::NotHydrated)
        }
    }

    /// Writes the document to a sibling temp file, then renames it into
    /// place so readers never observe a half-written document.
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = tmp_path(&self.path);
        let raw = serde_json::to_string_pretty(&self.document)?;
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::GithubLink;

    fn profile() -> UserProfile {
        UserProfile {
            id: "64f1c0ffee".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: None,
            github: GithubLink::NotLinked,
            display_name: "Ada".to_string(),
            total_experience: 0,
            current_hp: 100,
            max_hp: 100,
            current_level_xp: 0,
            level_up_xp: 100,
            rank: 0,
            level: 1,
            streak: 0,
            tasks_completed: Vec::new(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("profile.json"))
    }

    #[test]
    fn reading_a_cold_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.is_hydrated());
        assert!(matches!(store.profile(), Err(StoreError::NotHydrated)));
        assert!(matches!(
            store.session_token(),
            Err(StoreError::NotHydrated)
        ));
    }

    #[test]
    fn missing_file_hydrates_to_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.hydrate().unwrap();
        assert!(store.is_hydrated());
        assert!(store.profile().unwrap().is_none());
        assert!(store.session_token().unwrap().is_none());
    }

    #[test]
    fn profile_survives_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let mut store = ProfileStore::new(&path);
        store.hydrate().unwrap();
        store.set_profile(profile()).unwrap();
        store.set_session_token("jwt-token".to_string()).unwrap();

        let mut reloaded = ProfileStore::new(&path);
        reloaded.hydrate().unwrap();
        assert_eq!(reloaded.profile().unwrap().unwrap().username, "ada");
        assert_eq!(reloaded.session_token().unwrap(), Some("jwt-token"));
    }

    #[test]
    fn update_streak_patches_only_the_streak() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.hydrate().unwrap();
        store.set_profile(profile()).unwrap();

        store.update_streak(7).unwrap();

        let user = store.profile().unwrap().unwrap();
        assert_eq!(user.streak, 7);
        assert_eq!(user.level, 1);
        assert_eq!(user.username, "ada");
    }

    #[test]
    fn update_streak_without_a_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.hydrate().unwrap();
        assert!(matches!(store.update_streak(3), Err(StoreError::NoProfile)));
    }

    #[test]
    fn clear_wipes_memory_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let mut store = ProfileStore::new(&path);
        store.hydrate().unwrap();
        store.set_profile(profile()).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(store.profile().unwrap().is_none());
        assert!(!path.exists());

        // Clearing an already-cleared store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn persist_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.hydrate().unwrap();
        store.set_profile(profile()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("profile.json")]);
    }

    #[test]
    fn corrupt_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = ProfileStore::new(&path);
        assert!(matches!(
            store.hydrate(),
            Err(StoreError::Serialization(_))
        ));
        assert!(!store.is_hydrated());
    }
}
