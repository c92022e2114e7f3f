//! Persistence seam.
//!
//! The service layer only needs a handful of primitives: read the catalog,
//! find and insert users, and mutate one user record in place. Anything that
//! can provide those (a document database, a JSON directory, plain memory)
//! can back the service.

use std::collections::BTreeMap;
use std::path::Path;

use catalog::{
    load_data_dir, parser::write_profiles, CatalogIndex, CourseRecord, Email, EnrollmentRecord, Result,
    SearchPage, SearchQuery, UserProfile, USERS_FILE,
};
use parking_lot::RwLock;
use tracing::{debug, info};

pub trait CourseStore: Send + Sync {
    /// Every catalog course in catalog order
    fn catalog(&self) -> Result<Vec<CourseRecord>>;

    fn find_course(&self, title: &str) -> Result<Option<CourseRecord>>;

    fn search(&self, query: &SearchQuery, page_size: usize) -> Result<SearchPage>;

    fn find_user(&self, email: &str) -> Result<Option<UserProfile>>;

    /// Insert a new user. Returns `false` if the email is already taken.
    fn insert_user(&self, profile: UserProfile) -> Result<bool>;

    /// Run `update` against the stored user.
    ///
    /// Returns `None` when the user does not exist, otherwise whatever the
    /// closure reported (whether it changed anything).
    fn update_user(&self, email: &str, update: &mut dyn FnMut(&mut UserProfile) -> bool) -> Result<Option<bool>>;

    /// Enrollment history for a user; unknown users have none
    fn enrollments(&self, email: &str) -> Result<Vec<EnrollmentRecord>> {
        Ok(self
            .find_user(email)?
            .map(|user| user.enrolled_courses)
            .unwrap_or_default())
    }
}

/// In-process store. The catalog is immutable after construction; user
/// records sit behind a lock and can be written back to a data directory.
pub struct MemoryStore {
    catalog: CatalogIndex,
    users: RwLock<BTreeMap<Email, UserProfile>>,
}

impl MemoryStore {
    pub fn new(catalog: CatalogIndex, users: Vec<UserProfile>) -> Self {
        let users = users.into_iter().map(|user| (user.email.clone(), user)).collect();
        Self {
            catalog,
            users: RwLock::new(users),
        }
    }

    /// Load `courses.json` and (if present) `users.json` from `data_dir`
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let (catalog, users) = load_data_dir(data_dir)?;
        info!("Store ready: {} courses, {} users", catalog.len(), users.len());
        Ok(Self::new(catalog, users))
    }

    /// Write all user records to `users.json` in `data_dir`
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let users: Vec<UserProfile> = self.users.read().values().cloned().collect();
        write_profiles(&data_dir.join(USERS_FILE), &users)?;
        debug!("Saved {} users to {}", users.len(), data_dir.display());
        Ok(())
    }

    pub fn catalog_index(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

impl CourseStore for MemoryStore {
    fn catalog(&self) -> Result<Vec<CourseRecord>> {
        Ok(self.catalog.courses().to_vec())
    }

    fn find_course(&self, title: &str) -> Result<Option<CourseRecord>> {
        Ok(self.catalog.get_course(title).cloned())
    }

    fn search(&self, query: &SearchQuery, page_size: usize) -> Result<SearchPage> {
        Ok(self.catalog.search(query, page_size))
    }

    fn find_user(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self.users.read().get(email).cloned())
    }

    fn insert_user(&self, profile: UserProfile) -> Result<bool> {
        let mut users = self.users.write();
        if users.contains_key(&profile.email) {
            return Ok(false);
        }
        users.insert(profile.email.clone(), profile);
        Ok(true)
    }

    fn update_user(&self, email: &str, update: &mut dyn FnMut(&mut UserProfile) -> bool) -> Result<Option<bool>> {
        Ok(self.users.write().get_mut(email).map(|user| update(user)))
    }
}
