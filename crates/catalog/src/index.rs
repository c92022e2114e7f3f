//! CatalogIndex building and querying.
//!
//! The catalog keeps courses in their load order, because both recommendation
//! paths break ties by catalog order. The title index stores positions into
//! that vector rather than copies of the records.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;

/// Default number of courses per search page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Catalog file name inside a data directory
pub const COURSES_FILE: &str = "courses.json";

/// Profile file name inside a data directory
pub const USERS_FILE: &str = "users.json";

/// Load the catalog and the user profiles from a data directory.
///
/// Both files are parsed in parallel with `rayon::join`. A missing
/// users file is not an error: it just means nobody has registered yet.
pub fn load_data_dir(data_dir: &Path) -> Result<(CatalogIndex, Vec<UserProfile>)> {
    tracing::info!("Loading course data from {:?}", data_dir);

    let courses_path = data_dir.join(COURSES_FILE);
    let users_path = data_dir.join(USERS_FILE);

    let (catalog, profiles) = rayon::join(
        || CatalogIndex::load_from_file(&courses_path),
        || match parser::parse_profiles(&users_path) {
            Err(CatalogError::FileNotFound { .. }) => Ok(Vec::new()),
            other => other,
        },
    );
    let catalog = catalog?;
    let profiles = profiles?;

    tracing::info!("Loaded {} courses, {} users", catalog.len(), profiles.len());
    Ok((catalog, profiles))
}

/// In-memory course catalog with a title index.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    /// Courses in catalog order
    courses: Vec<CourseRecord>,
    /// First position of each title
    title_index: HashMap<CourseTitle, usize>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over already decoded courses
    pub fn from_courses(courses: Vec<CourseRecord>) -> Self {
        let mut index = Self::new();
        for course in courses {
            index.insert_course(course);
        }
        index
    }

    /// Load and index the catalog file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let courses = parser::parse_courses(path)?;
        let index = Self::from_courses(courses);
        let duplicates = index.len() - index.title_index.len();
        if duplicates > 0 {
            tracing::warn!("Catalog {:?} contains {} duplicate titles", path, duplicates);
        }
        Ok(index)
    }

    /// Append a course and index its title.
    ///
    /// Duplicate titles are kept (the catalog is not ours to clean up), but
    /// title lookups resolve to the first occurrence.
    pub fn insert_course(&mut self, course: CourseRecord) {
        let position = self.courses.len();
        self.title_index.entry(course.title.clone()).or_insert(position);
        self.courses.push(course);
    }

    /// All courses, in catalog order
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Get a course by title
    pub fn get_course(&self, title: &str) -> Option<&CourseRecord> {
        self.title_index.get(title).map(|&pos| &self.courses[pos])
    }

    /// Paged, case-insensitive title search with an optional category filter.
    ///
    /// Pages are 1-based; a page of 0 is treated as the first page. Asking
    /// for a page past the end, however far, yields an empty page with the
    /// correct total.
    pub fn search(&self, query: &SearchQuery, page_size: usize) -> SearchPage {
        let page_size = page_size.max(1);
        let current_page = query.page.max(1);
        let needle = query.query.to_lowercase();

        let matches: Vec<&CourseRecord> = self
            .courses
            .iter()
            .filter(|course| course.title.to_lowercase().contains(&needle))
            .filter(|course| {
                query.categories.is_empty() || query.categories.iter().any(|c| *c == course.category)
            })
            .collect();

        let total_pages = matches.len().div_ceil(page_size);
        let courses = matches
            .into_iter()
            .skip(current_page.saturating_sub(1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        SearchPage {
            courses,
            total_pages,
            current_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index() -> CatalogIndex {
        CatalogIndex::from_courses(vec![
            CourseRecord::new("Deep Learning Basics", "Visual", "Machine Learning", "python,neural networks"),
            CourseRecord::new("Data Analysis 101", "Auditory", "Data Analysis", "statistics,python"),
            CourseRecord::new("Hands-on Data Wrangling", "Kinesthetic", "Data Analysis", "pandas"),
            CourseRecord::new("Deep Learning Basics", "General", "Machine Learning", ""),
        ])
    }

    #[test]
    fn test_load_data_dir_without_users_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(COURSES_FILE),
            r#"[{"Title": "Statistics", "Category": "Auditory"}]"#,
        )
        .unwrap();

        let (catalog, profiles) = load_data_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(profiles.is_empty());
    }

    #[test]
    fn test_load_data_dir_requires_catalog() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_data_dir(dir.path()),
            Err(CatalogError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_title_lookup_resolves_first_occurrence() {
        let index = create_test_index();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get_course("Deep Learning Basics").unwrap().category, "Visual");
        assert!(index.get_course("Unknown").is_none());
        assert_eq!(index.courses()[3].category, "General");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = create_test_index();
        let page = index.search(
            &SearchQuery {
                query: "DATA".to_string(),
                categories: vec![],
                page: 1,
            },
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(page.courses.len(), 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_search_category_filter() {
        let index = create_test_index();
        let page = index.search(
            &SearchQuery {
                query: String::new(),
                categories: vec!["Visual".to_string(), "General".to_string()],
                page: 1,
            },
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(page.courses.len(), 2);
        assert!(page.courses.iter().all(|c| c.title == "Deep Learning Basics"));
    }

    #[test]
    fn test_search_pagination() {
        let index = create_test_index();
        let query = |page| SearchQuery {
            query: String::new(),
            categories: vec![],
            page,
        };

        let first = index.search(&query(1), 3);
        assert_eq!(first.courses.len(), 3);
        assert_eq!(first.total_pages, 2);

        let second = index.search(&query(2), 3);
        assert_eq!(second.courses.len(), 1);
        assert_eq!(second.courses[0].category, "General");

        let beyond = index.search(&query(5), 3);
        assert!(beyond.courses.is_empty());
        assert_eq!(beyond.total_pages, 2);

        let zero = index.search(&query(0), 3);
        assert_eq!(zero.current_page, 1);
    }

    #[test]
    fn test_search_page_past_usize_range() {
        let index = create_test_index();
        let query = SearchQuery {
            query: String::new(),
            categories: vec![],
            page: usize::MAX,
        };

        let page = index.search(&query, DEFAULT_PAGE_SIZE);
        assert!(page.courses.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, usize::MAX);

        let page = index.search(&query, usize::MAX);
        assert!(page.courses.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
