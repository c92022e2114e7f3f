//! Parser for the catalog and profile documents.
//!
//! Both files hold a JSON array of documents:
//! - courses.json: `[{"Title": .., "Category": .., "Sub_Category": .., "Skills": ..}, ..]`
//! - users.json: `[{"email": .., "password": .., "enrolled_courses": [..], "created_at": ..}, ..]`
//!
//! Decoding happens once here; every record that leaves this module has
//! passed validation.

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file, mapping a missing file to [`CatalogError::FileNotFound`]
fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn decode<T: DeserializeOwned>(file: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

/// Parse the course catalog file
pub fn parse_courses(path: &Path) -> Result<Vec<CourseRecord>> {
    let content = read_document(path)?;
    parse_courses_str(&file_name(path), &content)
}

/// Parse catalog documents from an in-memory string
pub fn parse_courses_str(file: &str, content: &str) -> Result<Vec<CourseRecord>> {
    let courses: Vec<CourseRecord> = decode(file, content)?;
    for (idx, course) in courses.iter().enumerate() {
        validate_course(course).map_err(|reason| CatalogError::ParseError {
            file: file.to_string(),
            reason: format!("course #{}: {}", idx + 1, reason),
        })?;
    }
    Ok(courses)
}

/// Parse the user profile file
pub fn parse_profiles(path: &Path) -> Result<Vec<UserProfile>> {
    let content = read_document(path)?;
    parse_profiles_str(&file_name(path), &content)
}

/// Parse profile documents from an in-memory string
pub fn parse_profiles_str(file: &str, content: &str) -> Result<Vec<UserProfile>> {
    let profiles: Vec<UserProfile> = decode(file, content)?;
    let mut emails = HashSet::new();
    for (idx, profile) in profiles.iter().enumerate() {
        validate_profile(profile).map_err(|reason| CatalogError::ParseError {
            file: file.to_string(),
            reason: format!("user #{}: {}", idx + 1, reason),
        })?;
        if !emails.insert(profile.email.as_str()) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate user email '{}'",
                profile.email
            )));
        }
    }
    Ok(profiles)
}

/// Write profiles back as pretty-printed JSON
pub fn write_profiles(path: &Path, profiles: &[UserProfile]) -> Result<()> {
    let content = serde_json::to_string_pretty(profiles).map_err(|e| CatalogError::ParseError {
        file: file_name(path),
        reason: e.to_string(),
    })?;
    fs::write(path, content)?;
    Ok(())
}

fn validate_course(course: &CourseRecord) -> std::result::Result<(), String> {
    if course.title.trim().is_empty() {
        return Err("missing Title".to_string());
    }
    Ok(())
}

fn validate_profile(profile: &UserProfile) -> std::result::Result<(), String> {
    if profile.email.trim().is_empty() {
        return Err("missing email".to_string());
    }

    let mut titles = HashSet::new();
    for enrollment in &profile.enrolled_courses {
        if enrollment.title.trim().is_empty() {
            return Err("enrollment without Title".to_string());
        }
        if enrollment.progress > 100 {
            return Err(format!(
                "progress {} out of range for '{}'",
                enrollment.progress, enrollment.title
            ));
        }
        if !titles.insert(enrollment.title.as_str()) {
            return Err(format!("enrolled twice in '{}'", enrollment.title));
        }
    }
    Ok(())
}
