//! End-to-end flow over a JSON data directory: register, enroll, learn,
//! get recommendations, persist and reload.

use std::fs;
use std::sync::Arc;

use server::{
    AccountService, Config, CourseService, CourseStore, CredentialHasher, IdentityProvider, MemoryStore,
    RegisterRequest, Result, ServiceError,
};
use sources::QuestionnaireAnswers;
use tempfile::TempDir;

struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

struct EmailTokens;

impl IdentityProvider for EmailTokens {
    fn issue_token(&self, subject: &str) -> Result<String> {
        Ok(format!("bearer.{}", subject))
    }

    fn verify_token(&self, token: &str) -> Option<String> {
        token.strip_prefix("bearer.").map(str::to_string)
    }
}

const COURSES: &str = r#"[
    {"Title": "Deep Learning Basics", "Category": "Visual", "Sub_Category": "Machine Learning", "Skills": "python,neural networks"},
    {"Title": "Data Analysis 101", "Category": "Auditory", "Sub_Category": "Data Analysis", "Skills": "statistics,python"},
    {"Title": "Intro to Python", "Category": "Visual", "Sub_Category": "Machine Learning", "Skills": "python,basics"},
    {"Title": "Dashboards with Tableau", "Category": "Visual", "Sub_Category": "Data Analysis", "Skills": "tableau,dashboards"},
    {"Title": "Podcasting Workshop", "Category": "Auditory", "Sub_Category": "Media", "Skills": "audio editing"},
    {"Title": "Robotics Lab", "Category": "Kinesthetic", "Sub_Category": "Engineering", "Skills": "electronics,python"}
]"#;

fn create_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("courses.json"), COURSES).unwrap();
    dir
}

#[tokio::test]
async fn test_full_learner_journey() {
    let dir = create_data_dir();
    let config = Config::default().with_data_dir(dir.path());
    let store = Arc::new(MemoryStore::load_from_dir(&config.data_dir).unwrap());

    let accounts = AccountService::new(store.clone(), PlainHasher, EmailTokens);
    let courses = CourseService::new(store.clone(), &config);

    let token = accounts
        .register(RegisterRequest {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            username: "ana".to_string(),
        })
        .unwrap();
    let email = accounts.authenticate(&token).unwrap();

    // New users start from the questionnaire
    let onboarding = courses
        .questionnaire_recommend(QuestionnaireAnswers::new(Some("Machine Learning"), Some("Visual")))
        .await
        .unwrap();
    assert_eq!(onboarding[0].title, "Deep Learning Basics");
    assert_eq!(onboarding[1].title, "Intro to Python");
    assert_eq!(onboarding[2].title, "Dashboards with Tableau");
    assert!(courses.recommend_for(&email).await.unwrap().is_empty());

    courses.enroll(&email, "Intro to Python").unwrap();
    courses.submit_quiz(&email, "Intro to Python", 85).unwrap();
    courses
        .complete_course(&email, "Intro to Python", "https://certs.example.com/ana/1")
        .unwrap();

    let recommendations = courses.recommend_for(&email).await.unwrap();
    let titles: Vec<&str> = recommendations.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles[0], "Deep Learning Basics");
    assert!(!titles.contains(&"Intro to Python"));
    assert_eq!(titles.len(), 5);

    let summary = courses.progress_summary(&email).unwrap();
    assert_eq!(summary["Visual"], 1);

    store.save(dir.path()).unwrap();

    // Everything survives a reload
    let reloaded = Arc::new(MemoryStore::load_from_dir(dir.path()).unwrap());
    let accounts = AccountService::new(reloaded.clone(), PlainHasher, EmailTokens);
    let token = accounts.login("ana@example.com", "secret").unwrap();
    let profile = accounts.profile(&token).unwrap();
    assert_eq!(profile.enrolled_courses.len(), 1);
    assert_eq!(profile.enrolled_courses[0].progress, 100);
    assert!(profile.enrolled_courses[0].is_completed());
    assert_eq!(
        reloaded.enrollments("ana@example.com").unwrap()[0].certificate_link.as_deref(),
        Some("https://certs.example.com/ana/1")
    );
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let dir = create_data_dir();
    let store = Arc::new(MemoryStore::load_from_dir(dir.path()).unwrap());
    let accounts = AccountService::new(store, PlainHasher, EmailTokens);

    assert!(matches!(accounts.authenticate("not-a-token"), Err(ServiceError::Unauthorized)));
    assert!(matches!(accounts.profile("bearer.ghost@example.com"), Err(ServiceError::UnknownUser(_))));
}

#[test]
fn test_missing_catalog_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let err = MemoryStore::load_from_dir(dir.path()).err().unwrap();
    assert!(matches!(ServiceError::from(err), ServiceError::Storage(_)));
}
