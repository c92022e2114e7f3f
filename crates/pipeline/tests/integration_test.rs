//! Integration tests for the pipeline.
//!
//! These tests run the scorer end to end over a realistic catalog and check
//! the invariants every recommendation list must satisfy.

use catalog::{CourseRecord, EnrollmentRecord};
use pipeline::RecommendationScorer;
use proptest::prelude::*;
use sources::QuestionnaireAnswers;
use std::collections::HashSet;

fn create_test_catalog() -> Vec<CourseRecord> {
    vec![
        CourseRecord::new("Deep Learning Basics", "Visual", "Machine Learning", "python,neural networks"),
        CourseRecord::new("Data Analysis 101", "Auditory", "Data Analysis", "statistics,python"),
        CourseRecord::new("Intro to Python", "Visual", "Machine Learning", "python,basics"),
        CourseRecord::new("Visualizing Data with Tableau", "Visual", "Data Analysis", "tableau,dashboards"),
        CourseRecord::new("Statistics for Business", "Auditory", "Business Essentials", "statistics,excel"),
        CourseRecord::new("Hands-on Machine Learning", "Kinesthetic", "Machine Learning", "python,scikit-learn"),
        CourseRecord::new("Leadership Essentials", "General", "Business Essentials", "management,communication"),
        CourseRecord::new("Charting Sales Data", "Visual", "Data Analysis", "excel,charts"),
        CourseRecord::new("Neural Networks in Depth", "Visual", "Machine Learning", "neural networks,python"),
    ]
}

fn enroll(catalog: &[CourseRecord], titles: &[&str]) -> Vec<EnrollmentRecord> {
    titles
        .iter()
        .filter_map(|title| catalog.iter().find(|c| c.title == *title))
        .map(EnrollmentRecord::from_course)
        .collect()
}

fn titles(courses: &[CourseRecord]) -> Vec<&str> {
    courses.iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn test_two_course_scenario() {
    let catalog = vec![
        CourseRecord::new("Deep Learning Basics", "Visual", "", "python,neural networks"),
        CourseRecord::new("Data Analysis 101", "Auditory", "", "statistics,python"),
    ];
    let enrolled = vec![EnrollmentRecord::from_course(&CourseRecord::new(
        "Intro to Python",
        "Visual",
        "",
        "python,basics",
    ))];

    let result = RecommendationScorer::new().recommend(&enrolled, &catalog).unwrap();
    assert_eq!(titles(&result), vec!["Deep Learning Basics", "Data Analysis 101"]);
}

#[test]
fn test_python_learner_gets_python_courses_first() {
    let catalog = create_test_catalog();
    let enrolled = enroll(&catalog, &["Intro to Python"]);

    let scored = RecommendationScorer::new().recommend_scored(&enrolled, &catalog).unwrap();

    assert_eq!(scored.len(), 5);
    // Deep Learning Basics: Visual (3) + {python, basics} (4)
    assert_eq!(scored[0].course.title, "Deep Learning Basics");
    assert_eq!(scored[0].score, 7);
    // Neural Networks in Depth: Visual (3) + {python} (2)
    assert_eq!(scored[1].course.title, "Neural Networks in Depth");
    assert_eq!(scored[1].score, 5);
    assert!(scored.iter().all(|s| s.course.title != "Intro to Python"));
}

#[test]
fn test_preferred_category_shifts_ranking() {
    let catalog = create_test_catalog();
    let enrolled = enroll(&catalog, &["Data Analysis 101", "Statistics for Business"]);

    let result = RecommendationScorer::new().recommend(&enrolled, &catalog).unwrap();

    // Auditory is preferred but nothing else is Auditory; keyword overlap decides
    assert!(!titles(&result).contains(&"Data Analysis 101"));
    assert!(!titles(&result).contains(&"Statistics for Business"));
    assert_eq!(result[0].title, "Charting Sales Data");
}

#[test]
fn test_recommend_is_idempotent() {
    let catalog = create_test_catalog();
    let enrolled = enroll(&catalog, &["Intro to Python", "Charting Sales Data"]);
    let scorer = RecommendationScorer::new();

    let first = scorer.recommend(&enrolled, &catalog).unwrap();
    let second = scorer.recommend(&enrolled, &catalog).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_questionnaire_exhausts_exact_pool_first() {
    let catalog = create_test_catalog();
    let answers = QuestionnaireAnswers::new(Some("Data Analysis"), Some("Visual"));

    let result = RecommendationScorer::new().match_by_questionnaire(&answers, &catalog);

    let exact: Vec<&str> = catalog
        .iter()
        .filter(|c| c.sub_category == "Data Analysis" && c.category == "Visual")
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles(&result)[..exact.len()], exact[..]);
    assert!(result.len() <= 6);
    assert!(result.len() >= 5);
}

fn arb_course() -> impl Strategy<Value = CourseRecord> {
    (
        prop::sample::select(vec!["Python", "Data", "Statistics", "Design", "Audio", "Machine", "Learning"]),
        prop::sample::select(vec!["Basics", "Advanced", "Projects", "Theory"]),
        prop::sample::select(vec!["Visual", "Auditory", "Kinesthetic", "General", ""]),
        prop::sample::select(vec!["Data Analysis", "Machine Learning", "Business Essentials", ""]),
        prop::sample::select(vec!["python,statistics", "design", "audio mixing", "", "machine learning,data"]),
    )
        .prop_map(|(a, b, category, sub_category, skills)| {
            CourseRecord::new(format!("{} {}", a, b), category, sub_category, skills)
        })
}

proptest! {
    #[test]
    fn prop_recommend_invariants(
        catalog in prop::collection::vec(arb_course(), 0..40),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let enrolled: Vec<EnrollmentRecord> = if catalog.is_empty() {
            Vec::new()
        } else {
            picks.iter().map(|i| EnrollmentRecord::from_course(i.get(&catalog))).collect()
        };
        let enrolled_titles: HashSet<&str> = enrolled.iter().map(|e| e.title.as_str()).collect();

        let result = RecommendationScorer::new().recommend(&enrolled, &catalog).unwrap();

        prop_assert!(result.len() <= 5);
        if enrolled.is_empty() {
            prop_assert!(result.is_empty());
        }
        let unique: HashSet<&str> = result.iter().map(|c| c.title.as_str()).collect();
        prop_assert_eq!(unique.len(), result.len());
        for course in &result {
            prop_assert!(!enrolled_titles.contains(course.title.as_str()));
        }
    }

    #[test]
    fn prop_questionnaire_bounds(
        catalog in prop::collection::vec(arb_course(), 0..40),
        style in prop::sample::select(vec!["Visual", "Auditory", "General", ""]),
    ) {
        let answers = QuestionnaireAnswers::new(None, Some(style));
        let result = RecommendationScorer::new().match_by_questionnaire(&answers, &catalog);

        prop_assert!(result.len() <= 6);
        let unique: HashSet<&str> = result.iter().map(|c| c.title.as_str()).collect();
        prop_assert_eq!(unique.len(), result.len());
        let distinct_titles: HashSet<&str> = catalog.iter().map(|c| c.title.as_str()).collect();
        prop_assert!(result.len() >= distinct_titles.len().min(5));
    }

    #[test]
    fn prop_questionnaire_exact_matches_lead(
        catalog in prop::collection::vec(arb_course(), 0..40),
        domain in prop::sample::select(vec!["Data Analysis", "Machine Learning", "Business Essentials"]),
        style in prop::sample::select(vec!["Visual", "Auditory", "Kinesthetic"]),
    ) {
        let answers = QuestionnaireAnswers::new(Some(domain), Some(style));
        let result = RecommendationScorer::new().match_by_questionnaire(&answers, &catalog);

        // First occurrence of each title matching both answers, in catalog order
        let mut seen = HashSet::new();
        let exact: Vec<&str> = catalog
            .iter()
            .filter(|c| c.sub_category == domain && c.category == style)
            .map(|c| c.title.as_str())
            .filter(|title| seen.insert(*title))
            .take(6)
            .collect();

        let selected = titles(&result);
        prop_assert!(selected.len() >= exact.len());
        prop_assert_eq!(&selected[..exact.len()], &exact[..]);
        prop_assert!(result.len() <= 6);
    }
}
