use anyhow::{Context, Result, anyhow};
use catalog::{EnrollmentStatus, SearchQuery};
use clap::{Parser, Subcommand};
use colored::Colorize;
use server::{Config, CourseService, CourseStore, EnrollOutcome, MemoryStore, Recommendation};
use sources::QuestionnaireAnswers;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// course-recs - Course catalog and recommendation tool
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Browse the course catalog, manage enrollments and get recommendations", long_about = None)]
struct Cli {
    /// Directory holding courses.json and users.json (overrides COURSE_RECS_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend courses from a user's enrollment history
    Recommend {
        #[arg(long)]
        email: String,

        /// Show why each course was picked
        #[arg(long)]
        explain: bool,
    },

    /// Recommend courses from onboarding answers
    Questionnaire {
        /// Domain of interest, e.g. "Data Analysis"
        #[arg(long)]
        domain: Option<String>,

        /// Visual, Auditory, Kinesthetic or General
        #[arg(long)]
        style: Option<String>,
    },

    /// Search course titles (case-insensitive substring match)
    Search {
        #[arg(long, default_value = "")]
        query: String,

        /// Restrict to a category; repeat for several
        #[arg(long = "category")]
        categories: Vec<String>,

        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Show enrollment counts per learning style
    Progress {
        #[arg(long)]
        email: String,
    },

    /// Show a user's profile and enrollments
    Profile {
        #[arg(long)]
        email: String,
    },

    /// Enroll a user in a course
    Enroll {
        #[arg(long)]
        email: String,

        #[arg(long)]
        title: String,
    },

    /// Set progress on an enrolled course
    UpdateProgress {
        #[arg(long)]
        email: String,

        #[arg(long)]
        title: String,

        /// Percentage; values above 100 are clamped
        #[arg(long)]
        progress: u32,
    },

    /// Record a quiz score for an enrolled course
    Quiz {
        #[arg(long)]
        email: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        score: u32,
    },

    /// Mark a course completed
    Complete {
        #[arg(long)]
        email: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        certificate: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load();
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    println!("Loading course data from {}...", config.data_dir.display());
    let start = Instant::now();
    let store = Arc::new(
        MemoryStore::load_from_dir(&config.data_dir).context("Failed to load course data")?,
    );
    println!(
        "{} Loaded {} courses in {:?}",
        "✓".green(),
        store.catalog_index().len(),
        start.elapsed()
    );

    let service = CourseService::new(store.clone(), &config);

    let changed = match cli.command {
        Commands::Recommend { email, explain } => {
            let recommendations = service.recommend_for(&email).await?;
            if recommendations.is_empty() {
                println!("No recommendations for {} yet: enroll in a course first.", email);
            } else {
                print_recommendations(&recommendations, explain);
            }
            false
        }
        Commands::Questionnaire { domain, style } => {
            let answers = QuestionnaireAnswers::new(domain.as_deref(), style.as_deref());
            let recommendations = service.questionnaire_recommend(answers).await?;
            print_recommendations(&recommendations, true);
            false
        }
        Commands::Search { query, categories, page } => {
            handle_search(&service, SearchQuery { query, categories, page })?;
            false
        }
        Commands::Progress { email } => {
            println!("{}", format!("Enrollments by learning style for {}:", email).bold().blue());
            for (style, count) in service.progress_summary(&email)? {
                println!("{}{}: {}", "• ".green(), style, count);
            }
            false
        }
        Commands::Profile { email } => {
            handle_profile(&service, &email)?;
            false
        }
        Commands::Enroll { email, title } => {
            match service.enroll(&email, &title)? {
                EnrollOutcome::Enrolled => println!("{} Enrolled {} in {}", "✓".green(), email, title),
                EnrollOutcome::AlreadyEnrolled => println!("{} is already enrolled in {}", email, title),
            }
            true
        }
        Commands::UpdateProgress { email, title, progress } => {
            let stored = service.update_progress(&email, &title, progress)?;
            println!("{} Progress on {} is now {}%", "✓".green(), title, stored);
            true
        }
        Commands::Quiz { email, title, score } => {
            let stored = service.submit_quiz(&email, &title, score)?;
            println!("{} Quiz recorded, progress on {} is now {}%", "✓".green(), title, stored);
            true
        }
        Commands::Complete {
            email,
            title,
            certificate,
        } => {
            service.complete_course(&email, &title, &certificate)?;
            println!("{} {} completed", "✓".green(), title);
            true
        }
    };

    if changed {
        store
            .save(&config.data_dir)
            .with_context(|| format!("Failed to save users to {}", config.data_dir.display()))?;
        info!("Saved {} users to {}", store.user_count(), config.data_dir.display());
    }

    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &CourseService<MemoryStore>, query: SearchQuery) -> Result<()> {
    let page = service.search(&query)?;

    println!(
        "{}",
        format!(
            "Search results for '{}' (page {} of {}):",
            query.query, page.current_page, page.total_pages
        )
        .bold()
        .blue()
    );
    if page.courses.is_empty() {
        println!("  (no courses)");
    }
    for course in &page.courses {
        println!(
            "  - {} [{} / {}] {}",
            course.title,
            course.category,
            course.sub_category,
            course.skills.dimmed()
        );
    }
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(service: &CourseService<MemoryStore>, email: &str) -> Result<()> {
    let user = service
        .store()
        .find_user(email)?
        .ok_or_else(|| anyhow!("User {} not found", email))?;

    println!("{}", format!("User: {}", user.email).bold().blue());
    println!("{}Username: {}", "• ".green(), user.username);
    println!("{}Member since: {}", "• ".green(), user.created_at.format("%Y-%m-%d"));
    println!("{}Enrolled courses: {}", "• ".cyan(), user.enrolled_courses.len());

    for enrollment in &user.enrolled_courses {
        let status = match enrollment.status {
            EnrollmentStatus::Completed => "completed".green(),
            EnrollmentStatus::InProgress => "in progress".yellow(),
        };
        println!(
            "  - {} [{}] {}% {}",
            enrollment.title, enrollment.category, enrollment.progress, status
        );
        if let Some(link) = &enrollment.certificate_link {
            println!("    certificate: {}", link);
        }
    }
    Ok(())
}

/// Format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], explain: bool) {
    println!("{}", "Recommended Courses:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{} / {}] - Score: {}",
            (i + 1).to_string().green(),
            rec.title,
            rec.category,
            rec.sub_category,
            rec.score
        );
        if explain {
            println!("   {}", rec.explanation);
        }
    }
}
