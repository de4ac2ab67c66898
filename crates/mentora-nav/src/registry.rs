//! The route registry: the immutable table of every addressable page on the
//! learning platform frontend.
//!
//! The registry is built once at process start and never mutated. Iteration
//! order is the declaration order of the routes, which is load-bearing: the
//! keyword resolver returns the *first* matching route, so more specific or
//! more commonly requested pages must appear earlier than routes that share
//! keywords with them.

use serde::{Deserialize, Serialize};

/// Grouping label for related routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteCategory {
    /// Login, registration, password recovery.
    Authentication,
    /// Lessons, quizzes, specialized learning modules.
    Learning,
    /// Progress tracking, activity history, scheduling.
    Progress,
    /// Skills assessment, job matching, career planning.
    Career,
    /// Settings and preferences.
    Configuration,
    /// Parent/guardian supervision views.
    Parent,
}

impl RouteCategory {
    /// Returns the display label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Authentication => "Authentication",
            Self::Learning => "Learning",
            Self::Progress => "Progress",
            Self::Career => "Career",
            Self::Configuration => "Configuration",
            Self::Parent => "Parent",
        }
    }
}

/// A registry entry: one addressable destination on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Unique short identifier (e.g. `dashboard`). Registry-scoped primary key.
    pub key: String,
    /// Canonical URL path. Always starts with `/`. Unique apart from the
    /// login route, which owns the root path `/`.
    pub path: String,
    /// Human-readable display name.
    pub name: String,
    /// One-sentence purpose. Participates in keyword resolution.
    pub description: String,
    /// Grouping label.
    pub category: RouteCategory,
    /// Synonym phrases, all lowercase, used by the keyword resolver.
    /// Keywords need not be unique across routes; registry order breaks ties.
    pub keywords: Vec<String>,
}

impl Route {
    fn new(
        key: &str,
        path: &str,
        name: &str,
        description: &str,
        category: RouteCategory,
        keywords: &[&str],
    ) -> Self {
        Self {
            key: key.to_string(),
            path: path.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Immutable, order-preserving table of all known routes.
///
/// Lookups never fail — absent keys and paths produce `None`/`false`, not
/// errors. The backing `Vec` fixes iteration order at construction.
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl RouteRegistry {
    /// Builds a registry from an explicit route list, preserving order.
    ///
    /// Duplicate keys and paths not rooted at `/` indicate a programming
    /// error in the route table and are rejected in debug builds.
    pub fn new(routes: Vec<Route>) -> Self {
        debug_assert!(
            {
                let mut keys: Vec<&str> = routes.iter().map(|r| r.key.as_str()).collect();
                keys.sort_unstable();
                keys.windows(2).all(|w| w[0] != w[1])
            },
            "route keys must be unique"
        );
        debug_assert!(
            routes.iter().all(|r| r.path.starts_with('/')),
            "route paths must start with '/'"
        );
        Self { routes }
    }

    /// Looks up a route by its key. Case-insensitive; spoken input is often
    /// capitalized by the transcriber.
    pub fn get(&self, key: &str) -> Option<&Route> {
        let key = key.to_lowercase();
        self.routes.iter().find(|r| r.key == key)
    }

    /// Looks up a route by its exact path.
    pub fn find_by_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Whether the exact path is registered.
    pub fn contains_path(&self, path: &str) -> bool {
        self.find_by_path(path).is_some()
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// All routes in the given category, in declaration order.
    pub fn by_category(&self, category: RouteCategory) -> Vec<&Route> {
        self.routes
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// The production route table for the learning platform frontend.
    pub fn site() -> Self {
        use RouteCategory::*;
        Self::new(vec![
            Route::new(
                "login",
                "/",
                "Login",
                "Main login page for user authentication",
                Authentication,
                &["login", "sign in", "home page", "start"],
            ),
            Route::new(
                "register",
                "/register",
                "Register",
                "Create new learner or parent account",
                Authentication,
                &["register", "sign up", "create account", "new user"],
            ),
            Route::new(
                "forgot-password",
                "/forgot-password",
                "Forgot Password",
                "Reset forgotten password via email",
                Authentication,
                &[
                    "forgot password",
                    "reset password",
                    "password help",
                    "recover password",
                ],
            ),
            Route::new(
                "dashboard",
                "/dashboard",
                "Dashboard",
                "Main overview with learning progress, upcoming lessons, and quick access to features",
                Learning,
                &["dashboard", "home", "main page", "overview", "main menu"],
            ),
            Route::new(
                "lessons",
                "/lessons",
                "Lessons",
                "Browse and access all lessons across subjects (math, English, digital skills)",
                Learning,
                &["lessons", "courses", "learning materials", "study", "learn"],
            ),
            Route::new(
                "quiz",
                "/quiz",
                "Quiz",
                "Take quizzes and assessments to test your knowledge",
                Learning,
                &["quiz", "test", "assessment", "practice questions", "exam"],
            ),
            Route::new(
                "adhd-learning",
                "/adhd-learning",
                "ADHD Learning",
                "Specialized learning modules with ADHD-friendly content and reduced stimulation",
                Learning,
                &["adhd", "focused learning", "special learning", "attention"],
            ),
            Route::new(
                "voice-tutor",
                "/voice-tutor",
                "Voice Tutor",
                "Interactive voice-based lessons with the tutor's guidance",
                Learning,
                &["voice tutor", "voice lesson", "audio learning", "speak"],
            ),
            Route::new(
                "sign-translator",
                "/sign-translator",
                "Sign Translator",
                "Convert text and speech to sign language with 3D avatar demonstrations",
                Learning,
                &[
                    "sign language",
                    "translator",
                    "sign translator",
                    "deaf",
                ],
            ),
            Route::new(
                "progress",
                "/progress",
                "My Progress",
                "View detailed learning progress, completed lessons, and achievements",
                Progress,
                &[
                    "progress",
                    "achievements",
                    "learning stats",
                    "my progress",
                    "results",
                ],
            ),
            Route::new(
                "activity",
                "/activity",
                "Activity",
                "View recent activities, learning history, and session logs",
                Progress,
                &["activity", "recent activity", "history", "what did i do", "log"],
            ),
            Route::new(
                "learning-history",
                "/learning-history",
                "Learning History",
                "Comprehensive learning history and past sessions",
                Progress,
                &["learning history", "past lessons", "history log", "records"],
            ),
            Route::new(
                "schedule",
                "/schedule",
                "Visual Schedule",
                "Daily and weekly visual schedule planner for neurodiverse learners",
                Progress,
                &["schedule", "planner", "daily schedule", "calendar", "plan"],
            ),
            Route::new(
                "skills",
                "/skills",
                "Skills Assessment",
                "Evaluate current skills and identify strengths and areas for improvement",
                Career,
                &["skills", "assessment", "skill test", "evaluate skills", "abilities"],
            ),
            Route::new(
                "jobs",
                "/jobs",
                "Job Matching",
                "Browse job opportunities matched to your skills and interests",
                Career,
                &["jobs", "find jobs", "job search", "employment", "work"],
            ),
            Route::new(
                "career",
                "/career",
                "Career Path",
                "Explore career options and create career development plans",
                Career,
                &["career", "career path", "career planning", "future jobs"],
            ),
            Route::new(
                "settings",
                "/settings",
                "Settings",
                "User preferences, accessibility settings, and profile management",
                Configuration,
                &["settings", "preferences", "options", "configure", "profile"],
            ),
            Route::new(
                "parent",
                "/parent",
                "Parent Dashboard",
                "Parent and guardian view of the learner's progress and supervision management",
                Parent,
                &["parent", "parent dashboard", "parent view", "guardian page"],
            ),
        ])
    }
}
