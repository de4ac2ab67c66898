//! Keyword resolution: mapping free-form spoken or typed phrases to a route.
//!
//! Matching is deliberately permissive. Spoken input arrives noisy from the
//! transcriber ("uh, show me my progress please"), so the resolver trades
//! precision for recall: plain substring containment, no tokenization, no
//! scoring. A match is a best-effort guess, not a guarantee of intent, and
//! callers confirm the destination back to the user in natural language.

use crate::registry::{Route, RouteRegistry};

impl RouteRegistry {
    /// Resolves free text to the first matching route in registry order.
    ///
    /// The lowercased input matches a route when it contains one of the
    /// route's keywords, or when it is itself contained in a keyword, the
    /// route name, or the route description. Containment is checked in both
    /// directions for keywords so that whole utterances ("show me my
    /// progress") resolve as well as fragments ("progres" mid-word is fine
    /// too). First match wins; ambiguity is settled by declaration order.
    pub fn resolve(&self, free_text: &str) -> Option<&Route> {
        let input = free_text.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }

        self.routes().iter().find(|route| {
            route
                .keywords
                .iter()
                .any(|k| input.contains(k.as_str()) || k.contains(&input))
                || route.name.to_lowercase().contains(&input)
                || route.description.to_lowercase().contains(&input)
        })
    }

    /// Natural-language navigation guidance for a free-text request.
    ///
    /// Names the matched route and its full URL, or falls back to a short
    /// list of example destinations when nothing matches.
    pub fn navigation_reply(&self, free_text: &str, base_url: &str) -> String {
        match self.resolve(free_text) {
            Some(route) => format!(
                "Let me help you navigate to the {} page. You can access it at {}{}. {}",
                route.name,
                base_url.trim_end_matches('/'),
                route.path,
                route.description
            ),
            None => concat!(
                "I'm not sure which page you're looking for. ",
                "Could you try saying one of these: dashboard, lessons, quiz, progress, ",
                "jobs, career, settings, or schedule?"
            )
            .to_string(),
        }
    }

    /// A formatted summary of every route, grouped by category.
    pub fn summary(&self) -> String {
        let mut out = String::from("Here are all the pages you can visit:\n\n");
        let mut seen: Vec<crate::registry::RouteCategory> = Vec::new();

        for route in self.routes() {
            if seen.contains(&route.category) {
                continue;
            }
            seen.push(route.category);
            out.push_str(route.category.label());
            out.push_str(":\n");
            for in_category in self.by_category(route.category) {
                out.push_str(&format!(
                    "  - {} ({}): {}\n",
                    in_category.name, in_category.path, in_category.description
                ));
            }
            out.push('\n');
        }
        out
    }

    /// Suggests the next logical page from the current location and an
    /// optional stated goal.
    ///
    /// Goal keywords take precedence; otherwise a small page-flow table maps
    /// common locations to their natural follow-up. Unknown locations fall
    /// back to the dashboard.
    pub fn suggest_next(&self, current_path: &str, goal: Option<&str>) -> Option<&Route> {
        const GOAL_SUGGESTIONS: &[(&str, &str)] = &[
            ("learn", "lessons"),
            ("practice", "quiz"),
            ("test", "quiz"),
            ("jobs", "jobs"),
            ("career", "career"),
            ("progress", "progress"),
            ("schedule", "schedule"),
            ("parent", "parent"),
        ];
        const PAGE_FLOW: &[(&str, &str)] = &[
            ("/", "dashboard"),
            ("/dashboard", "lessons"),
            ("/lessons", "quiz"),
            ("/quiz", "progress"),
            ("/skills", "jobs"),
            ("/jobs", "career"),
        ];

        if let Some(goal) = goal {
            let goal = goal.to_lowercase();
            for (needle, key) in GOAL_SUGGESTIONS {
                if goal.contains(needle) {
                    return self.get(key);
                }
            }
        }

        let key = PAGE_FLOW
            .iter()
            .find(|(path, _)| *path == current_path)
            .map(|(_, key)| *key)
            .unwrap_or("dashboard");
        self.get(key)
    }
}
