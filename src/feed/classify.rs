//! Heuristic commit-message classifier.
//!
//! Maps a free-text commit message to a (type, category) pair using ordered
//! rule tables. Matching is best-effort pattern matching over lower-cased
//! text; many messages hit several keyword buckets, so table order is part
//! of the contract: first match wins, always.
//!
//! Classification is pure and total: an unmatched message resolves to
//! `update` / `General`, never an error.

use crate::models::UpdateType;

/// Result of classifying one raw message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: UpdateType,
    pub category: &'static str,
}

pub const GENERAL: &str = "General";

/// Conventional-commit prefix vocabulary, checked before any heuristics.
const PREFIX_TYPES: &[(&str, UpdateType)] = &[
    ("feat", UpdateType::Feature),
    ("fix", UpdateType::Fix),
    ("docs", UpdateType::Docs),
    ("style", UpdateType::Style),
    ("refactor", UpdateType::Refactor),
    ("test", UpdateType::Test),
    ("chore", UpdateType::Chore),
    ("perf", UpdateType::Performance),
    ("ci", UpdateType::Ci),
    ("build", UpdateType::Ci),
    ("revert", UpdateType::Revert),
    ("security", UpdateType::Security),
    ("config", UpdateType::Config),
    ("deploy", UpdateType::Deploy),
    ("hotfix", UpdateType::Hotfix),
    ("patch", UpdateType::Hotfix),
    ("breaking", UpdateType::Breaking),
    ("deps", UpdateType::Deps),
    ("wip", UpdateType::Wip),
    ("init", UpdateType::Init),
    ("release", UpdateType::Release),
    ("merge", UpdateType::Merge),
    ("crit", UpdateType::Critical),
];

/// Leading-verb groups, matched against the first one or two words.
const VERB_TYPES: &[(&[&str], UpdateType)] = &[
    (&["add", "implement", "create", "build", "introduce"], UpdateType::Feature),
    (&["fix", "resolve", "correct", "repair", "patch"], UpdateType::Fix),
    (&["improve", "enhance", "upgrade", "refine"], UpdateType::Improvement),
    (&["optimize"], UpdateType::Performance),
    (
        &["refactor", "restructure", "reorganize", "cleanup", "simplify", "remove", "delete", "drop"],
        UpdateType::Refactor,
    ),
    (&["update", "modify", "change", "adjust", "revise"], UpdateType::Update),
    (&["merge", "merge pull", "merge branch"], UpdateType::Merge),
    (&["document", "readme"], UpdateType::Docs),
    (&["configure", "setup", "set", "install"], UpdateType::Config),
    (&["initial", "initialize", "init", "bootstrap", "scaffolding"], UpdateType::Init),
];

/// Full-message keyword fallback for the type pass.
const KEYWORD_TYPES: &[(&[&str], UpdateType)] = &[
    (&["security", "vulnerability", "permission", "auth"], UpdateType::Security),
    (&["test", "spec", "unit test"], UpdateType::Test),
    (&["style", "css", "design", "ui", "layout"], UpdateType::Style),
    (&["performance", "optimize", "speed", "efficiency"], UpdateType::Performance),
    (&["deploy", "ci/cd", "build", "pipeline", "workflow"], UpdateType::Ci),
    (&["dependency", "package", "deps", "npm", "yarn", "upgrade"], UpdateType::Deps),
    (&["breaking", "major", "incompatible"], UpdateType::Breaking),
    (&["hotfix", "critical", "urgent", "emergency"], UpdateType::Hotfix),
    (&["wip", "work in progress", "partial", "incomplete"], UpdateType::Wip),
    (&["revert", "rollback", "undo"], UpdateType::Revert),
    (&["enhance", "improve", "better", "modernize", "revamp"], UpdateType::Improvement),
];

/// Ordered category buckets, scanned over the full lower-cased message.
/// Order resolves ambiguity: "auth database migration" lands in DevOps or
/// Database before Authentication only if an earlier bucket matches first.
const CATEGORY_BUCKETS: &[(&[&str], &str)] = &[
    (&["deploy", "docker", "ci/cd", "pipeline", "kubernetes", "workflow", "infrastructure"], "DevOps"),
    (&["database", "migration", "schema", "sql", "postgres", "query"], "Database"),
    (&["auth", "login", "logout", "password", "session", "token", "permission"], "Authentication"),
    (&["admin", "dashboard", "moderation"], "Admin Panel"),
    (
        &["course", "lesson", "quiz", "curriculum", "assignment", "grading", "enrollment", "student", "instructor"],
        "Learning Platform",
    ),
    (&["badge", "achievement", "leaderboard", "streak", "xp", "points", "reward"], "Gamification"),
    (&["component", "button", "modal", "dropdown", "card", "widget", "form"], "UI Components"),
    (&["style", "css", "theme", "design", "color", "font", "responsive", "layout"], "Design & Styling"),
    (&["navigation", "navbar", "menu", "routing", "route", "sidebar", "breadcrumb"], "Navigation"),
    (&["search", "filter", "sorting", "pagination"], "Search & Filtering"),
    (&["ux", "user experience", "usability", "accessibility", "a11y", "loading state"], "User Experience"),
    (&["api", "endpoint", "rest", "graphql", "backend", "server"], "Backend API"),
    (&["readme", "documentation", "docs", "changelog", "guide", "comment"], "Documentation"),
    (&["refactor", "cleanup", "clean up", "lint", "dead code", "simplify"], "Code Quality"),
    (&["test", "spec", "coverage", "e2e", "unit test", "qa"], "Quality Assurance"),
    (&["merge", "branch", "rebase", "conflict", "cherry-pick", "gitignore"], "Version Control"),
    (&["integration", "webhook", "third-party", "stripe", "payment", "sdk"], "Integrations"),
    (&["config", "configuration", "environment", "env var", "settings", "setup"], "Configuration"),
    (&["error", "exception", "crash", "logging", "retry", "fallback"], "Error Handling"),
    (&["privacy", "gdpr", "terms", "cookie", "consent", "license", "legal"], "Legal & Privacy"),
    (&["performance", "optimize", "speed", "cache", "lazy load", "memory"], "Performance"),
];

/// Sub-mapper for `feat:` messages. Feature work is routed by the domain it
/// touches before falling back to the shared buckets.
const FEAT_BUCKETS: &[(&[&str], &str)] = &[
    (&["admin", "dashboard"], "Admin Panel"),
    (&["auth", "login", "signup", "password"], "Authentication"),
    (&["course", "lesson", "quiz", "curriculum", "enrollment"], "Learning Platform"),
    (&["badge", "achievement", "leaderboard", "xp", "streak"], "Gamification"),
    (&["search", "filter", "sorting"], "Search & Filtering"),
    (&["component", "button", "modal", "widget", "form"], "UI Components"),
    (&["api", "endpoint", "backend"], "Backend API"),
    (&["deploy", "docker", "pipeline", "ci/cd"], "DevOps"),
    (&["database", "migration", "schema"], "Database"),
];

/// Sub-mapper for `fix:` messages.
const FIX_BUCKETS: &[(&[&str], &str)] = &[
    (&["deploy", "docker", "pipeline", "ci/cd", "build"], "DevOps"),
    (&["database", "migration", "schema", "sql", "query"], "Database"),
    (&["auth", "login", "session", "token", "permission"], "Authentication"),
    (&["admin", "dashboard"], "Admin Panel"),
    (&["course", "lesson", "quiz", "grading"], "Learning Platform"),
    (&["error", "exception", "crash"], "Error Handling"),
    (&["style", "css", "layout", "responsive"], "Design & Styling"),
    (&["api", "endpoint", "server"], "Backend API"),
];

/// Classify one raw commit message into a (type, category) pair.
pub fn classify(raw_message: &str) -> Classification {
    let lower = raw_message.to_lowercase();
    Classification {
        kind: derive_type(&lower),
        category: derive_category(&lower),
    }
}

/// Extract the conventional prefix (lower-cased, scope and `!` stripped) if
/// the text before the first colon is in the prefix vocabulary.
fn conventional_prefix(lower: &str) -> Option<(&'static str, UpdateType)> {
    let before_colon = lower.split_once(':')?.0.trim();
    let bare = before_colon
        .split_once('(')
        .map(|(head, _)| head)
        .unwrap_or(before_colon)
        .trim_end_matches('!');
    PREFIX_TYPES
        .iter()
        .find(|(prefix, _)| *prefix == bare)
        .copied()
}

fn derive_type(lower: &str) -> UpdateType {
    // 1. Conventional prefix wins outright.
    if let Some((_, kind)) = conventional_prefix(lower) {
        return kind;
    }

    // 2. Leading verb, checked against the first one or two words.
    let mut words = lower.split_whitespace();
    let first = words.next().unwrap_or("");
    let first_two = match words.next() {
        Some(second) => format!("{} {}", first, second),
        None => first.to_string(),
    };
    for (verbs, kind) in VERB_TYPES {
        if verbs.iter().any(|v| *v == first || *v == first_two) {
            return *kind;
        }
    }

    // 3. Keyword scan over the whole message.
    for (keywords, kind) in KEYWORD_TYPES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *kind;
        }
    }

    // 4. Nothing matched.
    UpdateType::Update
}

fn derive_category(lower: &str) -> &'static str {
    match conventional_prefix(lower).map(|(prefix, _)| prefix) {
        Some("feat") => scan_buckets(lower, FEAT_BUCKETS)
            .unwrap_or_else(|| scan_buckets(lower, CATEGORY_BUCKETS).unwrap_or(GENERAL)),
        Some("fix") => scan_buckets(lower, FIX_BUCKETS)
            .unwrap_or_else(|| scan_buckets(lower, CATEGORY_BUCKETS).unwrap_or(GENERAL)),
        Some("chore") => "Maintenance",
        Some("refactor") => "Code Quality",
        Some("docs") => "Documentation",
        Some("test") => "Testing",
        Some("crit") => "Critical",
        _ => scan_buckets(lower, CATEGORY_BUCKETS).unwrap_or(GENERAL),
    }
}

fn scan_buckets(lower: &str, buckets: &[(&[&str], &'static str)]) -> Option<&'static str> {
    buckets
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
}

/// Derive the feed summary: strip a leading `type(scope)?:` prefix if
/// present, trim, and capitalize the first character; otherwise the message
/// passes through unchanged.
pub fn summarize(raw_message: &str) -> String {
    let lower = raw_message.to_lowercase();
    if conventional_prefix(&lower).is_none() {
        return raw_message.to_string();
    }

    let stripped = raw_message
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .unwrap_or(raw_message);

    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_prefix_sets_type_and_routes_category() {
        let c = classify("feat: add admin dashboard filters");
        assert_eq!(c.kind, UpdateType::Feature);
        assert_eq!(c.category, "Admin Panel");
    }

    #[test]
    fn fix_prefix_routes_to_devops() {
        let c = classify("fix: resolve docker deploy pipeline timeout");
        assert_eq!(c.kind, UpdateType::Fix);
        assert_eq!(c.category, "DevOps");
    }

    #[test]
    fn refactor_prefix_maps_to_code_quality() {
        let c = classify("refactor: cleanup unused imports");
        assert_eq!(c.kind, UpdateType::Refactor);
        assert_eq!(c.category, "Code Quality");
    }

    #[test]
    fn unmatched_message_falls_back_to_defaults() {
        let c = classify("bumped some stuff");
        assert_eq!(c.kind, UpdateType::Update);
        assert_eq!(c.category, GENERAL);
    }

    #[test]
    fn scoped_prefix_is_recognized() {
        let c = classify("feat(auth): add login throttling");
        assert_eq!(c.kind, UpdateType::Feature);
        assert_eq!(c.category, "Authentication");
    }

    #[test]
    fn leading_verb_beats_keyword_scan() {
        // "improve" is both a verb-group entry and an improvement keyword;
        // the verb pass must claim it first.
        let c = classify("improve quiz loading speed");
        assert_eq!(c.kind, UpdateType::Improvement);
        assert_eq!(c.category, "Learning Platform");
    }

    #[test]
    fn two_word_merge_phrase_is_detected() {
        let c = classify("merge pull request #42 from acme/feature-branch");
        assert_eq!(c.kind, UpdateType::Merge);
    }

    #[test]
    fn keyword_fallback_orders_security_first() {
        // Matches both "auth" (security) and "test" (test); security is the
        // earlier rule.
        let c = classify("ensure auth tokens expire in tests");
        assert_eq!(c.kind, UpdateType::Security);
    }

    #[test]
    fn category_bucket_order_is_deterministic() {
        // Contains both "auth" and "database" keywords; Database is the
        // earlier bucket.
        let c = classify("fix: auth database migration");
        assert_eq!(c.category, "Database");
    }

    #[test]
    fn chore_prefix_is_maintenance() {
        assert_eq!(classify("chore: bump versions").category, "Maintenance");
        assert_eq!(classify("docs: document api usage").category, "Documentation");
        assert_eq!(classify("test: cover reveal cursor").category, "Testing");
        assert_eq!(classify("crit: patch injection hole").category, "Critical");
    }

    #[test]
    fn summarize_strips_prefix_and_capitalizes() {
        assert_eq!(summarize("feat: add quiz timer"), "Add quiz timer");
        assert_eq!(summarize("fix(auth): expire stale sessions"), "Expire stale sessions");
    }

    #[test]
    fn summarize_passes_unprefixed_messages_through() {
        assert_eq!(summarize("bumped some stuff"), "bumped some stuff");
        // A colon alone is not a conventional prefix.
        assert_eq!(summarize("note: read this"), "note: read this");
    }
}
