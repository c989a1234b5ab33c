use serde::{Deserialize, Serialize};

/// Change-kind tag assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Feature,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
    Performance,
    Ci,
    Revert,
    Security,
    Config,
    Deploy,
    Hotfix,
    Breaking,
    Deps,
    Wip,
    Init,
    Release,
    Merge,
    Critical,
    Improvement,
    Update,
}

impl UpdateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Feature => "feature",
            UpdateType::Fix => "fix",
            UpdateType::Docs => "docs",
            UpdateType::Style => "style",
            UpdateType::Refactor => "refactor",
            UpdateType::Test => "test",
            UpdateType::Chore => "chore",
            UpdateType::Performance => "performance",
            UpdateType::Ci => "ci",
            UpdateType::Revert => "revert",
            UpdateType::Security => "security",
            UpdateType::Config => "config",
            UpdateType::Deploy => "deploy",
            UpdateType::Hotfix => "hotfix",
            UpdateType::Breaking => "breaking",
            UpdateType::Deps => "deps",
            UpdateType::Wip => "wip",
            UpdateType::Init => "init",
            UpdateType::Release => "release",
            UpdateType::Merge => "merge",
            UpdateType::Critical => "critical",
            UpdateType::Improvement => "improvement",
            UpdateType::Update => "update",
        }
    }
}

impl std::str::FromStr for UpdateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "feature" => Ok(UpdateType::Feature),
            "fix" => Ok(UpdateType::Fix),
            "docs" => Ok(UpdateType::Docs),
            "style" => Ok(UpdateType::Style),
            "refactor" => Ok(UpdateType::Refactor),
            "test" => Ok(UpdateType::Test),
            "chore" => Ok(UpdateType::Chore),
            "performance" => Ok(UpdateType::Performance),
            "ci" => Ok(UpdateType::Ci),
            "revert" => Ok(UpdateType::Revert),
            "security" => Ok(UpdateType::Security),
            "config" => Ok(UpdateType::Config),
            "deploy" => Ok(UpdateType::Deploy),
            "hotfix" => Ok(UpdateType::Hotfix),
            "breaking" => Ok(UpdateType::Breaking),
            "deps" => Ok(UpdateType::Deps),
            "wip" => Ok(UpdateType::Wip),
            "init" => Ok(UpdateType::Init),
            "release" => Ok(UpdateType::Release),
            "merge" => Ok(UpdateType::Merge),
            "critical" => Ok(UpdateType::Critical),
            "improvement" => Ok(UpdateType::Improvement),
            "update" => Ok(UpdateType::Update),
            other => Err(format!("unknown update type: {}", other)),
        }
    }
}

/// A commit enriched with derived classification fields.
///
/// Always generated fresh from a `CommitRecord`; immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub short_hash: String,
    pub timestamp_seconds: i64,
    pub author_handle: String,
    pub source_tag: String,
    pub kind: UpdateType,
    pub category: String,
    pub date_iso: String,
    pub time_hhmm: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListResponse {
    pub updates: Vec<Update>,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatus {
    pub sources: Vec<String>,
    pub cached_entries: usize,
    pub recent_window: usize,
}
