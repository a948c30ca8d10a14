//! Dependabot version-update configuration (`.github/dependabot.yml`).
//!
//! See: <https://docs.github.com/en/code-security/dependabot/dependabot-version-updates/configuration-options-for-the-dependabot.yml-file>

use std::collections::BTreeMap;

/// Root of `dependabot.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependabot {
    /// Configuration format version, always `2`
    pub version: u32,

    /// Allow ecosystems still in beta
    pub enable_beta_ecosystems: bool,

    /// Private registries keyed by logical name
    pub registries: BTreeMap<String, Registry>,

    /// Update definitions, emitted in order
    pub updates: Vec<Update>,
}

impl Default for Dependabot {
    fn default() -> Self {
        Self {
            version: 2,
            enable_beta_ecosystems: false,
            registries: BTreeMap::new(),
            updates: Vec::new(),
        }
    }
}

impl Dependabot {
    /// Version 2 configuration with no updates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an update definition
    #[must_use]
    pub fn update(mut self, update: Update) -> Self {
        self.updates.push(update);
        self
    }

    /// Add a private registry
    #[must_use]
    pub fn registry(mut self, name: impl Into<String>, registry: Registry) -> Self {
        self.registries.insert(name.into(), registry);
        self
    }

    /// Enable beta ecosystems
    #[must_use]
    pub const fn enable_beta_ecosystems(mut self) -> Self {
        self.enable_beta_ecosystems = true;
        self
    }
}

/// A private registry Dependabot may authenticate against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registry {
    /// Registry type (`npm-registry`, `docker-registry`, ...)
    pub registry_type: String,
    /// Registry URL
    pub url: String,
    /// Username
    pub username: String,
    /// Password, usually a `${{secrets.X}}` reference
    pub password: String,
    /// Access key
    pub key: String,
    /// Token
    pub token: String,
    /// Organization (`terraform-registry`, `hex-organization`)
    pub organization: String,
    /// Host (`git`)
    pub host: String,
    /// Use this registry instead of the ecosystem default
    pub replaces_base: bool,
}

impl Registry {
    /// Registry of a type at a URL
    pub fn new(registry_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            registry_type: registry_type.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

/// One `updates` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Update {
    /// Package manager (`cargo`, `npm`, `github-actions`, ...)
    pub package_ecosystem: String,

    /// Manifest directory
    pub directory: String,

    /// Manifest directories (glob patterns allowed)
    pub directories: Vec<String>,

    /// Check schedule
    pub schedule: Schedule,

    /// Dependencies to update
    pub allow: Vec<Allow>,

    /// Dependencies to skip
    pub ignore: Vec<Ignore>,

    /// PR labels
    pub labels: Vec<String>,

    /// PR assignees
    pub assignees: Vec<String>,

    /// PR reviewers
    pub reviewers: Vec<String>,

    /// Milestone number
    pub milestone: u32,

    /// `None` keeps GitHub's default of 5; `Some(0)` disables version updates
    pub open_pull_requests_limit: Option<u32>,

    /// Grouping rules keyed by group name
    pub groups: BTreeMap<String, Group>,

    /// Commit message policy
    pub commit_message: Option<CommitMessage>,

    /// Branch name separator
    pub pull_request_branch_name: Option<BranchName>,

    /// `auto` or `disabled`
    pub rebase_strategy: String,

    /// Branch to open pull requests against
    pub target_branch: String,

    /// Update vendored dependencies
    pub vendor: bool,

    /// `auto`, `increase`, `lockfile-only`, ...
    pub versioning_strategy: String,

    /// Registry names this update may use, or `*`
    pub registries: Vec<String>,

    /// Allow code execution during updates (`allow` or `deny`)
    pub insecure_external_code_execution: String,
}

impl Update {
    /// Update for an ecosystem in a directory on an interval.
    pub fn new(
        ecosystem: impl Into<String>,
        directory: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            package_ecosystem: ecosystem.into(),
            directory: directory.into(),
            schedule: Schedule::every(interval),
            ..Default::default()
        }
    }

    /// Add a label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Add a grouping rule
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, group: Group) -> Self {
        self.groups.insert(name.into(), group);
        self
    }

    /// Add an ignore rule
    #[must_use]
    pub fn ignore(mut self, ignore: Ignore) -> Self {
        self.ignore.push(ignore);
        self
    }

    /// Cap open pull requests
    #[must_use]
    pub const fn open_pull_requests_limit(mut self, limit: u32) -> Self {
        self.open_pull_requests_limit = Some(limit);
        self
    }

    /// Set the commit message policy
    #[must_use]
    pub fn commit_message(mut self, commit_message: CommitMessage) -> Self {
        self.commit_message = Some(commit_message);
        self
    }
}

/// When Dependabot checks for updates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    /// `daily`, `weekly`, `monthly`, ...
    pub interval: String,
    /// Day of week for weekly checks
    pub day: String,
    /// `hh:mm`
    pub time: String,
    /// IANA time zone
    pub timezone: String,
}

impl Schedule {
    /// Schedule on an interval
    pub fn every(interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            ..Default::default()
        }
    }
}

/// An `allow` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allow {
    /// Dependency name pattern
    pub dependency_name: String,
    /// `direct`, `indirect`, `all`, `production`, `development`
    pub dependency_type: String,
}

/// An `ignore` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ignore {
    /// Dependency name pattern
    pub dependency_name: String,
    /// Version ranges to skip
    pub versions: Vec<String>,
    /// `version-update:semver-major`, ...
    pub update_types: Vec<String>,
}

impl Ignore {
    /// Ignore a dependency
    pub fn dependency(name: impl Into<String>) -> Self {
        Self {
            dependency_name: name.into(),
            ..Default::default()
        }
    }
}

/// A grouping rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// `version-updates` or `security-updates`
    pub applies_to: String,
    /// `production` or `development`
    pub dependency_type: String,
    /// Dependency name patterns to include
    pub patterns: Vec<String>,
    /// Dependency name patterns to leave out
    pub exclude_patterns: Vec<String>,
    /// `major`, `minor`, `patch`
    pub update_types: Vec<String>,
}

impl Group {
    /// Group by name patterns
    pub fn patterns<S: Into<String>>(patterns: impl IntoIterator<Item = S>) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Commit message policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitMessage {
    /// Prefix for all commit messages
    pub prefix: String,
    /// Prefix for development dependency updates
    pub prefix_development: String,
    /// `scope` to append the dependency scope
    pub include: String,
}

/// Branch name policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchName {
    /// Separator between branch name parts
    pub separator: String,
}
