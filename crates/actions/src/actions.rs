//! Actions published by GitHub under the `actions/` organization.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `actions/checkout@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checkout {
    /// Repository to check out (`owner/repo`)
    pub repository: String,
    /// Branch, tag or SHA
    pub git_ref: String,
    /// Token used to fetch
    pub token: Text,
    /// SSH key used to fetch
    pub ssh_key: Text,
    /// Relative path to check out into
    pub path: String,
    /// Commits to fetch; `Some(0)` fetches all history
    pub fetch_depth: Option<u32>,
    /// Fetch tags even when `fetch-depth` is set
    pub fetch_tags: bool,
    /// Download Git LFS files
    pub lfs: bool,
    /// `true` or `recursive`
    pub submodules: String,
    /// Keep the token in the local git config (action default: `true`)
    pub persist_credentials: Option<bool>,
    /// Run `git clean` before fetching (action default: `true`)
    pub clean: Option<bool>,
    /// Sparse checkout patterns
    pub sparse_checkout: Vec<String>,
}

impl Checkout {
    /// Checkout with full history
    #[must_use]
    pub fn full_history() -> Self {
        Self {
            fetch_depth: Some(0),
            ..Default::default()
        }
    }
}

impl Action for Checkout {
    fn reference(&self) -> String {
        "actions/checkout@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("repository", &self.repository)
            .str("ref", &self.git_ref)
            .text("token", &self.token)
            .text("ssh-key", &self.ssh_key)
            .str("path", &self.path)
            .opt_int("fetch-depth", self.fetch_depth.map(i64::from))
            .flag("fetch-tags", self.fetch_tags)
            .flag("lfs", self.lfs)
            .str("submodules", &self.submodules)
            .opt_flag("persist-credentials", self.persist_credentials)
            .opt_flag("clean", self.clean)
            .lines("sparse-checkout", &self.sparse_checkout)
            .build()
    }
}

/// `actions/setup-go@v5`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupGo {
    /// Go version or range
    pub go_version: String,
    /// Read the version from `go.mod` or `.go-version`
    pub go_version_file: String,
    /// Always check for the latest matching version
    pub check_latest: bool,
    /// Cache modules and build outputs (action default: `true`)
    pub cache: Option<bool>,
    /// Files whose hash keys the cache
    pub cache_dependency_path: Vec<String>,
    /// Target architecture
    pub architecture: String,
}

impl Action for SetupGo {
    fn reference(&self) -> String {
        "actions/setup-go@v5".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("go-version", &self.go_version)
            .str("go-version-file", &self.go_version_file)
            .flag("check-latest", self.check_latest)
            .opt_flag("cache", self.cache)
            .lines("cache-dependency-path", &self.cache_dependency_path)
            .str("architecture", &self.architecture)
            .build()
    }
}

/// `actions/setup-node@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupNode {
    /// Node.js version or range
    pub node_version: String,
    /// Read the version from `.nvmrc`, `.node-version` or `package.json`
    pub node_version_file: String,
    /// Target architecture
    pub architecture: String,
    /// Always check for the latest matching version
    pub check_latest: bool,
    /// Registry to set up for auth
    pub registry_url: String,
    /// Scope for scoped registries
    pub scope: String,
    /// Package manager to cache for (`npm`, `yarn`, `pnpm`)
    pub cache: String,
    /// Lock files whose hash keys the cache
    pub cache_dependency_path: Vec<String>,
}

impl Action for SetupNode {
    fn reference(&self) -> String {
        "actions/setup-node@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("node-version", &self.node_version)
            .str("node-version-file", &self.node_version_file)
            .str("architecture", &self.architecture)
            .flag("check-latest", self.check_latest)
            .str("registry-url", &self.registry_url)
            .str("scope", &self.scope)
            .str("cache", &self.cache)
            .lines("cache-dependency-path", &self.cache_dependency_path)
            .build()
    }
}

/// `actions/setup-python@v5`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupPython {
    /// Python version or range
    pub python_version: String,
    /// Read the version from a file
    pub python_version_file: String,
    /// Package manager to cache for (`pip`, `pipenv`, `poetry`)
    pub cache: String,
    /// Target architecture
    pub architecture: String,
    /// Always check for the latest matching version
    pub check_latest: bool,
    /// Files whose hash keys the cache
    pub cache_dependency_path: Vec<String>,
    /// Allow pre-release versions
    pub allow_prereleases: bool,
}

impl Action for SetupPython {
    fn reference(&self) -> String {
        "actions/setup-python@v5".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("python-version", &self.python_version)
            .str("python-version-file", &self.python_version_file)
            .str("cache", &self.cache)
            .str("architecture", &self.architecture)
            .flag("check-latest", self.check_latest)
            .lines("cache-dependency-path", &self.cache_dependency_path)
            .flag("allow-prereleases", self.allow_prereleases)
            .build()
    }
}

/// `actions/setup-java@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupJava {
    /// JDK distribution (`temurin`, `zulu`, ...)
    pub distribution: String,
    /// Java version
    pub java_version: String,
    /// Read the version from a file
    pub java_version_file: String,
    /// `jdk`, `jre`, `jdk+fx`, `jre+fx`
    pub java_package: String,
    /// Target architecture
    pub architecture: String,
    /// Always check for the latest matching version
    pub check_latest: bool,
    /// Build tool to cache for (`maven`, `gradle`, `sbt`)
    pub cache: String,
    /// Files whose hash keys the cache
    pub cache_dependency_path: Vec<String>,
    /// Maven `settings.xml` server id
    pub server_id: String,
    /// Env var holding the server username
    pub server_username: String,
    /// Env var holding the server password
    pub server_password: String,
    /// GPG private key to import
    pub gpg_private_key: Text,
}

impl Action for SetupJava {
    fn reference(&self) -> String {
        "actions/setup-java@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("distribution", &self.distribution)
            .str("java-version", &self.java_version)
            .str("java-version-file", &self.java_version_file)
            .str("java-package", &self.java_package)
            .str("architecture", &self.architecture)
            .flag("check-latest", self.check_latest)
            .str("cache", &self.cache)
            .lines("cache-dependency-path", &self.cache_dependency_path)
            .str("server-id", &self.server_id)
            .str("server-username", &self.server_username)
            .str("server-password", &self.server_password)
            .text("gpg-private-key", &self.gpg_private_key)
            .build()
    }
}

/// `actions/setup-dotnet@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupDotnet {
    /// SDK versions to install
    pub dotnet_version: Vec<String>,
    /// `daily`, `signed`, `validated`, `preview`, `ga`
    pub dotnet_quality: String,
    /// Path to `global.json`
    pub global_json_file: String,
    /// NuGet source to set up
    pub source_url: String,
    /// Cache NuGet packages
    pub cache: bool,
    /// Lock files whose hash keys the cache
    pub cache_dependency_path: Vec<String>,
}

impl Action for SetupDotnet {
    fn reference(&self) -> String {
        "actions/setup-dotnet@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .lines("dotnet-version", &self.dotnet_version)
            .str("dotnet-quality", &self.dotnet_quality)
            .str("global-json-file", &self.global_json_file)
            .str("source-url", &self.source_url)
            .flag("cache", self.cache)
            .lines("cache-dependency-path", &self.cache_dependency_path)
            .build()
    }
}

/// `actions/cache@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cache {
    /// Files and directories to cache
    pub path: Vec<String>,
    /// Primary cache key
    pub key: Text,
    /// Fallback key prefixes, most specific first
    pub restore_keys: Vec<String>,
    /// Allow restoring caches saved on another OS
    pub enable_cross_os_archive: bool,
    /// Fail the job when no cache is found
    pub fail_on_cache_miss: bool,
    /// Check for a hit without downloading
    pub lookup_only: bool,
}

impl Cache {
    /// Cache paths under a key
    pub fn new<S: Into<String>>(key: impl Into<Text>, path: impl IntoIterator<Item = S>) -> Self {
        Self {
            key: key.into(),
            path: path.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Add fallback key prefixes
    #[must_use]
    pub fn restore_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.restore_keys.extend(keys.into_iter().map(Into::into));
        self
    }
}

impl Action for Cache {
    fn reference(&self) -> String {
        "actions/cache@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .lines("path", &self.path)
            .text("key", &self.key)
            .lines("restore-keys", &self.restore_keys)
            .flag("enableCrossOsArchive", self.enable_cross_os_archive)
            .flag("fail-on-cache-miss", self.fail_on_cache_miss)
            .flag("lookup-only", self.lookup_only)
            .build()
    }
}

/// `actions/cache/restore@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheRestore {
    /// Files and directories to restore
    pub path: Vec<String>,
    /// Primary cache key
    pub key: Text,
    /// Fallback key prefixes
    pub restore_keys: Vec<String>,
    /// Allow restoring caches saved on another OS
    pub enable_cross_os_archive: bool,
    /// Fail the job when no cache is found
    pub fail_on_cache_miss: bool,
    /// Check for a hit without downloading
    pub lookup_only: bool,
}

impl Action for CacheRestore {
    fn reference(&self) -> String {
        "actions/cache/restore@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .lines("path", &self.path)
            .text("key", &self.key)
            .lines("restore-keys", &self.restore_keys)
            .flag("enableCrossOsArchive", self.enable_cross_os_archive)
            .flag("fail-on-cache-miss", self.fail_on_cache_miss)
            .flag("lookup-only", self.lookup_only)
            .build()
    }
}

/// `actions/cache/save@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheSave {
    /// Files and directories to save
    pub path: Vec<String>,
    /// Cache key
    pub key: Text,
    /// Upload chunk size in bytes
    pub upload_chunk_size: u32,
    /// Allow restoring on another OS
    pub enable_cross_os_archive: bool,
}

impl Action for CacheSave {
    fn reference(&self) -> String {
        "actions/cache/save@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .lines("path", &self.path)
            .text("key", &self.key)
            .uint("upload-chunk-size", self.upload_chunk_size)
            .flag("enableCrossOsArchive", self.enable_cross_os_archive)
            .build()
    }
}

/// `actions/upload-artifact@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadArtifact {
    /// Artifact name
    pub name: String,
    /// Files to upload
    pub path: Vec<String>,
    /// `warn`, `error` or `ignore`
    pub if_no_files_found: String,
    /// Days to keep the artifact
    pub retention_days: u32,
    /// Zlib level; `Some(0)` disables compression
    pub compression_level: Option<u32>,
    /// Replace an artifact of the same name
    pub overwrite: bool,
    /// Upload hidden files
    pub include_hidden_files: bool,
}

impl UploadArtifact {
    /// Upload paths under a name
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        path: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Action for UploadArtifact {
    fn reference(&self) -> String {
        "actions/upload-artifact@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("name", &self.name)
            .lines("path", &self.path)
            .str("if-no-files-found", &self.if_no_files_found)
            .uint("retention-days", self.retention_days)
            .opt_int("compression-level", self.compression_level.map(i64::from))
            .flag("overwrite", self.overwrite)
            .flag("include-hidden-files", self.include_hidden_files)
            .build()
    }
}

/// `actions/download-artifact@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadArtifact {
    /// Artifact name; empty downloads every artifact
    pub name: String,
    /// Destination path
    pub path: String,
    /// Glob over artifact names
    pub pattern: String,
    /// Extract every matching artifact into the same directory
    pub merge_multiple: bool,
    /// Token for downloads from other runs
    pub github_token: Text,
    /// Repository to download from
    pub repository: String,
    /// Run to download from
    pub run_id: Text,
}

impl Action for DownloadArtifact {
    fn reference(&self) -> String {
        "actions/download-artifact@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("name", &self.name)
            .str("path", &self.path)
            .str("pattern", &self.pattern)
            .flag("merge-multiple", self.merge_multiple)
            .text("github-token", &self.github_token)
            .str("repository", &self.repository)
            .text("run-id", &self.run_id)
            .build()
    }
}

/// `actions/github-script@v7`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GithubScript {
    /// JavaScript body
    pub script: String,
    /// Token for the Octokit client
    pub github_token: Text,
    /// Enable debug logging
    pub debug: bool,
    /// `json` or `string`
    pub result_encoding: String,
    /// Retries for failed requests
    pub retries: u32,
}

impl GithubScript {
    /// Run a script
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }
}

impl Action for GithubScript {
    fn reference(&self) -> String {
        "actions/github-script@v7".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("script", &self.script)
            .text("github-token", &self.github_token)
            .flag("debug", self.debug)
            .str("result-encoding", &self.result_encoding)
            .uint("retries", self.retries)
            .build()
    }
}

/// `actions/create-github-app-token@v1`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateGithubAppToken {
    /// App id
    pub app_id: Text,
    /// App private key
    pub private_key: Text,
    /// Installation owner
    pub owner: String,
    /// Repositories the token is scoped to
    pub repositories: Vec<String>,
    /// Keep the token valid after the job
    pub skip_token_revoke: bool,
}

impl Action for CreateGithubAppToken {
    fn reference(&self) -> String {
        "actions/create-github-app-token@v1".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .text("app-id", &self.app_id)
            .text("private-key", &self.private_key)
            .str("owner", &self.owner)
            .csv("repositories", &self.repositories)
            .flag("skip-token-revoke", self.skip_token_revoke)
            .build()
    }
}

/// `actions/configure-pages@v5`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurePages {
    /// Static site generator to configure
    pub static_site_generator: String,
    /// Generator config file
    pub generator_config_file: String,
    /// Enable Pages for the repository
    pub enablement: bool,
    /// Token for enablement
    pub token: Text,
}

impl Action for ConfigurePages {
    fn reference(&self) -> String {
        "actions/configure-pages@v5".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("static_site_generator", &self.static_site_generator)
            .str("generator_config_file", &self.generator_config_file)
            .flag("enablement", self.enablement)
            .text("token", &self.token)
            .build()
    }
}

/// `actions/upload-pages-artifact@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadPagesArtifact {
    /// Artifact name
    pub name: String,
    /// Directory holding the site
    pub path: String,
    /// Days to keep the artifact
    pub retention_days: u32,
}

impl Action for UploadPagesArtifact {
    fn reference(&self) -> String {
        "actions/upload-pages-artifact@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("name", &self.name)
            .str("path", &self.path)
            .uint("retention-days", self.retention_days)
            .build()
    }
}

/// `actions/deploy-pages@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployPages {
    /// Token used to deploy
    pub token: Text,
    /// Deployment timeout in milliseconds
    pub timeout: u32,
    /// Artifact to deploy
    pub artifact_name: String,
    /// Deploy as a preview
    pub preview: bool,
}

impl Action for DeployPages {
    fn reference(&self) -> String {
        "actions/deploy-pages@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .text("token", &self.token)
            .uint("timeout", self.timeout)
            .str("artifact_name", &self.artifact_name)
            .flag("preview", self.preview)
            .build()
    }
}

/// `actions/labeler@v5`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Labeler {
    /// Token used to apply labels
    pub repo_token: Text,
    /// Labeler config path
    pub configuration_path: String,
    /// Remove labels whose patterns no longer match
    pub sync_labels: bool,
    /// Let globs match dotfiles (action default: `true`)
    pub dot: Option<bool>,
}

impl Action for Labeler {
    fn reference(&self) -> String {
        "actions/labeler@v5".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .text("repo-token", &self.repo_token)
            .str("configuration-path", &self.configuration_path)
            .flag("sync-labels", self.sync_labels)
            .opt_flag("dot", self.dot)
            .build()
    }
}

/// `actions/stale@v9`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stale {
    /// Token used to label and close
    pub repo_token: Text,
    /// Idle days before marking stale; `Some(-1)` never marks
    pub days_before_stale: Option<i64>,
    /// Days after marking before closing; `Some(-1)` never closes
    pub days_before_close: Option<i64>,
    /// Comment on stale issues
    pub stale_issue_message: String,
    /// Comment on stale pull requests
    pub stale_pr_message: String,
    /// Comment when closing issues
    pub close_issue_message: String,
    /// Comment when closing pull requests
    pub close_pr_message: String,
    /// Label for stale issues
    pub stale_issue_label: String,
    /// Label for stale pull requests
    pub stale_pr_label: String,
    /// Issue labels that are never marked
    pub exempt_issue_labels: Vec<String>,
    /// Pull request labels that are never marked
    pub exempt_pr_labels: Vec<String>,
    /// API operation budget per run
    pub operations_per_run: u32,
}

impl Action for Stale {
    fn reference(&self) -> String {
        "actions/stale@v9".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .text("repo-token", &self.repo_token)
            .opt_int("days-before-stale", self.days_before_stale)
            .opt_int("days-before-close", self.days_before_close)
            .str("stale-issue-message", &self.stale_issue_message)
            .str("stale-pr-message", &self.stale_pr_message)
            .str("close-issue-message", &self.close_issue_message)
            .str("close-pr-message", &self.close_pr_message)
            .str("stale-issue-label", &self.stale_issue_label)
            .str("stale-pr-label", &self.stale_pr_label)
            .csv("exempt-issue-labels", &self.exempt_issue_labels)
            .csv("exempt-pr-labels", &self.exempt_pr_labels)
            .uint("operations-per-run", self.operations_per_run)
            .build()
    }
}

/// `actions/dependency-review-action@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyReview {
    /// `low`, `moderate`, `high`, `critical`
    pub fail_on_severity: String,
    /// Scopes that fail the check
    pub fail_on_scopes: Vec<String>,
    /// Only these licenses are allowed
    pub allow_licenses: Vec<String>,
    /// These licenses are rejected
    pub deny_licenses: Vec<String>,
    /// `always`, `on-failure`, `never`
    pub comment_summary_in_pr: String,
    /// External config file
    pub config_file: String,
}

impl Action for DependencyReview {
    fn reference(&self) -> String {
        "actions/dependency-review-action@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("fail-on-severity", &self.fail_on_severity)
            .csv("fail-on-scopes", &self.fail_on_scopes)
            .csv("allow-licenses", &self.allow_licenses)
            .csv("deny-licenses", &self.deny_licenses)
            .str("comment-summary-in-pr", &self.comment_summary_in_pr)
            .str("config-file", &self.config_file)
            .build()
    }
}

step_entry!(
    Checkout,
    SetupGo,
    SetupNode,
    SetupPython,
    SetupJava,
    SetupDotnet,
    Cache,
    CacheRestore,
    CacheSave,
    UploadArtifact,
    DownloadArtifact,
    GithubScript,
    CreateGithubAppToken,
    ConfigurePages,
    UploadPagesArtifact,
    DeployPages,
    Labeler,
    Stale,
    DependencyReview,
);

#[cfg(test)]
mod tests {
    use super::*;
    use ghgen_schema::expr::{context::runner, format, hash_files};

    #[test]
    fn test_checkout_full_history() {
        let inputs = Checkout::full_history().inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs["fetch-depth"], Value::Int(0));
    }

    #[test]
    fn test_checkout_persist_credentials_off() {
        let checkout = Checkout {
            persist_credentials: Some(false),
            ..Default::default()
        };
        assert_eq!(checkout.inputs()["persist-credentials"], Value::Bool(false));
    }

    #[test]
    fn test_cache_key_expression() {
        let cache = Cache::new(
            format(
                "{0}-cargo-{1}",
                [runner::os(), hash_files(["**/Cargo.lock"])],
            ),
            ["~/.cargo/registry", "target"],
        )
        .restore_keys(["linux-cargo-"]);

        let inputs = cache.inputs();
        assert_eq!(inputs["path"], Value::from("~/.cargo/registry\ntarget"));
        assert!(matches!(inputs["key"], Value::Expr(_)));
        assert_eq!(inputs["restore-keys"], Value::from("linux-cargo-"));
    }

    #[test]
    fn test_upload_artifact() {
        let upload = UploadArtifact {
            retention_days: 5,
            ..UploadArtifact::new("dist", ["dist/"])
        };
        let inputs = upload.inputs();
        assert_eq!(inputs["name"], Value::from("dist"));
        assert_eq!(inputs["retention-days"], Value::Int(5));
        assert!(!inputs.contains_key("overwrite"));
    }

    #[test]
    fn test_stale_never_close() {
        let stale = Stale {
            days_before_close: Some(-1),
            ..Default::default()
        };
        assert_eq!(stale.inputs()["days-before-close"], Value::Int(-1));
    }
}
