//! Releases and automated pull requests.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `softprops/action-gh-release@v2`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GhRelease {
    /// Release body
    pub body: String,
    /// File holding the release body
    pub body_path: String,
    /// Release name
    pub name: String,
    /// Tag; defaults to the pushed tag
    pub tag_name: Text,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
    /// Assets to upload
    pub files: Vec<String>,
    /// Fail when a file pattern matches nothing
    pub fail_on_unmatched_files: bool,
    /// Token used to publish
    pub token: Text,
    /// Commitish the tag is created from
    pub target_commitish: String,
    /// Let GitHub generate release notes
    pub generate_release_notes: bool,
    /// `true`, `false` or `legacy`
    pub make_latest: String,
}

impl Action for GhRelease {
    fn reference(&self) -> String {
        "softprops/action-gh-release@v2".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("body", &self.body)
            .str("body_path", &self.body_path)
            .str("name", &self.name)
            .text("tag_name", &self.tag_name)
            .flag("draft", self.draft)
            .flag("prerelease", self.prerelease)
            .lines("files", &self.files)
            .flag("fail_on_unmatched_files", self.fail_on_unmatched_files)
            .text("token", &self.token)
            .str("target_commitish", &self.target_commitish)
            .flag("generate_release_notes", self.generate_release_notes)
            .str("make_latest", &self.make_latest)
            .build()
    }
}

/// `peter-evans/create-pull-request@v6`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatePullRequest {
    /// Token used to push and open the pull request
    pub token: Text,
    /// Repository checkout path
    pub path: String,
    /// Paths to commit
    pub add_paths: Vec<String>,
    /// Commit message
    pub commit_message: String,
    /// Committer (`Name <email>`)
    pub committer: String,
    /// Author (`Name <email>`)
    pub author: String,
    /// Add a `Signed-off-by` trailer
    pub signoff: bool,
    /// Branch to push to
    pub branch: String,
    /// Delete the branch once merged
    pub delete_branch: bool,
    /// Base branch
    pub base: String,
    /// Pull request title
    pub title: String,
    /// Pull request body
    pub body: String,
    /// Labels
    pub labels: Vec<String>,
    /// Assignees
    pub assignees: Vec<String>,
    /// Reviewers
    pub reviewers: Vec<String>,
    /// Team reviewers
    pub team_reviewers: Vec<String>,
    /// Milestone number
    pub milestone: u32,
    /// Open as draft
    pub draft: bool,
}

impl Action for CreatePullRequest {
    fn reference(&self) -> String {
        "peter-evans/create-pull-request@v6".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .text("token", &self.token)
            .str("path", &self.path)
            .lines("add-paths", &self.add_paths)
            .str("commit-message", &self.commit_message)
            .str("committer", &self.committer)
            .str("author", &self.author)
            .flag("signoff", self.signoff)
            .str("branch", &self.branch)
            .flag("delete-branch", self.delete_branch)
            .str("base", &self.base)
            .str("title", &self.title)
            .str("body", &self.body)
            .lines("labels", &self.labels)
            .lines("assignees", &self.assignees)
            .lines("reviewers", &self.reviewers)
            .lines("team-reviewers", &self.team_reviewers)
            .uint("milestone", self.milestone)
            .flag("draft", self.draft)
            .build()
    }
}

step_entry!(GhRelease, CreatePullRequest);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_files_one_per_line() {
        let release = GhRelease {
            files: vec!["dist/*.tar.gz".into(), "dist/checksums.txt".into()],
            generate_release_notes: true,
            ..Default::default()
        };
        let inputs = release.inputs();
        assert_eq!(
            inputs["files"],
            Value::from("dist/*.tar.gz\ndist/checksums.txt")
        );
        assert_eq!(inputs["generate_release_notes"], Value::Bool(true));
    }

    #[test]
    fn test_pull_request_labels() {
        let pr = CreatePullRequest {
            branch: "bot/update".into(),
            labels: vec!["automated".into()],
            ..Default::default()
        };
        let inputs = pr.inputs();
        assert_eq!(inputs["branch"], Value::from("bot/update"));
        assert_eq!(inputs["labels"], Value::from("automated"));
        assert!(!inputs.contains_key("draft"));
    }
}
