//! The discovery contract: what a caller hands the generator.

use ghgen_codeowners::CodeOwners;
use ghgen_emit::{EmitOptions, Result, paths};
use ghgen_schema::{Dependabot, Form, IssueTemplateConfig, PullRequestTemplate, Workflow};
use std::fmt;

/// Artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `.github/workflows/<name>.yml`
    Workflow,
    /// `.github/dependabot.yml`
    Dependabot,
    /// `.github/ISSUE_TEMPLATE/<name>.yml`
    IssueTemplate,
    /// `.github/ISSUE_TEMPLATE/config.yml`
    IssueTemplateConfig,
    /// `.github/DISCUSSION_TEMPLATE/<name>.yml`
    DiscussionTemplate,
    /// `.github/PULL_REQUEST_TEMPLATE.md` or `.github/PULL_REQUEST_TEMPLATE/<name>.md`
    PrTemplate,
    /// `.github/CODEOWNERS`
    CodeOwners,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workflow => write!(f, "workflow"),
            Self::Dependabot => write!(f, "dependabot"),
            Self::IssueTemplate => write!(f, "issue-template"),
            Self::IssueTemplateConfig => write!(f, "issue-template-config"),
            Self::DiscussionTemplate => write!(f, "discussion-template"),
            Self::PrTemplate => write!(f, "pr-template"),
            Self::CodeOwners => write!(f, "codeowners"),
        }
    }
}

/// A declared model value.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    /// A workflow
    Workflow(Workflow),
    /// The Dependabot configuration
    Dependabot(Dependabot),
    /// An issue form
    IssueTemplate(Form),
    /// The issue template chooser
    IssueTemplateConfig(IssueTemplateConfig),
    /// A discussion category form
    DiscussionTemplate(Form),
    /// A pull request template
    PrTemplate(PullRequestTemplate),
    /// The CODEOWNERS rule set
    CodeOwners(CodeOwners),
}

/// A `(kind, name, value)` triple. `name` is stable across runs and picks
/// the output file for kinds that have more than one.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Stable identifier
    pub name: String,
    /// The value to render
    pub model: Model,
}

impl Declaration {
    /// Declare a workflow.
    pub fn workflow(name: impl Into<String>, workflow: Workflow) -> Self {
        Self::new(name, Model::Workflow(workflow))
    }

    /// Declare the Dependabot configuration.
    #[must_use]
    pub fn dependabot(config: Dependabot) -> Self {
        Self::new("dependabot", Model::Dependabot(config))
    }

    /// Declare an issue form.
    pub fn issue_template(name: impl Into<String>, form: Form) -> Self {
        Self::new(name, Model::IssueTemplate(form))
    }

    /// Declare the issue template chooser.
    #[must_use]
    pub fn issue_template_config(config: IssueTemplateConfig) -> Self {
        Self::new("config", Model::IssueTemplateConfig(config))
    }

    /// Declare a discussion category form.
    pub fn discussion_template(name: impl Into<String>, form: Form) -> Self {
        Self::new(name, Model::DiscussionTemplate(form))
    }

    /// Declare a pull request template under its own name.
    #[must_use]
    pub fn pr_template(template: PullRequestTemplate) -> Self {
        let name = template.name.clone();
        Self::new(name, Model::PrTemplate(template))
    }

    /// Declare the CODEOWNERS file.
    #[must_use]
    pub fn codeowners(codeowners: CodeOwners) -> Self {
        Self::new("codeowners", Model::CodeOwners(codeowners))
    }

    fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            model,
        }
    }

    /// The artifact kind.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match &self.model {
            Model::Workflow(_) => Kind::Workflow,
            Model::Dependabot(_) => Kind::Dependabot,
            Model::IssueTemplate(_) => Kind::IssueTemplate,
            Model::IssueTemplateConfig(_) => Kind::IssueTemplateConfig,
            Model::DiscussionTemplate(_) => Kind::DiscussionTemplate,
            Model::PrTemplate(_) => Kind::PrTemplate,
            Model::CodeOwners(_) => Kind::CodeOwners,
        }
    }

    /// Output path relative to the repository root.
    ///
    /// # Errors
    ///
    /// `IncompleteRequired` when the name leaves nothing to build a file
    /// name from.
    pub fn path(&self) -> Result<String> {
        match self.kind() {
            Kind::Workflow => paths::workflow_path(&self.name),
            Kind::Dependabot => Ok(paths::DEPENDABOT_PATH.to_string()),
            Kind::IssueTemplate => paths::issue_form_path(&self.name),
            Kind::IssueTemplateConfig => Ok(paths::ISSUE_TEMPLATE_CONFIG_PATH.to_string()),
            Kind::DiscussionTemplate => paths::discussion_form_path(&self.name),
            Kind::PrTemplate => paths::pr_template_path(&self.name),
            Kind::CodeOwners => Ok(paths::CODEOWNERS_PATH.to_string()),
        }
    }

    /// File content.
    ///
    /// `codeowners_header` replaces the CODEOWNERS header when the rule set
    /// still carries the built-in one.
    ///
    /// # Errors
    ///
    /// Whatever the serializer rejects in the model.
    pub fn content(&self, options: &EmitOptions, codeowners_header: &str) -> Result<String> {
        match &self.model {
            Model::Workflow(w) => ghgen_emit::emit_workflow(w, options),
            Model::Dependabot(d) => ghgen_emit::emit_dependabot(d, options),
            Model::IssueTemplate(f) => ghgen_emit::emit_issue_form(f, options),
            Model::IssueTemplateConfig(c) => ghgen_emit::emit_issue_template_config(c, options),
            Model::DiscussionTemplate(f) => ghgen_emit::emit_discussion_form(f, options),
            Model::PrTemplate(t) => Ok(ghgen_emit::emit_pr_template(t)),
            Model::CodeOwners(c) if c.header == ghgen_codeowners::DEFAULT_HEADER => {
                let mut c = c.clone();
                c.header = codeowners_header.to_string();
                ghgen_emit::emit_codeowners(&c)
            }
            Model::CodeOwners(c) => ghgen_emit::emit_codeowners(c),
        }
    }
}
