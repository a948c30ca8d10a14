//! CODEOWNERS rule sets for GitHub.
//!
//! GitHub applies the **last** matching rule, so rule order is significant
//! and is preserved exactly. Sections are only a presentation aid: a
//! `# Section` comment is written whenever the section changes between
//! two consecutive rules. Rules are never regrouped.
//!
//! # Example
//!
//! ```rust
//! use ghgen_codeowners::{CodeOwners, Rule};
//!
//! let codeowners = CodeOwners::builder()
//!     .rule(Rule::new("*", ["@org/core-team"]))
//!     .rule(Rule::new("*.rs", ["@rust-team"]))
//!     .rule(Rule::new("/docs/**", ["@docs-team"]).section("Documentation"))
//!     .build();
//!
//! let content = codeowners.render();
//! assert!(content.contains("*.rs @rust-team\n"));
//! ```

#![warn(missing_docs)]

/// Header written at the top of every generated CODEOWNERS file.
pub const DEFAULT_HEADER: &str = "Generated by ghgen - do not edit manually";

/// Default path of the file inside a repository.
pub const CODEOWNERS_PATH: &str = ".github/CODEOWNERS";

/// A single code ownership rule.
///
/// # Example
///
/// ```rust
/// use ghgen_codeowners::Rule;
///
/// let rule = Rule::new("*.rs", ["@rust-team", "@backend"])
///     .comment("Rust source files")
///     .section("Backend");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Path pattern, gitignore syntax.
    pub pattern: String,
    /// Owner handles (`@user`, `@org/team`, email). May be empty, which
    /// removes ownership for matching paths.
    pub owners: Vec<String>,
    /// Comment written on the line(s) above the rule.
    pub comment: Option<String>,
    /// Section the rule is listed under.
    pub section: Option<String>,
}

impl Rule {
    /// Create a rule with a pattern and owners.
    pub fn new(
        pattern: impl Into<String>,
        owners: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            owners: owners.into_iter().map(Into::into).collect(),
            comment: None,
            section: None,
        }
    }

    /// A rule without owners.
    pub fn unowned(pattern: impl Into<String>) -> Self {
        Self::new(pattern, std::iter::empty::<String>())
    }

    /// Add a comment above this rule.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// List this rule under a section heading.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// The first part of this rule that cannot be written on one line.
    ///
    /// A pattern may not contain line breaks or start with `#`; an owner
    /// must be a non-empty handle without whitespace or a leading `#`.
    #[must_use]
    pub fn malformed(&self) -> Option<Malformed> {
        if self.pattern.contains(['\n', '\r']) || self.pattern.starts_with('#') {
            return Some(Malformed::Pattern);
        }
        self.owners
            .iter()
            .position(|o| o.is_empty() || o.starts_with('#') || o.contains(char::is_whitespace))
            .map(Malformed::Owner)
    }

    /// The rule line: pattern followed by space-separated owners.
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = self.pattern.clone();
        for owner in &self.owners {
            line.push(' ');
            line.push_str(owner);
        }
        line
    }
}

/// Part of a [`Rule`] that would break the line-oriented format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The pattern spans lines or reads as a comment
    Pattern,
    /// The owner at this index
    Owner(usize),
}

/// An ordered CODEOWNERS rule set.
///
/// Use [`CodeOwners::builder()`] to create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeOwners {
    /// Header comment, one `#` line per header line. Empty disables it.
    pub header: String,
    /// Ownership rules, in file order.
    pub rules: Vec<Rule>,
}

impl Default for CodeOwners {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            rules: Vec::new(),
        }
    }
}

impl CodeOwners {
    /// Create a builder with the default header.
    #[must_use]
    pub fn builder() -> CodeOwnersBuilder {
        CodeOwnersBuilder::default()
    }

    /// Index of the first rule with an empty pattern, if any.
    #[must_use]
    pub fn first_empty_pattern(&self) -> Option<usize> {
        self.rules.iter().position(|r| r.pattern.trim().is_empty())
    }

    /// Index and offending part of the first malformed rule, if any.
    #[must_use]
    pub fn first_malformed(&self) -> Option<(usize, Malformed)> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.malformed().map(|m| (i, m)))
    }

    /// Render the file content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ghgen_codeowners::{CodeOwners, Rule};
    ///
    /// let content = CodeOwners::builder()
    ///     .header("")
    ///     .rule(Rule::unowned("/vendor/"))
    ///     .build()
    ///     .render();
    /// assert_eq!(content, "/vendor/\n");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();

        if !self.header.is_empty() {
            push_comment(&mut output, &self.header);
            if !self.rules.is_empty() {
                output.push('\n');
            }
        }

        let mut current: Option<&str> = None;
        for (i, rule) in self.rules.iter().enumerate() {
            let section = rule.section.as_deref();
            if i > 0 && section != current {
                output.push('\n');
            }
            if section != current
                && let Some(name) = section
            {
                push_comment(&mut output, name);
            }
            current = section;

            if let Some(comment) = &rule.comment {
                push_comment(&mut output, comment);
            }
            output.push_str(&rule.line());
            output.push('\n');
        }

        output
    }
}

fn push_comment(output: &mut String, text: &str) {
    for line in text.lines() {
        if line.is_empty() {
            output.push_str("#\n");
        } else {
            output.push_str("# ");
            output.push_str(line);
            output.push('\n');
        }
    }
}

/// Builder for [`CodeOwners`].
#[derive(Debug, Clone)]
pub struct CodeOwnersBuilder {
    header: String,
    rules: Vec<Rule>,
}

impl Default for CodeOwnersBuilder {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            rules: Vec::new(),
        }
    }
}

impl CodeOwnersBuilder {
    /// Replace the header comment. An empty header disables it.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Add a single rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Build the [`CodeOwners`] rule set.
    #[must_use]
    pub fn build(self) -> CodeOwners {
        CodeOwners {
            header: self.header,
            rules: self.rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builder() {
        let rule = Rule::new("*.rs", ["@rust-team"])
            .comment("Rust files")
            .section("Backend");

        assert_eq!(rule.pattern, "*.rs");
        assert_eq!(rule.owners, vec!["@rust-team"]);
        assert_eq!(rule.comment, Some("Rust files".to_string()));
        assert_eq!(rule.section, Some("Backend".to_string()));
    }

    #[test]
    fn test_render_keeps_rule_order() {
        let content = CodeOwners::builder()
            .rule(Rule::new("*", ["@org/default-team"]))
            .rule(Rule::new("*.go", ["@go-team"]))
            .build()
            .render();

        assert_eq!(
            content,
            "# Generated by ghgen - do not edit manually\n\
             \n\
             * @org/default-team\n\
             *.go @go-team\n"
        );
    }

    #[test]
    fn test_render_multiple_owners() {
        let content = CodeOwners::builder()
            .rule(Rule::new("/docs/**", ["@docs-team", "@tech-writers"]))
            .build()
            .render();
        assert!(content.contains("/docs/** @docs-team @tech-writers\n"));
    }

    #[test]
    fn test_render_unowned_pattern_alone() {
        let content = CodeOwners::builder()
            .rule(Rule::new("*", ["@org/all"]))
            .rule(Rule::unowned("/generated/"))
            .build()
            .render();
        assert!(content.ends_with("/generated/\n"));
    }

    #[test]
    fn test_render_comments() {
        let content = CodeOwners::builder()
            .header("Line 1\nLine 2")
            .rule(Rule::new("*.rs", ["@rust-team"]).comment("Rust source files"))
            .build()
            .render();

        assert_eq!(
            content,
            "# Line 1\n# Line 2\n\n# Rust source files\n*.rs @rust-team\n"
        );
    }

    #[test]
    fn test_sections_never_regroup_rules() {
        let content = CodeOwners::builder()
            .header("")
            .rule(Rule::new("*.rs", ["@backend"]).section("Backend"))
            .rule(Rule::new("*.ts", ["@frontend"]).section("Frontend"))
            .rule(Rule::new("*.go", ["@backend"]).section("Backend"))
            .build()
            .render();

        assert_eq!(
            content,
            "# Backend\n*.rs @backend\n\n# Frontend\n*.ts @frontend\n\n# Backend\n*.go @backend\n"
        );
    }

    #[test]
    fn test_consecutive_rules_share_a_heading() {
        let content = CodeOwners::builder()
            .header("")
            .rule(Rule::new("*.rs", ["@backend"]).section("Backend"))
            .rule(Rule::new("*.go", ["@backend"]).section("Backend"))
            .rule(Rule::new("*.md", ["@docs"]))
            .build()
            .render();

        assert_eq!(content.matches("# Backend").count(), 1);
        assert!(content.ends_with("*.go @backend\n\n*.md @docs\n"));
    }

    #[test]
    fn test_empty_pattern_detection() {
        let codeowners = CodeOwners::builder()
            .rule(Rule::new("*", ["@a"]))
            .rule(Rule::new(" ", ["@b"]))
            .build();
        assert_eq!(codeowners.first_empty_pattern(), Some(1));
    }

    #[test]
    fn test_malformed_rules() {
        assert_eq!(Rule::new("*.rs", ["@rust-team"]).malformed(), None);
        assert_eq!(Rule::unowned("/vendor/").malformed(), None);
        assert_eq!(
            Rule::new("*.rs\n* @attacker", ["@a"]).malformed(),
            Some(Malformed::Pattern)
        );
        assert_eq!(
            Rule::new("#not-a-rule", ["@a"]).malformed(),
            Some(Malformed::Pattern)
        );
        assert_eq!(
            Rule::new("*", ["@a", "@b\n* @c"]).malformed(),
            Some(Malformed::Owner(1))
        );
        assert_eq!(
            Rule::new("*", ["@a", "#b"]).malformed(),
            Some(Malformed::Owner(1))
        );
        assert_eq!(Rule::new("*", [""]).malformed(), Some(Malformed::Owner(0)));

        let codeowners = CodeOwners::builder()
            .rule(Rule::new("*", ["@a"]))
            .rule(Rule::new("docs/", ["@docs team"]))
            .build();
        assert_eq!(codeowners.first_malformed(), Some((1, Malformed::Owner(0))));
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            CodeOwners::default().render(),
            "# Generated by ghgen - do not edit manually\n"
        );
    }
}
