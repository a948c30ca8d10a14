//! Issue and discussion forms, and the issue template chooser.
//!
//! See: <https://docs.github.com/en/communities/using-templates-to-encourage-useful-issues-and-pull-requests/syntax-for-issue-forms>

/// An issue or discussion form.
///
/// Discussion forms share this shape; only `title`, `labels` and the body
/// are written for them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Form {
    /// Template name shown in the chooser
    pub name: String,
    /// Template description shown in the chooser
    pub description: String,
    /// Default title
    pub title: String,
    /// Labels added on creation
    pub labels: Vec<String>,
    /// Users assigned on creation
    pub assignees: Vec<String>,
    /// Projects (`owner/number`) the issue is added to
    pub projects: Vec<String>,
    /// Form elements
    pub body: Vec<FormElement>,
}

impl Form {
    /// Form with a name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Set the default title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Append an element
    #[must_use]
    pub fn element(mut self, element: impl Into<FormElement>) -> Self {
        self.body.push(element.into());
        self
    }
}

/// One entry of a form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormElement {
    /// Static Markdown
    Markdown(Markdown),
    /// Single-line input
    Input(Input),
    /// Multi-line text area
    Textarea(Textarea),
    /// Single or multi-select dropdown
    Dropdown(Dropdown),
    /// Checkbox group
    Checkboxes(Checkboxes),
}

impl FormElement {
    /// The `type:` tag.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Markdown(_) => "markdown",
            Self::Input(_) => "input",
            Self::Textarea(_) => "textarea",
            Self::Dropdown(_) => "dropdown",
            Self::Checkboxes(_) => "checkboxes",
        }
    }

    /// The element id, empty when unset.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Markdown(m) => &m.id,
            Self::Input(i) => &i.id,
            Self::Textarea(t) => &t.id,
            Self::Dropdown(d) => &d.id,
            Self::Checkboxes(c) => &c.id,
        }
    }
}

macro_rules! element_from {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for FormElement {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

element_from!(Markdown, Input, Textarea, Dropdown, Checkboxes);

/// Static Markdown shown in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markdown {
    /// Optional id
    pub id: String,
    /// Markdown text
    pub value: String,
}

impl Markdown {
    /// Markdown block
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            value: value.into(),
        }
    }
}

/// Single-line text input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Input {
    /// Optional id
    pub id: String,
    /// Label
    pub label: String,
    /// Help text
    pub description: String,
    /// Placeholder shown when empty
    pub placeholder: String,
    /// Prefilled value
    pub value: String,
    /// Must be filled in
    pub required: bool,
}

impl Input {
    /// Input with an id and label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the placeholder
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Multi-line text area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Textarea {
    /// Optional id
    pub id: String,
    /// Label
    pub label: String,
    /// Help text
    pub description: String,
    /// Placeholder shown when empty
    pub placeholder: String,
    /// Prefilled value
    pub value: String,
    /// Language the content is rendered as a code block in (e.g. `shell`)
    pub render: String,
    /// Must be filled in
    pub required: bool,
}

impl Textarea {
    /// Text area with an id and label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Render the content as code
    #[must_use]
    pub fn render(mut self, language: impl Into<String>) -> Self {
        self.render = language.into();
        self
    }

    /// Mark required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dropdown {
    /// Optional id
    pub id: String,
    /// Label
    pub label: String,
    /// Help text
    pub description: String,
    /// Choices
    pub options: Vec<String>,
    /// Allow several choices
    pub multiple: bool,
    /// Index of the preselected option; `Some(0)` selects the first
    pub default: Option<u32>,
    /// Must be answered
    pub required: bool,
}

impl Dropdown {
    /// Dropdown with choices
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Allow several choices
    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Preselect an option
    #[must_use]
    pub const fn with_default(mut self, index: u32) -> Self {
        self.default = Some(index);
        self
    }

    /// Mark required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Group of checkboxes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checkboxes {
    /// Optional id
    pub id: String,
    /// Label
    pub label: String,
    /// Help text
    pub description: String,
    /// Boxes
    pub options: Vec<Checkbox>,
}

impl Checkboxes {
    /// Empty checkbox group
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Append a box
    #[must_use]
    pub fn option(mut self, label: impl Into<String>, required: bool) -> Self {
        self.options.push(Checkbox {
            label: label.into(),
            required,
        });
        self
    }
}

/// A single checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checkbox {
    /// Label
    pub label: String,
    /// Must be ticked
    pub required: bool,
}

/// The issue template chooser (`.github/ISSUE_TEMPLATE/config.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueTemplateConfig {
    /// `None` keeps GitHub's default (blank issues allowed)
    pub blank_issues_enabled: Option<bool>,
    /// External links shown in the chooser
    pub contact_links: Vec<ContactLink>,
}

impl IssueTemplateConfig {
    /// Add a contact link
    #[must_use]
    pub fn contact_link(
        mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        about: impl Into<String>,
    ) -> Self {
        self.contact_links.push(ContactLink {
            name: name.into(),
            url: url.into(),
            about: about.into(),
        });
        self
    }

    /// Allow or forbid blank issues
    #[must_use]
    pub const fn blank_issues_enabled(mut self, enabled: bool) -> Self {
        self.blank_issues_enabled = Some(enabled);
        self
    }
}

/// A link in the issue template chooser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactLink {
    /// Link title
    pub name: String,
    /// Target URL
    pub url: String,
    /// Short description
    pub about: String,
}
