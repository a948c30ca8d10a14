//! Issue forms, discussion forms and the issue template chooser.
//!
//! The schema keeps element fields flat; GitHub wants them split into
//! `type`, `id`, `attributes` and `validations`.

use crate::error::{EmitError, Result, check_identifier, child, item};
use crate::yaml::{Fields, Node};
use ghgen_schema::form::{Checkboxes, Dropdown, Input, Markdown, Textarea};
use ghgen_schema::{Form, FormElement, IssueTemplateConfig};
use std::collections::HashSet;

/// Where a form is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    /// `.github/ISSUE_TEMPLATE/`
    Issue,
    /// `.github/DISCUSSION_TEMPLATE/`
    Discussion,
}

pub(crate) fn form(form: &Form, kind: FormKind) -> Result<Node> {
    if kind == FormKind::Issue {
        if form.name.is_empty() {
            return Err(EmitError::missing("name"));
        }
        if form.description.is_empty() {
            return Err(EmitError::missing("description"));
        }
    }
    if form.body.is_empty() {
        return Err(EmitError::missing("body"));
    }

    let mut seen = HashSet::new();
    let mut body = Vec::with_capacity(form.body.len());
    for (i, element) in form.body.iter().enumerate() {
        let path = item("body", i);
        let id = element.id();
        if !id.is_empty() {
            let at = child(&path, "id");
            check_identifier(&at, id)?;
            if !seen.insert(id) {
                return Err(EmitError::DuplicateIdentifier {
                    path: at,
                    value: id.to_string(),
                });
            }
        }
        body.push(self::element(element, &path)?);
    }

    // Discussion category forms only accept title, labels and body.
    let fields = match kind {
        FormKind::Issue => Fields::new()
            .str("name", &form.name)
            .str("description", &form.description)
            .str("title", &form.title)
            .strings("labels", &form.labels)
            .strings("assignees", &form.assignees)
            .strings("projects", &form.projects),
        FormKind::Discussion => Fields::new()
            .str("title", &form.title)
            .strings("labels", &form.labels),
    };

    Ok(fields.node("body", Node::Seq(body)).into_node())
}

fn element(element: &FormElement, path: &str) -> Result<Node> {
    let (attributes, required) = match element {
        FormElement::Markdown(m) => (markdown(m, path)?, false),
        FormElement::Input(i) => (input(i, path)?, i.required),
        FormElement::Textarea(t) => (textarea(t, path)?, t.required),
        FormElement::Dropdown(d) => (dropdown(d, path)?, d.required),
        FormElement::Checkboxes(c) => (checkboxes(c, path)?, false),
    };

    Ok(Fields::new()
        .node("type", Node::str(element.type_name()))
        .str("id", element.id())
        .sub("attributes", attributes)
        .sub("validations", Fields::new().flag("required", required))
        .into_node())
}

fn require(value: &str, path: &str, key: &str) -> Result<()> {
    if value.is_empty() {
        Err(EmitError::missing(child(&child(path, "attributes"), key)))
    } else {
        Ok(())
    }
}

fn markdown(m: &Markdown, path: &str) -> Result<Fields> {
    require(&m.value, path, "value")?;
    Ok(Fields::new().str("value", &m.value))
}

fn input(i: &Input, path: &str) -> Result<Fields> {
    require(&i.label, path, "label")?;
    Ok(Fields::new()
        .str("label", &i.label)
        .str("description", &i.description)
        .str("placeholder", &i.placeholder)
        .str("value", &i.value))
}

fn textarea(t: &Textarea, path: &str) -> Result<Fields> {
    require(&t.label, path, "label")?;
    Ok(Fields::new()
        .str("label", &t.label)
        .str("description", &t.description)
        .str("placeholder", &t.placeholder)
        .str("value", &t.value)
        .str("render", &t.render))
}

fn dropdown(d: &Dropdown, path: &str) -> Result<Fields> {
    require(&d.label, path, "label")?;
    if d.options.is_empty() {
        return Err(EmitError::missing(child(&child(path, "attributes"), "options")));
    }
    if let Some(index) = d.default
        && !usize::try_from(index).is_ok_and(|i| i < d.options.len())
    {
        return Err(EmitError::UnrenderableValue {
            path: child(&child(path, "attributes"), "default"),
            reason: format!(
                "index {index} is past the last of {} options",
                d.options.len()
            ),
        });
    }
    Ok(Fields::new()
        .str("label", &d.label)
        .str("description", &d.description)
        .strings("options", &d.options)
        .flag("multiple", d.multiple)
        .opt_uint("default", d.default))
}

fn checkboxes(c: &Checkboxes, path: &str) -> Result<Fields> {
    require(&c.label, path, "label")?;
    if c.options.is_empty() {
        return Err(EmitError::missing(child(&child(path, "attributes"), "options")));
    }
    let options = c
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if option.label.is_empty() {
                let at = item(&child(&child(path, "attributes"), "options"), i);
                return Err(EmitError::missing(child(&at, "label")));
            }
            Ok(Fields::new()
                .str("label", &option.label)
                .flag("required", option.required)
                .into_node())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Fields::new()
        .str("label", &c.label)
        .str("description", &c.description)
        .node("options", Node::Seq(options)))
}

/// `.github/ISSUE_TEMPLATE/config.yml`
pub(crate) fn issue_template_config(config: &IssueTemplateConfig) -> Result<Node> {
    let mut links = Vec::with_capacity(config.contact_links.len());
    for (i, link) in config.contact_links.iter().enumerate() {
        let path = item("contact_links", i);
        let required = [
            ("name", &link.name),
            ("url", &link.url),
            ("about", &link.about),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(EmitError::missing(child(&path, key)));
            }
        }
        links.push(
            Fields::new()
                .str("name", &link.name)
                .str("url", &link.url)
                .str("about", &link.about)
                .into_node(),
        );
    }

    Ok(Fields::new()
        .opt_bool("blank_issues_enabled", config.blank_issues_enabled)
        .non_empty("contact_links", Node::Seq(links))
        .into_node())
}
