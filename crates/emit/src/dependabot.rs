//! `dependabot.yml` projection.

use crate::error::{EmitError, Result, child, item};
use crate::yaml::{Fields, Node};
use ghgen_schema::Dependabot;
use ghgen_schema::dependabot::{Group, Registry, Update};

pub(crate) fn dependabot(config: &Dependabot) -> Result<Node> {
    if config.version == 0 {
        return Err(EmitError::missing("version"));
    }

    let mut registries = Vec::with_capacity(config.registries.len());
    for (name, registry) in &config.registries {
        registries.push((name.clone(), self::registry(registry, &child("registries", name))?));
    }

    let updates = config
        .updates
        .iter()
        .enumerate()
        .map(|(i, u)| update(u, &item("updates", i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Fields::new()
        .node("version", Node::Int(i64::from(config.version)))
        .flag("enable-beta-ecosystems", config.enable_beta_ecosystems)
        .non_empty("registries", Node::Map(registries))
        .node("updates", Node::Seq(updates))
        .into_node())
}

fn registry(registry: &Registry, path: &str) -> Result<Node> {
    if registry.registry_type.is_empty() {
        return Err(EmitError::missing(child(path, "type")));
    }
    if registry.url.is_empty() && registry.host.is_empty() {
        return Err(EmitError::missing(child(path, "url")));
    }
    Ok(Fields::new()
        .str("type", &registry.registry_type)
        .str("url", &registry.url)
        .str("username", &registry.username)
        .str("password", &registry.password)
        .str("key", &registry.key)
        .str("token", &registry.token)
        .str("organization", &registry.organization)
        .str("host", &registry.host)
        .flag("replaces-base", registry.replaces_base)
        .into_node())
}

fn update(update: &Update, path: &str) -> Result<Node> {
    if update.package_ecosystem.is_empty() {
        return Err(EmitError::missing(child(path, "package-ecosystem")));
    }
    if update.directory.is_empty() && update.directories.is_empty() {
        return Err(EmitError::missing(child(path, "directory")));
    }
    if update.schedule.interval.is_empty() {
        return Err(EmitError::missing(child(&child(path, "schedule"), "interval")));
    }

    let schedule = Fields::new()
        .str("interval", &update.schedule.interval)
        .str("day", &update.schedule.day)
        .str("time", &update.schedule.time)
        .str("timezone", &update.schedule.timezone);

    let allow = update
        .allow
        .iter()
        .map(|a| {
            Fields::new()
                .str("dependency-name", &a.dependency_name)
                .str("dependency-type", &a.dependency_type)
                .into_node()
        })
        .collect();

    let ignore = update
        .ignore
        .iter()
        .map(|i| {
            Fields::new()
                .str("dependency-name", &i.dependency_name)
                .strings("versions", &i.versions)
                .strings("update-types", &i.update_types)
                .into_node()
        })
        .collect();

    let groups = update
        .groups
        .iter()
        .map(|(name, g)| (name.clone(), group(g)))
        .collect();

    let commit_message = update.commit_message.as_ref().map(|c| {
        Fields::new()
            .str("prefix", &c.prefix)
            .str("prefix-development", &c.prefix_development)
            .str("include", &c.include)
    });

    let branch_name = update
        .pull_request_branch_name
        .as_ref()
        .map(|b| Fields::new().str("separator", &b.separator));

    Ok(Fields::new()
        .str("package-ecosystem", &update.package_ecosystem)
        .str("directory", &update.directory)
        .strings("directories", &update.directories)
        .sub("schedule", schedule)
        .non_empty("allow", Node::Seq(allow))
        .non_empty("ignore", Node::Seq(ignore))
        .strings("labels", &update.labels)
        .strings("assignees", &update.assignees)
        .strings("reviewers", &update.reviewers)
        .uint("milestone", update.milestone)
        .opt_uint("open-pull-requests-limit", update.open_pull_requests_limit)
        .non_empty("groups", Node::Map(groups))
        .sub("commit-message", commit_message.unwrap_or_default())
        .sub("pull-request-branch-name", branch_name.unwrap_or_default())
        .str("rebase-strategy", &update.rebase_strategy)
        .str("target-branch", &update.target_branch)
        .flag("vendor", update.vendor)
        .str("versioning-strategy", &update.versioning_strategy)
        .opt_node("registries", registries(&update.registries))
        .str(
            "insecure-external-code-execution",
            &update.insecure_external_code_execution,
        )
        .into_node())
}

/// `["*"]` collapses to the scalar wildcard GitHub documents.
fn registries(names: &[String]) -> Option<Node> {
    match names {
        [] => None,
        [only] if only == "*" => Some(Node::str("*")),
        names => Some(Node::strings(names)),
    }
}

fn group(group: &Group) -> Node {
    Fields::new()
        .str("applies-to", &group.applies_to)
        .str("dependency-type", &group.dependency_type)
        .strings("patterns", &group.patterns)
        .strings("exclude-patterns", &group.exclude_patterns)
        .strings("update-types", &group.update_types)
        .into_node()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::yaml::write_document;
    use ghgen_schema::dependabot::Ignore;

    fn render(config: &Dependabot) -> Result<String> {
        dependabot(config).map(|node| write_document(&node, None))
    }

    #[test]
    fn test_minimal_update() {
        let config = Dependabot::new().update(Update::new("cargo", "/", "weekly"));
        assert_eq!(
            render(&config).unwrap(),
            "version: 2\n\
             updates:\n  \
             - package-ecosystem: cargo\n    \
             directory: /\n    \
             schedule:\n      \
             interval: weekly\n"
        );
    }

    #[test]
    fn test_open_pull_requests_limit_zero_is_kept() {
        let config =
            Dependabot::new().update(Update::new("npm", "/", "daily").open_pull_requests_limit(0));
        assert!(
            render(&config)
                .unwrap()
                .contains("    open-pull-requests-limit: 0\n")
        );
    }

    #[test]
    fn test_wildcard_registries() {
        let mut update = Update::new("npm", "/", "daily");
        update.registries = vec!["*".to_string()];
        let out = render(&Dependabot::new().update(update)).unwrap();
        assert!(out.contains("    registries: \"*\"\n"), "{out}");
    }

    #[test]
    fn test_ignore_and_groups() {
        let update = Update::new("cargo", "/", "weekly")
            .ignore(Ignore {
                update_types: vec!["version-update:semver-major".to_string()],
                ..Ignore::dependency("tokio")
            })
            .group("serde", Group::patterns(["serde*"]));
        let out = render(&Dependabot::new().update(update)).unwrap();
        assert!(
            out.contains("    ignore:\n      - dependency-name: tokio\n"),
            "{out}"
        );
        assert!(
            out.contains("    groups:\n      serde:\n        patterns:\n          - \"serde*\"\n"),
            "{out}"
        );
    }

    #[test]
    fn test_required_fields() {
        let mut config = Dependabot::new();
        config.version = 0;
        assert_eq!(render(&config).unwrap_err().path(), "version");

        let no_dir = Dependabot::new().update(Update::new("cargo", "", "weekly"));
        let err = render(&no_dir).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteRequired);
        assert_eq!(err.path(), "updates[0].directory");

        let no_interval = Dependabot::new().update(Update::new("cargo", "/", ""));
        assert_eq!(
            render(&no_interval).unwrap_err().path(),
            "updates[0].schedule.interval"
        );
    }

    #[test]
    fn test_registry_requires_type() {
        let registry = Registry::new("", "https://npm.pkg.github.com");
        let config = Dependabot::new().registry("npm", registry);
        assert_eq!(render(&config).unwrap_err().path(), "registries.npm.type");
    }
}
