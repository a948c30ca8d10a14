//! Render a batch of declarations into artifacts.

use crate::config::GeneratorConfig;
use crate::declaration::{Declaration, Kind};
use ghgen_emit::EmitError;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Kind of the source declaration
    pub kind: Kind,
    /// Name of the source declaration
    pub name: String,
    /// Output path relative to the repository root
    pub path: String,
    /// Exact file content
    pub content: String,
}

/// A declaration that produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} '{name}': {source}")]
pub struct ArtifactError {
    /// Kind of the failing declaration
    pub kind: Kind,
    /// Name of the failing declaration
    pub name: String,
    /// What the serializer rejected
    #[source]
    pub source: EmitError,
}

/// Outcome of [`render_all`]. A failing declaration never stops the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Rendered artifacts, in declaration order
    pub artifacts: Vec<Artifact>,
    /// Failures, in declaration order
    pub errors: Vec<ArtifactError>,
}

impl RenderReport {
    /// Whether every declaration rendered.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Render one declaration.
///
/// # Errors
///
/// The serializer's error, tagged with the declaration's kind and name.
pub fn render(
    declaration: &Declaration,
    config: &GeneratorConfig,
) -> Result<Artifact, ArtifactError> {
    let options = config.emit_options();
    let tag = |source: EmitError| ArtifactError {
        kind: declaration.kind(),
        name: declaration.name.clone(),
        source,
    };
    let path = declaration.path().map_err(tag)?;
    let content = declaration
        .content(&options, &config.codeowners_header)
        .map_err(tag)?;
    Ok(Artifact {
        kind: declaration.kind(),
        name: declaration.name.clone(),
        path,
        content,
    })
}

/// Render every declaration, collecting artifacts and failures.
///
/// Two declarations that land on the same output path are a conflict: the
/// first one keeps the path and the later one is reported as
/// `DuplicateIdentifier`.
pub fn render_all<'a>(
    declarations: impl IntoIterator<Item = &'a Declaration>,
    config: &GeneratorConfig,
) -> RenderReport {
    let mut report = RenderReport::default();
    let mut claimed: HashMap<String, usize> = HashMap::new();

    for (index, declaration) in declarations.into_iter().enumerate() {
        match render(declaration, config) {
            Ok(artifact) => {
                if let Some(first) = claimed.get(&artifact.path) {
                    let first = &report.artifacts[*first];
                    warn!(
                        path = %artifact.path,
                        first = %first.name,
                        second = %artifact.name,
                        "two declarations share an output path"
                    );
                    report.errors.push(ArtifactError {
                        kind: artifact.kind,
                        name: artifact.name,
                        source: EmitError::DuplicateIdentifier {
                            path: format!("declarations[{index}]"),
                            value: artifact.path,
                        },
                    });
                    continue;
                }
                debug!(
                    kind = %artifact.kind,
                    path = %artifact.path,
                    bytes = artifact.content.len(),
                    "rendered"
                );
                claimed.insert(artifact.path.clone(), report.artifacts.len());
                report.artifacts.push(artifact);
            }
            Err(err) => {
                warn!(
                    kind = %err.kind,
                    name = %err.name,
                    error = %err.source,
                    "declaration failed"
                );
                report.errors.push(err);
            }
        }
    }

    info!(
        rendered = report.artifacts.len(),
        failed = report.errors.len(),
        "render complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghgen_emit::ErrorKind;
    use ghgen_schema::workflow::{Job, Step, Workflow};

    fn ci() -> Workflow {
        Workflow::new("CI")
            .with_job("test", Job::new("ubuntu-latest").step(Step::run("make")))
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let broken = Workflow::new("Broken").with_job("build", Job::default());
        let declarations = [
            Declaration::workflow("ci", ci()),
            Declaration::workflow("broken", broken),
            Declaration::workflow("nightly", ci()),
        ];
        let report = render_all(&declarations, &GeneratorConfig::default());

        assert!(!report.is_ok());
        let paths: Vec<_> = report.artifacts.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(
            paths,
            [".github/workflows/ci.yml", ".github/workflows/nightly.yml"]
        );
        assert_eq!(report.errors.len(), 1);

        let error = &report.errors[0];
        assert_eq!(error.name, "broken");
        assert_eq!(error.source.kind(), ErrorKind::IncompleteRequired);
        let message = error.to_string();
        assert!(message.starts_with("workflow 'broken': jobs.build.runs-on"));
    }

    #[test]
    fn test_path_conflict() {
        let declarations = [
            Declaration::workflow("CI", ci()),
            Declaration::workflow("ci", ci()),
        ];
        let report = render_all(&declarations, &GeneratorConfig::default());
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].name, "CI");
        let error = &report.errors[0].source;
        assert_eq!(error.kind(), ErrorKind::DuplicateIdentifier);
        assert_eq!(error.path(), "declarations[1]");
    }

    #[test]
    fn test_config_reaches_serializer() {
        let config = GeneratorConfig {
            yaml_header: Some("Generated".to_string()),
            ..GeneratorConfig::default()
        };
        let artifact = render(&Declaration::workflow("ci", ci()), &config).unwrap();
        assert!(artifact.content.starts_with("# Generated\nname: CI\n"));
    }
}
