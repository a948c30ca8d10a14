//! Generate GitHub automation files from typed Rust declarations.
//!
//! A caller builds plain values (workflows, Dependabot config, issue and
//! discussion forms, PR templates, CODEOWNERS), wraps each in a
//! [`Declaration`], and hands the batch to [`render_all`]. Rendering is
//! pure; [`write_all`] and [`check`] place the results under a repository
//! root or report drift against it.
//!
//! ```
//! use ghgen::schema::workflow::{Job, Step, Triggers, Workflow};
//! use ghgen::{Declaration, GeneratorConfig, render_all};
//!
//! let ci = Workflow::new("CI")
//!     .on(Triggers::default().push_branches(["main"]))
//!     .with_job("test", Job::new("ubuntu-latest").step(Step::run("cargo test")));
//!
//! let report = render_all(&[Declaration::workflow("ci", ci)], &GeneratorConfig::default());
//! assert!(report.is_ok());
//! assert_eq!(report.artifacts[0].path, ".github/workflows/ci.yml");
//! ```

#![warn(missing_docs)]

mod config;
mod declaration;
mod render;
mod writer;

pub use config::{ConfigError, GeneratorConfig, JobOrdering};
pub use declaration::{Declaration, Kind, Model};
pub use render::{Artifact, ArtifactError, RenderReport, render, render_all};
pub use writer::{
    CheckResult, WriteError, WriteResult, WriteStatus, check, resolve, write_all, write_artifact,
};

pub use ghgen_codeowners as codeowners;
pub use ghgen_emit as emit;
pub use ghgen_expr as expr;
pub use ghgen_schema as schema;

#[cfg(feature = "actions")]
pub use ghgen_actions as actions;

/// Outcome of [`sync`].
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Per-file write outcomes
    pub written: Vec<WriteResult>,
    /// Declarations that produced no artifact
    pub errors: Vec<ArtifactError>,
}

/// Render every declaration and write the successful ones under
/// `config.output_root`, honouring `config.dry_run`.
///
/// # Errors
///
/// Only filesystem failures. Rendering failures are collected in
/// [`SyncReport::errors`] and do not stop the other artifacts.
pub fn sync<'a>(
    declarations: impl IntoIterator<Item = &'a Declaration>,
    config: &GeneratorConfig,
) -> Result<SyncReport, WriteError> {
    let report = render_all(declarations, config);
    let written = write_all(&config.output_root, &report.artifacts, config.dry_run)?;
    Ok(SyncReport {
        written,
        errors: report.errors,
    })
}
