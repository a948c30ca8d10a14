use super::permissions::Permissions;
use super::step::StepEntry;
use super::{Concurrency, Defaults};
use crate::value::{Condition, Text, Value};
use ghgen_expr::Expr;
use std::collections::BTreeMap;

/// A job in a workflow.
///
/// A job either runs steps on a runner or calls a reusable workflow through
/// `uses`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Job {
    /// Job display name
    pub name: String,

    /// Runner label(s), runner group or expression
    pub runs_on: Option<RunsOn>,

    /// Jobs that must complete before this one
    pub needs: Vec<JobRef>,

    /// Conditional execution guard
    pub if_condition: Condition,

    /// Job-level permissions (overrides workflow-level)
    pub permissions: Option<Permissions>,

    /// Deployment environment
    pub environment: Option<Environment>,

    /// Job-level concurrency settings
    pub concurrency: Option<Concurrency>,

    /// Job outputs, read by dependent jobs through `needs.<id>.outputs`
    pub outputs: BTreeMap<String, Value>,

    /// Job-level environment variables
    pub env: BTreeMap<String, Value>,

    /// Default run settings for the job's steps
    pub defaults: Option<Defaults>,

    /// Matrix strategy
    pub strategy: Option<Strategy>,

    /// Container to run the steps in
    pub container: Option<Container>,

    /// Service containers keyed by service id
    pub services: BTreeMap<String, Container>,

    /// Steps to execute
    pub steps: Vec<StepEntry>,

    /// Job timeout in minutes
    pub timeout_minutes: u32,

    /// Continue workflow if this job fails
    pub continue_on_error: bool,

    /// Reusable workflow to call (`owner/repo/.github/workflows/x.yml@ref`)
    pub uses: String,

    /// Inputs for the reusable workflow
    pub with: BTreeMap<String, Value>,

    /// Secrets for the reusable workflow
    pub secrets: Option<JobSecrets>,
}

impl Job {
    /// Create a job that runs on the given runner.
    pub fn new(runs_on: impl Into<RunsOn>) -> Self {
        Self {
            runs_on: Some(runs_on.into()),
            ..Default::default()
        }
    }

    /// Create a job that calls a reusable workflow.
    pub fn reusable(uses: impl Into<String>) -> Self {
        Self {
            uses: uses.into(),
            ..Default::default()
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a prerequisite job, by id or by value
    #[must_use]
    pub fn needs(mut self, job: impl Into<JobRef>) -> Self {
        self.needs.push(job.into());
        self
    }

    /// Set the guard
    #[must_use]
    pub fn with_if(mut self, condition: impl Into<Condition>) -> Self {
        self.if_condition = condition.into();
        self
    }

    /// Set job permissions
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl Into<Permissions>) -> Self {
        self.permissions = Some(permissions.into());
        self
    }

    /// Set the deployment environment
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<Environment>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set concurrency
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Add an output
    #[must_use]
    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set step defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Set the strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Run the steps in a container
    #[must_use]
    pub fn with_container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    /// Add a service container
    #[must_use]
    pub fn with_service(mut self, id: impl Into<String>, container: Container) -> Self {
        self.services.insert(id.into(), container);
        self
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, step: impl Into<StepEntry>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, minutes: u32) -> Self {
        self.timeout_minutes = minutes;
        self
    }

    /// Keep the workflow going when this job fails
    #[must_use]
    pub const fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    /// Add an input for the reusable workflow
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }

    /// Set secrets for the reusable workflow
    #[must_use]
    pub fn with_secrets(mut self, secrets: JobSecrets) -> Self {
        self.secrets = Some(secrets);
        self
    }
}

/// Runner selection for `runs-on`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunsOn {
    /// A single label or an expression.
    Label(Text),
    /// Every label must match.
    Labels(Vec<String>),
    /// A runner group, optionally narrowed by labels.
    Group {
        /// Runner group name
        group: String,
        /// Labels within the group
        labels: Vec<String>,
    },
}

impl From<&str> for RunsOn {
    fn from(value: &str) -> Self {
        Self::Label(value.into())
    }
}

impl From<String> for RunsOn {
    fn from(value: String) -> Self {
        Self::Label(value.into())
    }
}

impl From<Expr> for RunsOn {
    fn from(value: Expr) -> Self {
        Self::Label(value.into())
    }
}

impl From<Vec<&str>> for RunsOn {
    fn from(value: Vec<&str>) -> Self {
        Self::Labels(value.into_iter().map(String::from).collect())
    }
}

/// A prerequisite named in `needs`.
#[derive(Debug, Clone, PartialEq)]
pub enum JobRef {
    /// A job id, emitted verbatim.
    Id(String),
    /// A job value, rewritten to the key it is stored under in the
    /// enclosing workflow.
    Job(Box<Job>),
}

impl From<&str> for JobRef {
    fn from(value: &str) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<String> for JobRef {
    fn from(value: String) -> Self {
        Self::Id(value)
    }
}

impl From<Job> for JobRef {
    fn from(value: Job) -> Self {
        Self::Job(Box::new(value))
    }
}

impl From<&Job> for JobRef {
    fn from(value: &Job) -> Self {
        Self::Job(Box::new(value.clone()))
    }
}

/// Deployment environment of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Environment name only
    Name(Text),
    /// Environment name with a deployment URL
    WithUrl {
        /// Environment name
        name: Text,
        /// URL shown for the deployment
        url: Text,
    },
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        Self::Name(value.into())
    }
}

impl From<Expr> for Environment {
    fn from(value: Expr) -> Self {
        Self::Name(value.into())
    }
}

/// Matrix strategy for a job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Strategy {
    /// Matrix dimensions, or an expression producing them
    pub matrix: Option<MatrixSpec>,

    /// `None` leaves GitHub's default (`true`) in place
    pub fail_fast: Option<bool>,

    /// Maximum concurrent jobs
    pub max_parallel: u32,
}

impl Strategy {
    /// Strategy over a matrix.
    pub fn matrix(matrix: impl Into<MatrixSpec>) -> Self {
        Self {
            matrix: Some(matrix.into()),
            ..Default::default()
        }
    }

    /// Set `fail-fast` explicitly
    #[must_use]
    pub const fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    /// Limit parallelism
    #[must_use]
    pub const fn max_parallel(mut self, max: u32) -> Self {
        self.max_parallel = max;
        self
    }
}

/// Matrix given literally or as an expression (`${{ fromJSON(...) }}`).
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixSpec {
    /// Literal dimensions
    Matrix(Matrix),
    /// An expression that evaluates to a matrix
    Expr(Expr),
}

impl From<Matrix> for MatrixSpec {
    fn from(value: Matrix) -> Self {
        Self::Matrix(value)
    }
}

impl From<Expr> for MatrixSpec {
    fn from(value: Expr) -> Self {
        Self::Expr(value)
    }
}

/// Matrix dimensions with extra and excluded combinations.
///
/// `exclude` entries may only name dimensions present in `dimensions`;
/// `include` entries may add new ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    /// Dimension name to ordered values
    pub dimensions: BTreeMap<String, Vec<Value>>,

    /// Additional combinations
    pub include: Vec<BTreeMap<String, Value>>,

    /// Excluded combinations
    pub exclude: Vec<BTreeMap<String, Value>>,
}

impl Matrix {
    /// Empty matrix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension
    #[must_use]
    pub fn dimension<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.dimensions
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Add an extra combination
    #[must_use]
    pub fn include<K: Into<String>, V: Into<Value>>(
        mut self,
        entry: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.include.push(collect_entry(entry));
        self
    }

    /// Remove a combination
    #[must_use]
    pub fn exclude<K: Into<String>, V: Into<Value>>(
        mut self,
        entry: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.exclude.push(collect_entry(entry));
        self
    }

    /// Whether no dimension or combination is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.include.is_empty() && self.exclude.is_empty()
    }
}

fn collect_entry<K: Into<String>, V: Into<Value>>(
    entry: impl IntoIterator<Item = (K, V)>,
) -> BTreeMap<String, Value> {
    entry
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A job container or service container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    /// Docker image
    pub image: Text,

    /// Registry credentials
    pub credentials: Option<Credentials>,

    /// Environment variables
    pub env: BTreeMap<String, Value>,

    /// Exposed ports
    pub ports: Vec<Port>,

    /// Mounted volumes
    pub volumes: Vec<String>,

    /// Extra `docker create` options
    pub options: String,
}

impl Container {
    /// Container from an image
    pub fn image(image: impl Into<Text>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Set registry credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Expose a port
    #[must_use]
    pub fn with_port(mut self, port: impl Into<Port>) -> Self {
        self.ports.push(port.into());
        self
    }

    /// Mount a volume
    #[must_use]
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volumes.push(volume.into());
        self
    }

    /// Set `docker create` options
    #[must_use]
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// Container registry credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    /// Registry username
    pub username: Text,
    /// Registry password
    pub password: Text,
}

/// A container port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Port {
    /// A bare port number
    Number(u16),
    /// A `host:container` mapping
    Mapping(String),
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Port {
    fn from(value: &str) -> Self {
        Self::Mapping(value.to_string())
    }
}

/// Secrets passed to a reusable workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSecrets {
    /// `secrets: inherit`
    Inherit,
    /// Explicit secret mapping
    Map(BTreeMap<String, Text>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Step;
    use ghgen_expr::context::matrix;

    #[test]
    fn test_job_builder() {
        let build = Job::new("ubuntu-latest").step(Step::run("make"));
        let test = Job::new("ubuntu-latest")
            .needs("lint")
            .needs(&build)
            .with_timeout(30);

        assert_eq!(test.needs[0], JobRef::Id("lint".to_string()));
        assert_eq!(test.needs[1], JobRef::Job(Box::new(build)));
        assert_eq!(test.timeout_minutes, 30);
    }

    #[test]
    fn test_runs_on_from_expression() {
        let job = Job::new(matrix::get("os"));
        assert_eq!(
            job.runs_on,
            Some(RunsOn::Label(Text::Expr(Expr::new("matrix.os"))))
        );
    }

    #[test]
    fn test_matrix_builder() {
        let m = Matrix::new()
            .dimension("os", ["ubuntu-latest", "macos-latest"])
            .include([("os", "windows-latest")])
            .exclude([("os", "macos-latest")]);

        assert_eq!(m.dimensions["os"].len(), 2);
        assert_eq!(m.include.len(), 1);
        assert_eq!(m.exclude.len(), 1);
        assert!(!m.is_empty());
        assert!(Matrix::new().is_empty());
    }

    #[test]
    fn test_reusable_job() {
        let job = Job::reusable("octo/shared/.github/workflows/ci.yml@main")
            .with_input("debug", true)
            .with_secrets(JobSecrets::Inherit);
        assert!(job.runs_on.is_none());
        assert_eq!(job.secrets, Some(JobSecrets::Inherit));
    }
}
