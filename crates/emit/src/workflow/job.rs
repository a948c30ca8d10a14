use super::step::step_entry;
use super::{concurrency, defaults, permissions};
use crate::error::{EmitError, Result, check_identifier, child, item};
use crate::value::{value, value_map};
use crate::yaml::{Fields, Node};
use ghgen_schema::Value;
use ghgen_schema::workflow::{
    Container, Environment, Job, JobRef, JobSecrets, Matrix, MatrixSpec, Port, RunsOn, Strategy,
    Workflow,
};
use std::collections::BTreeMap;

/// `needs` with at most this many entries is written inline.
const FLOW_NEEDS_MAX: usize = 3;

pub(super) fn job(job: &Job, workflow: &Workflow, path: &str) -> Result<Node> {
    check_shape(job, path)?;

    let steps = job
        .steps
        .iter()
        .enumerate()
        .map(|(i, entry)| step_entry(entry, &item(&child(path, "steps"), i)))
        .collect::<Result<Vec<_>>>()?;

    let mut services = Vec::with_capacity(job.services.len());
    for (id, service) in &job.services {
        let at = child(&child(path, "services"), id);
        check_identifier(&at, id)?;
        services.push((id.clone(), container(service, &at)?));
    }

    Ok(Fields::new()
        .str("name", &job.name)
        .opt_node(
            "runs-on",
            job.runs_on
                .as_ref()
                .map(|r| runs_on(r, &child(path, "runs-on")))
                .transpose()?,
        )
        .opt_node("needs", needs(&job.needs, workflow, &child(path, "needs"))?)
        .text("if", &job.if_condition)
        .opt_node("permissions", job.permissions.as_ref().map(permissions))
        .opt_node("environment", job.environment.as_ref().map(environment))
        .opt_node(
            "concurrency",
            job.concurrency
                .as_ref()
                .map(|c| concurrency(c, &child(path, "concurrency")))
                .transpose()?,
        )
        .non_empty("outputs", value_map(&job.outputs, &child(path, "outputs"))?)
        .non_empty("env", value_map(&job.env, &child(path, "env"))?)
        .sub("defaults", defaults(job.defaults.as_ref()))
        .sub(
            "strategy",
            match &job.strategy {
                Some(s) => strategy(s, &child(path, "strategy"))?,
                None => Fields::new(),
            },
        )
        .opt_node(
            "container",
            job.container
                .as_ref()
                .map(|c| container(c, &child(path, "container")))
                .transpose()?,
        )
        .non_empty("services", Node::Map(services))
        .non_empty("steps", Node::Seq(steps))
        .uint("timeout-minutes", job.timeout_minutes)
        .flag("continue-on-error", job.continue_on_error)
        .str("uses", &job.uses)
        .non_empty("with", value_map(&job.with, &child(path, "with"))?)
        .opt_node("secrets", job.secrets.as_ref().map(secrets))
        .into_node())
}

/// A job either runs steps on a runner or calls a reusable workflow.
fn check_shape(job: &Job, path: &str) -> Result<()> {
    let invalid = |reason: &str| EmitError::InvalidJobShape {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if job.uses.is_empty() {
        if job.runs_on.is_none() {
            return Err(EmitError::missing(child(path, "runs-on")));
        }
        if !job.with.is_empty() || job.secrets.is_some() {
            return Err(invalid("`with` and `secrets` need a reusable workflow in `uses`"));
        }
    } else if job.runs_on.is_some() || !job.steps.is_empty() {
        return Err(invalid("a reusable workflow call cannot set `runs-on` or `steps`"));
    }
    Ok(())
}

fn runs_on(runs_on: &RunsOn, path: &str) -> Result<Node> {
    match runs_on {
        RunsOn::Label(label) if label.is_empty() => Err(EmitError::missing(path)),
        RunsOn::Label(label) => Ok(Node::Str(label.render())),
        RunsOn::Labels(labels) if labels.is_empty() => Err(EmitError::missing(path)),
        RunsOn::Labels(labels) => Ok(Node::strings(labels)),
        RunsOn::Group { group, .. } if group.is_empty() => {
            Err(EmitError::missing(child(path, "group")))
        }
        RunsOn::Group { group, labels } => Ok(Fields::new()
            .str("group", group)
            .strings("labels", labels)
            .into_node()),
    }
}

/// Resolve prerequisites to job ids. Ids pass through verbatim; job values
/// are looked up in the enclosing workflow and the first equal job wins.
fn needs(needs: &[JobRef], workflow: &Workflow, path: &str) -> Result<Option<Node>> {
    if needs.is_empty() {
        return Ok(None);
    }

    let mut ids = Vec::with_capacity(needs.len());
    for (i, reference) in needs.iter().enumerate() {
        match reference {
            JobRef::Id(id) => ids.push(id.clone()),
            JobRef::Job(target) => {
                let key = workflow
                    .jobs
                    .iter()
                    .find(|(_, candidate)| *candidate == target.as_ref())
                    .map(|(key, _)| key.clone())
                    .ok_or_else(|| EmitError::UnknownJobReference {
                        path: item(path, i),
                        reference: describe(target),
                    })?;
                ids.push(key);
            }
        }
    }

    Ok(Some(if ids.len() <= FLOW_NEEDS_MAX {
        Node::FlowSeq(ids)
    } else {
        Node::strings(&ids)
    }))
}

fn describe(job: &Job) -> String {
    if job.name.is_empty() {
        "<unnamed job>".to_string()
    } else {
        format!("job named '{}'", job.name)
    }
}

fn environment(environment: &Environment) -> Node {
    match environment {
        Environment::Name(name) => Node::Str(name.render()),
        Environment::WithUrl { name, url } => Fields::new()
            .text("name", name)
            .text("url", url)
            .into_node(),
    }
}

fn strategy(strategy: &Strategy, path: &str) -> Result<Fields> {
    let spec = match &strategy.matrix {
        Some(MatrixSpec::Expr(expr)) => Some(Node::Str(expr.wrapped())),
        Some(MatrixSpec::Matrix(m)) if !m.is_empty() => Some(matrix(m, &child(path, "matrix"))?),
        Some(MatrixSpec::Matrix(_)) | None => None,
    };

    Ok(Fields::new()
        .opt_node("matrix", spec)
        .opt_bool("fail-fast", strategy.fail_fast)
        .uint("max-parallel", strategy.max_parallel))
}

/// Dimensions in key order, then `include`, then `exclude`. Exclusions may
/// only name existing dimensions.
/// Keys of the matrix mapping that cannot name a dimension.
const MATRIX_KEYWORDS: [&str; 2] = ["include", "exclude"];

fn matrix(matrix: &Matrix, path: &str) -> Result<Node> {
    let mut fields = Fields::new();
    for (dimension, values) in &matrix.dimensions {
        let at = child(path, dimension);
        if MATRIX_KEYWORDS.contains(&dimension.as_str()) {
            return Err(EmitError::InvalidIdentifier {
                path: at,
                value: dimension.clone(),
            });
        }
        let values = values
            .iter()
            .enumerate()
            .map(|(i, v)| value(v, &item(&at, i)))
            .collect::<Result<Vec<_>>>()?;
        fields = fields.node(dimension, Node::Seq(values));
    }

    let include = combinations(&matrix.include, &child(path, "include"))?;

    let exclude_path = child(path, "exclude");
    for (i, entry) in matrix.exclude.iter().enumerate() {
        if let Some(unknown) = entry.keys().find(|k| !matrix.dimensions.contains_key(*k)) {
            return Err(EmitError::UnknownMatrixDimension {
                path: item(&exclude_path, i),
                dimension: unknown.clone(),
            });
        }
    }
    let exclude = combinations(&matrix.exclude, &exclude_path)?;

    Ok(fields
        .non_empty("include", include)
        .non_empty("exclude", exclude)
        .into_node())
}

fn combinations(entries: &[BTreeMap<String, Value>], path: &str) -> Result<Node> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| value_map(entry, &item(path, i)))
        .collect::<Result<Vec<_>>>()
        .map(Node::Seq)
}

fn container(container: &Container, path: &str) -> Result<Node> {
    if container.image.is_empty() {
        return Err(EmitError::missing(child(path, "image")));
    }

    let credentials = container.credentials.as_ref().map(|c| {
        Fields::new()
            .text("username", &c.username)
            .text("password", &c.password)
    });

    let ports = container
        .ports
        .iter()
        .map(|port| match port {
            Port::Number(n) => Node::Int(i64::from(*n)),
            Port::Mapping(m) => Node::str(m.as_str()),
        })
        .collect();

    Ok(Fields::new()
        .text("image", &container.image)
        .sub("credentials", credentials.unwrap_or_default())
        .non_empty("env", value_map(&container.env, &child(path, "env"))?)
        .non_empty("ports", Node::Seq(ports))
        .strings("volumes", &container.volumes)
        .str("options", &container.options)
        .into_node())
}

fn secrets(secrets: &JobSecrets) -> Node {
    match secrets {
        JobSecrets::Inherit => Node::str("inherit"),
        JobSecrets::Map(map) => Node::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), Node::Str(v.render())))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::options::EmitOptions;
    use crate::yaml::write_document;
    use ghgen_schema::expr::context::{matrix as matrix_ctx, secrets as secrets_ctx};
    use ghgen_schema::workflow::{Credentials, Step};

    fn render(workflow: &Workflow) -> Result<String> {
        super::super::workflow(workflow, &EmitOptions::default())
            .map(|node| write_document(&node, None))
    }

    #[test]
    fn test_needs_resolves_job_values() {
        let build = Job::new("ubuntu-latest").step(Step::run("cargo build"));
        let lint = Job::new("ubuntu-latest").step(Step::run("cargo clippy"));
        let test = Job::new("ubuntu-latest").needs(&build).needs("lint");

        let workflow = Workflow::new("CI")
            .with_job("lint", lint)
            .with_job("build", build)
            .with_job("test", test);

        let out = render(&workflow).unwrap();
        assert!(out.contains("    needs: [build, lint]\n"), "{out}");
    }

    #[test]
    fn test_long_needs_is_block_list() {
        let test = Job::new("ubuntu-latest")
            .needs("a")
            .needs("b")
            .needs("c")
            .needs("d");
        let out = render(&Workflow::new("CI").with_job("test", test)).unwrap();
        assert!(
            out.contains("    needs:\n      - a\n      - b\n      - c\n      - d\n"),
            "{out}"
        );
    }

    #[test]
    fn test_unknown_job_value() {
        let orphan = Job::new("windows-latest").with_name("Orphan");
        let test = Job::new("ubuntu-latest").needs("lint").needs(orphan);
        let err = render(&Workflow::new("CI").with_job("test", test)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownJobReference);
        assert_eq!(err.path(), "jobs.test.needs[1]");
    }

    #[test]
    fn test_matrix_runs_on() {
        let job = Job::new(matrix_ctx::get("os")).with_strategy(
            Strategy::matrix(Matrix::new().dimension("os", ["ubuntu-latest", "macos-latest"]))
                .fail_fast(false),
        );
        let out = render(&Workflow::new("CI").with_job("test", job)).unwrap();
        assert!(out.contains("    runs-on: ${{ matrix.os }}\n"), "{out}");
        let strategy = concat!(
            "    strategy:\n",
            "      matrix:\n",
            "        os:\n",
            "          - ubuntu-latest\n",
            "          - macos-latest\n",
            "      fail-fast: false\n",
        );
        assert!(out.contains(strategy), "{out}");
    }

    #[test]
    fn test_matrix_include_exclude() {
        let matrix = Matrix::new()
            .dimension("rust", ["stable", "nightly"])
            .include([("rust", "beta")])
            .exclude([("rust", "nightly")]);
        let job = Job::new("ubuntu-latest").with_strategy(Strategy::matrix(matrix));
        let out = render(&Workflow::new("CI").with_job("test", job)).unwrap();
        let include = out.find("include:").unwrap();
        let exclude = out.find("exclude:").unwrap();
        assert!(out.find("rust:").unwrap() < include && include < exclude);
    }

    #[test]
    fn test_exclude_unknown_dimension() {
        let matrix = Matrix::new()
            .dimension("os", ["ubuntu-latest"])
            .exclude([("arch", "arm64")]);
        let job = Job::new("ubuntu-latest").with_strategy(Strategy::matrix(matrix));
        let err = render(&Workflow::new("CI").with_job("test", job)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownMatrixDimension);
        assert_eq!(err.path(), "jobs.test.strategy.matrix.exclude[0]");
    }

    #[test]
    fn test_reserved_dimension_name() {
        for keyword in ["include", "exclude"] {
            let spec = Matrix::new()
                .dimension(keyword, ["x"])
                .include([("os", "linux")]);
            let job = Job::new("ubuntu-latest").with_strategy(Strategy::matrix(spec));
            let err = render(&Workflow::new("CI").with_job("test", job)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
            assert_eq!(err.path(), format!("jobs.test.strategy.matrix.{keyword}"));
        }
    }

    #[test]
    fn test_missing_runs_on() {
        let job = Job {
            steps: vec![Step::run("make").into()],
            ..Default::default()
        };
        let err = render(&Workflow::new("CI").with_job("build", job)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteRequired);
        assert_eq!(err.path(), "jobs.build.runs-on");
    }

    #[test]
    fn test_reusable_job() {
        let mut secrets = BTreeMap::new();
        secrets.insert("token".to_string(), secrets_ctx::github_token().into());
        let job = Job::reusable("./.github/workflows/deploy.yml")
            .with_input("environment", "prod")
            .with_secrets(JobSecrets::Map(secrets));
        let out = render(&Workflow::new("CI").with_job("deploy", job)).unwrap();
        let call = concat!(
            "    uses: ./.github/workflows/deploy.yml\n",
            "    with:\n",
            "      environment: prod\n",
            "    secrets:\n",
            "      token: ${{ secrets.GITHUB_TOKEN }}\n",
        );
        assert!(out.contains(call), "{out}");

        let mixed = Job::reusable("./.github/workflows/deploy.yml").step(Step::run("make"));
        let err = render(&Workflow::new("CI").with_job("deploy", mixed)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidJobShape);
    }

    #[test]
    fn test_services_and_container() {
        let postgres = Container::image("postgres:16")
            .with_env("POSTGRES_PASSWORD", "postgres")
            .with_port(5432)
            .with_options("--health-cmd pg_isready");
        let job = Job::new("ubuntu-latest")
            .with_container(Container::image("rust:1").with_credentials(Credentials {
                username: "bot".into(),
                password: secrets_ctx::get("REGISTRY_TOKEN").into(),
            }))
            .with_service("postgres", postgres);
        let out = render(&Workflow::new("CI").with_job("test", job)).unwrap();
        assert!(
            out.contains("      credentials:\n        username: bot\n"),
            "{out}"
        );
        assert!(out.contains("        ports:\n          - 5432\n"), "{out}");

        let bad = Job::new("ubuntu-latest").with_service("db", Container::default());
        let err = render(&Workflow::new("CI").with_job("test", bad)).unwrap_err();
        assert_eq!(err.path(), "jobs.test.services.db.image");
    }
}
