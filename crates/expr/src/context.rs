//! Context accessors.
//!
//! Each function returns a raw [`Expr`] naming a value in one of GitHub's
//! expression contexts. See
//! <https://docs.github.com/en/actions/learn-github-actions/contexts>.

use crate::Expr;

fn path(context: &str, rest: &str) -> Expr {
    Expr::new(format!("{context}.{rest}"))
}

/// The `github` context.
pub mod github {
    use super::{Expr, path};

    /// `github.<name>`
    #[must_use]
    pub fn field(name: &str) -> Expr {
        path("github", name)
    }

    /// `github.event.<path>`
    #[must_use]
    pub fn event(event_path: &str) -> Expr {
        path("github", &format!("event.{event_path}"))
    }

    /// `github.ref`
    #[must_use]
    pub fn git_ref() -> Expr {
        field("ref")
    }

    /// `github.ref_name`
    #[must_use]
    pub fn ref_name() -> Expr {
        field("ref_name")
    }

    /// `github.sha`
    #[must_use]
    pub fn sha() -> Expr {
        field("sha")
    }

    /// `github.event_name`
    #[must_use]
    pub fn event_name() -> Expr {
        field("event_name")
    }

    /// `github.actor`
    #[must_use]
    pub fn actor() -> Expr {
        field("actor")
    }

    /// `github.repository`
    #[must_use]
    pub fn repository() -> Expr {
        field("repository")
    }

    /// `github.repository_owner`
    #[must_use]
    pub fn repository_owner() -> Expr {
        field("repository_owner")
    }

    /// `github.head_ref`
    #[must_use]
    pub fn head_ref() -> Expr {
        field("head_ref")
    }

    /// `github.base_ref`
    #[must_use]
    pub fn base_ref() -> Expr {
        field("base_ref")
    }

    /// `github.workflow`
    #[must_use]
    pub fn workflow() -> Expr {
        field("workflow")
    }

    /// `github.run_id`
    #[must_use]
    pub fn run_id() -> Expr {
        field("run_id")
    }

    /// `github.run_number`
    #[must_use]
    pub fn run_number() -> Expr {
        field("run_number")
    }

    /// `github.token`
    #[must_use]
    pub fn token() -> Expr {
        field("token")
    }
}

/// The `runner` context.
pub mod runner {
    use super::{Expr, path};

    /// `runner.<name>`
    #[must_use]
    pub fn field(name: &str) -> Expr {
        path("runner", name)
    }

    /// `runner.os`
    #[must_use]
    pub fn os() -> Expr {
        field("os")
    }

    /// `runner.arch`
    #[must_use]
    pub fn arch() -> Expr {
        field("arch")
    }

    /// `runner.temp`
    #[must_use]
    pub fn temp() -> Expr {
        field("temp")
    }

    /// `runner.tool_cache`
    #[must_use]
    pub fn tool_cache() -> Expr {
        field("tool_cache")
    }
}

/// The `secrets` context.
pub mod secrets {
    use super::{Expr, path};

    /// `secrets.<name>`
    #[must_use]
    pub fn get(name: &str) -> Expr {
        path("secrets", name)
    }

    /// `secrets.GITHUB_TOKEN`
    #[must_use]
    pub fn github_token() -> Expr {
        get("GITHUB_TOKEN")
    }
}

/// The `matrix` context.
pub mod matrix {
    use super::{Expr, path};

    /// `matrix.<name>`
    #[must_use]
    pub fn get(name: &str) -> Expr {
        path("matrix", name)
    }
}

/// The `steps` context.
pub mod steps {
    use super::{Expr, path};
    use crate::StepOutput;

    /// `steps.<id>.outputs.<name>`, as a typed reference.
    #[must_use]
    pub fn output(step_id: &str, name: &str) -> StepOutput {
        StepOutput::new(step_id, name)
    }

    /// `steps.<id>.outcome`
    #[must_use]
    pub fn outcome(step_id: &str) -> Expr {
        path("steps", &format!("{step_id}.outcome"))
    }

    /// `steps.<id>.conclusion`
    #[must_use]
    pub fn conclusion(step_id: &str) -> Expr {
        path("steps", &format!("{step_id}.conclusion"))
    }
}

/// The `needs` context.
pub mod needs {
    use super::{Expr, path};
    use crate::JobOutput;

    /// `needs.<job>.outputs.<name>`, as a typed reference.
    #[must_use]
    pub fn output(job_id: &str, name: &str) -> JobOutput {
        JobOutput::new(job_id, name)
    }

    /// `needs.<job>.result`
    #[must_use]
    pub fn result(job_id: &str) -> Expr {
        path("needs", &format!("{job_id}.result"))
    }
}

/// The `inputs` context.
pub mod inputs {
    use super::{Expr, path};

    /// `inputs.<name>`
    #[must_use]
    pub fn get(name: &str) -> Expr {
        path("inputs", name)
    }
}

/// The `vars` context.
pub mod vars {
    use super::{Expr, path};

    /// `vars.<name>`
    #[must_use]
    pub fn get(name: &str) -> Expr {
        path("vars", name)
    }
}

/// The `env` context.
pub mod env {
    use super::{Expr, path};

    /// `env.<name>`
    #[must_use]
    pub fn get(name: &str) -> Expr {
        path("env", name)
    }
}

/// The `job` context.
pub mod job {
    use super::{Expr, path};

    /// `job.status`
    #[must_use]
    pub fn status() -> Expr {
        path("job", "status")
    }

    /// `job.services.<id>.ports[<port>]`
    #[must_use]
    pub fn service_port(service_id: &str, port: u16) -> Expr {
        path("job", &format!("services.{service_id}.ports[{port}]"))
    }
}

/// The `strategy` context.
pub mod strategy {
    use super::{Expr, path};

    /// `strategy.job-index`
    #[must_use]
    pub fn job_index() -> Expr {
        path("strategy", "job-index")
    }

    /// `strategy.job-total`
    #[must_use]
    pub fn job_total() -> Expr {
        path("strategy", "job-total")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(github::git_ref().raw(), "github.ref");
        assert_eq!(
            github::event("pull_request.number").raw(),
            "github.event.pull_request.number"
        );
        assert_eq!(runner::os().raw(), "runner.os");
        assert_eq!(secrets::get("NPM_TOKEN").raw(), "secrets.NPM_TOKEN");
        assert_eq!(matrix::get("os").raw(), "matrix.os");
        assert_eq!(steps::outcome("test").raw(), "steps.test.outcome");
        assert_eq!(steps::conclusion("test").raw(), "steps.test.conclusion");
        assert_eq!(needs::result("build").raw(), "needs.build.result");
        assert_eq!(inputs::get("version").raw(), "inputs.version");
        assert_eq!(vars::get("REGION").raw(), "vars.REGION");
        assert_eq!(env::get("HOME").raw(), "env.HOME");
        assert_eq!(strategy::job_index().raw(), "strategy.job-index");
        assert_eq!(
            job::service_port("redis", 6379).raw(),
            "job.services.redis.ports[6379]"
        );
    }

    #[test]
    fn test_accessors_are_atomic() {
        assert!(github::sha().is_atomic());
        assert!(job::service_port("db", 5432).is_atomic());
    }
}
