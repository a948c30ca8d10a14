#![allow(missing_docs)]

use ghgen_actions::actions::Checkout;
use ghgen_actions::rust::{RustCache, RustToolchain};
use ghgen_codeowners::{CodeOwners, Rule};
use ghgen_emit::{
    EmitOptions, ErrorKind, emit_codeowners, emit_dependabot, emit_issue_form, emit_workflow,
};
use ghgen_schema::dependabot::{Registry, Update};
use ghgen_schema::expr::context::{matrix, steps};
use ghgen_schema::expr::{on_branch, success};
use ghgen_schema::form::{Dropdown, Input, Markdown, Textarea};
use ghgen_schema::workflow::{
    Access, Concurrency, Job, Matrix, Permissions, Step, Strategy, Triggers, Workflow,
    WorkflowDispatchTrigger, WorkflowInput,
};
use ghgen_schema::{Dependabot, Form};
use serde_yaml::Value as Yaml;

fn parse(text: &str) -> Yaml {
    serde_yaml::from_str(text).unwrap_or_else(|e| panic!("invalid YAML: {e}\n{text}"))
}

fn at<'a>(doc: &'a Yaml, path: &[&str]) -> &'a Yaml {
    path.iter().fold(doc, |node, key| &node[*key])
}

#[test]
fn empty_workflow() {
    let out = emit_workflow(&Workflow::new("Empty"), &EmitOptions::default()).unwrap();
    assert!(out.lines().any(|l| l == "name: Empty"));
    assert!(out.lines().any(|l| l == "on: {}"));
    assert!(!out.contains("jobs:"));

    let doc = parse(&out);
    let on = at(&doc, &["on"]).as_mapping();
    assert!(on.is_some_and(serde_yaml::Mapping::is_empty));
}

#[test]
fn matrix_expression_in_runs_on() {
    let job = Job::new(matrix::get("os"))
        .with_strategy(Strategy::matrix(
            Matrix::new().dimension("os", ["ubuntu-latest", "macos-latest"]),
        ))
        .step(Checkout::default());
    let workflow = Workflow::new("CI")
        .on(Triggers::default().push_branches(["main"]))
        .with_job("test", job);

    let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
    assert!(out.contains("runs-on: ${{ matrix.os }}"));

    let doc = parse(&out);
    let os = at(&doc, &["jobs", "test", "strategy", "matrix", "os"]);
    assert_eq!(os[0].as_str(), Some("ubuntu-latest"));
    assert_eq!(os[1].as_str(), Some("macos-latest"));
}

#[test]
fn all_fields_step() {
    let step = Step::uses("actions/checkout@v4")
        .with_id("step1")
        .with_name("Test Step")
        .with_if(success())
        .with_input("fetch-depth", 0)
        .with_env("KEY", "value")
        .with_working_directory("/tmp")
        .continue_on_error()
        .with_timeout(30);
    let workflow = Workflow::new("CI").with_job("test", Job::new("ubuntu-latest").step(step));

    let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
    for fragment in [
        "id: step1",
        "name: Test Step",
        "if: ${{ success() }}",
        "uses: actions/checkout@v4",
        "with:",
        "fetch-depth: 0",
        "working-directory: /tmp",
        "continue-on-error: true",
        "timeout-minutes: 30",
    ] {
        assert!(out.contains(fragment), "missing {fragment:?} in\n{out}");
    }

    let doc = parse(&out);
    let parsed = &at(&doc, &["jobs", "test", "steps"])[0];
    assert_eq!(parsed["env"]["KEY"].as_str(), Some("value"));
    assert_eq!(parsed["with"]["fetch-depth"].as_i64(), Some(0));
}

#[test]
fn needs_with_string_reference() {
    let workflow = Workflow::new("CI")
        .with_job("build", Job::new("ubuntu-latest").step(Step::run("make")))
        .with_job(
            "test",
            Job::new("ubuntu-latest")
                .needs("build")
                .step(Step::run("make test")),
        );

    let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
    let doc = parse(&out);
    let needs = at(&doc, &["jobs", "test", "needs"]);
    assert_eq!(needs[0].as_str(), Some("build"));
}

#[test]
fn needs_with_job_value() {
    let build = Job::new("ubuntu-latest").step(Step::run("make"));
    let workflow = Workflow::new("CI")
        .with_job("build", build.clone())
        .with_job("test", Job::new("ubuntu-latest").needs(build));

    let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
    assert!(out.contains("needs: [build]"));
}

#[test]
fn dependabot_with_all_registry_fields() {
    let registry = Registry {
        username: "user".to_string(),
        password: "${{ secrets.NPM_PASSWORD }}".to_string(),
        token: "${{ secrets.NPM_TOKEN }}".to_string(),
        key: "${{ secrets.NPM_KEY }}".to_string(),
        organization: "my-org".to_string(),
        replaces_base: true,
        ..Registry::new("npm-registry", "https://npm.pkg.github.com")
    };
    let config = Dependabot::new()
        .registry("npm-github", registry)
        .update(Update::new("npm", "/", "weekly"));

    let out = emit_dependabot(&config, &EmitOptions::default()).unwrap();
    assert!(out.starts_with("version: 2\n"));

    let doc = parse(&out);
    let entry = at(&doc, &["registries", "npm-github"])
        .as_mapping()
        .unwrap();
    let keys: Vec<_> = entry.keys().filter_map(Yaml::as_str).collect();
    assert_eq!(
        keys,
        [
            "type",
            "url",
            "username",
            "password",
            "key",
            "token",
            "organization",
            "replaces-base",
        ]
    );
    let registry = at(&doc, &["registries", "npm-github"]);
    assert_eq!(registry["replaces-base"].as_bool(), Some(true));
    assert_eq!(registry["url"].as_str(), Some("https://npm.pkg.github.com"));
}

#[test]
fn codeowners_preserves_rule_order() {
    let codeowners = CodeOwners::builder()
        .rule(Rule::new("*", ["@org/default-team"]))
        .rule(Rule::new("*.go", ["@go-team"]))
        .build();

    let out = emit_codeowners(&codeowners).unwrap();
    let lines: Vec<_> = out.lines().collect();
    let header = lines.iter().position(|l| l.starts_with("# Generated by ghgen")).unwrap();
    let default = lines.iter().position(|l| *l == "* @org/default-team").unwrap();
    let go = lines.iter().position(|l| *l == "*.go @go-team").unwrap();
    assert!(header < default && default < go);
}

#[test]
fn realistic_workflow_parses() {
    let toolchain = steps::output("toolchain", "cachekey");
    let workflow = Workflow::new("Release")
        .with_run_name("Release ${{ github.ref_name }}")
        .on(Triggers {
            workflow_dispatch: Some(WorkflowDispatchTrigger::default().with_input(
                "channel",
                WorkflowInput::new("Release channel")
                    .required()
                    .with_options(["stable", "beta"])
                    .with_default("stable"),
            )),
            ..Triggers::default().push_branches(["main"]).cron("0 3 * * 1")
        })
        .with_permissions(Permissions::scoped().contents(Access::Write).into())
        .with_concurrency(Concurrency::group("release-${{ github.ref }}"))
        .with_job(
            "build",
            Job::new("ubuntu-latest")
                .with_if(on_branch("main"))
                .with_output("key", toolchain)
                .step(Checkout::default())
                .step(RustToolchain::default())
                .step(RustCache::default())
                .step(
                    Step::run("cargo build --release\ncargo test --release\n")
                        .with_name("Build: release"),
                ),
        );

    let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
    let doc = parse(&out);

    assert_eq!(
        at(&doc, &["on", "schedule"])[0]["cron"].as_str(),
        Some("0 3 * * 1")
    );
    let channel = at(&doc, &["on", "workflow_dispatch", "inputs", "channel"]);
    assert_eq!(channel["type"].as_str(), Some("choice"));
    assert_eq!(
        at(&doc, &["jobs", "build", "if"]).as_str(),
        Some("${{ github.ref == 'refs/heads/main' }}")
    );
    assert_eq!(
        at(&doc, &["jobs", "build", "steps"])[3]["run"].as_str(),
        Some("cargo build --release\ncargo test --release\n")
    );
    assert_eq!(
        at(&doc, &["jobs", "build", "steps"])[3]["name"].as_str(),
        Some("Build: release")
    );
    assert_eq!(
        at(&doc, &["permissions", "contents"]).as_str(),
        Some("write")
    );
}

#[test]
fn issue_form_parses() {
    let form = Form::new("Bug report", "Something is broken")
        .with_title("[Bug]: ")
        .label("bug")
        .element(Markdown::new("Thanks for taking the time!"))
        .element(Input::new("version", "Version").required())
        .element(Textarea::new("logs", "Logs").render("shell"))
        .element(Dropdown::new("os", "OS", ["Linux", "macOS", "Windows"]).with_default(0));

    let out = emit_issue_form(&form, &EmitOptions::default()).unwrap();
    let doc = parse(&out);
    assert_eq!(doc["title"].as_str(), Some("[Bug]: "));
    let body = doc["body"].as_sequence().unwrap();
    assert_eq!(body.len(), 4);
    assert_eq!(body[1]["validations"]["required"].as_bool(), Some(true));
    assert_eq!(body[3]["attributes"]["default"].as_i64(), Some(0));
    assert_eq!(body[2]["attributes"]["render"].as_str(), Some("shell"));
}

#[test]
fn errors_carry_kind_and_locator() {
    let orphan = Job::new("ubuntu-latest").with_name("orphan");
    let workflow = Workflow::new("CI").with_job("test", Job::new("ubuntu-latest").needs(orphan));
    let err = emit_workflow(&workflow, &EmitOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownJobReference);
    assert_eq!(err.path(), "jobs.test.needs[0]");
    assert!(err.to_string().starts_with("jobs.test.needs[0]: "));
}
