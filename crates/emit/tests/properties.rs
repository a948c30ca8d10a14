#![allow(missing_docs)]

use ghgen_emit::{EmitOptions, emit_workflow};
use ghgen_schema::workflow::{Job, Step, Triggers, Workflow};
use indexmap::IndexMap;
use proptest::prelude::*;
use serde_yaml::Value as Yaml;
use std::collections::BTreeMap;

/// Strings that stress the quoting rules: reserved words, indicators,
/// numbers, padding, and plain text.
fn tricky_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        prop::sample::select(vec![
            "true", "False", "yes", "NO", "on", "off", "null", "~", "y", "n", ".inf", "-.inf",
            ".nan", "<<", "0", "1.5", "1e3", "0x1F", "-", "?", "*", "&anchor", "!tag", "@me",
            "`cmd`", "a: b", "a #b", "50%", "it's", "say \"hi\"", "[x]", "{x}", "a,b", " pad",
            "pad ", "tab\there", "back\\slash", "${{ github.sha }}", "line1\nline2",
            "trailing\n", "two\n\n", "\u{2028}", "café",
        ])
        .prop_map(String::from),
        "[ -~]{0,16}",
        "[a-zA-Z0-9 :#\\-\n]{0,24}",
    ]
}

fn env_key() -> impl Strategy<Value = String> {
    "[A-Z_][A-Z0-9_]{0,8}"
}

fn job_id() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_-]{0,8}"
}

proptest! {
    #[test]
    fn env_values_read_back_unchanged(
        env in prop::collection::btree_map(env_key(), tricky_string(), 0..8)
    ) {
        let workflow = env.iter().fold(
            Workflow::new("Quoting").on(Triggers::default().manual()),
            |w, (k, v)| w.with_env(k.clone(), v.clone()),
        );
        let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
        let doc: Yaml = serde_yaml::from_str(&out).unwrap();

        let parsed: BTreeMap<String, String> = match &doc["env"] {
            Yaml::Mapping(map) => map
                .iter()
                .map(|(k, v)| (k.as_str().unwrap().to_string(), v.as_str().unwrap().to_string()))
                .collect(),
            _ => BTreeMap::new(),
        };
        prop_assert_eq!(parsed, env);
    }

    #[test]
    fn run_scripts_read_back_unchanged(script in tricky_string()) {
        let job = Job::new("ubuntu-latest").step(Step::run(script.clone()).with_name("script"));
        let workflow = Workflow::new("Scripts").with_job("run", job);
        let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
        let doc: Yaml = serde_yaml::from_str(&out).unwrap();

        let step = &doc["jobs"]["run"]["steps"][0];
        let expected = if script.is_empty() { None } else { Some(script.as_str()) };
        prop_assert_eq!(step["run"].as_str(), expected);
    }

    #[test]
    fn emission_is_deterministic(
        ids in prop::collection::vec(job_id(), 1..6),
        env in prop::collection::btree_map(env_key(), "[a-z]{1,6}", 0..4),
    ) {
        let build = || {
            let mut jobs = IndexMap::new();
            for id in &ids {
                let job = Job::new("ubuntu-latest").step(Step::run("true"));
                jobs.insert(id.clone(), job);
            }
            let mut workflow = Workflow::new("Det");
            workflow.jobs = jobs;
            for (k, v) in &env {
                workflow = workflow.with_env(k.clone(), v.clone());
            }
            workflow
        };

        let first = emit_workflow(&build(), &EmitOptions::default()).unwrap();
        let second = emit_workflow(&build(), &EmitOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn user_maps_are_sorted_and_jobs_keep_order(
        ids in prop::collection::vec(job_id(), 1..6),
        env in prop::collection::btree_map(env_key(), "[a-z]{1,6}", 1..6),
    ) {
        let mut workflow = Workflow::new("Order");
        for id in &ids {
            workflow = workflow.with_job(id.clone(), Job::new("ubuntu-latest"));
        }
        for (k, v) in env.iter().rev() {
            workflow = workflow.with_env(k.clone(), v.clone());
        }
        let expected_jobs: Vec<String> = workflow.jobs.keys().cloned().collect();

        let out = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
        let doc: Yaml = serde_yaml::from_str(&out).unwrap();

        let env_keys: Vec<&str> = doc["env"]
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Yaml::as_str)
            .collect();
        let mut sorted = env_keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(env_keys, sorted);

        let job_keys: Vec<String> = doc["jobs"]
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(|k| k.as_str().map(String::from))
            .collect();
        prop_assert_eq!(job_keys, expected_jobs);

        let top: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Yaml::as_str)
            .collect();
        prop_assert_eq!(top, ["name", "on", "env", "jobs"]);
    }
}
