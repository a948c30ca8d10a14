//! Docker's official build and publish actions.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `docker/setup-buildx-action@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupBuildx {
    /// Buildx version
    pub version: String,
    /// Builder driver (`docker-container`, `kubernetes`, `remote`)
    pub driver: String,
    /// Driver options, one per line
    pub driver_opts: Vec<String>,
    /// BuildKit daemon flags
    pub buildkitd_flags: String,
    /// Target platforms
    pub platforms: Vec<String>,
    /// Inline BuildKit config
    pub buildkitd_config_inline: String,
}

impl Action for SetupBuildx {
    fn reference(&self) -> String {
        "docker/setup-buildx-action@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("version", &self.version)
            .str("driver", &self.driver)
            .lines("driver-opts", &self.driver_opts)
            .str("buildkitd-flags", &self.buildkitd_flags)
            .csv("platforms", &self.platforms)
            .str("buildkitd-config-inline", &self.buildkitd_config_inline)
            .build()
    }
}

/// `docker/setup-qemu-action@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupQemu {
    /// binfmt image
    pub image: String,
    /// Platforms to install emulators for
    pub platforms: Vec<String>,
}

impl Action for SetupQemu {
    fn reference(&self) -> String {
        "docker/setup-qemu-action@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("image", &self.image)
            .csv("platforms", &self.platforms)
            .build()
    }
}

/// `docker/login-action@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Login {
    /// Registry host; empty logs in to Docker Hub
    pub registry: String,
    /// Username
    pub username: Text,
    /// Password or token
    pub password: Text,
    /// `true`, `false` or `auto` for Amazon ECR
    pub ecr: String,
    /// Log out at the end of the job (action default: `true`)
    pub logout: Option<bool>,
}

impl Login {
    /// Log in to GHCR with the workflow token.
    #[must_use]
    pub fn ghcr() -> Self {
        use ghgen_schema::expr::context::{github, secrets};

        Self {
            registry: "ghcr.io".to_string(),
            username: github::actor().into(),
            password: secrets::github_token().into(),
            ..Default::default()
        }
    }
}

impl Action for Login {
    fn reference(&self) -> String {
        "docker/login-action@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("registry", &self.registry)
            .text("username", &self.username)
            .text("password", &self.password)
            .str("ecr", &self.ecr)
            .opt_flag("logout", self.logout)
            .build()
    }
}

/// `docker/build-push-action@v6`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildPush {
    /// Build context
    pub context: String,
    /// Dockerfile path
    pub file: String,
    /// Push the result
    pub push: bool,
    /// Load the result into the local image store
    pub load: bool,
    /// Image tags
    pub tags: Vec<String>,
    /// Image labels
    pub labels: Vec<String>,
    /// Target platforms
    pub platforms: Vec<String>,
    /// Build arguments (`KEY=value`)
    pub build_args: Vec<String>,
    /// External cache sources
    pub cache_from: Vec<String>,
    /// Cache export destinations
    pub cache_to: Vec<String>,
    /// Build stage to stop at
    pub target: String,
    /// Build secrets (`id=value`)
    pub secrets: Vec<String>,
    /// Do not use the cache
    pub no_cache: bool,
    /// Always pull newer base images
    pub pull: bool,
    /// Provenance attestation (`false`, `mode=max`, ...)
    pub provenance: String,
    /// SBOM attestation
    pub sbom: String,
}

impl Action for BuildPush {
    fn reference(&self) -> String {
        "docker/build-push-action@v6".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("context", &self.context)
            .str("file", &self.file)
            .flag("push", self.push)
            .flag("load", self.load)
            .lines("tags", &self.tags)
            .lines("labels", &self.labels)
            .csv("platforms", &self.platforms)
            .lines("build-args", &self.build_args)
            .lines("cache-from", &self.cache_from)
            .lines("cache-to", &self.cache_to)
            .str("target", &self.target)
            .lines("secrets", &self.secrets)
            .flag("no-cache", self.no_cache)
            .flag("pull", self.pull)
            .str("provenance", &self.provenance)
            .str("sbom", &self.sbom)
            .build()
    }
}

/// `docker/metadata-action@v5`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Base image names
    pub images: Vec<String>,
    /// Tag rules (`type=ref,event=branch`, ...)
    pub tags: Vec<String>,
    /// Global tag flavor (`latest=auto`, ...)
    pub flavor: Vec<String>,
    /// Extra labels
    pub labels: Vec<String>,
    /// Extra annotations
    pub annotations: Vec<String>,
}

impl Action for Metadata {
    fn reference(&self) -> String {
        "docker/metadata-action@v5".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .lines("images", &self.images)
            .lines("tags", &self.tags)
            .lines("flavor", &self.flavor)
            .lines("labels", &self.labels)
            .lines("annotations", &self.annotations)
            .build()
    }
}

step_entry!(SetupBuildx, SetupQemu, Login, BuildPush, Metadata);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghcr_login_uses_expressions() {
        let inputs = Login::ghcr().inputs();
        assert_eq!(inputs["registry"], Value::from("ghcr.io"));
        assert!(matches!(inputs["username"], Value::Expr(_)));
        assert!(matches!(inputs["password"], Value::Expr(_)));
        assert!(!inputs.contains_key("logout"));
    }

    #[test]
    fn test_build_push_lists() {
        let build = BuildPush {
            push: true,
            tags: vec!["ghcr.io/o/app:latest".into(), "ghcr.io/o/app:1.0".into()],
            platforms: vec!["linux/amd64".into(), "linux/arm64".into()],
            ..Default::default()
        };
        let inputs = build.inputs();
        assert_eq!(
            inputs["tags"],
            Value::from("ghcr.io/o/app:latest\nghcr.io/o/app:1.0")
        );
        assert_eq!(inputs["platforms"], Value::from("linux/amd64,linux/arm64"));
        assert_eq!(inputs["push"], Value::Bool(true));
        assert_eq!(inputs.len(), 3);
    }
}
