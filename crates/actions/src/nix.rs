//! Nix installation and binary caches.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `cachix/install-nix-action@v30`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstallNix {
    /// `NIX_PATH` to set
    pub nix_path: String,
    /// Extra lines for `nix.conf`
    pub extra_nix_config: Vec<String>,
    /// Installer URL
    pub install_url: String,
    /// Token used for GitHub fetches
    pub github_access_token: Text,
}

impl Action for InstallNix {
    fn reference(&self) -> String {
        "cachix/install-nix-action@v30".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("nix_path", &self.nix_path)
            .lines("extra_nix_config", &self.extra_nix_config)
            .str("install_url", &self.install_url)
            .text("github_access_token", &self.github_access_token)
            .build()
    }
}

/// `cachix/cachix-action@v15`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cachix {
    /// Cache name
    pub name: String,
    /// Auth token for pushing
    pub auth_token: Text,
    /// Signing key for self-signed caches
    pub signing_key: Text,
    /// Only pull from the cache
    pub skip_push: bool,
    /// Regex of store paths not to push
    pub push_filter: String,
    /// Extra caches to pull from
    pub extra_pull_names: Vec<String>,
}

impl Cachix {
    /// Use a named cache
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Action for Cachix {
    fn reference(&self) -> String {
        "cachix/cachix-action@v15".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("name", &self.name)
            .text("authToken", &self.auth_token)
            .text("signingKey", &self.signing_key)
            .flag("skipPush", self.skip_push)
            .str("pushFilter", &self.push_filter)
            .csv("extraPullNames", &self.extra_pull_names)
            .build()
    }
}

step_entry!(InstallNix, Cachix);

#[cfg(test)]
mod tests {
    use super::*;
    use ghgen_schema::expr::context::secrets;

    #[test]
    fn test_cachix_keys_are_camel_case() {
        let cachix = Cachix {
            auth_token: secrets::get("CACHIX_AUTH_TOKEN").into(),
            skip_push: true,
            ..Cachix::new("my-cache")
        };
        let keys: Vec<_> = cachix.inputs().into_keys().collect();
        assert_eq!(keys, ["authToken", "name", "skipPush"]);
    }
}
