use std::fmt;

/// `GITHUB_TOKEN` permissions configuration.
///
/// Controls what the workflow or job can access using the automatic
/// `GITHUB_TOKEN`. `Scoped` with no scope set is emitted as `{}` and removes
/// every permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permissions {
    /// `read-all`
    ReadAll,
    /// `write-all`
    WriteAll,
    /// Per-scope access levels
    Scoped(ScopedPermissions),
}

impl Permissions {
    /// Per-scope permissions with nothing granted yet.
    #[must_use]
    pub fn scoped() -> ScopedPermissions {
        ScopedPermissions::default()
    }

    /// Explicitly grant nothing (`permissions: {}`).
    #[must_use]
    pub fn none() -> Self {
        Self::Scoped(ScopedPermissions::default())
    }
}

impl From<ScopedPermissions> for Permissions {
    fn from(value: ScopedPermissions) -> Self {
        Self::Scoped(value)
    }
}

/// Permission level for `GITHUB_TOKEN` scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    /// Read-only access
    Read,
    /// Read and write access
    Write,
    /// No access
    None,
    /// Any other level, passed through unchecked
    Other(String),
}

impl Access {
    /// On-wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::None => "none",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Access {
    fn from(value: &str) -> Self {
        match value {
            "read" => Self::Read,
            "write" => Self::Write,
            "none" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }
}

macro_rules! scopes {
    ($($(#[$doc:meta])* $field:ident => $key:literal),+ $(,)?) => {
        /// Access level per token scope. Unset scopes are omitted.
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct ScopedPermissions {
            $($(#[$doc])* pub $field: Option<Access>,)+
        }

        impl ScopedPermissions {
            $(
                #[doc = concat!("Set the `", $key, "` scope.")]
                #[must_use]
                pub fn $field(mut self, access: Access) -> Self {
                    self.$field = Some(access);
                    self
                }
            )+

            /// Set scopes in the order they are emitted: `(on-wire key, level)`.
            #[must_use]
            pub fn entries(&self) -> Vec<(&'static str, &Access)> {
                let mut entries = Vec::new();
                $(
                    if let Some(access) = &self.$field {
                        entries.push(($key, access));
                    }
                )+
                entries
            }

            /// Set a scope by its on-wire name. Unknown names are ignored and
            /// reported with `false`.
            pub fn set(&mut self, scope: &str, access: Access) -> bool {
                match scope {
                    $($key => self.$field = Some(access),)+
                    _ => return false,
                }
                true
            }
        }
    };
}

scopes! {
    /// GitHub Actions
    actions => "actions",
    /// Artifact attestations
    attestations => "attestations",
    /// Check runs and check suites
    checks => "checks",
    /// Repository contents, commits, branches, releases
    contents => "contents",
    /// Deployments
    deployments => "deployments",
    /// Discussions
    discussions => "discussions",
    /// OIDC token (for cloud authentication)
    id_token => "id-token",
    /// Issues
    issues => "issues",
    /// GitHub Models
    models => "models",
    /// GitHub Packages
    packages => "packages",
    /// GitHub Pages
    pages => "pages",
    /// Pull requests
    pull_requests => "pull-requests",
    /// Classic projects
    repository_projects => "repository-projects",
    /// Code scanning alerts
    security_events => "security-events",
    /// Commit statuses
    statuses => "statuses",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_scope_order() {
        let permissions = Permissions::scoped()
            .pull_requests(Access::Write)
            .contents(Access::Read)
            .id_token(Access::Write);

        let keys: Vec<_> = permissions.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["contents", "id-token", "pull-requests"]);
    }

    #[test]
    fn test_set_by_name() {
        let mut permissions = ScopedPermissions::default();
        assert!(permissions.set("security-events", Access::Write));
        assert!(!permissions.set("bogus", Access::Read));
        assert_eq!(permissions.security_events, Some(Access::Write));
    }

    #[test]
    fn test_access_passthrough() {
        assert_eq!(Access::from("read"), Access::Read);
        assert_eq!(Access::from("admin").as_str(), "admin");
    }
}
