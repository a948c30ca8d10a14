//! Cloud credentials and infrastructure tooling.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `aws-actions/configure-aws-credentials@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigureAwsCredentials {
    /// AWS region
    pub aws_region: String,
    /// Role ARN to assume through OIDC
    pub role_to_assume: Text,
    /// Static access key id
    pub aws_access_key_id: Text,
    /// Static secret access key
    pub aws_secret_access_key: Text,
    /// Session name for the assumed role
    pub role_session_name: String,
    /// Session duration in seconds
    pub role_duration_seconds: u32,
    /// OIDC audience
    pub audience: String,
    /// Mask the account id in logs
    pub mask_aws_account_id: bool,
    /// Expose the credentials as step outputs
    pub output_credentials: bool,
}

impl ConfigureAwsCredentials {
    /// Assume a role through OIDC
    pub fn assume_role(region: impl Into<String>, role: impl Into<Text>) -> Self {
        Self {
            aws_region: region.into(),
            role_to_assume: role.into(),
            ..Default::default()
        }
    }
}

impl Action for ConfigureAwsCredentials {
    fn reference(&self) -> String {
        "aws-actions/configure-aws-credentials@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("aws-region", &self.aws_region)
            .text("role-to-assume", &self.role_to_assume)
            .text("aws-access-key-id", &self.aws_access_key_id)
            .text("aws-secret-access-key", &self.aws_secret_access_key)
            .str("role-session-name", &self.role_session_name)
            .uint("role-duration-seconds", self.role_duration_seconds)
            .str("audience", &self.audience)
            .flag("mask-aws-account-id", self.mask_aws_account_id)
            .flag("output-credentials", self.output_credentials)
            .build()
    }
}

/// `hashicorp/setup-terraform@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupTerraform {
    /// Terraform version
    pub terraform_version: String,
    /// HCP Terraform hostname
    pub cli_config_credentials_hostname: String,
    /// HCP Terraform token
    pub cli_config_credentials_token: Text,
    /// Wrap the binary to expose outputs (action default: `true`)
    pub terraform_wrapper: Option<bool>,
}

impl Action for SetupTerraform {
    fn reference(&self) -> String {
        "hashicorp/setup-terraform@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("terraform_version", &self.terraform_version)
            .str(
                "cli_config_credentials_hostname",
                &self.cli_config_credentials_hostname,
            )
            .text(
                "cli_config_credentials_token",
                &self.cli_config_credentials_token,
            )
            .opt_flag("terraform_wrapper", self.terraform_wrapper)
            .build()
    }
}

step_entry!(ConfigureAwsCredentials, SetupTerraform);
