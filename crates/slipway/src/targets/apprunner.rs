//! App Runner source configuration.
//!
//! Emits the `apprunner.yaml` that App Runner reads from the repository
//! root when a service is created from source. Reference:
//! <https://docs.aws.amazon.com/apprunner/latest/dg/config-file.html>

use snafu::prelude::*;

use crate::{DeployContext, Error, RenderYamlSnafu};

/// App Runner ignores the app's own port and routes to this one.
pub const APP_RUNNER_PORT: u16 = 8080;

/// The `apprunner.yaml` document, top to bottom.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    pub version: String,
    pub runtime: String,
    pub build: Build,
    pub run: Run,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Build {
    pub commands: BuildCommands,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BuildCommands {
    pub build: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Run {
    pub command: String,
    pub network: Network,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Network {
    pub port: u16,
}

/// Builds the manifest for the given context.
pub fn manifest(_ctx: &DeployContext) -> Manifest {
    Manifest {
        version: "1.0".to_owned(),
        runtime: "python3".to_owned(),
        build: Build {
            commands: BuildCommands {
                build: vec!["pip install -r requirements.txt".to_owned()],
            },
        },
        run: Run {
            command: format!(
                "streamlit run app.py --server.port {APP_RUNNER_PORT} --server.address 0.0.0.0"
            ),
            network: Network {
                port: APP_RUNNER_PORT,
            },
        },
    }
}

pub fn render(ctx: &DeployContext) -> Result<String, Error> {
    serde_yaml::to_string(&manifest(ctx)).context(RenderYamlSnafu)
}

pub fn instructions(ctx: &DeployContext) -> String {
    [
        "1. Commit apprunner.yaml at the root of your app repository.".to_owned(),
        "2. Connect the repository in the App Runner console, or create the service".to_owned(),
        "   from the command line:".to_owned(),
        String::new(),
        format!(
            "   aws apprunner create-service --service-name {} --region {} \
             --source-configuration file://source-configuration.json",
            ctx.app_name, ctx.region
        ),
        String::new(),
        format!(
            "3. App Runner builds from source and serves on port {APP_RUNNER_PORT}. The"
        ),
        "   service URL is printed once the service reaches RUNNING.".to_owned(),
    ]
    .join("\n")
}
