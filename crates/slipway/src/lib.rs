//! # Slipway
//!
//! Slipway generates the deployment scaffolding needed to ship a Streamlit
//! dashboard application to AWS. It asks a few questions (or takes the
//! answers as flags), writes one configuration file for the chosen
//! deployment target, and prints the commands to run next.
//!
//! ## Targets
//!
//! - **App Runner**: an `apprunner.yaml` source configuration manifest.
//! - **ECS on Fargate**: a `task-definition.json` ready for
//!   `register-task-definition`.
//! - **EC2**: a `user-data.sh` script that provisions a single instance.
//! - **Lambda**: a `lambda_handler.py` stub to build an API variant from.
//!
//! Slipway deliberately stops at the waterline: it writes files and prints
//! instructions, it does not call AWS APIs or deploy anything. The emitted
//! files are plain text the user owns from that point on.
//!
//! ## Error Handling
//!
//! Slipway exposes a comprehensive error enum [`Error`], which encompasses
//! all possible errors that may occur during operations. Functions that can
//! result in errors return a `Result` type with this [`Error`], ensuring
//! robust error handling throughout the library.

pub mod config;
pub mod prompt;
pub mod targets;
#[cfg(test)]
mod test;

/// Top-level error enum that encompasses all errors.
#[derive(snafu::Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Invalid choice '{input}': enter a number from 1 to 4"))]
    InvalidChoice { input: String },

    #[snafu(display("'{input}' is not a deployment target"))]
    UnknownTarget { input: String },

    #[snafu(display("Could not read input: {source}"))]
    ReadInput { source: std::io::Error },

    #[snafu(display("Could not write prompt: {source}"))]
    WritePrompt { source: std::io::Error },

    #[snafu(display("Could not create directory {path:?}: {source}"))]
    CreateDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not write file {path:?}: {source}"))]
    WriteFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not render the App Runner manifest: {source}"))]
    RenderYaml { source: serde_yaml::Error },

    #[snafu(display("Could not render the task definition: {source}"))]
    RenderJson { source: serde_json::Error },

    #[snafu(display("Could not read config file '{path:?}': {source}"))]
    ConfigRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not parse config file '{path:?}': {source}"))]
    ConfigParse {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },
}

type Result<T, E = Error> = core::result::Result<T, E>;

/// Region used when the user accepts the prompt default.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Name the dashboard app ships under.
pub const DEFAULT_APP_NAME: &str = "trading-signals";

/// Streamlit's default serving port.
pub const DEFAULT_PORT: u16 = 8501;

/// Stands in for a real account id in emitted files until the user
/// supplies one.
pub const ACCOUNT_ID_PLACEHOLDER: &str = "<ACCOUNT_ID>";

/// The four deployment targets slipway can scaffold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    AppRunner,
    EcsFargate,
    Ec2,
    Lambda,
}

impl Target {
    /// All targets, in menu order.
    pub const ALL: [Target; 4] = [
        Target::AppRunner,
        Target::EcsFargate,
        Target::Ec2,
        Target::Lambda,
    ];

    /// Maps a 1-based menu selection to a target.
    ///
    /// Returns `None` for anything outside `1..=4`, the one user error
    /// the interactive flow must handle.
    pub fn from_menu_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Target::AppRunner),
            2 => Some(Target::EcsFargate),
            3 => Some(Target::Ec2),
            4 => Some(Target::Lambda),
            _ => None,
        }
    }

    /// The file this target emits into the output directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Target::AppRunner => "apprunner.yaml",
            Target::EcsFargate => "task-definition.json",
            Target::Ec2 => "user-data.sh",
            Target::Lambda => "lambda_handler.py",
        }
    }

    /// Human-facing menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Target::AppRunner => "App Runner (fully managed, easiest)",
            Target::EcsFargate => "ECS on Fargate (containers, most control)",
            Target::Ec2 => "EC2 instance (user data provisioning)",
            Target::Lambda => "Lambda (handler stub only)",
        }
    }
}

impl core::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Target::AppRunner => "apprunner",
            Target::EcsFargate => "ecs-fargate",
            Target::Ec2 => "ec2",
            Target::Lambda => "lambda",
        })
    }
}

impl std::str::FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "apprunner" | "app-runner" => Ok(Target::AppRunner),
            "ecs-fargate" | "ecs" | "fargate" => Ok(Target::EcsFargate),
            "ec2" => Ok(Target::Ec2),
            "lambda" => Ok(Target::Lambda),
            _ => UnknownTargetSnafu { input: s }.fail(),
        }
    }
}

/// Everything the templates interpolate.
///
/// This is the entire data model: a handful of strings substituted into
/// otherwise static files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeployContext {
    /// AWS region, free text, interpolated verbatim.
    pub region: String,
    /// Optional named AWS profile. When present, `AWS_PROFILE` is set for
    /// the current process and echoed in the instructions.
    pub profile: Option<String>,
    /// Account id or the `<ACCOUNT_ID>` placeholder.
    pub account_id: String,
    /// Name used for the image, task family, log group and service unit.
    pub app_name: String,
    /// Port the app serves on (App Runner overrides this with its own).
    pub port: u16,
}

impl Default for DeployContext {
    fn default() -> Self {
        DeployContext {
            region: DEFAULT_REGION.to_owned(),
            profile: None,
            account_id: ACCOUNT_ID_PLACEHOLDER.to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl DeployContext {
    /// The ECR image reference the container targets use.
    pub fn image(&self) -> String {
        format!(
            "{}.dkr.ecr.{}.amazonaws.com/{}:latest",
            self.account_id, self.region, self.app_name
        )
    }
}
