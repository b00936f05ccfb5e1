//! EC2 user-data provisioning script.
//!
//! Emits a `user-data.sh` that installs Python and the app's
//! dependencies, then runs Streamlit under systemd. The script is a
//! checked-in template with placeholder substitution, so the shell text
//! stays reviewable as shell.

use crate::{DeployContext, Error};

const TEMPLATE: &str = include_str!("../../resources/templates/user-data.sh.tmpl");

pub fn render(ctx: &DeployContext) -> Result<String, Error> {
    Ok(TEMPLATE
        .replace("{{.app_name}}", &ctx.app_name)
        .replace("{{.port}}", &ctx.port.to_string()))
}

pub fn instructions(ctx: &DeployContext) -> String {
    [
        "1. Launch an instance with the generated user data:".to_owned(),
        String::new(),
        format!(
            "   aws ec2 run-instances --image-id <AMI_ID> --instance-type t3.small \
             --key-name <KEY_PAIR> --user-data file://user-data.sh --region {}",
            ctx.region
        ),
        String::new(),
        "2. Use an Amazon Linux 2023 AMI for the yum-based provisioning.".to_owned(),
        format!(
            "3. Open port {} in the instance's security group, then browse to",
            ctx.port
        ),
        format!("   http://<PUBLIC_IP>:{}", ctx.port),
    ]
    .join("\n")
}
