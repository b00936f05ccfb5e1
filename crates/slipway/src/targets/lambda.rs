//! Lambda handler stub.
//!
//! Streamlit's long-running server does not map onto Lambda, so this
//! target only scaffolds a Python handler to grow an API variant from.

use crate::{DeployContext, Error};

const TEMPLATE: &str = include_str!("../../resources/templates/lambda_handler.py.tmpl");

pub fn render(ctx: &DeployContext) -> Result<String, Error> {
    Ok(TEMPLATE.replace("{{.app_name}}", &ctx.app_name))
}

pub fn instructions(ctx: &DeployContext) -> String {
    [
        "1. Zip the handler and create the function:".to_owned(),
        String::new(),
        "   zip function.zip lambda_handler.py".to_owned(),
        format!(
            "   aws lambda create-function --function-name {app} \
             --runtime python3.12 --handler lambda_handler.lambda_handler \
             --zip-file fileb://function.zip \
             --role arn:aws:iam::{account}:role/<LAMBDA_EXECUTION_ROLE> \
             --region {region}",
            app = ctx.app_name,
            account = ctx.account_id,
            region = ctx.region
        ),
        String::new(),
        "2. Note: the stub returns a fixed 200. A Streamlit dashboard cannot".to_owned(),
        "   run inside Lambda; use App Runner or ECS for the full app.".to_owned(),
    ]
    .join("\n")
}
