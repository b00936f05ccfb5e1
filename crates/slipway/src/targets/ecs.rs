//! ECS Fargate task definition.
//!
//! Emits a `task-definition.json` suitable for
//! `aws ecs register-task-definition --cli-input-json`. The document is
//! built with [`serde_json::json!`] so the substituted values stay
//! properly escaped.

use snafu::prelude::*;

use crate::{DeployContext, Error, RenderJsonSnafu};

/// Smallest Fargate size, plenty for a single Streamlit process.
const TASK_CPU: &str = "256";
const TASK_MEMORY: &str = "512";

pub fn task_definition(ctx: &DeployContext) -> serde_json::Value {
    serde_json::json!({
        "family": ctx.app_name,
        "networkMode": "awsvpc",
        "requiresCompatibilities": ["FARGATE"],
        "cpu": TASK_CPU,
        "memory": TASK_MEMORY,
        "executionRoleArn": format!(
            "arn:aws:iam::{}:role/ecsTaskExecutionRole",
            ctx.account_id
        ),
        "containerDefinitions": [
            {
                "name": ctx.app_name,
                "image": ctx.image(),
                "essential": true,
                "portMappings": [
                    {
                        "containerPort": ctx.port,
                        "protocol": "tcp"
                    }
                ],
                "logConfiguration": {
                    "logDriver": "awslogs",
                    "options": {
                        "awslogs-group": format!("/ecs/{}", ctx.app_name),
                        "awslogs-region": ctx.region,
                        "awslogs-stream-prefix": "ecs"
                    }
                }
            }
        ]
    })
}

pub fn render(ctx: &DeployContext) -> Result<String, Error> {
    serde_json::to_string_pretty(&task_definition(ctx)).context(RenderJsonSnafu)
}

pub fn instructions(ctx: &DeployContext) -> String {
    [
        "1. Build the container image and push it to ECR:".to_owned(),
        String::new(),
        format!(
            "   aws ecr create-repository --repository-name {} --region {}",
            ctx.app_name, ctx.region
        ),
        format!("   docker build -t {} .", ctx.app_name),
        format!("   docker tag {}:latest {}", ctx.app_name, ctx.image()),
        format!("   docker push {}", ctx.image()),
        String::new(),
        "2. Register the task definition:".to_owned(),
        String::new(),
        format!(
            "   aws ecs register-task-definition --cli-input-json \
             file://task-definition.json --region {}",
            ctx.region
        ),
        String::new(),
        "3. Create a cluster and a service running the task:".to_owned(),
        String::new(),
        format!(
            "   aws ecs create-cluster --cluster-name {}-cluster --region {}",
            ctx.app_name, ctx.region
        ),
        format!(
            "   aws ecs create-service --cluster {cluster} --service-name {app} \
             --task-definition {app} --desired-count 1 --launch-type FARGATE --region {region}",
            cluster = format!("{}-cluster", ctx.app_name),
            app = ctx.app_name,
            region = ctx.region
        ),
        String::new(),
        format!(
            "4. Open port {} in the service's security group to reach the app.",
            ctx.port
        ),
    ]
    .join("\n")
}
