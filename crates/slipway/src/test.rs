use std::io::Cursor;

use pretty_assertions::assert_eq;

use crate::{config, prompt, targets, DeployContext, Error, Target};

fn ctx() -> DeployContext {
    DeployContext {
        region: "eu-west-2".to_owned(),
        profile: None,
        account_id: "123456789012".to_owned(),
        app_name: "trading-signals".to_owned(),
        port: 8501,
    }
}

#[test]
fn menu_choice_mapping() {
    assert_eq!(Target::from_menu_choice(1), Some(Target::AppRunner));
    assert_eq!(Target::from_menu_choice(2), Some(Target::EcsFargate));
    assert_eq!(Target::from_menu_choice(3), Some(Target::Ec2));
    assert_eq!(Target::from_menu_choice(4), Some(Target::Lambda));
    assert_eq!(Target::from_menu_choice(0), None);
    assert_eq!(Target::from_menu_choice(5), None);
}

#[test]
fn target_parses_from_flag_spellings() {
    assert_eq!("apprunner".parse::<Target>().unwrap(), Target::AppRunner);
    assert_eq!("app-runner".parse::<Target>().unwrap(), Target::AppRunner);
    assert_eq!("ecs".parse::<Target>().unwrap(), Target::EcsFargate);
    assert_eq!("ecs-fargate".parse::<Target>().unwrap(), Target::EcsFargate);
    assert_eq!("ec2".parse::<Target>().unwrap(), Target::Ec2);
    assert_eq!("lambda".parse::<Target>().unwrap(), Target::Lambda);
    assert!(matches!(
        "openstack".parse::<Target>(),
        Err(Error::UnknownTarget { ref input }) if input == "openstack"
    ));
}

#[test]
fn task_definition_carries_region_verbatim() {
    let rendered = targets::render(Target::EcsFargate, &ctx()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(doc["family"], "trading-signals");
    assert_eq!(
        doc["containerDefinitions"][0]["image"],
        "123456789012.dkr.ecr.eu-west-2.amazonaws.com/trading-signals:latest"
    );
    assert_eq!(
        doc["containerDefinitions"][0]["logConfiguration"]["options"]["awslogs-region"],
        "eu-west-2"
    );
    assert_eq!(
        doc["containerDefinitions"][0]["portMappings"][0]["containerPort"],
        8501
    );
    assert_eq!(
        doc["executionRoleArn"],
        "arn:aws:iam::123456789012:role/ecsTaskExecutionRole"
    );
}

#[test]
fn apprunner_manifest_is_valid_yaml() {
    let rendered = targets::render(Target::AppRunner, &ctx()).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
    assert_eq!(doc["version"].as_str(), Some("1.0"));
    assert_eq!(doc["runtime"].as_str(), Some("python3"));
    let command = doc["run"]["command"].as_str().unwrap();
    assert!(
        command.contains("streamlit run app.py"),
        "unexpected run command: {command}"
    );
    assert_eq!(
        doc["run"]["network"]["port"].as_u64(),
        Some(u64::from(targets::apprunner::APP_RUNNER_PORT))
    );
}

#[test]
fn user_data_substitutes_app_and_port() {
    let rendered = targets::render(Target::Ec2, &ctx()).unwrap();
    assert!(rendered.starts_with("#!/bin/bash"));
    assert!(rendered.contains("--server.port 8501"));
    assert!(rendered.contains("/opt/trading-signals"));
    assert!(
        !rendered.contains("{{."),
        "unsubstituted placeholder left in:\n{rendered}"
    );
}

#[test]
fn lambda_stub_names_the_app() {
    let rendered = targets::render(Target::Lambda, &ctx()).unwrap();
    assert!(rendered.contains("def lambda_handler(event, context):"));
    assert!(rendered.contains("trading-signals"));
    assert!(!rendered.contains("{{."));
}

#[test]
fn emit_writes_one_file_per_target() {
    let _ = env_logger::builder().try_init();
    let dir = tempfile::tempdir().unwrap();
    for target in Target::ALL {
        let path = targets::emit(target, &ctx(), dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            target.file_name()
        );
        assert!(path.exists());
    }
    let mut entries: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    entries.sort();
    assert_eq!(
        entries,
        vec![
            "apprunner.yaml",
            "lambda_handler.py",
            "task-definition.json",
            "user-data.sh",
        ]
    );
}

#[test]
fn emit_overwrites_with_updated_content() {
    let _ = env_logger::builder().try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = targets::emit(Target::EcsFargate, &ctx(), dir.path()).unwrap();

    let mut moved = ctx();
    moved.region = "us-west-1".to_owned();
    targets::emit(Target::EcsFargate, &moved, dir.path()).unwrap();

    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents.contains("us-west-1"));
    assert!(!contents.contains("eu-west-2"));
}

#[test]
fn invalid_menu_choice_is_an_error() {
    for bad in ["5", "0", "x", ""] {
        let mut input = Cursor::new(format!("{bad}\n").into_bytes());
        let mut output = Vec::new();
        let err = prompt::target(&mut input, &mut output).unwrap_err();
        assert!(
            matches!(err, Error::InvalidChoice { ref input } if input == bad),
            "expected InvalidChoice for {bad:?}"
        );
    }
}

#[test]
fn menu_selects_targets() {
    let mut input = Cursor::new(&b"2\n"[..]);
    let mut output = Vec::new();
    let target = prompt::target(&mut input, &mut output).unwrap();
    assert_eq!(target, Target::EcsFargate);

    let menu = String::from_utf8(output).unwrap();
    for target in Target::ALL {
        assert!(
            menu.contains(target.label()),
            "menu is missing {target}: {menu}"
        );
    }
}

#[test]
fn prompts_apply_defaults() {
    let mut output = Vec::new();

    let mut input = Cursor::new(&b"\n"[..]);
    let region = prompt::region(&mut input, &mut output, crate::DEFAULT_REGION).unwrap();
    assert_eq!(region, "us-east-1");

    let mut input = Cursor::new(&b"ap-southeast-2\n"[..]);
    let region = prompt::region(&mut input, &mut output, crate::DEFAULT_REGION).unwrap();
    assert_eq!(region, "ap-southeast-2");

    let mut input = Cursor::new(&b"\n"[..]);
    assert_eq!(prompt::profile(&mut input, &mut output).unwrap(), None);

    let mut input = Cursor::new(&b"staging\n"[..]);
    assert_eq!(
        prompt::profile(&mut input, &mut output).unwrap(),
        Some("staging".to_owned())
    );
}

#[test]
fn instructions_interpolate_region_and_profile() {
    let mut ctx = ctx();
    let text = targets::instructions(Target::AppRunner, &ctx);
    assert!(text.contains("--region eu-west-2"));
    assert!(!text.contains("AWS_PROFILE"));

    ctx.profile = Some("staging".to_owned());
    let text = targets::instructions(Target::AppRunner, &ctx);
    assert!(text.starts_with("export AWS_PROFILE=staging"));

    let text = targets::instructions(Target::EcsFargate, &ctx);
    assert!(text.contains("file://task-definition.json"));
    assert!(text.contains("--region eu-west-2"));

    let text = targets::instructions(Target::Ec2, &ctx);
    assert!(text.contains("file://user-data.sh"));

    let text = targets::instructions(Target::Lambda, &ctx);
    assert!(text.contains("123456789012"));
}

#[test]
fn config_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::FileConfig::load(dir.path().join("slipway.toml")).unwrap();
    assert_eq!(cfg, config::FileConfig::default());
}

#[test]
fn config_precedence_is_flag_file_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slipway.toml");
    std::fs::write(&path, "region = \"eu-central-1\"\nport = 9000\n").unwrap();
    let file = config::FileConfig::load(&path).unwrap();
    assert_eq!(file.region.as_deref(), Some("eu-central-1"));
    assert_eq!(file.port, Some(9000));

    let flags = config::Overrides {
        region: Some("us-west-2".to_owned()),
        ..Default::default()
    };
    let ctx = flags.or(file.into()).into_context();
    assert_eq!(ctx.region, "us-west-2", "flag wins over file");
    assert_eq!(ctx.port, 9000, "file fills the gaps flags leave");
    assert_eq!(
        ctx.app_name,
        crate::DEFAULT_APP_NAME,
        "defaults fill the rest"
    );
    assert_eq!(ctx.account_id, crate::ACCOUNT_ID_PLACEHOLDER);
}

#[test]
fn config_malformed_file_errs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slipway.toml");
    std::fs::write(&path, "region = [unclosed").unwrap();
    let err = config::FileConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}
