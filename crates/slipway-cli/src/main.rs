//! Interactive scaffold generator for deploying a Streamlit dashboard to
//! AWS.
//!
//! Asks for an AWS region and profile, then for a deployment target, and
//! writes the matching configuration file into the output directory.
//! Every question can be pre-answered with a flag for scripted use.
//!
//! ```sh
//! cargo run -p slipway-cli
//! cargo run -p slipway-cli -- --target ecs-fargate --region eu-west-1
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use colored::Colorize;
use slip::{config, prompt, targets, Target};

#[derive(Parser)]
#[command(
    name = "slipway",
    about = "Generate AWS deployment scaffolding for a Streamlit app"
)]
struct Cli {
    /// AWS region baked into the generated files. Prompted for when absent.
    #[arg(long)]
    region: Option<String>,

    /// Named AWS profile for the follow-up commands. Prompted for when absent.
    #[arg(long)]
    profile: Option<String>,

    /// AWS account id used in image and role ARNs. Defaults to a placeholder.
    #[arg(long)]
    account_id: Option<String>,

    /// Application name used for images, task families and service units.
    #[arg(long)]
    app_name: Option<String>,

    /// Port the app serves on.
    #[arg(long)]
    port: Option<u16>,

    /// Deployment target. Shows the menu when absent.
    #[arg(long, value_parser = parse_target)]
    target: Option<Target>,

    /// Directory the configuration file is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Defaults file read before prompting.
    #[arg(long, default_value = "slipway.toml")]
    config: PathBuf,
}

fn parse_target(s: &str) -> Result<Target, String> {
    Target::from_str(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = config::FileConfig::load(&cli.config)?;
    let flags = config::Overrides {
        region: cli.region,
        profile: cli.profile,
        account_id: cli.account_id,
        app_name: cli.app_name,
        port: cli.port,
    };
    let mut known = flags.or(file.into());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    if known.region.is_none() {
        known.region = Some(prompt::region(
            &mut input,
            &mut output,
            slip::DEFAULT_REGION,
        )?);
    }
    if known.profile.is_none() {
        known.profile = prompt::profile(&mut input, &mut output)?;
    }
    let target = match cli.target {
        Some(target) => target,
        None => prompt::target(&mut input, &mut output)?,
    };

    let ctx = known.into_context();
    if let Some(profile) = &ctx.profile {
        std::env::set_var("AWS_PROFILE", profile);
        log::info!("set AWS_PROFILE={profile} for this process");
    }

    let path = targets::emit(target, &ctx, &cli.out_dir)?;
    println!();
    println!("{} {}", "Wrote".green().bold(), path.display());
    println!();
    println!("{}", "Next steps".bold().underline());
    println!("{}", targets::instructions(target, &ctx));
    Ok(())
}
