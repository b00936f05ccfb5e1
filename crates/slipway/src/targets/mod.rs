//! Scaffolding for each deployment target.
//!
//! Each submodule knows how to render one configuration file and the
//! follow-up commands for its target. Rendering is pure string
//! production; only [`emit`] touches the filesystem.

use snafu::prelude::*;

use crate::{CreateDirSnafu, DeployContext, Error, Target, WriteFileSnafu};

pub mod apprunner;
pub mod ec2;
pub mod ecs;
pub mod lambda;

/// Renders the configuration file for `target` with the context values
/// substituted verbatim.
pub fn render(target: Target, ctx: &DeployContext) -> Result<String, Error> {
    match target {
        Target::AppRunner => apprunner::render(ctx),
        Target::EcsFargate => ecs::render(ctx),
        Target::Ec2 => ec2::render(ctx),
        Target::Lambda => lambda::render(ctx),
    }
}

/// Renders and writes the configuration file into `out_dir`, returning
/// the path written.
///
/// An existing file is overwritten, with a warning.
pub fn emit(
    target: Target,
    ctx: &DeployContext,
    out_dir: impl AsRef<std::path::Path>,
) -> Result<std::path::PathBuf, Error> {
    let contents = render(target, ctx)?;
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir).context(CreateDirSnafu {
        path: out_dir.to_path_buf(),
    })?;
    let path = out_dir.join(target.file_name());
    if path.exists() {
        log::warn!("overwriting existing {path:?}");
    }
    std::fs::write(&path, contents).context(WriteFileSnafu { path: path.clone() })?;
    log::info!("wrote {path:?}");
    Ok(path)
}

/// The next-step commands for `target`, with the region (and account id
/// where relevant) interpolated verbatim.
///
/// When the context names a profile, the text leads with the
/// `export AWS_PROFILE=...` line so the commands below inherit it.
pub fn instructions(target: Target, ctx: &DeployContext) -> String {
    let body = match target {
        Target::AppRunner => apprunner::instructions(ctx),
        Target::EcsFargate => ecs::instructions(ctx),
        Target::Ec2 => ec2::instructions(ctx),
        Target::Lambda => lambda::instructions(ctx),
    };
    match &ctx.profile {
        Some(profile) => format!("export AWS_PROFILE={profile}\n\n{body}"),
        None => body,
    }
}
