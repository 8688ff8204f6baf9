//! Export command implementation

use crate::{
    client::{ExportPayload, SystemClient},
    config::AuthConfig,
    error::CliError,
    project_file::ProjectId,
    resolve::{resolve_project, DiscoveryScope, ResolveArgs},
    system::SystemEnvironment,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing::info;

/// Arguments of `graphcool export`
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Id of the project to export
    #[arg(long = "project-id", short = 'p')]
    pub project_id: Option<String>,

    /// Project file to read the project id from
    #[arg(long = "project-file", short = 'f')]
    pub project_file: Option<PathBuf>,

    /// Write the export result to this file instead of printing it
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format when printing
    #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Export the data of one project.
///
/// Resolves the project, checks the auth config, sends a single export
/// request and delivers the result. Nothing is written on failure.
pub async fn export_command(args: &ExportArgs, env: &SystemEnvironment) -> Result<(), CliError> {
    let explicit_id = args.project_id.as_deref().and_then(ProjectId::parse);
    if let (Some(_), Some(file)) = (&explicit_id, &args.project_file) {
        env.out.warn(&format!(
            "Both --project-id and --project-file given, ignoring {}",
            file.display()
        ));
    }

    let resolve_args = ResolveArgs {
        project_id: args.project_id.clone(),
        project_file: args.project_file.clone(),
    };
    let project_id = resolve_project(&resolve_args, env.resolver.as_ref(), &DiscoveryScope::default())?
        .into_result()?;
    info!("Exporting project {}", project_id);

    let config = AuthConfig::load(env.resolver.as_ref(), &env.config_path)?;

    let client = SystemClient::new(env.endpoint.clone(), config.bearer_token().map(str::to_string))?;
    let payload = client.export_data(&project_id).await?;

    deliver(args, env, &project_id, &payload)
}

fn deliver(
    args: &ExportArgs,
    env: &SystemEnvironment,
    project_id: &ProjectId,
    payload: &ExportPayload,
) -> Result<(), CliError> {
    if let Some(path) = &args.output {
        let content = render(payload, project_id, ExportFormat::Json)?;
        env.resolver.write(path, &content)?;
        info!("Wrote export result to {}", path.display());
        env.out.write(&format!(
            "Exported data for project {} written to {}",
            project_id,
            path.display()
        ));
        return Ok(());
    }

    env.out.write(&render(payload, project_id, args.format)?);
    Ok(())
}

fn render(
    payload: &ExportPayload,
    project_id: &ProjectId,
    format: ExportFormat,
) -> Result<String, CliError> {
    Ok(match format {
        ExportFormat::Text => format!(
            "Exported data for project {} is available at: {}",
            project_id, payload.url
        ),
        ExportFormat::Json => serde_json::to_string_pretty(payload)?,
        ExportFormat::Yaml => serde_yaml::to_string(payload)?,
    })
}
