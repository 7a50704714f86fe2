//! Export command implementations
//!
//! One subcommand per dataset type. Each builds its plugin from the
//! arguments and hands it to the shared runner, which loads configuration,
//! runs the export and maps the outcome onto an exit code.

use crate::adapters::service::ServiceClient;
use crate::config::load_config;
use crate::core::export::{write_success_page, ExportOrchestrator, ExportSummary};
use crate::domain::{DepotError, Result};
use crate::plugins::{
    BigwigEntry, BigwigPlugin, BiomPlugin, DatasetPlugin, GeneListPlugin, RnaSeqEntry,
    RnaSeqPlugin, StandardArgs, Strandedness, VcfEntry, VcfPlugin,
};
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments shared by every export subcommand
#[derive(Args, Debug, Clone)]
pub struct StandardExportArgs {
    /// Dataset name
    #[arg(long)]
    pub name: String,

    /// One-line summary
    #[arg(long, default_value = "")]
    pub summary: String,

    /// Longer description
    #[arg(long, default_value = "")]
    pub description: String,

    /// E-mail of the exporting user (`<name>.<id>@<domain>`)
    #[arg(long)]
    pub user_email: String,

    /// Where to write the HTML success page
    #[arg(long)]
    pub output: PathBuf,
}

impl StandardExportArgs {
    fn validate(&self) -> Result<StandardArgs> {
        StandardArgs::new(
            self.name.clone(),
            self.summary.clone(),
            self.description.clone(),
            &self.user_email,
            self.output.clone(),
        )
    }
}

/// Arguments for the gene-list command
#[derive(Args, Debug)]
pub struct GeneListArgs {
    #[command(flatten)]
    pub standard: StandardExportArgs,

    /// Reference genome the genes belong to
    #[arg(long)]
    pub genome: String,

    /// Gene list file
    #[arg(long)]
    pub file: PathBuf,
}

impl GeneListArgs {
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        run_plugin_export(config_path, &self.standard, shutdown_rx, |args| {
            GeneListPlugin::new(args, &self.genome, self.file.clone())
        })
        .await
    }
}

/// Arguments for the bigwig command
#[derive(Args, Debug)]
pub struct BigwigArgs {
    #[command(flatten)]
    pub standard: StandardExportArgs,

    /// Reference genome selected for the dataset
    #[arg(long)]
    pub genome: String,

    /// Track as `PATH,FILE_NAME,GENOME` (repeatable)
    #[arg(long = "track", value_parser = parse_track, required = true)]
    pub tracks: Vec<BigwigEntry>,
}

impl BigwigArgs {
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        run_plugin_export(config_path, &self.standard, shutdown_rx, |args| {
            BigwigPlugin::new(args, &self.genome, self.tracks.clone())
        })
        .await
    }
}

/// Arguments for the rna-seq command
#[derive(Args, Debug)]
pub struct RnaSeqArgs {
    #[command(flatten)]
    pub standard: StandardExportArgs,

    /// `stranded` or `unstranded`
    #[arg(long)]
    pub strandedness: Strandedness,

    /// Sample file as `PATH,SAMPLE,GENOME,SUFFIX` (repeatable, suffix `txt` or `bw`)
    #[arg(long = "sample", value_parser = parse_rnaseq_sample, required = true)]
    pub samples: Vec<RnaSeqEntry>,
}

impl RnaSeqArgs {
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        run_plugin_export(config_path, &self.standard, shutdown_rx, |args| {
            RnaSeqPlugin::new(args, self.strandedness, self.samples.clone())
        })
        .await
    }
}

/// Arguments for the vcf command
#[derive(Args, Debug)]
pub struct VcfArgs {
    #[command(flatten)]
    pub standard: StandardExportArgs,

    /// Reference genome the variants were called against
    #[arg(long)]
    pub genome: String,

    /// VCF file as `PATH,SAMPLE` (repeatable)
    #[arg(long = "vcf", value_parser = parse_vcf, required = true)]
    pub files: Vec<VcfEntry>,
}

impl VcfArgs {
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        run_plugin_export(config_path, &self.standard, shutdown_rx, |args| {
            VcfPlugin::new(args, &self.genome, self.files.clone())
        })
        .await
    }
}

/// Arguments for the biom command
#[derive(Args, Debug)]
pub struct BiomArgs {
    #[command(flatten)]
    pub standard: StandardExportArgs,

    /// BIOM file
    #[arg(long)]
    pub file: PathBuf,
}

impl BiomArgs {
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        run_plugin_export(config_path, &self.standard, shutdown_rx, |args| {
            BiomPlugin::new(args, self.file.clone())
        })
        .await
    }
}

/// Load configuration, build the plugin and run one export
///
/// Every failure is reported on stderr and turned into the exit code of its
/// error kind; only unexpected failures surface as `Err`.
async fn run_plugin_export<P, F>(
    config_path: &str,
    standard: &StandardExportArgs,
    shutdown_rx: watch::Receiver<bool>,
    build: F,
) -> anyhow::Result<i32>
where
    P: DatasetPlugin,
    F: FnOnce(StandardArgs) -> Result<P>,
{
    tracing::info!(config_path = %config_path, dataset = %standard.name, "Starting export");

    let outcome = export(config_path, standard, shutdown_rx, build).await;

    match outcome {
        Ok(summary) => {
            println!("✅ Export completed successfully!");
            println!();
            println!("📊 Export Summary:");
            println!("  Job: {}", summary.job_id);
            println!("  Dataset: {}", summary.dataset_name);
            println!("  Files: {}", summary.members.join(", "));
            println!("  Archive: {} bytes", summary.archive_size);
            println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
            println!("  Success page: {}", standard.output.display());
            Ok(0)
        }
        Err(e) => {
            report_failure(&e);
            Ok(e.exit_code())
        }
    }
}

async fn export<P, F>(
    config_path: &str,
    standard: &StandardExportArgs,
    shutdown_rx: watch::Receiver<bool>,
    build: F,
) -> Result<ExportSummary>
where
    P: DatasetPlugin,
    F: FnOnce(StandardArgs) -> Result<P>,
{
    let config = load_config(config_path)?;
    let args = standard.validate()?;
    let output = args.output.clone();
    let user_id = args.user_id.clone();
    let plugin = build(args)?;

    let client = ServiceClient::new(&config.service, Some(&user_id))?;
    tracing::debug!(base_url = %client.base_url(), "Service client ready");

    let orchestrator = ExportOrchestrator::new(&config, client.service(), shutdown_rx);
    let summary = orchestrator.run_export_with_summary(&plugin).await?;

    write_success_page(&output, &summary)?;
    Ok(summary)
}

fn report_failure(error: &DepotError) {
    crate::log_error_with_context!(error, "Export command failed");

    match error {
        DepotError::Validation { messages } => {
            eprintln!("❌ The dataset was rejected:");
            for message in messages {
                eprintln!("   - {message}");
            }
        }
        DepotError::Cancelled => {
            eprintln!("⚠️  Export cancelled");
        }
        other => {
            eprintln!("❌ Export failed: {other}");
        }
    }
}

/// Split `value` into exactly `N` comma-separated fields, counting from the
/// right so the leading path may itself contain commas
fn split_fields<const N: usize>(value: &str, shape: &str) -> std::result::Result<[String; N], String> {
    let mut fields: Vec<String> = value.rsplitn(N, ',').map(str::to_string).collect();
    if fields.len() != N || fields.iter().any(|f| f.trim().is_empty()) {
        return Err(format!("expected {shape}, got '{value}'"));
    }
    fields.reverse();
    fields
        .try_into()
        .map_err(|_| format!("expected {shape}, got '{value}'"))
}

fn parse_track(value: &str) -> std::result::Result<BigwigEntry, String> {
    let [path, file_name, genome] = split_fields::<3>(value, "PATH,FILE_NAME,GENOME")?;
    Ok(BigwigEntry {
        path: PathBuf::from(path),
        file_name,
        genome,
    })
}

fn parse_rnaseq_sample(value: &str) -> std::result::Result<RnaSeqEntry, String> {
    let [path, sample_name, genome, suffix] =
        split_fields::<4>(value, "PATH,SAMPLE,GENOME,SUFFIX")?;
    if suffix != "txt" && suffix != "bw" {
        return Err(format!("suffix must be 'txt' or 'bw', got '{suffix}'"));
    }
    Ok(RnaSeqEntry {
        path: PathBuf::from(path),
        sample_name,
        genome,
        suffix,
    })
}

fn parse_vcf(value: &str) -> std::result::Result<VcfEntry, String> {
    let [path, sample_name] = split_fields::<2>(value, "PATH,SAMPLE")?;
    Ok(VcfEntry {
        path: PathBuf::from(path),
        sample_name,
    })
}
