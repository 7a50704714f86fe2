//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Depot using clap.
//! Every dataset type has its own export subcommand.

pub mod commands;

use clap::{Parser, Subcommand};

/// Depot - dataset export to a data-warehouse import service
#[derive(Parser, Debug)]
#[command(name = "depot")]
#[command(version, about, long_about = None)]
#[command(author = "Depot Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "depot.toml", env = "DEPOT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DEPOT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a gene list
    GeneList(commands::export::GeneListArgs),

    /// Export one or more bigwig tracks
    Bigwig(commands::export::BigwigArgs),

    /// Export an RNA-seq bundle
    RnaSeq(commands::export::RnaSeqArgs),

    /// Export one or more VCF files
    Vcf(commands::export::VcfArgs),

    /// Export a BIOM file to MicrobiomeDB
    Biom(commands::export::BiomArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
