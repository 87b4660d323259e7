// assay/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assay")]
#[command(about = "ETL verification & data-quality checks over SQL warehouses", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ✅ Runs a verification suite (structure, rules, profiling, lineage)
    Check {
        /// Suite file, or a directory holding assay.yaml / assay.yml
        #[arg(long, short, default_value = ".")]
        config: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// JSON report instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// 🧩 Prints one named query from a template file, placeholders filled
    Render {
        /// Template file, relative to the template directory
        #[arg(long, short)]
        file: String,

        /// Query name (`-- @name: ...`)
        #[arg(long, short)]
        name: String,

        #[arg(long, default_value = "sql")]
        template_dir: PathBuf,

        /// Placeholder value, repeatable (ex: --param table=stg_users)
        #[arg(long = "param", short, value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// 📋 Lists template files and the queries they define
    List {
        /// Only this file
        #[arg(long, short)]
        file: Option<String>,

        #[arg(long, default_value = "sql")]
        template_dir: PathBuf,
    },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
