use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::sequence_file::RunFileInfo;

#[derive(Args)]
pub struct InfoArgs {
    /// Run files or directories to inspect
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

/// Execute info subcommand
///
/// # Errors
///
/// Returns an error only if the report cannot be serialized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InfoArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let infos: Vec<RunFileInfo> = args
        .paths
        .iter()
        .map(|path| {
            if verbose {
                eprintln!("Inspecting {}", path.display());
            }
            RunFileInfo::collect(path)
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for info in &infos {
                print_text(info);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        OutputFormat::Tsv => {
            println!("path\tkind\tsize\treads\tbases\tmd5\tcomment");
            for info in &infos {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    info.path.display(),
                    info.kind,
                    opt(info.size),
                    opt(info.reads),
                    opt(info.bases),
                    info.checksum.as_deref().unwrap_or(""),
                    info.comment.as_deref().unwrap_or(""),
                );
            }
        }
    }

    Ok(())
}

fn opt(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn print_text(info: &RunFileInfo) {
    println!("{}", info.path.display());
    println!("  Kind:     {}", info.kind);
    if let Some(size) = info.size {
        println!("  Size:     {size} bytes");
    }
    if let Some(reads) = info.reads {
        println!("  Reads:    {reads}");
    }
    if let Some(bases) = info.bases {
        println!("  Bases:    {bases}");
    }
    if let Some(md5) = &info.checksum {
        println!("  MD5:      {md5}");
    }
    if let Some(comment) = &info.comment {
        println!("  Comment:  {comment}");
    }
}
