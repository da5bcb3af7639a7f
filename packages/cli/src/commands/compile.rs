use super::{find_package_files, load_package, output_relative_path};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use typeport_compiler::{compile_package, CompileOptions, Flavor};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FlavorArg {
    Default,
    Yaml,
}

impl From<FlavorArg> for Flavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Default => Flavor::Default,
            FlavorArg::Yaml => Flavor::Yaml,
        }
    }
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Field naming flavor (overrides config)
    #[arg(short, long, value_enum)]
    pub flavor: Option<FlavorArg>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd).join(&args.path);
    let mut config = Config::load(&root)?;
    if let Some(out_dir) = &args.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(flavor) = args.flavor {
        config.compiler_options.flavor = flavor.into();
    }

    let src_dir = config.get_src_dir(&root);
    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    eprintln!("{}", "🔨 Compiling type packages...".bright_blue().bold());

    let package_files = find_package_files(&src_dir);
    if package_files.is_empty() {
        eprintln!("{}", "⚠️  No .types.json files found".yellow());
        return Ok(());
    }

    eprintln!("Found {} packages", package_files.len());

    let out_dir = config.get_out_dir(&root);
    let mut success_count = 0;
    let mut error_count = 0;

    for package_file in &package_files {
        let relative_path = package_file.strip_prefix(&src_dir).unwrap_or(package_file);
        match compile_file(
            package_file,
            relative_path,
            &config.compiler_options,
            &out_dir,
            args.stdout,
        ) {
            Ok(output_path) => {
                success_count += 1;
                eprintln!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_path
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    eprintln!();
    if error_count == 0 {
        eprintln!(
            "{} Compiled {} packages successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        eprintln!(
            "{} Compiled {} packages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} of {} packages failed to compile", error_count, package_files.len()))
    }
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    options: &CompileOptions,
    out_dir: &Path,
    stdout: bool,
) -> Result<String> {
    let package = load_package(file_path)?;
    let output = compile_package(&package, options)?;

    if stdout {
        print!("{}", output);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(output_relative_path(relative_path));
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    Ok(output_file.display().to_string())
}
