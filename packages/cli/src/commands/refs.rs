use super::{find_package_files, load_package};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use typeport_compiler::{collect_qualified_names, CompileOptions};

#[derive(Debug, Args)]
pub struct RefsArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Only list names without a type mapping
    #[arg(short, long)]
    pub unmapped: bool,
}

/// How one qualified name will be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub mapped_to: Option<String>,
}

pub fn package_references(
    names: impl IntoIterator<Item = String>,
    options: &CompileOptions,
) -> Vec<Reference> {
    names
        .into_iter()
        .map(|name| Reference {
            mapped_to: options.type_mappings.get(&name).cloned(),
            name,
        })
        .collect()
}

pub fn refs(args: RefsArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd).join(&args.path);
    let config = Config::load(&root)?;
    let src_dir = config.get_src_dir(&root);

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    let mut unmapped_total = 0;
    for package_file in find_package_files(&src_dir) {
        let relative_path = package_file.strip_prefix(&src_dir).unwrap_or(&package_file);
        let package = match load_package(&package_file) {
            Ok(package) => package,
            Err(e) => {
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
                continue;
            }
        };

        let references =
            package_references(collect_qualified_names(&package), &config.compiler_options);
        println!(
            "{} {}",
            package.name.bright_white().bold(),
            format!("({})", relative_path.display()).dimmed()
        );

        for reference in references {
            match &reference.mapped_to {
                Some(target) if !args.unmapped => {
                    println!("  {} {} → {}", "✓".green(), reference.name, target);
                }
                Some(_) => {}
                None => {
                    unmapped_total += 1;
                    let fallback = format!(
                        "{} /* {} */",
                        config.compiler_options.fallback_type, reference.name
                    );
                    println!("  {} {} → {}", "✗".yellow(), reference.name, fallback.dimmed());
                }
            }
        }
    }

    println!();
    if unmapped_total == 0 {
        println!("{} All qualified references are mapped", "✅".green());
    } else {
        println!(
            "{} {} references fall back to {}",
            "⚠️".yellow(),
            unmapped_total,
            config.compiler_options.fallback_type.bright_white()
        );
    }

    Ok(())
}
