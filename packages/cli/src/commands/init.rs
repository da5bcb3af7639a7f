use super::PACKAGE_SUFFIX;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use typeport_ast::{Declaration, Field, Package, TypeExpr};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "types")]
    pub src_dir: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

fn example_package() -> Package {
    Package::new(
        "example",
        vec![Declaration::new(
            "User",
            TypeExpr::structure(vec![
                Field::named("ID", TypeExpr::ident("int64")).with_tag(r#"`json:"id"`"#),
                Field::named("Name", TypeExpr::ident("string"))
                    .with_tag(r#"`json:"name,omitempty"`"#),
                Field::named("CreatedAt", TypeExpr::qualified("time", "Time"))
                    .with_tag(r#"`json:"created_at"`"#),
            ]),
        )
        .with_doc("User is an example declaration.")],
    )
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd);
    let config_path = root.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing typeport project...".bright_blue().bold());

    let src_dir = root.join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join(format!("example{}", PACKAGE_SUFFIX));
    if !example_file.exists() {
        fs::write(&example_file, serde_json::to_string_pretty(&example_package())?)?;
        println!("  {} Created example{}", "✓".green(), PACKAGE_SUFFIX);
    }

    let mut config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Default::default()
    };
    config
        .compiler_options
        .type_mappings
        .insert("time.Time".to_string(), "string".to_string());

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Dump your packages into {}/", args.src_dir);
    println!("  2. Run: typeport compile");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}
