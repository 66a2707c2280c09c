use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use image_cleanup_core::{
    app_paths, apply_removal_plan, apply_rename_plan, generate_removal_plan,
    generate_rename_plan, load_config, read_exif_fields, save_config,
    validate_template, AppConfig, FilenameFixer, ImageContext, RemovalOptions, RemovalPlan,
    RenameOptions, RenamePlan,
};
use log::debug;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "image-cleanup", version)]
#[command(about = "Prunes duplicate images and renames images from their EXIF metadata")]
struct Cli {
    /// Change files on disk. Without it every command is a dry run.
    #[arg(long, global = true, default_value_t = false)]
    apply: bool,
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Removes images which are present in another directory tree.
    Remove(RemoveArgs),
    /// Renames images in a tree based on a template of EXIF and filename fields.
    Rename(RenameArgs),
    /// Prints the template fields available for a single file.
    Fields(FieldsArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Directory from which to remove files. Omit to only list candidate names.
    #[arg(long)]
    target: Option<PathBuf>,
    /// Directory holding the images to be removed from the target (repeatable).
    #[arg(long = "candidate", required = true)]
    candidates: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Directory whose files are renamed in place.
    #[arg(long)]
    target: PathBuf,
    /// Filename template, e.g. "{Date}_{FileNameClean}{Extension}".
    #[arg(long)]
    template: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct FieldsArgs {
    file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    /// Writes the current settings (defaults if none) to the config file.
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;
    init_logging(&config, cli.verbose);
    debug!("loaded config: {config:?}");

    match cli.command {
        Commands::Remove(args) => cmd_remove(args, cli.apply),
        Commands::Rename(args) => cmd_rename(args, cli.apply, &config),
        Commands::Fields(args) => cmd_fields(args),
        Commands::Config(config_args) => match config_args.action {
            ConfigAction::Show => cmd_config_show(&config),
            ConfigAction::Init => cmd_config_init(&config),
        },
    }
}

fn init_logging(config: &AppConfig, verbose: u8) {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_remove(args: RemoveArgs, apply: bool) -> Result<()> {
    let options = RemovalOptions {
        target: args.target,
        candidates: args.candidates,
    };
    let plan = generate_removal_plan(&options)?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Table => print_removal_table(&plan),
    }

    if plan.target_root.is_none() {
        eprintln!("no --target given: listed candidate filenames only");
    } else if apply {
        let result = apply_removal_plan(&plan);
        eprintln!("removed {} files ({} failed)", result.removed, result.failed);
        if result.failed > 0 {
            anyhow::bail!("{} files could not be removed", result.failed);
        }
    } else {
        eprintln!("dry run: no files were removed. Pass --apply to remove them.");
    }

    Ok(())
}

fn cmd_rename(args: RenameArgs, apply: bool, config: &AppConfig) -> Result<()> {
    let template = args.template.unwrap_or_else(|| config.template.clone());
    validate_template(&template)?;

    let plan = generate_rename_plan(&RenameOptions {
        target: args.target,
        template,
    })?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Table => print_rename_table(&plan),
    }

    if apply {
        let result = apply_rename_plan(&plan);
        eprintln!(
            "renamed {} files ({} unchanged, {} failed)",
            result.renamed, result.unchanged, result.failed
        );
        if result.failed > 0 {
            anyhow::bail!("{} files could not be renamed", result.failed);
        }
    } else {
        eprintln!("dry run: no files were renamed. Pass --apply to rename them.");
    }

    Ok(())
}

fn cmd_fields(args: FieldsArgs) -> Result<()> {
    let file_name = args
        .file
        .file_name()
        .and_then(|v| v.to_str())
        .with_context(|| format!("not a file with a UTF-8 name: {}", args.file.display()))?;

    let mut context = ImageContext::from_file_name(file_name, &FilenameFixer::new());
    context.merge_exif(&read_exif_fields(&args.file)?);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&context)?),
        OutputFormat::Table => {
            for (key, value) in context.iter() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn cmd_config_init(config: &AppConfig) -> Result<()> {
    let path = save_config(config)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn print_rename_table(plan: &RenamePlan) {
    println!("original -> renamed");
    for candidate in plan.candidates.iter().filter(|c| c.changed) {
        println!(
            "{} -> {}",
            candidate.original_path.display(),
            candidate.target_path.display()
        );
    }

    println!(
        "\nsummary: scanned={} planned={} unchanged={} no_exif={} template_failed={} non_utf8={}",
        plan.stats.scanned_files,
        plan.stats.planned,
        plan.stats.unchanged,
        plan.stats.skipped_no_exif,
        plan.stats.skipped_template,
        plan.stats.skipped_non_utf8
    );
}

fn print_removal_table(plan: &RemovalPlan) {
    if plan.target_root.is_none() {
        println!("candidate filenames");
        for name in &plan.candidate_names {
            println!("{name}");
        }
    } else {
        println!("files to remove");
        for path in &plan.removals {
            println!("{}", path.display());
        }
    }

    println!(
        "\nsummary: candidate_names={} scanned={} matched={}",
        plan.stats.candidate_names, plan.stats.scanned_files, plan.stats.matched
    );
}
