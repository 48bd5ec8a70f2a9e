use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_CONFIG_FILE, ProjectConfig};
use crate::manifest;

#[derive(Parser)]
#[command(name = "truss")]
#[command(about = "A tiny, predictable configuration loader and validator for Solidity project tooling")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Path to the project configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the loaded configuration
    Show {
        /// Print a single network descriptor instead of the whole record
        #[arg(long)]
        network: Option<String>,
    },

    /// Check the configuration against the expected shape
    Validate,

    /// List the configured deployment targets
    Networks,

    /// Resolve the build manifest into copy/concat steps
    Plan {
        /// Directory the manifest's source paths are relative to
        #[arg(long, default_value = "app")]
        app_dir: PathBuf,

        /// Directory the output artifacts would land in
        #[arg(long, default_value = "build")]
        build_dir: PathBuf,

        /// Also verify that every source file exists
        #[arg(long)]
        check: bool,
    },

    /// Check for the external tools that consume this configuration
    Doctor,
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => init_command(&cli.config, force),
        Commands::Show { network } => show_command(&cli.config, network.as_deref()),
        Commands::Validate => validate_command(&cli.config),
        Commands::Networks => networks_command(&cli.config),
        Commands::Plan {
            app_dir,
            build_dir,
            check,
        } => plan_command(&cli.config, &app_dir, &build_dir, check),
        Commands::Doctor => doctor_command(&cli.config),
    }
}

fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        ));
    }

    let config = ProjectConfig::default();
    config.write(config_path)?;

    println!("Created {}", config_path.display());
    println!(
        "  {} networks, solc {}, {} build targets",
        config.networks.len(),
        config.compilers.solc.version,
        config.build.len()
    );

    Ok(())
}

fn show_command(config_path: &Path, network: Option<&str>) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;

    let json = match network {
        Some(name) => {
            let descriptor = config
                .network(name)
                .with_context(|| format!("No such network in {}", config_path.display()))?;
            serde_json::to_string_pretty(descriptor)
        }
        None => serde_json::to_string_pretty(&config),
    }
    .context("Failed to serialize configuration to JSON")?;

    println!("{}", json);

    Ok(())
}

fn validate_command(config_path: &Path) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;

    config
        .validate()
        .with_context(|| format!("Configuration {} is invalid", config_path.display()))?;

    println!("✓ {} is valid", config_path.display());
    println!("  plugins:       {}", config.plugins.len());
    println!("  networks:      {}", config.networks.len());
    println!("  build targets: {}", config.build.len());

    Ok(())
}

fn networks_command(config_path: &Path) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;

    if config.networks.is_empty() {
        println!("No networks configured in {}", config_path.display());
        return Ok(());
    }

    println!("Deployment targets in {}:", config_path.display());
    for (name, network) in &config.networks {
        println!(
            "  {} -> {} (network id {}, gas {})",
            name,
            network.endpoint(),
            network.network_id.as_str(),
            network.gas
        );
        if let Some(gas_price) = network.gas_price {
            println!("    gas price: {} wei", gas_price);
        }
    }

    Ok(())
}

fn plan_command(
    config_path: &Path,
    app_dir: &Path,
    build_dir: &Path,
    check: bool,
) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;

    let steps = manifest::plan(&config.build, app_dir, build_dir);

    if steps.is_empty() {
        println!("Build manifest is empty, nothing to plan");
        return Ok(());
    }

    println!("Planned {} build steps:", steps.len());
    for step in &steps {
        println!(
            "  {} -> {}",
            step.action.as_str(),
            step.destination.display()
        );
        for source in &step.sources {
            println!("    {}", source.display());
        }
    }

    if check {
        manifest::validate_sources(&steps).context("Build manifest check failed")?;
        println!("\n✓ All source files present");
    }

    Ok(())
}

fn doctor_command(config_path: &Path) -> Result<()> {
    println!("Truss Doctor - Checking external tooling...\n");

    // Consumers of the record, none required for truss itself to work.
    report_tool("solc", "Solidity compiler");
    report_tool("node", "Node.js runtime");
    report_tool("truffle", "Truffle build tool");

    println!();
    if config_path.exists() {
        let config = ProjectConfig::load(config_path)?;
        match config.validate() {
            Ok(()) => println!("✓ {} loads and validates", config_path.display()),
            Err(e) => println!("✗ {} is invalid: {}", config_path.display(), e),
        }

        println!(
            "  {} networks, solc {}, {} build targets",
            config.networks.len(),
            config.compilers.solc.version,
            config.build.len()
        );
    } else {
        println!(
            "✗ {} not found (run 'truss init' to create one)",
            config_path.display()
        );
    }

    println!("\n✓ Truss doctor check complete");

    Ok(())
}

fn report_tool(command: &str, description: &str) {
    match which::which(command) {
        Ok(path) => println!("✓ {} found at: {}", description, path.display()),
        Err(_) => println!("✗ {} not found ({})", description, command),
    }
}
