use clap::{Parser, Subcommand, ValueEnum};
use faber_site::generate::BuildPaths;
use faber_site::sync::{self, SyncPaths, Target};
use faber_site::{config, generate, output, scan};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "faber-site")]
#[command(about = "Documentation site builder for the Faber language")]
#[command(long_about = "\
Documentation site builder for the Faber language

Markdown sources with YAML front matter become HTML pages sharing one layout
template and a generated navigation. Each build also writes a complete
single-file markdown bundle and an llms.txt discovery manifest.

Content structure:

  content/
  ├── index.md                     # Home page (not listed in nav)
  ├── compilers/
  │   └── rivus.md                 # section: compilers (from directory)
  └── docs/
      └── grammar.md               # ---
                                   # title: Grammar Reference
                                   # order: 1
                                   # ---

Placeholders in templates/layout.html:
  {{title}} {{description}} {{nav}} {{content}}

Run 'faber-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory holding layout.html
    #[arg(long, default_value = "templates", global = true)]
    templates: PathBuf,

    /// Stylesheet copied into the output directory
    #[arg(long, default_value = "styles/main.css", global = true)]
    stylesheet: PathBuf,

    /// Site configuration file (optional)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log pipeline detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page, copy the stylesheet, and write the bundles
    Build,
    /// Load and list all pages without writing anything
    Check,
    /// Regenerate content pages from the sibling faber repositories
    Sync {
        #[arg(value_enum, default_value_t = SyncTarget::All)]
        target: SyncTarget,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum SyncTarget {
    Compilers,
    Grammar,
    Examples,
    Research,
    All,
}

impl From<SyncTarget> for Target {
    fn from(target: SyncTarget) -> Self {
        match target {
            SyncTarget::Compilers => Target::Compilers,
            SyncTarget::Grammar => Target::Grammar,
            SyncTarget::Examples => Target::Examples,
            SyncTarget::Research => Target::Research,
            SyncTarget::All => Target::All,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.config)?;
            let paths = BuildPaths {
                content_root: cli.source.clone(),
                output_dir: cli.output.clone(),
                templates_dir: cli.templates.clone(),
                stylesheet: cli.stylesheet.clone(),
            };
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::build(&paths, &site_config)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Checking {}", cli.source.display());
            let pages = scan::load_pages(&cli.source)?;
            output::print_check_output(&pages, &site_config.site);
            println!("==> Content is valid");
        }
        Command::Sync { target } => {
            let site_config = config::load_config(&cli.config)?;
            let paths = SyncPaths::new(&cli.source, &site_config.sync);
            println!("==> Syncing into {}", cli.source.display());
            let results = sync::run(target.into(), &paths, &site_config.sync)?;
            output::print_sync_output(&results);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. Warnings only unless `--verbose`.
fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;
    Ok(())
}
