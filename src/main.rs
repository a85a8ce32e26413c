use clap::{Parser, Subcommand};
use folio_press::pipeline::PublicationPipeline;
use folio_press::{bridge, config, output};
use std::io;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio-press")]
#[command(about = "Content manager and publisher for a personal portfolio site")]
#[command(long_about = "\
Content manager and publisher for a personal portfolio site

Content lives in a single JSON store and is pressed into static pages
inside the site's git checkout. Deploying rewrites the generated files;
publishing stages, commits, and pushes them.

Generated files (written to the site root):

  index.html          # Home: headline, present/past work, social links
  portfolio.html      # Listing page with Markdown body and project grid
  <project>.html      # One page per project, named by title slug
  data.json           # Machine-readable snapshot of the content

Run 'folio-press gen-config' to generate a documented folio.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing folio.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Site root override (where generated files are written)
    #[arg(long, global = true)]
    site: Option<PathBuf>,

    /// Store file override
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of the stored content
    Show,
    /// Generate the site and write it to the site root (no git)
    Deploy,
    /// Show the repository state of the site root
    Status,
    /// Deploy, then commit and push pending changes
    Publish {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// Render the home page to a temp file for a quick look
    Preview,
    /// Serve the bridge protocol on stdin/stdout for a UI process
    Serve,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut config = config::load_config(&cli.config)?;
    if let Some(site) = cli.site {
        config.site_root = site;
    }
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let pipeline = PublicationPipeline::from_config(&config);

    match cli.command {
        Command::Show => {
            let content = pipeline.load_content();
            output::print_content(&content);
        }
        Command::Deploy => {
            let content = pipeline.load_content();
            let report = pipeline.deploy(&content)?;
            output::print_deploy(&report);
            println!("Site written to {}", pipeline.site_root().display());
        }
        Command::Status => {
            let status = pipeline.repo_status()?;
            let info = pipeline.remote_info();
            output::print_status(&status, &info);
        }
        Command::Publish { message } => {
            let outcome = pipeline.publish_changes(&message)?;
            output::print_outcome(&outcome);
        }
        Command::Preview => {
            let content = pipeline.load_content();
            let path = pipeline.preview(&content)?;
            println!("Preview written to {}", path.display());
        }
        Command::Serve => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            bridge::serve(&pipeline, stdin.lock(), stdout.lock())?;
        }
        Command::GenConfig => unreachable!("handled before config load"),
    }

    Ok(())
}
