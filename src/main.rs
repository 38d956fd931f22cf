use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use jobfeed::aggregator::Aggregator;
use jobfeed::config::{Config, DEFAULT_CONFIG_PATH};
use jobfeed::debug_log::DebugLog;
use jobfeed::fetcher::http::HttpTransport;
use jobfeed::fetcher::{Fetcher, expand_variants};
use jobfeed::filter::{FilterOptions, JobFilter, apply_filters};
use jobfeed::models::{Application, JobListing, JobType, RoleType, SelectionAction, TableKind};
use jobfeed::parser::{ParseHints, TableParser};

#[derive(Parser)]
#[command(name = "jobfeed", version)]
#[command(about = "Fetch, normalize and filter daily job-listing tables")]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured tabs and their sources
    Tabs,

    /// Load a tab and print its listings
    Fetch {
        /// Tab id (see `jobfeed tabs`)
        tab: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Print the debug log after the listings
        #[arg(long)]
        debug: bool,

        /// Print the dropdown option lists instead of listings
        #[arg(long)]
        options: bool,

        /// Print the selection payload for the n-th filtered listing (1-based)
        #[arg(long)]
        pick: Option<usize>,

        /// What the picked listing is for
        #[arg(long, value_enum, default_value_t = Action::Analyze)]
        action: Action,
    },

    /// Parse a local Markdown file
    Parse {
        file: PathBuf,

        /// Table layout (h1b, generic); detected when omitted
        #[arg(long)]
        kind: Option<String>,

        /// Job function (SWE, PM, Data)
        #[arg(long)]
        job_type: Option<String>,

        /// Role stage (new-grad, internship)
        #[arg(long)]
        role_type: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Show the candidate URLs tried for a source URL
    Variants { url: String },
}

#[derive(Args)]
struct FilterArgs {
    /// Company name prefix (case-insensitive)
    #[arg(long)]
    company: Option<String>,

    /// Role title prefix (case-insensitive)
    #[arg(long)]
    role: Option<String>,

    #[arg(long)]
    level: Option<String>,

    #[arg(long)]
    location: Option<String>,

    /// Sponsorship badge
    #[arg(long)]
    h1b: Option<String>,

    /// SWE, PM, Data or Other
    #[arg(long)]
    job_type: Option<String>,

    /// New Grad, Internship or Other
    #[arg(long)]
    role_type: Option<String>,
}

impl From<FilterArgs> for JobFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            company: args.company.unwrap_or_default(),
            role: args.role.unwrap_or_default(),
            level: args.level.unwrap_or_default(),
            location: args.location.unwrap_or_default(),
            h1b_status: args.h1b.unwrap_or_default(),
            job_type: args.job_type.unwrap_or_default(),
            role_type: args.role_type.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum Action {
    Analyze,
    Apply,
}

impl From<Action> for SelectionAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Analyze => SelectionAction::Analyze,
            Action::Apply => SelectionAction::Apply,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "jobfeed=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    config.validate().context("invalid configuration")?;

    match cli.command {
        Commands::Tabs => print_tabs(&config),
        Commands::Fetch {
            tab,
            filter,
            format,
            debug,
            options,
            pick,
            action,
        } => {
            let group = config
                .tab(&tab)
                .with_context(|| format!("unknown tab: {tab}"))?;

            let transport = HttpTransport::new(&config.http)?;
            let fetcher = Fetcher::new(Arc::new(transport), DebugLog::new());
            let aggregator = Aggregator::new(fetcher, TableParser::new(config.link_host.clone()));

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .expect("valid template"),
            );
            spinner.set_message(format!("Loading {}...", group.name));
            spinner.enable_steady_tick(Duration::from_millis(100));
            let load = aggregator.load_category(group).await;
            spinner.finish_and_clear();

            if load.from_samples {
                warn!("No source could be loaded; showing sample listings (see --debug)");
            }
            info!("{} listings loaded for {}", load.listings.len(), group.name);

            if options {
                let opts = FilterOptions::from_listings(&load.listings);
                println!("{}", serde_json::to_string_pretty(&opts)?);
            } else {
                let filter = JobFilter::from(filter);
                for (field, value) in filter.active() {
                    info!("Filter {field}: {value}");
                }
                let hits = apply_filters(&load.listings, &filter);

                match pick {
                    Some(n) => print_pick(&hits, n, action)?,
                    None => print_listings(&hits, format)?,
                }
            }

            if debug {
                eprintln!("{}", aggregator.log().render());
            }
            Ok(())
        }
        Commands::Parse {
            file,
            kind,
            job_type,
            role_type,
            format,
        } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let hints = ParseHints {
                kind: kind
                    .map(|k| TableKind::from_label(&k).with_context(|| format!("unknown kind: {k}")))
                    .transpose()?,
                job_type: job_type
                    .map(|j| JobType::from_label(&j).with_context(|| format!("unknown job type: {j}")))
                    .transpose()?,
                role_type: role_type
                    .map(|r| {
                        RoleType::from_label(&r).with_context(|| format!("unknown role type: {r}"))
                    })
                    .transpose()?,
            };

            let parser = TableParser::new(config.link_host.clone());
            match parser.parse(&raw, &hints) {
                Some((strategy, listings)) => {
                    info!(
                        "Parsed {} listings with the {} strategy",
                        listings.len(),
                        strategy.as_str()
                    );
                    let refs: Vec<&JobListing> = listings.iter().collect();
                    print_listings(&refs, format)
                }
                None => {
                    warn!("No job table found in {}", file.display());
                    Ok(())
                }
            }
        }
        Commands::Variants { url } => {
            for candidate in expand_variants(&url) {
                println!("{candidate}");
            }
            Ok(())
        }
    }
}

fn print_tabs(config: &Config) -> Result<()> {
    for tab in &config.tabs {
        println!("{} ({}) [{:?}]", tab.id, tab.name, tab.kind);
        for source in &tab.sources {
            let job = source.job_type.map_or("-", |j| j.as_str());
            let role = source.role_type.map_or("-", |r| r.as_str());
            println!("  {job:<5} {role:<10} {}", source.url);
        }
    }
    Ok(())
}

fn print_listings(listings: &[&JobListing], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(listings)?);
        }
        Format::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for job in listings {
                wtr.serialize(job).context("failed to write CSV row")?;
            }
            wtr.flush()?;
        }
        Format::Table => {
            println!(
                "{:<24} {:<40} {:<12} {:<20} {:<4} {:<11} LINK",
                "COMPANY", "ROLE", "LEVEL", "LOCATION", "H1B", "POSTED"
            );
            for job in listings {
                println!(
                    "{:<24} {:<40} {:<12} {:<20} {:<4} {:<11} {}",
                    clip(&job.company, 24),
                    clip(&job.role, 40),
                    clip(&job.level, 12),
                    clip(&job.location, 20),
                    job.h1b_status,
                    clip(&job.date_posted, 11),
                    if job.apply_link_url.is_empty() {
                        &job.apply_link_text
                    } else {
                        &job.apply_link_url
                    }
                );
            }
            println!("{} listings", listings.len());
        }
    }
    Ok(())
}

fn print_pick(hits: &[&JobListing], n: usize, action: Action) -> Result<()> {
    let job = n
        .checked_sub(1)
        .and_then(|i| hits.get(i))
        .with_context(|| format!("--pick {n} is out of range (1..={})", hits.len()))?;

    let selection = job.to_selection(action.into());
    println!("{}", serde_json::to_string_pretty(&selection)?);

    if let Action::Apply = action {
        let application = Application::from_listing(job);
        println!("{}", serde_json::to_string_pretty(&application)?);
    }
    Ok(())
}

/// Truncate to `width` characters for the table view.
fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
