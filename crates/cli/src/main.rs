use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cli::{report, snapshot, store};
use playlist_core::config;
use playlist_core::config::AppConfig;
use playlist_core::pipeline::{self, PipelineMode, PipelineOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            snapshot,
            out,
            json,
            no_save,
        } => run_plan(cfg, snapshot, out, json, no_save).await,
        Commands::Audit { snapshot, json } => run_audit(cfg, snapshot, json),
        Commands::Categories { json } => run_categories(cfg, json),
        Commands::Plans { json } => run_plans(cfg, json).await,
        Commands::Suggestions { plan, kind, json } => {
            run_suggestions(cfg, plan, kind.map(SuggestionKind::as_str), json).await
        }
    }
}

#[derive(Parser)]
#[command(name = "playlist-organizer")]
#[command(about = "Keyword-based playlist categorizer and reorganization planner", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Categorize a snapshot and build a reorganization plan
    Plan {
        /// Snapshot JSON (defaults to snapshot.path from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Where to write the plan JSON (defaults to output.plan_path)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the plan as JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Do not record the plan in the database
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Report empty, oversized and duplicate-titled playlists
    Audit {
        /// Snapshot JSON (defaults to snapshot.path from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective category table
    Categories {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// List plans recorded in the database
    Plans {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// List recorded suggestions
    Suggestions {
        /// Plan id; latest plan when omitted
        #[arg(long)]
        plan: Option<i64>,
        /// Only this kind of suggestion
        #[arg(long, value_enum)]
        kind: Option<SuggestionKind>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SuggestionKind {
    Merge,
    Rename,
    Delete,
}

impl SuggestionKind {
    fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Merge => "merge",
            SuggestionKind::Rename => "rename",
            SuggestionKind::Delete => "delete",
        }
    }
}

async fn run_plan(
    cfg: AppConfig,
    snapshot_path: Option<PathBuf>,
    out: Option<PathBuf>,
    json: bool,
    no_save: bool,
) -> Result<()> {
    let snapshot_path = snapshot_path.unwrap_or_else(|| PathBuf::from(&cfg.snapshot.path));
    let out = out.unwrap_or_else(|| PathBuf::from(&cfg.output.plan_path));
    let snapshot = snapshot::load_snapshot(&snapshot_path)?;
    let registry = cfg.categories.build_registry()?;

    let output = pipeline::run_with_mode(
        &snapshot,
        &registry,
        &PipelineOptions::from(&cfg),
        PipelineMode::Plan,
    );
    let Some(plan) = output.plan else {
        anyhow::bail!("pipeline produced no plan");
    };

    snapshot::write_plan(&out, &plan)?;
    if !no_save {
        let plan_id = store::save_plan(&cfg.database.path, &plan).await?;
        info!(plan_id, "recorded plan");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", report::render_plan(&plan));
        println!(
            "plan: {} playlists, {} categorized, {} uncategorized, {} suggestions -> {}",
            output.summary.playlists,
            output.summary.categorized,
            output.summary.uncategorized,
            output.summary.suggestions,
            out.display()
        );
    }
    Ok(())
}

fn run_audit(cfg: AppConfig, snapshot_path: Option<PathBuf>, json: bool) -> Result<()> {
    let snapshot_path = snapshot_path.unwrap_or_else(|| PathBuf::from(&cfg.snapshot.path));
    let snapshot = snapshot::load_snapshot(&snapshot_path)?;
    let registry = cfg.categories.build_registry()?;
    let output = pipeline::run_with_mode(
        &snapshot,
        &registry,
        &PipelineOptions::from(&cfg),
        PipelineMode::Audit,
    );
    let Some(audit) = output.audit else {
        anyhow::bail!("pipeline produced no audit");
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&audit)?);
    } else {
        print!("{}", report::render_audit(&audit));
    }
    Ok(())
}

fn run_categories(cfg: AppConfig, json: bool) -> Result<()> {
    let registry = cfg.categories.build_registry()?;
    if json {
        let categories: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        print!("{}", report::render_categories(&registry));
    }
    Ok(())
}

async fn run_plans(cfg: AppConfig, json: bool) -> Result<()> {
    let plans = store::fetch_plans(&cfg.database.path).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
    } else {
        for p in &plans {
            println!("{}", serde_json::to_string(p)?);
        }
    }
    Ok(())
}

async fn run_suggestions(
    cfg: AppConfig,
    plan: Option<i64>,
    kind: Option<&str>,
    json: bool,
) -> Result<()> {
    let suggestions = store::fetch_suggestions(&cfg.database.path, plan, kind).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        for s in &suggestions {
            println!("{}", serde_json::to_string(s)?);
        }
    }
    Ok(())
}
