use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use workbench::config::{DEFAULT_CLUE_LIMIT, DEFAULT_HIGHLIGHT_COUNT};
use workbench::{ordering, results, view};
use workbench::{key_clues, DialogAction, Session, SubmissionOutcome, WorkbenchConfig};
use workbench_fixtures::{FixtureStore, DEFAULT_DATA_DIR};

#[derive(Parser)]
#[command(name = "workbench")]
#[command(about = "Outpatient visit workbench")]
struct Cli {
    /// Directory holding the fixture files
    #[arg(long, env = "WORKBENCH_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    data_dir: PathBuf,

    /// Transcript turns shown when no highlight file exists
    #[arg(long, default_value_t = DEFAULT_HIGHLIGHT_COUNT, global = true)]
    highlight_count: usize,

    /// Maximum key clues beside the record
    #[arg(long, default_value_t = DEFAULT_CLUE_LIMIT, global = true)]
    clue_limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show conversation highlights and similar cases
    Intake,
    /// List the order catalog by relevance
    Orders {
        /// Only list orders whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Check a set of orders before submission
    Check {
        /// Order to include (repeatable)
        #[arg(long = "select", value_name = "NAME")]
        select: Vec<String>,
        /// Print the findings as JSON
        #[arg(long)]
        json: bool,
        /// Submit after the check, whatever it found
        #[arg(long)]
        submit: bool,
    },
    /// Show lab results
    Labs {
        /// Only show rows marked above or below range
        #[arg(long)]
        abnormal: bool,
        /// Print the table as CSV
        #[arg(long)]
        csv: bool,
    },
    /// Draft the outpatient record
    Record {
        /// Order to list under auxiliary exams (repeatable)
        #[arg(long = "select", value_name = "NAME")]
        select: Vec<String>,
    },
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    orders: &'a [String],
    report: &'a order_check::WarningReport,
    actions: Vec<&'static str>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = WorkbenchConfig::builder()
        .with_data_dir(&cli.data_dir)
        .with_highlight_count(cli.highlight_count)
        .with_clue_limit(cli.clue_limit)
        .build();

    let store = FixtureStore::open(config.fixture_paths())
        .with_context(|| format!("failed to load fixtures from {}", config.data_dir.display()))?;
    let fixtures = store.fixtures();

    match cli.command {
        Commands::Intake => {
            print!("{}", view::render_intake(&fixtures, &config));
            tracing::debug!(cases = fixtures.similar_cases().len(), "intake rendered");
        }
        Commands::Orders { search } => {
            let ranked = ordering::ranked_orders(ordering::catalog(&fixtures)?);
            let listed = match search.as_deref() {
                Some(query) => ordering::search_orders(&ranked, query),
                None => ranked,
            };
            print!("{}", view::render_orders(&listed));
        }
        Commands::Check {
            select,
            json,
            submit,
        } => {
            let mut session = Session::new();
            session.selection_mut().extend(select);
            let dialog = session.submit(&fixtures)?;

            if json {
                let output = CheckOutput {
                    orders: dialog.orders(),
                    report: &dialog.report,
                    actions: dialog.actions().iter().map(|a| a.label()).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!(
                    "{}",
                    view::render_dialog(&dialog, std::io::stdout().is_terminal())
                );
            }

            if submit {
                let action = if dialog.report.has_issues() {
                    DialogAction::SubmitAnyway
                } else {
                    DialogAction::ConfirmSubmit
                };
                if let SubmissionOutcome::Submitted { orders } = session.resolve(dialog, action) {
                    eprintln!("已提交 {} 项检查", orders.len());
                }
            }
        }
        Commands::Labs { abnormal, csv } => {
            let table = results::lab_table(&fixtures)?;
            if csv {
                print!("{}", results::export_csv(table, abnormal)?);
            } else if abnormal {
                let filtered = results::abnormal_only(table);
                print!(
                    "{}",
                    view::render_labs(&filtered, fixtures.abnormal_summary.as_ref())
                );
            } else {
                print!(
                    "{}",
                    view::render_labs(table, fixtures.abnormal_summary.as_ref())
                );
            }
        }
        Commands::Record { select } => {
            let mut session = Session::new();
            session.selection_mut().extend(select);
            let text = session.record_text(&fixtures).to_string();
            let clues = key_clues(&fixtures, config.clue_limit);
            print!("{}", view::render_record(&text, session.drafted_at(), &clues));
        }
    }

    Ok(())
}
