//! permtree-inspect
//!
//! Operator tool for checking a permission catalog before it ships:
//! how menus nest, which apis got attached to which menus, what a role
//! selection expands to, and how runtime checks resolve.
//!
//! Usage:
//!   permtree-inspect --catalog perms.json tree
//!   permtree-inspect --catalog perms.json associations --low-confidence
//!   permtree-inspect --catalog perms.json select --on 3,7 --json
//!   permtree-inspect --catalog role.json check api:nodes:delete --selected-only

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use permtree_assoc::AssociationResolver;
use permtree_guard::{GrantSet, RuntimeEvaluator};
use permtree_inspect::{
    load_catalog, load_config, net_changes, render_associations, render_decision,
    render_selection, render_tree, SelectionReport,
};
use permtree_selection::SelectionEngine;
use permtree_types::PermissionId;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "permtree-inspect")]
#[command(about = "Inspect permission catalogs, associations and runtime checks")]
struct Args {
    /// Path to the catalog JSON file
    #[arg(short, long)]
    catalog: PathBuf,

    /// Path to a permtree TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the menu forest with selection state
    Tree,
    /// Print api-to-menu associations
    Associations {
        /// Only show heuristic and resource-fallback matches
        #[arg(long)]
        low_confidence: bool,
    },
    /// Apply toggles to the catalog's persisted selection
    Select {
        /// Menu ids to check
        #[arg(long, value_delimiter = ',')]
        on: Vec<PermissionId>,

        /// Menu ids to uncheck
        #[arg(long, value_delimiter = ',')]
        off: Vec<PermissionId>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a runtime permission query
    Check {
        /// Permission code to check
        code: String,

        /// Action to check alongside the code
        #[arg(short, long)]
        action: Option<String>,

        /// Treat the user as super-admin
        #[arg(long)]
        super_admin: bool,

        /// Only records with `selected: true` count as grants
        #[arg(long)]
        selected_only: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = load_config(args.config.as_deref());
    debug!("Using config: {:?}", config);
    let catalog = load_catalog(&args.catalog)?;

    match args.command {
        Command::Tree => {
            let engine = SelectionEngine::new(catalog, &config);
            print!("{}", render_tree(&engine));
        }
        Command::Associations { low_confidence } => {
            let map = AssociationResolver::new(config.association.clone()).resolve(&catalog);
            print!("{}", render_associations(&catalog, &map, low_confidence));
        }
        Command::Select { on, off, json } => {
            let mut engine = SelectionEngine::new(catalog, &config);
            let before = engine.permissions();
            for id in on {
                engine.toggle(id, true);
            }
            for id in off {
                engine.toggle(id, false);
            }
            let outcome = net_changes(&before, &engine);
            if json {
                let report = SelectionReport::new(&engine, outcome);
                let rendered =
                    serde_json::to_string_pretty(&report).context("Failed to encode report")?;
                println!("{rendered}");
            } else {
                print!("{}", render_selection(&engine, &outcome));
            }
        }
        Command::Check {
            code,
            action,
            super_admin,
            selected_only,
        } => {
            let grants = if selected_only {
                GrantSet::from_selected(&catalog)
            } else {
                GrantSet::from_permissions(&catalog)
            };
            let evaluator = RuntimeEvaluator::new(grants, super_admin, config.guard.clone());
            let decision = evaluator.decide(&code, action.as_deref());
            println!("{}", render_decision(&code, action.as_deref(), decision));
            if !decision.is_allowed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
