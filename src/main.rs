use clap::{Parser, Subcommand};
use docnav::config::{self, NavConfig};
use docnav::highlight::Highlighter;
use docnav::menu::{Menu, build_menu};
use docnav::page::StaticPage;
use docnav::types::Breadcrumb;
use docnav::{data, output, render};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Outline and breadcrumb inputs shared by the menu commands.
#[derive(clap::Args, Clone)]
struct DataArgs {
    /// Outline file: JSON or a `var toc = {...};` script
    #[arg(long)]
    toc: PathBuf,

    /// Breadcrumb file: JSON array or a `var breadcrumb = [...];` script.
    /// Without it no entry is on the current path.
    #[arg(long)]
    breadcrumb: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Navigation menus and hash highlighting for generated documentation")]
#[command(long_about = "\
Navigation menus and hash highlighting for generated documentation

The outline generator writes the document tree and the breadcrumb of each
page as page globals:

  var toc = {\"title\": \"Manual\", \"url\": \"index.html\", \"isFile\": true, \"children\": [...]};
  var breadcrumb = [\"Manual\", \"Getting Started\", \"Install\"];

docnav builds the collapsible menu for that page: top-level sections and
entries on the breadcrumb start open, the rest start closed, and entries
whose children are only in-page headings render as leaves.

Run 'docnav gen-config' to generate a documented docnav.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing docnav.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the menu HTML for a page
    Render {
        #[command(flatten)]
        data: DataArgs,

        /// Print only the menu list, without container and mobile toggle
        #[arg(long)]
        fragment: bool,
    },
    /// Print the built menu as an indented tree with its flags
    Tree(DataArgs),
    /// Report how far the breadcrumb matches the outline; fails on a mismatch
    Check(DataArgs),
    /// Simulate hash navigation against a page description
    Highlight {
        /// Page description: {"scroll_y": 0, "headings": {"id": offset, ...}}
        #[arg(long)]
        page: PathBuf,

        /// Hash to navigate to, optionally at a time: `install` or `install@600`
        #[arg(long = "hash", required = true)]
        hashes: Vec<String>,

        /// Stop the simulation at this time (default: after the last highlight clears)
        #[arg(long)]
        until: Option<u64>,
    },
    /// Print a stock docnav.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { data: args, fragment } => {
            let config = config::load_config(&cli.config)?;
            let menu = load_menu(&args, &config)?;
            let html = if fragment {
                render::render_menu(&menu)
            } else {
                render::render_container(&menu, &config.menu)
            };
            println!("{}", html.into_string());
        }
        Command::Tree(args) => {
            let config = config::load_config(&cli.config)?;
            let menu = load_menu(&args, &config)?;
            output::print_tree(&menu);
        }
        Command::Check(args) => {
            let config = config::load_config(&cli.config)?;
            let breadcrumb = load_breadcrumb(args.breadcrumb.as_deref())?;
            let outline = data::load_outline(&args.toc)?;
            let menu = build_menu(&outline, &breadcrumb, &config.menu.menu_options());
            output::print_check(&menu, &breadcrumb);
            if breadcrumb.len() > 1 && menu.current().is_none() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Highlight {
            page,
            hashes,
            until,
        } => {
            let config = config::load_config(&cli.config)?;
            let page: StaticPage = serde_json::from_str(&std::fs::read_to_string(&page)?)?;
            let mut requests = hashes
                .iter()
                .map(|h| parse_request(h))
                .collect::<Result<Vec<_>, _>>()?;
            requests.sort_by_key(|(at, _)| *at);

            let span = config
                .highlight
                .settle_ms
                .saturating_add(config.highlight.duration_ms);
            let end = until.unwrap_or_else(|| {
                requests.last().map(|(at, _)| at.saturating_add(span)).unwrap_or(0)
            });
            let mut highlighter = Highlighter::new(page, config.highlight);
            for (at, hash) in &requests {
                highlighter.advance(at.saturating_sub(highlighter.now()));
                if !highlighter.on_hash_change(hash) {
                    info!("#{hash} at {at}ms: nothing to highlight");
                }
            }
            highlighter.advance(end.saturating_sub(highlighter.now()));
            output::print_transitions(&highlighter.take_transitions());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_menu(args: &DataArgs, config: &NavConfig) -> Result<Menu, data::DataError> {
    let outline = data::load_outline(&args.toc)?;
    let breadcrumb = load_breadcrumb(args.breadcrumb.as_deref())?;
    info!(
        "building menu for {} outline nodes, breadcrumb depth {}",
        outline.count(),
        breadcrumb.len()
    );
    Ok(build_menu(&outline, &breadcrumb, &config.menu.menu_options()))
}

fn load_breadcrumb(path: Option<&Path>) -> Result<Breadcrumb, data::DataError> {
    path.map(data::load_breadcrumb)
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse `id` or `id@ms`.
fn parse_request(raw: &str) -> Result<(u64, String), String> {
    match raw.rsplit_once('@') {
        Some((hash, at)) => at
            .parse::<u64>()
            .map(|at| (at, hash.to_string()))
            .map_err(|_| format!("invalid time in --hash {raw:?}")),
        None => Ok((0, raw.to_string())),
    }
}
