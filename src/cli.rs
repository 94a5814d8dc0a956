//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::stock_port_for;
use crate::domain::config_validation::validate_config;
use crate::domain::error::ScreenerError;
use crate::domain::query_parser::explain_query;
use crate::domain::screener::{ScreenOutcome, screen};
use crate::domain::stock::{Column, Metric, Stock};
use crate::domain::table::{DEFAULT_PAGE_SIZE, SortConfig, SortDirection, build_view};
use crate::domain::url_state::ScreenState;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "stockscreen", about = "Screen stock fundamentals with plain-text queries")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter the stock table with a query and print one page of results
    Screen {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stock data file (.json or .csv); overrides [data] path
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Conditions separated by newlines or AND, e.g. "roe > 15 AND p/e ratio < 20"
        #[arg(short, long)]
        query: String,
        /// Column identifier to sort by, e.g. peRatio or ticker
        #[arg(long)]
        sort_key: Option<Column>,
        #[arg(long, default_value = "ascending")]
        sort_direction: SortDirection,
        #[arg(long, default_value = "1")]
        page: NonZeroUsize,
        /// Case-insensitive ticker substring
        #[arg(long)]
        search: Option<String>,
        /// Rows per page; overrides [table] page_size
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
        /// Print the page as JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Show how a query is split into conditions and why clauses are rejected
    Parse {
        #[arg(short, long)]
        query: String,
    },
    /// List the fields a query may filter on
    Fields,
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Listen address; overrides [web] listen
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Screen {
            config,
            data,
            query,
            sort_key,
            sort_direction,
            page,
            search,
            page_size,
            json,
        } => load_settings(config.as_deref()).and_then(|settings| {
            let settings = settings.with_overrides(data, page_size.map(NonZeroUsize::get), None);
            let sort = sort_key.map(|column| SortConfig {
                column,
                direction: sort_direction,
            });
            let state = screen_state(&query, sort, search.as_deref(), page);
            run_screen(&settings, &state, json)
        }),
        Command::Parse { query } => run_parse(&query),
        Command::Fields => {
            print!("{}", render_fields());
            Ok(())
        }
        Command::Serve {
            config,
            data,
            listen,
        } => load_settings(config.as_deref())
            .and_then(|settings| run_serve(settings.with_overrides(data, None, listen))),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Effective settings after config file and command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` selects the bundled data set.
    pub data_path: Option<PathBuf>,
    pub page_size: usize,
    pub listen: SocketAddr,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            listen: default_listen(),
        }
    }
}

pub fn default_listen() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 3000))
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ScreenerError> {
        validate_config(config)?;
        let listen = match config.get_non_blank("web", "listen") {
            Some(addr) => addr.parse().map_err(|_| ScreenerError::ConfigInvalid {
                section: "web".to_string(),
                key: "listen".to_string(),
                reason: format!("invalid socket address '{}'", addr),
            })?,
            None => default_listen(),
        };
        Ok(Self {
            data_path: config.get_non_blank("data", "path").map(PathBuf::from),
            page_size: config.get_usize("table", "page_size", DEFAULT_PAGE_SIZE),
            listen,
        })
    }

    pub fn with_overrides(
        self,
        data_path: Option<PathBuf>,
        page_size: Option<usize>,
        listen: Option<SocketAddr>,
    ) -> Self {
        Self {
            data_path: data_path.or(self.data_path),
            page_size: page_size.unwrap_or(self.page_size),
            listen: listen.unwrap_or(self.listen),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ScreenerError> {
    match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, ScreenerError> {
    let config = load_config(path)?;
    Settings::from_config(&config)
}

/// Table state for a one-shot screen: the query is submitted first, then
/// search and page are applied on top of it.
fn screen_state(
    query: &str,
    sort: Option<SortConfig>,
    search: Option<&str>,
    page: NonZeroUsize,
) -> ScreenState {
    let mut state = ScreenState::default();
    state.table.sort = sort;
    state.submit_query(query);
    state.table.apply_search(search.unwrap_or_default());
    state.table.page = page.get();
    state
}

fn run_screen(settings: &Settings, state: &ScreenState, as_json: bool) -> Result<(), ScreenerError> {
    let port = stock_port_for(settings.data_path.as_deref());
    let stocks = port.load_stocks()?;

    let outcome = screen(&stocks, &state.query);
    let conditions = match &outcome {
        ScreenOutcome::NoValidConditions => return Err(ScreenerError::NoValidConditions),
        ScreenOutcome::NoMatches { .. } => {
            if let Some(message) = outcome.message() {
                println!("{message}");
            }
            return Ok(());
        }
        ScreenOutcome::Matches { conditions, .. } => conditions,
    };

    let view = build_view(outcome.stocks(), &state.table, settings.page_size);
    if as_json {
        let body = json!({
            "conditions": conditions,
            "page": view.page,
            "pageSize": view.page_size,
            "totalPages": view.total_pages,
            "totalRows": view.total_rows,
            "rows": view.rows,
            "queryString": state.to_query_string(),
        });
        let text = serde_json::to_string_pretty(&body).map_err(std::io::Error::other)?;
        println!("{text}");
    } else {
        print!("{}", render_table(&view.rows));
        println!(
            "page {} of {} ({} rows)",
            view.page, view.total_pages, view.total_rows
        );
        println!("{}", state.href());
    }
    Ok(())
}

fn run_parse(query: &str) -> Result<(), ScreenerError> {
    let report = explain_query(query);
    for condition in &report.conditions {
        println!("ok      {condition}");
    }
    for rejected in &report.rejected {
        eprintln!("skipped {}", rejected.clause);
        for line in rejected.error.display_with_context(&rejected.clause).lines() {
            eprintln!("        {line}");
        }
    }
    if report.conditions.is_empty() {
        return Err(ScreenerError::NoValidConditions);
    }
    Ok(())
}

/// Aligned plain-text table: ticker left-aligned, metrics right-aligned.
pub fn render_table(rows: &[&Stock]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|stock| Column::ALL.into_iter().map(|c| stock.cell(c)).collect())
        .collect();

    let widths: Vec<usize> = Column::ALL
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.header().chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    let headers: Vec<String> = Column::ALL.iter().map(|c| c.header().to_string()).collect();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let line: Vec<String> = row
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn render_fields() -> String {
    let label_width = Metric::ALL
        .iter()
        .map(|m| m.label().len())
        .max()
        .unwrap_or_default();
    let id_width = Metric::ALL
        .iter()
        .map(|m| m.identifier().len())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for metric in Metric::ALL {
        out.push_str(&format!(
            "{:<label_width$}  {:<id_width$}  {}\n",
            metric.label(),
            metric.identifier(),
            metric.header(),
        ));
    }
    out
}

fn run_serve(settings: Settings) -> Result<(), ScreenerError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, serve};
        use crate::ports::stock_port::StockPort;
        use std::sync::Arc;

        let stock_port: Arc<dyn StockPort + Send + Sync> =
            Arc::from(stock_port_for(settings.data_path.as_deref()));
        eprintln!(
            "Serving {} on http://{}",
            stock_port.describe(),
            settings.listen
        );

        let state = AppState {
            stock_port,
            page_size: settings.page_size,
        };
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(serve(state, settings.listen))
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = settings;
        Err(ScreenerError::Io(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "web feature is required for serve",
        )))
    }
}
