//! `lekko`: inspect and exercise a route table file.
//!
//! ```text
//! lekko --config routes.toml routes
//! lekko --config routes.toml match /users/42
//! lekko --config routes.toml navigate goto:/about back forward link:/users/7
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;

use lekko::config::{load_config, RouterConfig};
use lekko::navigation::links::classify;
use lekko::observability::logging::init_logging;
use lekko::{History, LinkDisposition, MemoryHistory, Route, Router};

#[derive(Parser)]
#[command(name = "lekko")]
#[command(about = "Inspect and exercise a client-side route table", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Log filter, overriding the config file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List compiled routes
    Routes,
    /// Match a path and print the result as JSON
    Match { path: String },
    /// Simulate a navigation session on in-memory history
    Navigate {
        /// goto:<path>, replace:<path>, link:<href>, back, forward
        #[arg(required = true)]
        steps: Vec<Step>,
    },
}

#[derive(Debug, Clone)]
enum Step {
    Goto(String),
    Replace(String),
    Link(String),
    Back,
    Forward,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("goto", path)) => Ok(Step::Goto(path.to_string())),
            Some(("replace", path)) => Ok(Step::Replace(path.to_string())),
            Some(("link", href)) => Ok(Step::Link(href.to_string())),
            _ if s == "back" => Ok(Step::Back),
            _ if s == "forward" => Ok(Step::Forward),
            _ => Err(format!("unknown step {s:?}")),
        }
    }
}

/// Turn config routes into routes whose views are their names.
fn named_routes(config: &RouterConfig) -> Vec<Route<String>> {
    config
        .routes
        .iter()
        .map(|route| {
            if !route.lazy {
                return Route::new(route.path.clone(), route.view.clone());
            }
            let view = route.view.clone();
            let delay = Duration::from_millis(route.load_delay_ms);
            Route::lazy(route.path.clone(), move || {
                let view = view.clone();
                async move {
                    tokio::time::sleep(delay).await;
                    Ok(view)
                }
            })
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging)?;

    let history = Arc::new(MemoryHistory::parse(&config.navigation.base_url)?);
    let router = Router::new(named_routes(&config), history.clone(), &config.navigation);

    match cli.command {
        Commands::Routes => {
            for (index, route) in router.table().routes().iter().enumerate() {
                println!(
                    "{index:>3}  {:<30} {:<40} [{}]",
                    route.path(),
                    route.pattern().as_regex(),
                    route.param_names().join(", ")
                );
            }
        }
        Commands::Match { path } => {
            let output = match router.match_path(&path) {
                Some(m) => json!({
                    "matched": true,
                    "index": m.route.index(),
                    "template": m.route.path(),
                    "params": m.params,
                }),
                None => json!({ "matched": false }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Navigate { steps } => {
            let outcome = router.adopt_location().await?;
            report("initial", outcome.as_str(), &router, &history);

            for step in steps {
                let label = format!("{step:?}");
                let result = match step {
                    Step::Goto(path) => router.goto(&path).await,
                    Step::Replace(path) => router.replace(&path).await,
                    Step::Link(href) => match classify(&history.location(), &href) {
                        LinkDisposition::Intercepted(url) => router.goto(url.as_str()).await,
                        LinkDisposition::PassThrough => {
                            report(&label, "pass_through", &router, &history);
                            continue;
                        }
                    },
                    Step::Back => {
                        if !history.back() {
                            report(&label, "at_edge", &router, &history);
                            continue;
                        }
                        router.sync_with_history().await
                    }
                    Step::Forward => {
                        if !history.forward() {
                            report(&label, "at_edge", &router, &history);
                            continue;
                        }
                        router.sync_with_history().await
                    }
                };
                match result {
                    Ok(outcome) => report(&label, outcome.as_str(), &router, &history),
                    Err(e) => report(&label, &format!("error: {e}"), &router, &history),
                }
            }
        }
    }

    Ok(())
}

fn report(step: &str, outcome: &str, router: &Router<String>, history: &MemoryHistory) {
    let view = router.page().unwrap_or_else(|| "-".to_string());
    println!(
        "{step:<24} {outcome:<18} url={} depth={}/{} view={view} params={:?}",
        history.location().path(),
        history.cursor() + 1,
        history.len(),
        router.params(),
    );
}
