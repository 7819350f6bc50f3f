use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use authguide_ai::{IntentClassifier, RemoteClassifier, RuleClassifier};
use authguide_data::{BundleSource, DirSource, HttpSource};
use authguide_engine::Session;
use clap::{Parser, Subcommand};

mod chat;
mod display;

#[derive(Parser)]
#[command(name = "authguide", version, about = "사내 권한/메뉴 가이드")]
struct Cli {
    /// Base URL of the host serving the `data/` artifacts.
    #[arg(long, env = "AUTHGUIDE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Local directory containing a `data/` export (overrides --base-url).
    #[arg(long, env = "AUTHGUIDE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Intent-analysis service URL. Omitted → rule-based classification only.
    #[arg(long, env = "AUTHGUIDE_CLASSIFIER_URL", global = true)]
    classifier_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List teams.
    Teams,
    /// List a team's systems.
    Systems {
        #[arg(long)]
        team: String,
    },
    /// Browse a system's unified roles and their menus.
    Roles {
        #[arg(long)]
        team: String,
        #[arg(long)]
        system: String,
        /// Substring filter applied to menu paths.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Interactive chat search against the selected team/system.
    Chat {
        #[arg(long)]
        team: String,
        #[arg(long)]
        system: String,
    },
}

fn make_source(cli: &Cli) -> anyhow::Result<Arc<dyn BundleSource>> {
    if let Some(dir) = &cli.data_dir {
        return Ok(Arc::new(DirSource::new(dir.clone())));
    }
    if let Some(url) = &cli.base_url {
        return Ok(Arc::new(HttpSource::new(url.clone())));
    }
    bail!("set --data-dir or --base-url (AUTHGUIDE_DATA_DIR / AUTHGUIDE_BASE_URL)");
}

fn make_classifier(cli: &Cli) -> anyhow::Result<Arc<dyn IntentClassifier>> {
    match &cli.classifier_url {
        Some(url) => Ok(Arc::new(RemoteClassifier::new(url.clone())?)),
        None => {
            tracing::info!("no classifier URL configured, using rule-based classification");
            Ok(Arc::new(RuleClassifier::new()))
        }
    }
}

async fn select(session: &mut Session, team: &str, system: &str) -> anyhow::Result<()> {
    session.load_teams().await?;
    let selection = session.select_team(team).await?;
    if let Some(warning) = selection.bundle_warning {
        println!("! {warning}");
    }
    session.select_system(system).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let source = make_source(&cli)?;
    let classifier = make_classifier(&cli)?;
    let mut session = Session::new(source, classifier);

    match &cli.command {
        Command::Teams => {
            let teams = session.load_teams().await?;
            display::print_teams(teams);
        }
        Command::Systems { team } => {
            session.load_teams().await?;
            let selection = session.select_team(team).await?;
            display::print_systems(&selection.systems);
        }
        Command::Roles {
            team,
            system,
            filter,
        } => {
            select(&mut session, team, system).await?;
            display::print_role_browser(&session, filter.as_deref());
        }
        Command::Chat { team, system } => {
            select(&mut session, team, system).await?;
            chat::run(&mut session).await?;
        }
    }

    Ok(())
}
