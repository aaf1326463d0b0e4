use crate::host::{Host, LogNavigator, Settings};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use waymark_bridge::messages::{Bridge, OutgoingMessage};
use waymark_bridge::orchestrator::{Orchestrator, Outcome};
use waymark_bridge::{AddressClient, EventBus, ThemeControl};
use waymark_core::theme::ThemeResolver;
use waymark_core::types::{AddressRecord, RecordId, ThemeMode};

#[derive(Debug, Parser)]
#[command(name = "waymark", about = "Saved addresses with recency and theme settings", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the last selected address, if it is still saved.
    Start,

    /// Save an address and open it.
    Open {
        url: String,
        /// Display name; defaults to the host.
        #[arg(long)]
        name: Option<String>,
    },

    /// Open a saved address by id.
    Select { id: String },

    /// Delete a saved address by id.
    Remove { id: String },

    /// List saved addresses, current selection first.
    List {
        /// Most recently used only.
        #[arg(long)]
        recent: bool,
        /// Case-insensitive match on name or url.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show or change the theme mode.
    Theme { mode: Option<ThemeMode> },

    /// Serve JSON messages line by line on stdin/stdout.
    Bridge,
}

pub async fn run(cli: Cli, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
    let host = Host::open(settings)?;
    let result = dispatch(cli.command, &host, out).await;
    host.close().await?;
    result
}

async fn dispatch(command: Commands, host: &Host, out: &mut impl Write) -> anyhow::Result<()> {
    let mut orchestrator = Orchestrator::new(host.client.clone(), LogNavigator)
        .with_recent_limit(host.config.views.recent_limit);

    match command {
        Commands::Start => {
            match orchestrator.startup().await? {
                Outcome::Navigated(url) => writeln!(out, "Opened {url}")?,
                _ => writeln!(out, "No saved selection; enter an address")?,
            }
        }
        Commands::Open { url, name } => {
            orchestrator.refresh().await?;
            let outcome = orchestrator.submit(&url, name.as_deref()).await?;
            report(out, &outcome)?;
        }
        Commands::Select { id } => {
            orchestrator.refresh().await?;
            let record = find(orchestrator.addresses(), &id)?;
            let outcome = orchestrator.select(&record).await?;
            report(out, &outcome)?;
        }
        Commands::Remove { id } => {
            if orchestrator.delete(&RecordId::from(id.as_str())).await? {
                writeln!(out, "Removed {id}")?;
            } else {
                writeln!(out, "No address with id {id}")?;
            }
        }
        Commands::List { recent, filter } => {
            orchestrator.refresh().await?;
            let records = if recent {
                orchestrator.recent()
            } else {
                orchestrator.manage(filter.as_deref())
            };
            for record in &records {
                let marker = if record.url.as_str() == orchestrator.current() {
                    '*'
                } else {
                    ' '
                };
                writeln!(out, "{marker} {}  {}  {}", record.id, record.name, record.url)?;
            }
        }
        Commands::Theme { mode } => {
            let mut theme = ThemeResolver::load(host.backing.clone(), &host.appearance)?;
            let state = match mode {
                Some(mode) => theme.set_mode(mode)?,
                None => theme.state(),
            };
            let effective = if state.is_dark { "dark" } else { "light" };
            writeln!(out, "{} ({effective})", state.mode)?;
        }
        Commands::Bridge => {
            let theme = ThemeResolver::load(host.backing.clone(), &host.appearance)?;
            let bridge = Bridge::new(host.client.clone(), Mutex::new(theme), EventBus::new(16));
            serve(&bridge, BufReader::new(tokio::io::stdin()), out).await?;
        }
    }

    Ok(())
}

fn find(records: &[AddressRecord], id: &str) -> anyhow::Result<AddressRecord> {
    match records.iter().find(|r| r.id.as_str() == id) {
        Some(record) => Ok(record.clone()),
        None => bail!("no address with id {id}"),
    }
}

fn report(out: &mut impl Write, outcome: &Outcome) -> anyhow::Result<()> {
    match outcome {
        Outcome::Navigated(url) => writeln!(out, "Opened {url}")?,
        Outcome::AlreadyCurrent => writeln!(out, "Already open")?,
        Outcome::Idle => {}
    }
    Ok(())
}

/// Answers one JSON message per input line. Notifications raised by a
/// message are written after its reply.
pub async fn serve<T: ThemeControl, R: AsyncBufRead + Unpin>(
    bridge: &Bridge<AddressClient, T>,
    input: R,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut events = bridge.events().subscribe();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(reply) = bridge.handle_json(&line).await? {
            writeln!(out, "{reply}")?;
        }
        while let Ok(notification) = events.try_recv() {
            let message = OutgoingMessage::from(notification);
            writeln!(out, "{}", serde_json::to_string(&message)?)?;
        }
        out.flush()?;
    }

    Ok(())
}
