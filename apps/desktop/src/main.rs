use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use floor_core::{
    AssignOutcome, FloorPlanController, HttpSheetGateway, PlaceholderSheetGateway, RemoveOutcome,
    SaveNotice, SheetGateway,
};
use shared::domain::SlotId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;
mod render;

use command::{parse_command, resolve_company, Command, HELP};

#[derive(Parser, Debug)]
struct Args {
    /// Floor-plan server receiving snapshots; the offline placeholder is used when omitted.
    #[arg(long)]
    server_url: Option<String>,
    /// Simulated latency of the offline placeholder.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Read gestures from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let gateway: Arc<dyn SheetGateway> = match &args.server_url {
        Some(url) => Arc::new(
            HttpSheetGateway::new(url).with_context(|| format!("invalid --server-url {url}"))?,
        ),
        None => Arc::new(PlaceholderSheetGateway::new(Duration::from_millis(
            args.delay_ms,
        ))),
    };
    info!(server_url = ?args.server_url, "starting floor-plan editor");

    let input: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            println!("{HELP}");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let mut controller = FloorPlanController::new(gateway);
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = run_command(&mut controller, command).await {
            println!("{err:#}");
        }
    }

    controller.shutdown().await;
    Ok(())
}

async fn run_command(controller: &mut FloorPlanController, command: Command) -> Result<()> {
    match command {
        Command::Drop {
            company,
            slot,
            source,
        } => {
            let company_id = resolve_company(controller.store(), &company)?;
            let slot_id = SlotId::new(slot);
            let outcome = controller.on_drop(&slot_id, &company_id, source)?;
            println!("{}", describe_assign(&slot_id, &outcome));
        }
        Command::Remove { company } => {
            let company_id = resolve_company(controller.store(), &company)?;
            match controller.on_remove_requested(&company_id)? {
                RemoveOutcome::Cleared { slot } => {
                    println!("{company_id} removed from {slot}")
                }
                RemoveOutcome::AlreadyUnassigned => println!("{company_id} is not placed"),
            }
        }
        Command::Show => print!("{}", render::render_board(controller.store())),
        Command::Pool => print!("{}", render::render_pool(controller.store())),
        Command::Snapshot => println!(
            "{}",
            serde_json::to_string_pretty(&controller.store().snapshot())?
        ),
        Command::Save => {
            let notice = SaveNotice::from_result(&controller.save().await);
            println!("{}: {}", notice.title, notice.description);
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn describe_assign(slot: &SlotId, outcome: &AssignOutcome) -> String {
    match outcome {
        AssignOutcome::Placed => format!("placed in {slot}"),
        AssignOutcome::Evicted { displaced } => {
            format!("placed in {slot}; {displaced} returned to the pool")
        }
        AssignOutcome::Moved { from } => format!("moved from {from} to {slot}"),
        AssignOutcome::Swapped { with, displaced } => {
            format!("placed in {slot}; {displaced} moved to {with}")
        }
        AssignOutcome::Unchanged => format!("already in {slot}"),
    }
}
