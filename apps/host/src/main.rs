use std::path::PathBuf;
use std::sync::Arc;

use associations::api::read_game_file;
use associations::console::{
    changed_beyond_clock, parse_command, render_snapshot, render_standings, ConsoleCommand, HELP,
};
use associations::domain::{Leaderboard, Participant, SeededIndex};
use associations::protocol::{decode_inbound, InboundMessage};
use associations::runtime::LogSink;
use associations::{
    spawn_session, AppError, DelayQueueScheduler, GameApi, GameData, GameSession, HostCommand,
    HostConfig, OperatorNotice, SessionHandle, SessionSink,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

mod telemetry;

#[derive(Parser)]
#[command(name = "associations-host")]
#[command(about = "Host console for an Associations game session")]
struct Args {
    /// Game id to fetch from the game API
    #[arg(long, required_unless_present = "game_file", conflicts_with = "game_file")]
    game_id: Option<String>,

    /// Load game data from a JSON file instead of the API (scores are only logged)
    #[arg(long)]
    game_file: Option<PathBuf>,

    /// Override ASSOCIATIONS_API_BASE
    #[arg(long)]
    api_base: Option<String>,

    /// Seed word draws (overrides ASSOCIATIONS_WORD_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Name announced when the host leaves
    #[arg(long, default_value = "Host")]
    host_name: String,
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut config = HostConfig::from_env()?;
    if let Some(base) = &args.api_base {
        config = config.with_api_base(base)?;
    }
    if args.seed.is_some() {
        config.word_seed = args.seed;
    }

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    spawn_outbound_printer(outbound_rx);

    let (data, sink): (GameData, Arc<dyn SessionSink>) = match &args.game_file {
        Some(path) => (read_game_file(path).await?, Arc::new(LogSink)),
        None => {
            let api = GameApi::new(&config)?.with_outbound(outbound_tx);
            let game_id = args.game_id.as_deref().unwrap_or_default();
            (api.fetch_game(game_id).await?, Arc::new(api))
        }
    };

    let picker = match config.word_seed {
        Some(seed) => SeededIndex::from_seed(seed),
        None => SeededIndex::from_entropy(),
    };
    let session = GameSession::new(DelayQueueScheduler::new(), Box::new(picker));
    let handle = spawn_session(session, sink);

    let mut leaderboard = Leaderboard::new(data.teams.clone());
    let host = Participant {
        id: args.host_name.clone(),
        name: args.host_name.clone(),
    };
    info!(game_id = %data.id, "Starting host console");

    spawn_snapshot_printer(&handle);
    spawn_notice_printer(&handle);
    handle.send(HostCommand::Load(Box::new(data))).await?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = lines
            .next_line()
            .await
            .map_err(|err| AppError::io("Failed to read stdin", err))?;
        let Some(line) = line else {
            handle.send(HostCommand::Shutdown).await?;
            break;
        };

        match parse_command(&line) {
            Ok(ConsoleCommand::Host(command)) => handle.send(command).await?,
            Ok(ConsoleCommand::Status) => println!("{}", render_snapshot(&handle.snapshot())),
            Ok(ConsoleCommand::Standings) => println!("{}", render_standings(&leaderboard)),
            Ok(ConsoleCommand::Push(raw)) => apply_push(&raw, &mut leaderboard),
            Ok(ConsoleCommand::Leave) => {
                handle.send(HostCommand::Leave(host.clone())).await?;
                break;
            }
            Ok(ConsoleCommand::Quit) => {
                handle.send(HostCommand::Shutdown).await?;
                break;
            }
            Ok(ConsoleCommand::Help) => println!("{HELP}"),
            Err(message) => println!("{message}; {HELP}"),
        }
    }

    handle.join().await?;
    println!("👋 Session closed");
    Ok(())
}

fn apply_push(raw: &str, leaderboard: &mut Leaderboard) {
    match decode_inbound(raw) {
        Ok(InboundMessage::Score { teams }) => {
            if leaderboard.merge(teams) {
                println!("{}", render_standings(leaderboard));
            }
        }
        Ok(other) => info!(message = ?other, "Realtime message ignored by the host console"),
        Err(err) => println!("{err}"),
    }
}

fn spawn_snapshot_printer(handle: &SessionHandle) {
    let mut snapshots = handle.subscribe_snapshots();
    tokio::spawn(async move {
        let mut last = snapshots.borrow_and_update().clone();
        while snapshots.changed().await.is_ok() {
            let current = snapshots.borrow_and_update().clone();
            if changed_beyond_clock(&last, &current) {
                println!("{}", render_snapshot(&current));
            }
            last = current;
        }
    });
}

fn spawn_notice_printer(handle: &SessionHandle) {
    let mut notices = handle.subscribe_notices();
    tokio::spawn(async move {
        loop {
            let notice = match notices.recv().await {
                Ok(notice) => notice,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Operator notices dropped");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            match notice {
                OperatorNotice::ScoreNotRecorded { contestant_id, detail, .. } => {
                    eprintln!("⚠️  score for {contestant_id} not recorded: {detail}");
                }
                OperatorNotice::LeaveNotDelivered { detail, .. } => {
                    eprintln!("⚠️  leave notice not delivered: {detail}");
                }
                OperatorNotice::CommandRejected { command, detail } => {
                    eprintln!("⚠️  {command} rejected: {detail}");
                }
            }
        }
    });
}

fn spawn_outbound_printer(mut outbound: mpsc::UnboundedReceiver<String>) {
    tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            // No socket in the console; show what would be sent.
            println!("→ {message}");
        }
        debug!("Outbound channel closed");
    });
}
