use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use silat_scoreboard::config::AppConfig;
use silat_scoreboard::error::AppError;
use silat_scoreboard::telemetry;
use silat_scoreboard::workflows::recap::{RecapImporter, RecapRepository, ScoreBook};
use silat_scoreboard::workflows::tally::{
    rank_standings, standings_router, AgeGroup, Category, ChampionStanding, ClassGroup,
    CombinedStanding, ParticipantStanding, RubricConfig, StandingsEngine, StandingsFilter,
    StandingsService,
};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Silat Scoreboard",
    about = "Serve or print trusted scores and standings for a Pencak Silat tournament",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print standings computed from a recap CSV export
    Standings(StandingsArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Recap CSV export to serve as the data source
    #[arg(long)]
    recap_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StandingsArgs {
    /// Recap CSV export with one row per judge per session
    #[arg(long)]
    recap_csv: PathBuf,
    /// Restrict to one class group (putra or putri)
    #[arg(long, value_parser = parse_class_group)]
    class_group: Option<ClassGroup>,
    /// Restrict to one age group (golongan)
    #[arg(long)]
    age_group: Option<String>,
    /// Restrict to one category (kategori)
    #[arg(long)]
    category: Option<String>,
    /// Print the overall-champion boards instead of plain standings
    #[arg(long)]
    champion: bool,
    /// Print the joint Putra+Putri champion board
    #[arg(long)]
    combined: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Standings(args) => run_standings_report(args),
    }
}

fn parse_class_group(raw: &str) -> Result<ClassGroup, String> {
    ClassGroup::parse(raw)
        .ok_or_else(|| format!("unknown class group '{raw}' (expected putra or putri)"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let rubric = RubricConfig::standard();
    let book = match args.recap_csv.take().or_else(|| config.recap.csv_path.clone()) {
        Some(path) => RecapImporter::from_path(path, &rubric)?,
        None => ScoreBook::default(),
    };
    let repository = Arc::new(RecapRepository::new(book));
    let service = Arc::new(StandingsService::new(repository, rubric));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(standings_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scoreboard service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_standings_report(args: StandingsArgs) -> Result<(), AppError> {
    let rubric = RubricConfig::standard();
    let book = RecapImporter::from_path(&args.recap_csv, &rubric)?;
    let scores_by_session = book.scores_by_session();
    let engine = StandingsEngine::new(rubric);

    if args.combined {
        let board = engine.combined_champion(&book.sessions, &scores_by_session);
        render_combined_board(&board);
        return Ok(());
    }

    if args.champion {
        let class_groups = match args.class_group {
            Some(class_group) => vec![class_group],
            None => ClassGroup::ordered().to_vec(),
        };
        for class_group in class_groups {
            let board = engine.champion(&book.sessions, &scores_by_session, class_group);
            render_champion_board(
                class_group,
                engine.rubric().expected_session_count(),
                &board,
            );
        }
        return Ok(());
    }

    let filter = StandingsFilter {
        class_group: args.class_group,
        age_group: args.age_group.map(AgeGroup),
        category: args.category.map(Category),
    };
    let standings = rank_standings(&book.sessions, &scores_by_session, &filter);
    render_standings(&standings);
    Ok(())
}

fn render_standings(standings: &[ParticipantStanding]) {
    println!("Standings");
    if standings.is_empty() {
        println!("- no completed sessions in scope");
        return;
    }
    for entry in standings {
        println!(
            "{:>3}. {} ({}) - {} points from {} session(s)",
            entry.rank,
            entry.village.0,
            entry.class_group.label(),
            entry.total_score,
            entry.completed_sessions
        );
    }
}

fn render_champion_board(class_group: ClassGroup, expected: usize, board: &[ChampionStanding]) {
    println!(
        "\nOverall champion board - {} (quota {} sessions)",
        class_group.label(),
        expected
    );
    if board.is_empty() {
        println!("- no completed sessions");
        return;
    }
    for entry in board {
        match entry.rank {
            Some(rank) => println!(
                "{:>3}. {} - {} points from {} session(s)",
                rank, entry.village.0, entry.total_score, entry.completed_sessions
            ),
            None => println!(
                "  -. {} - {} points from {} session(s) (not eligible)",
                entry.village.0, entry.total_score, entry.completed_sessions
            ),
        }
    }
}

fn render_combined_board(board: &[CombinedStanding]) {
    println!("\nJoint champion board (Putra + Putri)");
    if board.is_empty() {
        println!("- no completed sessions");
        return;
    }
    for entry in board {
        println!(
            "{:>3}. {} - {} points (Putra {}, Putri {}) from {} session(s)",
            entry.rank,
            entry.village.0,
            entry.joint_total,
            entry.putra_total,
            entry.putri_total,
            entry.completed_sessions
        );
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const RECAP_CSV: &str = "\
Session ID,Village,Class Group,Age Group,Category,Status,Scheduled For,Judge,Marks
s-1,Sukamaju,Putra,Remaja,Tunggal,completed,2025-07-12,Pak Harun,kebenaran=19
s-1,Sukamaju,Putra,Remaja,Tunggal,completed,2025-07-12,Bu Sari,kebenaran=20
s-1,Sukamaju,Putra,Remaja,Tunggal,completed,2025-07-12,Pak Dedi,kebenaran=30
s-1,Sukamaju,Putra,Remaja,Tunggal,completed,2025-07-12,Bu Rina,kebenaran=40
s-1,Sukamaju,Putra,Remaja,Tunggal,completed,2025-07-12,Pak Tono,kebenaran=50
s-2,Wanasari,Putra,Remaja,Tunggal,completed,2025-07-12,Pak Harun,kebenaran=25
";

    #[test]
    fn parse_class_group_accepts_both_divisions() {
        assert_eq!(parse_class_group("putra"), Ok(ClassGroup::Putra));
        assert_eq!(parse_class_group("Putri"), Ok(ClassGroup::Putri));
        assert!(parse_class_group("mixed").is_err());
    }

    #[test]
    fn recap_export_feeds_trimmed_standings() {
        let rubric = RubricConfig::standard();
        let book =
            RecapImporter::from_reader(Cursor::new(RECAP_CSV), &rubric).expect("recap imports");
        let standings = rank_standings(
            &book.sessions,
            &book.scores_by_session(),
            &StandingsFilter::default(),
        );

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].village.0, "Sukamaju");
        assert_eq!(standings[0].total_score, 90);
        assert_eq!(standings[1].village.0, "Wanasari");
        assert_eq!(standings[1].total_score, 25);
    }
}
