//! Reward replay executable entry point.
//!
//! # Architecture
//!
//! Replays a recorded telemetry log through the reward engine exactly as the simulation host
//! would call it, one step at a time:
//!
//!     - Initialise the session and logging
//!     - Load the reward parameters and the telemetry log
//!     - Initialise the reward engine
//!     - For each recorded step:
//!         - Score the step
//!         - Archive the engine's status report
//!     - Log and save a summary of the replay
//!
//! Malformed telemetry aborts the replay, in the same way as it would abort the host's step.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use reward_lib::reward::{Params, RewardEngine, StatusReport};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    replay::ReplayLog,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Replay recorded telemetry through the racing line reward engine
#[derive(Debug, StructOpt)]
#[structopt(name = "reward_exec")]
struct Opts {
    /// Reward parameter file (TOML)
    #[structopt(parse(from_os_str))]
    params: PathBuf,

    /// Telemetry log, one JSON host parameter mapping per line
    #[structopt(parse(from_os_str))]
    telemetry: PathBuf,

    /// Directory to create the session in, defaults to `sessions` in the software root
    #[structopt(long, parse(from_os_str))]
    sessions_dir: Option<PathBuf>,

    /// Minimum log level, one of info, debug or trace
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    /// Log level of the per-step scoring output
    #[structopt(long, default_value = "debug")]
    step_log_level: LevelFilter,
}

/// Totals over a whole replay.
#[derive(Debug, Default, Serialize)]
struct ReplaySummary {
    num_steps: u64,
    num_episodes: u64,
    num_offtrack_overrides: u64,
    total_reward: f64,
    mean_reward: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ReplaySummary {
    fn record(&mut self, reward: f64, report: &StatusReport) {
        self.num_steps += 1;
        self.total_reward += reward;
        self.mean_reward = self.total_reward / self.num_steps as f64;

        if report.episode_start {
            self.num_episodes += 1;
        }
        if report.offtrack_override {
            self.num_offtrack_overrides += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = match opts.sessions_dir {
        Some(ref dir) => Session::in_dir("reward_exec", dir),
        None => Session::new("reward_exec", "sessions"),
    }
    .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, opts.step_log_level, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Racing Line Reward Replay\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let params: Params = util::params::load_path(&opts.params)
        .wrap_err_with(|| format!("Could not load reward params from {:?}", opts.params))?;

    session
        .save_json("params.json", &params)
        .wrap_err("Could not save the reward params to the session")?;

    info!("Reward parameters loaded from {:?}", opts.params);

    // ---- LOAD TELEMETRY ----

    let mut log = ReplayLog::new(&opts.telemetry).wrap_err("Failed to load the telemetry log")?;

    info!(
        "Loaded {} steps from {:?}\n",
        log.get_num_steps(),
        log.get_path()
    );

    // ---- INITIALISE ENGINE ----

    let mut engine = RewardEngine::default();
    engine
        .init(params, Some(&session))
        .wrap_err("Failed to initialise the reward engine")?;

    // ---- REPLAY ----

    let mut summary = ReplaySummary::default();

    while let Some(step) = log.next_step() {
        let reward = engine
            .reward_function(&step.params)
            .wrap_err_with(|| format!("Could not score line {} of the telemetry log", step.line_num))?;

        engine
            .write()
            .map_err(|e| eyre!("Failed to archive step {}: {}", summary.num_steps + 1, e))?;

        summary.record(reward, engine.report());
    }

    // ---- SUMMARY ----

    info!("Replay complete");
    info!("    Steps scored: {}", summary.num_steps);
    info!("    Episodes: {}", summary.num_episodes);
    info!("    Off-track overrides: {}", summary.num_offtrack_overrides);
    info!("    Total reward: {:.4}", summary.total_reward);
    info!("    Mean reward: {:.4}", summary.mean_reward);

    session
        .save_json("summary.json", &summary)
        .wrap_err("Could not save the replay summary")?;

    Ok(())
}
