//! SleepWell Simulator CLI
//!
//! Terminal dashboard for the sleep quality simulator.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use crossbeam_channel::Sender;
use sleepwell_simulator::{
    config::{validate_multiplier, Config},
    core::{
        format_elapsed, run_night, speed_label, EndReason, SessionMeta, SessionMonitor,
        SleepReport, SummaryBuilder, TickFrame, TickOutcome,
    },
    sensors::{PanelCommand, Preset, SensorLevels, SensorPanel, SimulationPhase},
    MONITOR_HELP, VERSION,
};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Width of the text gauge bar.
const GAUGE_WIDTH: usize = 20;

/// How often the live monitor prints a status line.
const STATUS_LINE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "sleepwell")]
#[command(version = VERSION)]
#[command(about = "Sleep quality simulator driven by simulated bed sensors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live monitor, reading slider commands from stdin
    Monitor {
        /// Time multiplier (1-3600); defaults to the configured value
        #[arg(long)]
        multiplier: Option<f64>,

        /// Initial slider preset (deep-sleep, snoring, restless, out-of-bed)
        #[arg(long)]
        preset: Option<String>,

        /// Initial bed-pressure reading
        #[arg(long)]
        pressure: Option<f64>,

        /// Initial microphone reading
        #[arg(long)]
        mic: Option<f64>,

        /// Initial motion reading
        #[arg(long)]
        motion: Option<f64>,

        /// Start the session immediately
        #[arg(long)]
        auto_start: bool,

        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a scripted night without waiting for real time
    Simulate {
        /// Phase as <preset|pressure,mic,motion>:<hours>; repeat for several phases
        #[arg(long = "phase", required = true)]
        phases: Vec<SimulationPhase>,

        /// Time multiplier (1-3600)
        #[arg(long, default_value_t = 3600.0)]
        multiplier: f64,

        /// Tick interval in milliseconds; defaults to the configured value
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save the default time multiplier
    SetSpeed {
        /// Virtual seconds per real second (1-3600)
        multiplier: f64,
    },

    /// List slider presets
    Presets,

    /// Show configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor {
            multiplier,
            preset,
            pressure,
            mic,
            motion,
            auto_start,
            json,
        } => {
            let levels = initial_levels(preset.as_deref(), pressure, mic, motion)?;
            cmd_monitor(multiplier, levels, auto_start, json)
        }
        Commands::Simulate {
            phases,
            multiplier,
            tick_ms,
            json,
        } => cmd_simulate(&phases, multiplier, tick_ms, json),
        Commands::SetSpeed { multiplier } => cmd_set_speed(multiplier),
        Commands::Presets => {
            cmd_presets();
            Ok(())
        }
        Commands::Config => cmd_config(),
    }
}

/// Log to stderr so stdout stays the dashboard.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sleepwell_simulator=info,sleepwell=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {e}");
        Config::default()
    })
}

fn initial_levels(
    preset: Option<&str>,
    pressure: Option<f64>,
    mic: Option<f64>,
    motion: Option<f64>,
) -> anyhow::Result<SensorLevels> {
    let mut levels = match preset {
        Some(name) => name.parse::<Preset>()?.levels(),
        None => SensorLevels::default(),
    };
    if let Some(v) = pressure {
        levels.pressure = v;
    }
    if let Some(v) = mic {
        levels.microphone = v;
    }
    if let Some(v) = motion {
        levels.motion = v;
    }
    // Re-clamp after overrides.
    Ok(SensorLevels::new(
        levels.pressure,
        levels.microphone,
        levels.motion,
    ))
}

/// Tracks the wall-clock side of a running session.
struct LiveSession {
    started_at: DateTime<Utc>,
}

fn cmd_monitor(
    multiplier: Option<f64>,
    levels: SensorLevels,
    auto_start: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = load_config();
    if let Some(m) = multiplier {
        validate_multiplier(m)?;
        config.time_multiplier = m;
    }

    println!("SleepWell Simulator v{VERSION}");
    println!();
    println!("  Speed: {}", speed_label(config.time_multiplier));
    println!("  Tick interval: {}ms", config.tick_interval.as_millis());
    println!("  Sensors: {levels}");
    println!("{MONITOR_HELP}");
    println!("Press Ctrl+C to stop");
    println!();

    let mut panel = SensorPanel::new(levels);
    panel.start()?;
    let mut monitor = SessionMonitor::new(config.monitor_settings());
    let summary_builder = SummaryBuilder::new();

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(running.clone())?;

    spawn_stdin_reader(panel.sender());

    let mut session: Option<LiveSession> = None;
    if auto_start {
        session = try_start(&mut monitor, panel.levels());
    }

    let mut last_status_line = Instant::now();

    while running.load(Ordering::SeqCst) {
        for command in panel.drain() {
            match command {
                PanelCommand::ToggleSleep => {
                    if monitor.is_running() {
                        let report = monitor.stop()?;
                        finish_session(
                            &monitor,
                            &report,
                            session.take(),
                            EndReason::Manual,
                            &summary_builder,
                            json,
                        )?;
                        monitor.dismiss();
                    } else {
                        monitor.dismiss();
                        session = try_start(&mut monitor, panel.levels());
                    }
                }
                PanelCommand::Speed(m) => match validate_multiplier(m) {
                    Ok(()) => {
                        monitor.set_time_multiplier(m);
                        println!("Speed: {}", monitor.clock().speed_label());
                    }
                    Err(e) => eprintln!("Warning: {e}"),
                },
                PanelCommand::Status => print_status(&monitor, panel.levels()),
                PanelCommand::Quit => running.store(false, Ordering::SeqCst),
                PanelCommand::Set(..) | PanelCommand::Preset(_) => {}
            }
        }

        if !running.load(Ordering::SeqCst) {
            break;
        }

        match monitor.tick(panel.levels(), Instant::now()) {
            TickOutcome::Inactive => {}
            TickOutcome::Updated(frame) => {
                if last_status_line.elapsed() >= STATUS_LINE_INTERVAL {
                    println!("{}", status_line(&frame));
                    last_status_line = Instant::now();
                }
            }
            TickOutcome::AutoStopped(report) => {
                println!();
                println!("Auto-stop: bed pressure lost (sleeper got up).");
                println!("Monitoring stopped automatically.");
                finish_session(
                    &monitor,
                    &report,
                    session.take(),
                    EndReason::AutoStop,
                    &summary_builder,
                    json,
                )?;
                monitor.dismiss();
            }
        }

        thread::sleep(config.tick_interval);
    }

    if monitor.is_running() {
        println!();
        println!("Stopping monitor...");
        let report = monitor.stop()?;
        finish_session(
            &monitor,
            &report,
            session.take(),
            EndReason::Interrupted,
            &summary_builder,
            json,
        )?;
    }

    panel.stop();
    Ok(())
}

fn try_start(monitor: &mut SessionMonitor, levels: SensorLevels) -> Option<LiveSession> {
    match monitor.start(levels, Instant::now()) {
        Ok(()) => {
            println!("Sleep session started. Type 'sleep' again to wake up.");
            Some(LiveSession {
                started_at: Utc::now(),
            })
        }
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    }
}

fn cmd_simulate(
    phases: &[SimulationPhase],
    multiplier: f64,
    tick_ms: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    validate_multiplier(multiplier)?;
    let mut config = load_config();
    config.time_multiplier = multiplier;
    if let Some(ms) = tick_ms {
        config.tick_interval = Duration::from_millis(ms);
    }
    config.validate()?;

    let mut monitor = SessionMonitor::new(config.monitor_settings());
    let started_at = Utc::now();
    let outcome = run_night(&mut monitor, phases, config.tick_interval)
        .context("simulation failed")?;

    let session = LiveSession { started_at };
    finish_session(
        &monitor,
        &outcome.report,
        Some(session),
        outcome.end_reason,
        &SummaryBuilder::new(),
        json,
    )
}

fn finish_session(
    monitor: &SessionMonitor,
    report: &SleepReport,
    session: Option<LiveSession>,
    end_reason: EndReason,
    builder: &SummaryBuilder,
    json: bool,
) -> anyhow::Result<()> {
    let ended_at = Utc::now();
    if json {
        let meta = SessionMeta {
            started_at: session.map(|s| s.started_at).unwrap_or(ended_at),
            ended_at,
            end_reason,
            time_multiplier: monitor.clock().multiplier(),
        };
        let summary = builder.build_json(report, monitor.history(), monitor.tally(), &meta)?;
        println!("{summary}");
        return Ok(());
    }

    println!();
    println!("Sleep Report");
    println!("============");
    print!("{}", report.render());
    println!();
    println!("{}", monitor.tally().summary());
    Ok(())
}

fn status_line(frame: &TickFrame) -> String {
    format!(
        "[{}] score {:>3} {} {:<10} | {}",
        frame.elapsed,
        frame.score as i64,
        frame.gauge.bar(GAUGE_WIDTH),
        frame.status,
        frame.levels
    )
}

fn print_status(monitor: &SessionMonitor, levels: SensorLevels) {
    println!("Sensors: {levels}");
    println!("Speed: {}", monitor.clock().speed_label());
    if monitor.is_running() {
        let scorer = monitor.scorer();
        println!(
            "Session: running | score {:.1} | elapsed {}",
            scorer.score(),
            format_elapsed(scorer.total_virtual_seconds())
        );
    } else {
        println!("Session: idle");
    }
}

fn cmd_set_speed(multiplier: f64) -> anyhow::Result<()> {
    validate_multiplier(multiplier)?;
    let mut config = load_config();
    config.time_multiplier = multiplier;
    config.save().context("could not save config")?;
    println!("Default speed set to {}", speed_label(multiplier));
    Ok(())
}

fn cmd_presets() {
    println!("Presets");
    println!("=======");
    for preset in Preset::ALL {
        println!("  {:<12} {}", preset.name(), preset.levels());
    }
}

fn cmd_config() -> anyhow::Result<()> {
    let config = load_config();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")
}

/// Forward stdin lines to the panel as commands.
fn spawn_stdin_reader(sender: Sender<PanelCommand>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<PanelCommand>() {
                Ok(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("Warning: {e}"),
            }
        }
        tracing::debug!("stdin closed; no more panel commands");
    });
}
