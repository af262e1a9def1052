//! outbreak-runner: headless host for the Outbreak Automata engine.
//!
//! Usage:
//!   outbreak-runner --seed 12345 --ticks 500
//!   outbreak-runner --config data/config.json --ticks 300 --realtime
//!   outbreak-runner --seed 12345 --ipc-mode

use anyhow::Result;
use outbreak_core::{
    command::PlayerCommand,
    config::{SimConfig, SimParams},
    engine::SimEngine,
    grid::Grid,
    stats::Statistics,
    supply::InterventionSupply,
    types::Tick,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    GetGrid,
    Tick { count: u64 },
    Command { command: PlayerCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    tick:             Tick,
    paused:           bool,
    speed:            f64,
    ticks_per_second: f64,
    statistics:       &'a Statistics,
    supply:           &'a InterventionSupply,
    params:           &'a SimParams,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 300u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");

    let mut config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => SimConfig::load(&w[1])?,
        None => SimConfig::default(),
    };
    config.grid.rows = parse_arg(&args, "--rows", config.grid.rows);
    config.grid.cols = parse_arg(&args, "--cols", config.grid.cols);
    config.grid.initial_infections =
        parse_arg(&args, "--infections", config.grid.initial_infections);

    if !ipc_mode {
        println!("Outbreak Automata: outbreak-runner");
        println!("  seed:       {seed}");
        println!("  ticks:      {ticks}");
        println!("  grid:       {}x{}", config.grid.rows, config.grid.cols);
        println!("  infections: {}", config.grid.initial_infections);
        println!();
    }

    let run_id = format!("run-{seed}-{}", unix_secs());
    let mut engine = SimEngine::new(run_id.clone(), seed, config)?;
    log::info!("run {run_id} initialized with {} people", engine.statistics().total);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else if realtime {
        run_paced(&mut engine, ticks)?;
        print_summary(&engine, ticks);
    } else {
        engine.run_ticks(ticks)?;
        print_summary(&engine, ticks);
    }

    Ok(())
}

/// Drive the engine at the clock's wall-clock cadence, one tick at a time.
fn run_paced(engine: &mut SimEngine, ticks: u64) -> Result<()> {
    engine.apply_command(PlayerCommand::Resume);
    for _ in 0..ticks {
        engine.tick()?;
        let s = engine.statistics();
        if s.frame % 60 == 0 {
            println!(
                "  frame {:>5} | H {:>6} I {:>6} R {:>6} D {:>6} | R {:.2}",
                s.frame, s.healthy, s.infected, s.recovered, s.dead, s.r_value
            );
        }
        std::thread::sleep(engine.clock.tick_interval());
    }
    engine.apply_command(PlayerCommand::Pause);
    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => {
                engine.run_ticks(count)?;
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
            IpcCommand::GetGrid => {
                let grid: std::sync::Arc<Grid> = engine.grid();
                writeln!(stdout, "{}", serde_json::to_string(grid.as_ref())?)?;
            }
            IpcCommand::Command { command } => {
                for event in engine.apply_command(command) {
                    log::debug!("event: {}", serde_json::to_string(&event)?);
                }
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &SimEngine) -> UiState<'_> {
    UiState {
        tick:             engine.clock.current_tick,
        paused:           engine.clock.paused,
        speed:            engine.clock.speed,
        ticks_per_second: engine.clock.ticks_per_second(),
        statistics:       engine.statistics(),
        supply:           engine.supply(),
        params:           engine.params(),
    }
}

fn print_summary(engine: &SimEngine, ticks: u64) {
    let s = engine.statistics();
    let pct = |n: usize| {
        if s.total == 0 { 0.0 } else { n as f64 * 100.0 / s.total as f64 }
    };

    println!("=== RUN SUMMARY ===");
    println!("  run_id:      {}", engine.run_id);
    println!("  ticks run:   {ticks}");
    println!("  final frame: {}", s.frame);
    println!("  population:  {}", s.total);
    println!("  healthy:     {} ({:.1}%)", s.healthy, pct(s.healthy));
    println!("  infected:    {} ({:.1}%)", s.infected, pct(s.infected));
    println!("  recovered:   {} ({:.1}%)", s.recovered, pct(s.recovered));
    println!("  dead:        {} ({:.1}%)", s.dead, pct(s.dead));
    println!("  r value:     {:.2}", s.r_value);
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn unix_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
