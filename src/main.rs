//! Tumble Maze entry point
//!
//! Headless runner: generates a maze, prints it, then plays queued key
//! presses through the sandbox world until the goal is reached or the tick
//! budget runs out.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use tumble_maze::consts::SIM_DT;
    use tumble_maze::sim::{GameEvent, GameState, Key, Label, SandboxWorld, TickInput, tick};
    use tumble_maze::{Result, Settings};

    /// Generate a perfect maze and walk it headlessly
    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    pub struct Args {
        /// JSON settings file (missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the resolved settings to this file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Number of cell rows
        #[arg(long)]
        rows: Option<usize>,

        /// Number of cell columns
        #[arg(long)]
        columns: Option<usize>,

        /// Play-field width
        #[arg(long)]
        width: Option<f32>,

        /// Play-field height
        #[arg(long)]
        height: Option<f32>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Key presses to play, one per tick (w/a/s/d)
        #[arg(long, default_value = "")]
        keys: String,

        /// Ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        /// Print the path from the player cell to the goal cell
        #[arg(long)]
        solution: bool,
    }

    fn resolve_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(rows) = args.rows {
            settings.rows = rows;
        }
        if let Some(columns) = args.columns {
            settings.columns = columns;
        }
        if let Some(width) = args.width {
            settings.width = width;
        }
        if let Some(height) = args.height {
            settings.height = height;
        }
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        settings.validate()?;
        Ok(settings)
    }

    fn parse_keys(keys: &str) -> Vec<Key> {
        keys.chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| {
                let key = Key::from_name(c.encode_utf8(&mut [0; 4]));
                if key.is_none() {
                    log::warn!("Ignoring unknown key '{}'", c);
                }
                key
            })
            .collect()
    }

    pub fn run(args: &Args) -> Result<()> {
        let settings = resolve_settings(args)?;
        if let Some(path) = &args.save_config {
            settings.save(path)?;
        }

        let mut world = SandboxWorld::new();
        let mut state = GameState::new(&settings, &mut world)?;

        print!("{}", state.maze.grid);
        println!(
            "seed {} | {}x{} cells | carved from {:?} | {} walls",
            state.seed.unwrap_or_default(),
            settings.rows,
            settings.columns,
            state.maze.start,
            state.layout.count(Some(Label::Wall)),
        );

        if args.solution {
            let (from, to) = (state.layout.player_cell, state.layout.goal_cell);
            if let Some(path) = state.maze.grid.path(from, to) {
                let steps: Vec<String> = path.iter().map(|(r, c)| format!("({r},{c})")).collect();
                println!("solution ({} cells): {}", path.len(), steps.join(" -> "));
            }
        }

        let mut presses = parse_keys(&args.keys).into_iter();
        for _ in 0..args.ticks {
            let input = TickInput::keys(presses.next());
            if let Some(GameEvent::MazeSolved) = tick(&mut state, &mut world, &input, SIM_DT) {
                println!("You win! (tick {})", state.time_ticks);
            }
        }

        if !state.is_solved() {
            println!("Maze still locked after {} ticks", state.time_ticks);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    log::info!("Tumble Maze (headless) starting...");

    let args = native::Args::parse();
    match native::run(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
