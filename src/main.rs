//! Binary entry point for the `lifecore` demo driver.
//!
//! Seeds a `LifeUniverse` with a named pattern, advances it by a
//! requested number of generations, and prints the resulting stats
//! report. This is a thin diagnostic shell over the library; pattern
//! files, rendering, and an interactive loop are out of scope (spec.md
//! §1 Non-goals) — see `lifecore::LifeUniverse` for the actual API.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use lifecore::{LifeUniverse, Variant};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    Hashlife,
    Quicklife,
}

impl From<EngineArg> for Variant {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Hashlife => Variant::HashLife,
            EngineArg::Quicklife => Variant::QuickLife,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternArg {
    Blinker,
    Glider,
    Block,
    GliderGun,
}

/// Advance a named Game of Life pattern and report the resulting state.
#[derive(Debug, Parser)]
#[command(name = "lifecore", version, about)]
struct Cli {
    /// Which engine to run the pattern on.
    #[arg(long, value_enum, default_value_t = EngineArg::Hashlife)]
    engine: EngineArg,

    /// Which seed pattern to place at the origin.
    #[arg(long, value_enum, default_value_t = PatternArg::Glider)]
    pattern: PatternArg,

    /// Number of generations to advance.
    #[arg(long, default_value_t = 1)]
    generations: u64,

    /// Print a report after every generation instead of only at the end.
    #[arg(long)]
    verbose: bool,
}

/// Seeds `universe` with the coordinates of a named still life, oscillator,
/// or spaceship, all centered near the origin.
fn seed(universe: &mut LifeUniverse, pattern: PatternArg) {
    let cells: &[(i64, i64)] = match pattern {
        PatternArg::Blinker => &[(-1, 0), (0, 0), (1, 0)],
        PatternArg::Glider => &[(1, 1), (2, 0), (0, -1), (1, -1), (2, -1)],
        PatternArg::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        // B-heptomino-fed Gosper glider gun, offset so its output stream
        // travels into positive x/y.
        PatternArg::GliderGun => &[
            (0, 4), (0, 5), (1, 4), (1, 5),
            (10, 4), (10, 5), (10, 6),
            (11, 3), (11, 7),
            (12, 2), (12, 8),
            (13, 2), (13, 8),
            (14, 5),
            (15, 3), (15, 7),
            (16, 4), (16, 5), (16, 6),
            (17, 5),
            (20, 2), (20, 3), (20, 4),
            (21, 2), (21, 3), (21, 4),
            (22, 1), (22, 5),
            (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3),
            (35, 2), (35, 3),
        ],
    };
    for &(x, y) in cells {
        universe.set(x, y, true);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.generations > (1 << 32) {
        bail!("generations too large: {}", cli.generations);
    }

    let mut universe = LifeUniverse::new(cli.engine.into());
    seed(&mut universe, cli.pattern);

    println!("initial: {}", universe.report());
    for gen in 1..=cli.generations {
        universe.step();
        if cli.verbose {
            println!("gen {gen}: {}", universe.report());
        }
    }
    if !cli.verbose {
        println!("final: {}", universe.report());
    }
    Ok(())
}

fn main() -> Result<()> {
    run(Cli::parse())
}
