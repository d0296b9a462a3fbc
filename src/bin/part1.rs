use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use day15::{Cave, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let mut cave = if let Some(input_path) = &args.input_path {
        day15::read_cave(input_path).with_context(|| {
            format!(
                "Failed to read cave map from given file({}).",
                input_path.display()
            )
        })?
    } else {
        day15::read_cave_from(io::stdin().lock())
            .context("Failed to read cave map from standard input.")?
    };

    log_cave(&cave);
    while !cave.is_over() {
        cave.next_round()
            .with_context(|| format!("Failed to simulate round#{}.", cave.rounds() + 1))?;
        log_cave(&cave);
    }

    if let Some(outcome) = cave.outcome() {
        println!(
            "It's over! {} win! Combat ends after {} full rounds with {} total hit points left, outcome is {}.",
            outcome.winner.plural(),
            outcome.rounds,
            outcome.hit_points,
            outcome.score()
        );
    } else {
        eprintln!("No unit is left standing in the cave.");
    }

    Ok(())
}

fn log_cave(cave: &Cave) {
    println!("Round {}:", cave.rounds());
    println!("{}", cave);
}
