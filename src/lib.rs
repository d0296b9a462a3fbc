pub mod cave;
pub mod path;
pub mod pqueue;

use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

pub use cave::{Action, Cave, Faction, HitPoints, Outcome, Point, Space, Unit};

#[derive(Debug)]
pub enum Error {
    UnknownChar(char, Point),
    InvalidHitPointsText(String),
    HitPointsMismatch {
        row: usize,
        expect: String,
        given: String,
    },
    NonPositiveHitPoints(Point),
    TooManyHitPoints(u32, Point),
    MoveBlocked(Point, Point),
    AttackNonEnemy(Point, Point),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownChar(c, pos) => {
                write!(f, "Unknown character({}) for cave map at {}.", c, pos)
            }
            Error::InvalidHitPointsText(s) => {
                write!(f, "Invalid text({}) for hit points of unit.", s)
            }
            Error::HitPointsMismatch { row, expect, given } => write!(
                f,
                "Expect hit points for units({}) in row#{}, given({}).",
                expect, row, given
            ),
            Error::NonPositiveHitPoints(pos) => {
                write!(f, "Unit at {} should have positive hit points.", pos)
            }
            Error::TooManyHitPoints(hit_points, pos) => write!(
                f,
                "Unit at {} can't have more than {} hit points, given {}.",
                pos,
                cave::UNIT_DEFAULT_HIT_POINTS,
                hit_points
            ),
            Error::MoveBlocked(from, to) => {
                write!(f, "Unit at {} try moving to {}, but it's blocked.", from, to)
            }
            Error::AttackNonEnemy(from, to) => write!(
                f,
                "Unit at {} try attacking {}, but there's no enemy.",
                from, to
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Cave map, read from standard input if not given
    pub input_path: Option<PathBuf>,
}

pub fn read_cave<P: AsRef<Path>>(path: P) -> Result<Cave> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    read_cave_from(BufReader::new(file))
        .with_context(|| format!("Failed to read cave from file({}).", path.as_ref().display()))
}

pub fn read_cave_from<R: BufRead>(reader: R) -> Result<Cave> {
    let mut cave = Cave::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}.", ind + 1))?;
        if line.is_empty() {
            break;
        }

        cave.add_row(&line)
            .with_context(|| format!("Failed to parse line {} as cave row.", ind + 1))?;
    }

    Ok(cave)
}
