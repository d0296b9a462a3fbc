use std::fmt::Display;

use crate::{path, Error};

pub const UNIT_DEFAULT_HIT_POINTS: u32 = 200;
pub const UNIT_ATTACK_POWER: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    x: usize,
    y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    // In reading order: up, left, right, down
    pub fn neighbors(&self) -> Vec<Point> {
        let mut res = Vec::with_capacity(4);
        if self.y > 0 {
            res.push(Point::new(self.x, self.y - 1));
        }
        if self.x > 0 {
            res.push(Point::new(self.x - 1, self.y));
        }
        res.push(Point::new(self.x + 1, self.y));
        res.push(Point::new(self.x, self.y + 1));
        res
    }

    pub fn manhattan_dist(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Elf,
    Goblin,
}

impl Faction {
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            'E' => Some(Faction::Elf),
            'G' => Some(Faction::Goblin),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Faction::Elf => 'E',
            Faction::Goblin => 'G',
        }
    }

    pub fn enemy(&self) -> Self {
        match self {
            Faction::Elf => Faction::Goblin,
            Faction::Goblin => Faction::Elf,
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Faction::Elf => "Elves",
            Faction::Goblin => "Goblins",
        }
    }
}

impl Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    id: usize,
    faction: Faction,
    hit_points: u32,
}

impl Unit {
    pub fn new(id: usize, faction: Faction) -> Self {
        Self {
            id,
            faction,
            hit_points: UNIT_DEFAULT_HIT_POINTS,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}({})", self.faction, self.id, self.hit_points)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Wall,
    Empty,
    Unit(Unit),
}

impl Space {
    pub fn glyph(&self) -> char {
        match self {
            Space::Wall => '#',
            Space::Empty => '.',
            Space::Unit(unit) => unit.faction.glyph(),
        }
    }

    pub fn unit(&self) -> Option<&Unit> {
        match self {
            Space::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}

/// What one unit did during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move {
        unit: Unit,
        from: Point,
        to: Point,
    },
    Attack {
        attacker: Unit,
        at: Point,
        // After being hit, 0 hit points if killed
        target: Unit,
        target_at: Point,
    },
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move { unit, from, to } => {
                write!(f, "{} moves from {} to {}", unit, from, to)
            }
            Action::Attack {
                attacker,
                at,
                target,
                target_at,
            } if target.hit_points == 0 => write!(
                f,
                "{} at {} attacks {} at {}, killing it",
                attacker, at, target, target_at
            ),
            Action::Attack {
                attacker,
                at,
                target,
                target_at,
            } => write!(f, "{} at {} attacks {} at {}", attacker, at, target, target_at),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitPoints {
    pub elves: u32,
    pub goblins: u32,
}

impl HitPoints {
    pub fn of(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Elf => self.elves,
            Faction::Goblin => self.goblins,
        }
    }

    pub fn wiped_out(&self) -> Option<Faction> {
        if self.elves == 0 {
            Some(Faction::Elf)
        } else if self.goblins == 0 {
            Some(Faction::Goblin)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Faction,
    pub rounds: u32,
    pub hit_points: u32,
}

impl Outcome {
    pub fn score(&self) -> u32 {
        self.rounds * self.hit_points
    }
}

#[derive(Debug, Clone)]
pub struct Cave {
    spaces: Vec<Vec<Space>>,
    rounds: u32,
    next_id: usize,
    is_over: bool,
}

impl Default for Cave {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for Cave {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut cave = Cave::new();
        for line in value.lines().filter(|l| !l.trim().is_empty()) {
            cave.add_row(line)?;
        }

        Ok(cave)
    }
}

impl Cave {
    pub fn new() -> Self {
        Self {
            spaces: Vec::new(),
            rounds: 0,
            next_id: 1,
            is_over: false,
        }
    }

    /// Append one row of map text, e.g. `#.G.E#` or `#.G.E#   G(200), E(131)`.
    pub fn add_row(&mut self, line: &str) -> Result<(), Error> {
        let y = self.spaces.len();
        let (terrain, hp_text) = match line.split_once(char::is_whitespace) {
            Some((terrain, rest)) => (terrain, rest.trim()),
            None => (line, ""),
        };

        let mut row = Vec::with_capacity(terrain.len());
        for (x, c) in terrain.chars().enumerate() {
            let space = match c {
                '#' => Space::Wall,
                '.' => Space::Empty,
                other => {
                    let faction = Faction::from_glyph(other)
                        .ok_or(Error::UnknownChar(other, Point::new(x, y)))?;
                    let unit = Unit::new(self.next_id, faction);
                    self.next_id += 1;
                    Space::Unit(unit)
                }
            };
            row.push(space);
        }

        if !hp_text.is_empty() {
            apply_hit_points(&mut row, y, hp_text)?;
        }

        self.spaces.push(row);
        Ok(())
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Points outside of the map are walls.
    pub fn space(&self, pos: &Point) -> Space {
        self.spaces
            .get(pos.y)
            .and_then(|row| row.get(pos.x))
            .copied()
            .unwrap_or(Space::Wall)
    }

    pub fn is_open(&self, pos: &Point) -> bool {
        self.space(pos) == Space::Empty
    }

    /// Living units in reading order.
    pub fn units(&self) -> Vec<(Point, Unit)> {
        self.spaces
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter_map(move |(x, space)| space.unit().map(|u| (Point::new(x, y), *u)))
            })
            .collect()
    }

    pub fn remaining_hit_points(&self) -> HitPoints {
        self.units()
            .iter()
            .fold(HitPoints::default(), |mut hp, (_, unit)| {
                match unit.faction {
                    Faction::Elf => hp.elves += unit.hit_points,
                    Faction::Goblin => hp.goblins += unit.hit_points,
                }
                hp
            })
    }

    /// `None` until the battle is over, or if no unit survived at all.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_over {
            return None;
        }

        let hit_points = self.remaining_hit_points();
        let winner = hit_points.wiped_out()?.enemy();
        let left_hit_points = hit_points.of(winner);
        if left_hit_points == 0 {
            return None;
        }

        Some(Outcome {
            winner,
            rounds: self.rounds,
            hit_points: left_hit_points,
        })
    }

    /// Run rounds until the battle is over.
    pub fn simulate(&mut self) -> Result<Option<Outcome>, Error> {
        while !self.is_over {
            self.next_round()?;
        }

        Ok(self.outcome())
    }

    /// Let every unit move and attack once, returns what they did.
    ///
    /// The turn order is the units' points at the beginning of the round, each point is
    /// looked up again when its turn comes. If one side has no hit points left when a turn
    /// begins, the battle is over and this round doesn't count.
    pub fn next_round(&mut self) -> Result<Vec<Action>, Error> {
        let mut actions = Vec::new();
        if self.is_over {
            return Ok(actions);
        }

        let turn_order = self
            .units()
            .into_iter()
            .map(|(pos, _)| pos)
            .collect::<Vec<_>>();
        if turn_order.is_empty() {
            self.is_over = true;
            return Ok(actions);
        }

        for pos in turn_order {
            if self.remaining_hit_points().wiped_out().is_some() {
                self.is_over = true;
                return Ok(actions);
            }

            let Space::Unit(unit) = self.space(&pos) else {
                // Died earlier in this round
                continue;
            };

            let mut cur_pos = pos;
            if let Some(to) = self.plan_move(&pos, &unit) {
                self.move_unit(&pos, &to)?;
                actions.push(Action::Move {
                    unit,
                    from: pos,
                    to,
                });
                cur_pos = to;
            }

            if let Some(target_at) = self.plan_attack(&cur_pos, &unit) {
                let target = self.attack(&cur_pos, &target_at)?;
                actions.push(Action::Attack {
                    attacker: unit,
                    at: cur_pos,
                    target,
                    target_at,
                });
            }
        }

        self.rounds += 1;
        Ok(actions)
    }

    fn plan_move(&self, pos: &Point, unit: &Unit) -> Option<Point> {
        let enemy = unit.faction.enemy();
        if self.enemy_neighbors(pos, enemy).next().is_some() {
            return None;
        }

        let mut targets = self
            .units()
            .into_iter()
            .filter(|(_, u)| u.faction == enemy)
            .flat_map(|(p, _)| p.neighbors())
            .filter(|p| self.is_open(p))
            .collect::<Vec<_>>();
        targets.sort_unstable();
        targets.dedup();

        let sources = pos
            .neighbors()
            .into_iter()
            .filter(|p| self.is_open(p))
            .collect::<Vec<_>>();

        // The first strictly shortest one wins, the unit steps onto its source
        let mut best: Option<(Point, usize)> = None;
        for target in &targets {
            for source in &sources {
                if let Some(steps) = path::shortest_path(*source, *target, |p| self.is_open(p)) {
                    if best.map_or(true, |(_, len)| steps.len() < len) {
                        best = Some((*source, steps.len()));
                    }
                }
            }
        }

        best.map(|(source, _)| source)
    }

    fn plan_attack(&self, pos: &Point, unit: &Unit) -> Option<Point> {
        self.enemy_neighbors(pos, unit.faction.enemy())
            .min_by_key(|(_, enemy)| enemy.hit_points)
            .map(|(p, _)| p)
    }

    fn enemy_neighbors<'a>(
        &'a self,
        pos: &Point,
        enemy: Faction,
    ) -> impl Iterator<Item = (Point, Unit)> + 'a {
        pos.neighbors().into_iter().filter_map(move |p| match self.space(&p) {
            Space::Unit(unit) if unit.faction == enemy => Some((p, unit)),
            _ => None,
        })
    }

    fn move_unit(&mut self, from: &Point, to: &Point) -> Result<(), Error> {
        if !self.is_open(to) {
            return Err(Error::MoveBlocked(*from, *to));
        }

        let space = self.space(from);
        self.put(from, Space::Empty);
        self.put(to, space);
        Ok(())
    }

    fn attack(&mut self, from: &Point, target: &Point) -> Result<Unit, Error> {
        let attacker = self
            .space(from)
            .unit()
            .copied()
            .ok_or(Error::AttackNonEnemy(*from, *target))?;
        match self.space(target) {
            Space::Unit(mut enemy) if enemy.faction == attacker.faction.enemy() => {
                enemy.hit_points = enemy.hit_points.saturating_sub(UNIT_ATTACK_POWER);
                if enemy.hit_points == 0 {
                    self.put(target, Space::Empty);
                } else {
                    self.put(target, Space::Unit(enemy));
                }

                Ok(enemy)
            }
            _ => Err(Error::AttackNonEnemy(*from, *target)),
        }
    }

    fn put(&mut self, pos: &Point, space: Space) {
        if let Some(cell) = self.spaces.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *cell = space;
        }
    }
}

impl Display for Cave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.spaces {
            let line = row.iter().map(Space::glyph).collect::<String>();
            let hps = row
                .iter()
                .filter_map(Space::unit)
                .map(|u| format!("{}({})", u.faction.glyph(), u.hit_points))
                .collect::<Vec<_>>();
            if hps.is_empty() {
                writeln!(f, "{}", line)?;
            } else {
                writeln!(f, "{}   {}", line, hps.join(", "))?;
            }
        }

        Ok(())
    }
}

fn apply_hit_points(row: &mut [Space], y: usize, text: &str) -> Result<(), Error> {
    let annotations = text
        .split(',')
        .map(|s| parse_hit_points(s.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    let units = row
        .iter_mut()
        .enumerate()
        .filter_map(|(x, space)| match space {
            Space::Unit(unit) => Some((x, unit)),
            _ => None,
        })
        .collect::<Vec<_>>();
    if units.len() != annotations.len()
        || units
            .iter()
            .zip(&annotations)
            .any(|((_, unit), (faction, _))| unit.faction != *faction)
    {
        return Err(Error::HitPointsMismatch {
            row: y,
            expect: units
                .iter()
                .map(|(_, u)| u.faction.glyph().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            given: text.to_string(),
        });
    }

    for ((x, unit), (_, hit_points)) in units.into_iter().zip(annotations) {
        if hit_points == 0 {
            return Err(Error::NonPositiveHitPoints(Point::new(x, y)));
        } else if hit_points > UNIT_DEFAULT_HIT_POINTS {
            return Err(Error::TooManyHitPoints(hit_points, Point::new(x, y)));
        }
        unit.hit_points = hit_points;
    }

    Ok(())
}

fn parse_hit_points(text: &str) -> Result<(Faction, u32), Error> {
    let invalid = || Error::InvalidHitPointsText(text.to_string());
    let mut chars = text.chars();
    let faction = chars.next().and_then(Faction::from_glyph).ok_or_else(invalid)?;
    let hit_points = chars
        .as_str()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(invalid)?;

    Ok((faction, hit_points))
}
