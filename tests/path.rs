use std::collections::{HashMap, VecDeque};

use day15::{path::shortest_path, Cave, Point};

const OPEN_ROOM: &str = "\
#####
#...#
#...#
#...#
#####";

const LOOP: &str = "\
#######
#.....#
#.###.#
#.....#
#######";

const MAZE: &str = "\
#########
#...#...#
#.#.#.#.#
#.#...#.#
#.#####.#
#...#...#
###.#.#.#
#.....#.#
#########";

fn cave(text: &str) -> Cave {
    Cave::try_from(text).unwrap()
}

fn open_points(cave: &Cave) -> Vec<Point> {
    let mut points = Vec::new();
    for y in 0..16 {
        for x in 0..16 {
            let pos = Point::new(x, y);
            if cave.is_open(&pos) {
                points.push(pos);
            }
        }
    }
    points
}

fn bfs_dist(cave: &Cave, from: Point, to: Point) -> Option<usize> {
    let mut dists = HashMap::from([(from, 0usize)]);
    let mut queue = VecDeque::from([from]);
    while let Some(cur) = queue.pop_front() {
        if cur == to {
            return dists.get(&cur).copied();
        }

        let dist = dists[&cur];
        for next in cur.neighbors() {
            if cave.is_open(&next) && !dists.contains_key(&next) {
                dists.insert(next, dist + 1);
                queue.push_back(next);
            }
        }
    }

    None
}

#[test]
fn path_excludes_source_and_ends_at_target() {
    let cave = cave(OPEN_ROOM);
    let path = shortest_path(Point::new(1, 1), Point::new(1, 3), |p| cave.is_open(p)).unwrap();
    assert_eq!(path, vec![Point::new(1, 2), Point::new(1, 3)]);

    let same = shortest_path(Point::new(2, 2), Point::new(2, 2), |p| cave.is_open(p)).unwrap();
    assert!(same.is_empty());
}

#[test]
fn equal_length_paths_break_ties_the_same_way() {
    let cave = cave(OPEN_ROOM);
    let is_open = |p: &Point| cave.is_open(p);
    assert_eq!(
        shortest_path(Point::new(1, 1), Point::new(3, 3), is_open).unwrap(),
        vec![
            Point::new(2, 1),
            Point::new(3, 1),
            Point::new(3, 2),
            Point::new(3, 3)
        ]
    );
    assert_eq!(
        shortest_path(Point::new(3, 3), Point::new(1, 1), is_open).unwrap(),
        vec![
            Point::new(3, 2),
            Point::new(3, 1),
            Point::new(2, 1),
            Point::new(1, 1)
        ]
    );

    let cave = self::cave(LOOP);
    let is_open = |p: &Point| cave.is_open(p);
    assert_eq!(
        shortest_path(Point::new(3, 1), Point::new(3, 3), is_open).unwrap(),
        vec![
            Point::new(2, 1),
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(1, 3),
            Point::new(2, 3),
            Point::new(3, 3)
        ]
    );
}

#[test]
fn units_and_walls_block_the_way() {
    let cave = cave("#######\n#..G..#\n#######");
    assert!(shortest_path(Point::new(1, 1), Point::new(5, 1), |p| cave.is_open(p)).is_none());

    let cave = self::cave("#######\n#..#..#\n#.....#\n#######");
    let path = shortest_path(Point::new(1, 1), Point::new(5, 1), |p| cave.is_open(p)).unwrap();
    assert_eq!(path.len(), 6);
    assert!(path.iter().all(|p| cave.is_open(p)));
}

#[test]
fn path_length_matches_bfs() {
    for text in [OPEN_ROOM, LOOP, MAZE] {
        let cave = cave(text);
        let points = open_points(&cave);
        for from in &points {
            for to in &points {
                let path = shortest_path(*from, *to, |p| cave.is_open(p));
                assert_eq!(
                    path.as_ref().map(Vec::len),
                    bfs_dist(&cave, *from, *to),
                    "from {} to {}",
                    from,
                    to
                );

                // Every step is one move away from the previous one
                if let Some(path) = path {
                    let mut prev = *from;
                    for step in path {
                        assert_eq!(prev.manhattan_dist(&step), 1);
                        prev = step;
                    }
                }
            }
        }
    }
}
