use std::collections::HashMap;

use crate::{cave::Point, pqueue::PriorityQueue};

/// Search the shortest path from `from` to `to`, stepping only on points accepted by `is_open`.
///
/// The returned path excludes `from` and ends with `to`. Among paths of the same length,
/// the one reached first through the frontier wins; neighbors are expanded up, left,
/// right, down, so the result is deterministic.
pub fn shortest_path<F>(from: Point, to: Point, is_open: F) -> Option<Vec<Point>>
where
    F: Fn(&Point) -> bool,
{
    let mut frontier = PriorityQueue::new();
    frontier.push(from, 0);
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut cost_so_far = HashMap::from([(from, 0usize)]);

    while let Some(cur_pos) = frontier.pop() {
        if cur_pos == to {
            let mut path = Vec::new();
            let mut end_pos = to;
            while let Some(prev_pos) = came_from.get(&end_pos) {
                path.push(end_pos);
                end_pos = *prev_pos;
            }

            path.reverse();
            return Some(path);
        }

        let new_cost = cost_so_far[&cur_pos] + 1;
        for next_pos in cur_pos.neighbors().into_iter().filter(|p| is_open(p)) {
            if cost_so_far
                .get(&next_pos)
                .map_or(true, |cost| new_cost < *cost)
            {
                cost_so_far.insert(next_pos, new_cost);
                frontier.push(next_pos, new_cost + next_pos.manhattan_dist(&to));
                came_from.insert(next_pos, cur_pos);
            }
        }
    }

    None
}
