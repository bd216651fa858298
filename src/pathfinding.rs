//! Pathfinding module.
//!
//! This module contains the breadth-first search used to check that a labyrinth can actually be
//! solved before it is handed to the player.

use std::collections::{HashMap, VecDeque};

use crate::{
    maze::{Grid, Position},
    types::Direction,
};

/// Finds a shortest walkable path between two cells.
///
/// This function performs a breadth-first search over the open cells of the grid, stepping in the
/// four cardinal directions and honouring each row's own length. The returned path starts with
/// `start` and ends with `goal`. [`None`] is returned when the goal cannot be reached or when
/// either endpoint is not a walkable cell.
pub(crate) fn shortest_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    let walkable = |position| grid.cell(position).is_some_and(|cell| cell.is_walkable());
    if !walkable(start) || !walkable(goal) {
        return None;
    }

    let mut parents = HashMap::new();
    let _ = parents.insert(start, start);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(trace_back(&parents, start, goal));
        }

        for direction in Direction::ALL {
            let Some(next) = grid.step(current, direction) else {
                continue;
            };

            if walkable(next) && !parents.contains_key(&next) {
                let _ = parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Rebuilds the path from the parent links recorded during the search.
fn trace_back(
    parents: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        let Some(&parent) = parents.get(&current) else {
            break;
        };
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}
