//! Reachability - is there a path of empty cells between two coordinates
//!
//! Breadth-first search over the four orthogonal neighbours, walking only
//! empty cells. The start cell may be occupied (it normally holds the piece
//! being moved); every other cell on the path, including the goal, must be
//! empty.
//!
//! Fixed policy:
//! - out-of-range start or goal: not reachable
//! - occupied goal: not reachable, whatever the connectivity (checked first)
//! - `start == goal` with an empty goal: reachable, path `[start]` (zero hops)
//!
//! BFS visits each cell at most once, so the search is O(width * height) and
//! the returned path has the minimum number of hops.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::trace;

use crate::board::Board;
use crate::types::Coord;

/// Read-only path query over a [`Board`]
#[derive(Debug, Clone, Copy)]
pub struct ReachabilityChecker<'a> {
    board: &'a Board,
}

impl<'a> ReachabilityChecker<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Whether `goal` can be reached from `start` through empty cells
    pub fn can_reach(&self, start: Coord, goal: Coord) -> bool {
        self.find_path(start, goal).is_some()
    }

    /// Shortest path from `start` to `goal`, both ends included.
    pub fn find_path(&self, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
        let board = self.board;
        if !board.contains(start) || !board.is_empty_cell(goal) {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }

        let width = board.width() as usize;
        let flat = |c: Coord| c.row as usize * width + c.col as usize;

        // parent[idx] = index we came from; the start points at itself
        let mut parent: Vec<Option<usize>> = vec![None; board.size()];
        let mut queue = VecDeque::with_capacity(board.empty_count() + 1);
        parent[flat(start)] = Some(flat(start));
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for next in self.open_neighbours(current) {
                let idx = flat(next);
                if parent[idx].is_some() {
                    continue;
                }
                parent[idx] = Some(flat(current));
                if next == goal {
                    let path = Self::trace_back(&parent, idx, width);
                    trace!(%start, %goal, hops = path.len() - 1, "path found");
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        trace!(%start, %goal, "no path");
        None
    }

    /// Empty in-bounds orthogonal neighbours
    fn open_neighbours(&self, at: Coord) -> ArrayVec<Coord, 4> {
        at.orthogonal()
            .into_iter()
            .filter(|&n| self.board.is_empty_cell(n))
            .collect()
    }

    fn trace_back(parent: &[Option<usize>], goal_idx: usize, width: usize) -> Vec<Coord> {
        let to_coord = |idx: usize| Coord::new((idx / width) as i8, (idx % width) as i8);
        let mut path = vec![to_coord(goal_idx)];
        let mut idx = goal_idx;
        while let Some(prev) = parent[idx] {
            if prev == idx {
                break;
            }
            path.push(to_coord(prev));
            idx = prev;
        }
        path.reverse();
        path
    }
}

/// Shorthand for [`ReachabilityChecker::can_reach`]
pub fn can_reach(board: &Board, start: Coord, goal: Coord) -> bool {
    ReachabilityChecker::new(board).can_reach(start, goal)
}

/// Shorthand for [`ReachabilityChecker::find_path`]
pub fn find_path(board: &Board, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
    ReachabilityChecker::new(board).find_path(start, goal)
}
