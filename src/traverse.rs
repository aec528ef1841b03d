use std::collections::VecDeque;

use crate::types::InteractionIndex;

/// Breadth-first expansion from `start`, bounded by `max_hops`.
///
/// Returns reached indices in visit order, excluding `start`. Each clause is
/// visited once, at its shortest hop distance.
pub(crate) fn breadth_first(index: &InteractionIndex, start: usize, max_hops: usize) -> Vec<usize> {
    let mut visited = vec![false; index.len()];
    let mut reached = Vec::new();
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    if let Some(slot) = visited.get_mut(start) {
        *slot = true;
    }
    queue.push_back((start, 0));

    while let Some((node, hops)) = queue.pop_front() {
        if hops >= max_hops {
            continue;
        }
        for &next in index.neighbors(node) {
            if !visited[next] {
                visited[next] = true;
                reached.push(next);
                queue.push_back((next, hops + 1));
            }
        }
    }

    reached
}
