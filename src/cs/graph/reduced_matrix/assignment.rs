use crate::error::{Error, Result};

/// Partial successor map built one committed edge at a time.
///
/// Committed edges always form vertex-disjoint paths until the last edge
/// closes them into one cycle over every city. For each path the map keeps
/// its two endpoints, so the edge that would close it early is known in O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    successor: Vec<Option<usize>>,
    predecessor: Vec<Option<usize>>,
    // Valid only at path endpoints: the opposite end of the same path.
    other_end: Vec<usize>,
    edges: usize,
}

impl Assignment {
    pub fn new(n: usize) -> Self {
        Self {
            successor: vec![None; n],
            predecessor: vec![None; n],
            other_end: (0..n).collect(),
            edges: 0,
        }
    }

    /// Number of cities covered by the map.
    pub fn cities(&self) -> usize {
        self.successor.len()
    }

    /// Number of committed edges.
    pub fn len(&self) -> usize {
        self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    /// True once every city has a successor.
    pub fn is_complete(&self) -> bool {
        self.edges == self.cities()
    }

    pub fn successor(&self, city: usize) -> Option<usize> {
        self.successor.get(city).copied().flatten()
    }

    /// Committed edges ordered by origin.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.successor
            .iter()
            .enumerate()
            .filter_map(|(from, to)| to.map(|to| (from, to)))
    }

    /// Records `from -> to`.
    ///
    /// Returns the edge `(end, start)` that would now close the joined path
    /// into a cycle, or `None` when this edge itself closed the full tour.
    ///
    /// # Errors
    /// * `Error::InternalInconsistency` - if `from` already has a successor,
    ///   `to` already has a predecessor, or the edge closes a cycle that does
    ///   not cover every city
    pub fn commit(&mut self, from: usize, to: usize) -> Result<Option<(usize, usize)>> {
        let n = self.cities();
        if from >= n || to >= n {
            return Err(Error::internal(format!(
                "edge {} -> {} is out of range for {} cities",
                from, to, n
            )));
        }
        if self.successor[from].is_some() || self.predecessor[to].is_some() {
            return Err(Error::internal(format!(
                "edge {} -> {} reuses an assigned city",
                from, to
            )));
        }

        let start = self.other_end[from];
        let end = self.other_end[to];
        let closes = start == to;
        if closes && self.edges + 1 < n {
            return Err(Error::internal(format!(
                "edge {} -> {} closes a cycle of {} cities out of {}",
                from,
                to,
                self.edges_on_path(to) + 1,
                n
            )));
        }

        self.successor[from] = Some(to);
        self.predecessor[to] = Some(from);
        self.edges += 1;
        if closes {
            return Ok(None);
        }
        self.other_end[start] = end;
        self.other_end[end] = start;
        Ok(Some((end, start)))
    }

    fn edges_on_path(&self, start: usize) -> usize {
        let mut count = 0;
        let mut current = start;
        while let Some(next) = self.successor[current] {
            count += 1;
            current = next;
            if current == start {
                break;
            }
        }
        count
    }

    /// Returns the cities of a committed cycle shorter than the full tour, if
    /// one exists. Never `Some` for a map built through [`commit`](Self::commit).
    pub fn premature_cycle(&self) -> Option<Vec<usize>> {
        let n = self.cities();
        let mut seen = vec![false; n];
        for first in 0..n {
            if seen[first] {
                continue;
            }
            let mut path = Vec::new();
            let mut current = first;
            loop {
                seen[current] = true;
                path.push(current);
                match self.successor[current] {
                    Some(next) if next == first => {
                        return (path.len() < n).then_some(path);
                    }
                    Some(next) if !seen[next] => current = next,
                    _ => break,
                }
            }
        }
        None
    }
}
