//! Bipartite switch graphs: one layer of the network decomposition.
//!
//! Left vertex i covers input wires 2i and 2i+1; right vertex j covers
//! output wires 2j and 2j+1. Each permutation pair (s, d) contributes one
//! edge from left vertex s/2 to right vertex d/2. Every vertex has degree
//! 1 or 2, so the graph decomposes into paths and even cycles and its edges
//! are always 2-colorable with Up/Down routing directions.

use crate::permutation::Permutation;
use crate::waksman::SwitchState;

/// Routing color of an edge: through the upper or lower subnetwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn other(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// A switch endpoint. `vals[k]` is the source index of the pair occupying
/// wire `2 * index + k` on this side; `edges` lists incident edge indices
/// in insertion order.
#[derive(Debug)]
struct Vertex {
    vals: Vec<usize>,
    edges: Vec<usize>,
}

#[derive(Debug)]
struct Edge {
    src: usize,
    dst: usize,
    direction: Option<Direction>,
}

/// The bipartite multigraph of one decomposition layer, stored as parallel
/// arenas: vertices reference edges by index and vice versa.
#[derive(Debug)]
pub struct Bipartite {
    left: Vec<Vertex>,
    right: Vec<Vertex>,
    edges: Vec<Edge>,
    is_odd: bool,
    is_colored: bool,
}

impl Bipartite {
    /// Build the graph for a valid permutation.
    pub fn new(p: &Permutation) -> Self {
        debug_assert!(p.is_valid());
        let n = p.len();
        let half = n.div_ceil(2);
        let is_odd = n % 2 == 1;

        let make_side = || -> Vec<Vertex> {
            (0..half)
                .map(|i| {
                    let slots = if is_odd && i == half - 1 { 1 } else { 2 };
                    Vertex {
                        vals: vec![0; slots],
                        edges: Vec::with_capacity(2),
                    }
                })
                .collect()
        };
        let mut left = make_side();
        let mut right = make_side();

        let mut edges = Vec::with_capacity(n);
        for &(s, d) in p.pairs() {
            left[s / 2].vals[s % 2] = s;
            right[d / 2].vals[d % 2] = s;
            let e = edges.len();
            edges.push(Edge {
                src: s,
                dst: d,
                direction: None,
            });
            left[s / 2].edges.push(e);
            right[d / 2].edges.push(e);
        }

        Self {
            left,
            right,
            edges,
            is_odd,
            is_colored: false,
        }
    }

    fn uncolored(&self) -> usize {
        self.edges.iter().filter(|e| e.direction.is_none()).count()
    }

    /// One propagation sweep: any vertex with exactly one uncolored edge
    /// copies the opposite color from its colored edge. Returns whether any
    /// edge was colored.
    fn propagate(&mut self) -> bool {
        let mut progressed = false;
        for side in 0..2 {
            let vertex_count = if side == 0 {
                self.left.len()
            } else {
                self.right.len()
            };
            for vi in 0..vertex_count {
                let v = if side == 0 { &self.left[vi] } else { &self.right[vi] };
                if v.edges.len() != 2 {
                    continue;
                }
                let (e0, e1) = (v.edges[0], v.edges[1]);
                match (self.edges[e0].direction, self.edges[e1].direction) {
                    (Some(c), None) => {
                        self.edges[e1].direction = Some(c.other());
                        progressed = true;
                    }
                    (None, Some(c)) => {
                        self.edges[e0].direction = Some(c.other());
                        progressed = true;
                    }
                    _ => {}
                }
            }
        }
        progressed
    }

    /// 2-color all edges with Up/Down so that no vertex sees the same color
    /// twice. Total on valid permutations.
    pub fn color(&mut self) {
        if self.is_colored {
            return;
        }
        if self.is_odd {
            // The lower subnetwork is the larger half; the odd terminal
            // wires are pinned to it on both sides.
            let e = self.left[self.left.len() - 1].edges[0];
            self.edges[e].direction = Some(Direction::Down);
            let e = self.right[self.right.len() - 1].edges[0];
            self.edges[e].direction = Some(Direction::Down);
        } else if !self.edges.is_empty() {
            // Pin the last output switch to straight: the edge landing on
            // its top wire routes up, the sibling down. This removes the
            // redundant degree of freedom in the output column.
            let v = &self.right[self.right.len() - 1];
            let (e0, e1) = (v.edges[0], v.edges[1]);
            if v.vals[0] == self.edges[e0].src {
                self.edges[e0].direction = Some(Direction::Up);
                self.edges[e1].direction = Some(Direction::Down);
            } else {
                self.edges[e0].direction = Some(Direction::Down);
                self.edges[e1].direction = Some(Direction::Up);
            }
        }

        while self.uncolored() > 0 {
            while self.propagate() {}
            if self.uncolored() == 0 {
                break;
            }
            // Only untouched even cycles remain. Orient one deterministically:
            // first left vertex with two uncolored edges, first edge up.
            let pick = (0..self.left.len()).find(|&i| {
                let v = &self.left[i];
                v.edges.len() == 2
                    && v.edges.iter().all(|&e| self.edges[e].direction.is_none())
            });
            let i = pick.expect("uncolored edges always include a full left vertex");
            let (e0, e1) = (self.left[i].edges[0], self.left[i].edges[1]);
            self.edges[e0].direction = Some(Direction::Up);
            self.edges[e1].direction = Some(Direction::Down);
        }
        self.is_colored = true;
    }

    /// Switch settings for the input and output columns. A switch swaps iff
    /// its first edge routes up but does not sit on the top wire (or routes
    /// down while sitting on it). Odd sizes append one fixed straight slot.
    pub fn switch_states(&mut self) -> (Vec<SwitchState>, Vec<SwitchState>) {
        self.color();
        let full = self.left.len() - usize::from(self.is_odd);
        let mut pre = Vec::with_capacity(self.left.len());
        let mut post = Vec::with_capacity(self.left.len());
        for i in 0..full {
            for (side, states) in [(&self.left, &mut pre), (&self.right, &mut post)] {
                let v = &side[i];
                let e0 = &self.edges[v.edges[0]];
                let swaps = (e0.direction == Some(Direction::Up)) != (v.vals[0] == e0.src);
                states.push(if swaps {
                    SwitchState::Swap
                } else {
                    SwitchState::Straight
                });
            }
        }
        if self.is_odd {
            pre.push(SwitchState::Straight);
            post.push(SwitchState::Straight);
        }
        (pre, post)
    }

    /// Split into the two sub-permutations routed through the upper and
    /// lower networks, re-indexed to their local wire domains. Requires the
    /// graph to be colored.
    pub fn inner_permutations(&self) -> (Permutation, Permutation) {
        debug_assert!(self.is_colored);
        let mut up = Vec::with_capacity(self.edges.len() / 2);
        let mut down = Vec::with_capacity(self.edges.len().div_ceil(2));
        for e in &self.edges {
            let local = (e.src / 2, e.dst / 2);
            match e.direction {
                Some(Direction::Up) => up.push(local),
                Some(Direction::Down) => down.push(local),
                None => unreachable!("graph is colored"),
            }
        }
        (Permutation::new(up), Permutation::new(down))
    }

    /// Check that no vertex sees the same color on two edges (test support).
    #[cfg(test)]
    fn coloring_is_proper(&self) -> bool {
        let proper = |vs: &[Vertex]| {
            vs.iter().all(|v| {
                if v.edges.len() != 2 {
                    return true;
                }
                let d0 = self.edges[v.edges[0]].direction;
                let d1 = self.edges[v.edges[1]].direction;
                d0.is_some() && d1.is_some() && d0 != d1
            })
        };
        proper(&self.left) && proper(&self.right)
    }
}
