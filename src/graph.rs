//! Undirected multigraphs and the random graph schemas.

use crate::error::{TestgenError, TestgenResult};
use crate::rand::{Generating, Xoshiro256pp, draw_between, permutation, shuffle};
use std::fmt;
use std::ops::Index;

/// Adjacency lists over vertices `0..n`. Loops are stored once, other edges on
/// both endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
        }
    }

    pub fn size(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.adj.iter().map(Vec::as_slice)
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.adj[a].push(b);
        if a != b {
            self.adj[b].push(a);
        }
    }

    /// Relabel the vertices with a random permutation, then shuffle every
    /// adjacency list in new-vertex order.
    pub fn permute(&mut self, rng: &mut Xoshiro256pp) {
        let n = self.size();
        let per = permutation(n, rng);
        let mut adj = vec![Vec::new(); n];
        for (w, list) in self.adj.iter().enumerate() {
            adj[per[w]].extend(list.iter().map(|&v| per[v]));
        }
        for list in adj.iter_mut() {
            shuffle(list, rng);
        }
        self.adj = adj;
    }

    /// Move every edge of `b` onto `a` and leave `b` isolated. Returns `a`.
    pub fn contract(&mut self, a: usize, b: usize) -> usize {
        if a == b {
            return a;
        }
        let moved = std::mem::take(&mut self.adj[b]);
        for v in moved {
            if v != b {
                self.add_edge(a, v);
            }
        }
        for list in self.adj.iter_mut() {
            list.retain(|&v| v != b);
        }
        a
    }

    /// Drop loops and parallel edges.
    pub fn make_simple(&mut self) {
        for (i, list) in self.adj.iter_mut().enumerate() {
            list.retain(|&v| v != i);
            list.sort_unstable();
            list.dedup();
        }
    }

    /// Drop vertices without edges and renumber the rest, keeping their order.
    pub fn remove_isolated(&mut self) {
        let mut translate = vec![usize::MAX; self.size()];
        let mut kept = Vec::new();
        for (i, list) in self.adj.iter_mut().enumerate() {
            if !list.is_empty() {
                translate[i] = kept.len();
                kept.push(std::mem::take(list));
            }
        }
        for list in kept.iter_mut() {
            for v in list.iter_mut() {
                *v = translate[*v];
            }
        }
        self.adj = kept;
    }

    /// Every edge once as `(a, b)` with `a <= b`, ordered by `a` then adjacency order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut res = Vec::new();
        for (a, list) in self.adj.iter().enumerate() {
            for &b in list {
                if a <= b {
                    res.push((a, b));
                }
            }
        }
        res
    }
}

impl Index<usize> for Graph {
    type Output = [usize];

    fn index(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }
}

/// Edge list, one `a b` pair per line.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (a, b)) in self.edges().into_iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{} {}", a, b)?;
        }
        Ok(())
    }
}

/// Disjoint union of `a` and `b` (b's vertices shifted by `a.size()`), plus an
/// edge `(x, a.size() + y)` for every `(x, y)` in `new_edges`.
pub fn merge(a: &Graph, b: &Graph, new_edges: &[(usize, usize)]) -> Graph {
    let shift = a.size();
    let mut r = Graph::new(shift + b.size());
    for (x, y) in a.edges() {
        r.add_edge(x, y);
    }
    for (x, y) in b.edges() {
        r.add_edge(shift + x, shift + y);
    }
    for &(x, y) in new_edges {
        r.add_edge(x, shift + y);
    }
    r
}

/// Glue `b` onto `a` by identifying vertex `x` of `a` with vertex `y` of `b`
/// for every pair; the result is simple and has no isolated vertices.
pub fn identify(a: &Graph, b: &Graph, pairs: &[(usize, usize)]) -> Graph {
    let shift = a.size();
    let mut r = merge(a, b, &[]);
    for &(x, y) in pairs {
        r.contract(x, shift + y);
    }
    r.remove_isolated();
    r.make_simple();
    r
}

fn require(what: &'static str, value: usize, min: usize) -> TestgenResult<()> {
    if value < min {
        return Err(TestgenError::InvalidParameter {
            what,
            value: value as u64,
        });
    }
    Ok(())
}

/// Random tree: vertex `i > 0` hangs from a uniform parent among the `range`
/// vertices right before it. One draw per non-root vertex, in vertex order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tree {
    n: usize,
    range: usize,
}

impl Tree {
    pub fn new(n: usize) -> TestgenResult<Self> {
        Self::with_range(n, n)
    }

    pub fn with_range(n: usize, range: usize) -> TestgenResult<Self> {
        require("tree size", n, 1)?;
        require("tree range", range, 1)?;
        Ok(Self { n, range })
    }
}

impl Generating for Tree {
    type Output = Graph;

    fn generate(&self, rng: &mut Xoshiro256pp) -> Graph {
        let mut g = Graph::new(self.n);
        for i in 1..self.n {
            let begin = i.saturating_sub(self.range);
            g.add_edge(i, draw_between(begin, i - 1, rng));
        }
        g
    }
}

/// Fixed-shape graph; generating it permutes the fixed shape.
pub trait StaticGraph {
    /// The unpermuted graph. Draws nothing.
    fn build(&self) -> Graph;
}

macro_rules! static_generating {
    ($($t:ty),* $(,)?) => {
        $(
            impl Generating for $t {
                type Output = Graph;

                fn generate(&self, rng: &mut Xoshiro256pp) -> Graph {
                    let mut g = self.build();
                    g.permute(rng);
                    g
                }
            }
        )*
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Path {
    n: usize,
}

impl Path {
    pub fn new(n: usize) -> TestgenResult<Self> {
        require("path size", n, 1)?;
        Ok(Self { n })
    }
}

impl StaticGraph for Path {
    fn build(&self) -> Graph {
        let mut g = Graph::new(self.n);
        for w in 1..self.n {
            g.add_edge(w - 1, w);
        }
        g
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clique {
    n: usize,
}

impl Clique {
    pub fn new(n: usize) -> TestgenResult<Self> {
        require("clique size", n, 1)?;
        Ok(Self { n })
    }
}

impl StaticGraph for Clique {
    fn build(&self) -> Graph {
        let mut g = Graph::new(self.n);
        for i in 0..self.n {
            for j in i + 1..self.n {
                g.add_edge(i, j);
            }
        }
        g
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cycle {
    n: usize,
}

impl Cycle {
    pub fn new(n: usize) -> TestgenResult<Self> {
        require("cycle size", n, 3)?;
        Ok(Self { n })
    }
}

impl StaticGraph for Cycle {
    fn build(&self) -> Graph {
        let mut g = Graph::new(self.n);
        for i in 1..self.n {
            g.add_edge(i - 1, i);
        }
        g.add_edge(self.n - 1, 0);
        g
    }
}

/// Vertex 0 joined to every other vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Star {
    n: usize,
}

impl Star {
    pub fn new(n: usize) -> TestgenResult<Self> {
        require("star size", n, 1)?;
        Ok(Self { n })
    }
}

impl StaticGraph for Star {
    fn build(&self) -> Graph {
        let mut g = Graph::new(self.n);
        for i in 1..self.n {
            g.add_edge(0, i);
        }
        g
    }
}

static_generating!(Path, Clique, Cycle, Star);
