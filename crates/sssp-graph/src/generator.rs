//! Deterministic construction of a weighted, undirected geometric graph
//! from `(N, seed, D, γ)`.

use std::collections::HashSet;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::edge::Edge;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::vertex::{Vertex, VertexId, MAX_COORD};

const MAX_COORDINATE_DRAWS_PER_VERTEX: u64 = 1_000_000;

/// Parameters for [`generate`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct GeneratorConfig {
    /// Number of vertices to generate, `N`.
    #[cfg_attr(feature = "clap", arg(short = 'n', long = "vertices"))]
    pub n: u32,

    /// PRNG seed; identical `(n, seed, degree, gamma)` always produce the
    /// same graph.
    #[cfg_attr(feature = "clap", arg(short = 's', long = "seed"))]
    pub seed: u64,

    /// Target mean degree, `D`. Also fixes the delta-stepping bucket width
    /// and bucket count (`sssp-core::coordinator::delta_for`).
    #[cfg_attr(feature = "clap", arg(short = 'd', long = "degree"))]
    pub degree: u32,

    /// Geometric realism factor `γ ∈ [0, 1]`: `1.0` is pure Euclidean
    /// weighting, `0.0` is pure uniform-random weighting.
    #[cfg_attr(feature = "clap", arg(short = 'g', long = "geometry"))]
    pub gamma: f64,
}

impl GeneratorConfig {
    fn validate(self) -> Result<Self, GraphError> {
        if self.n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if self.degree == 0 {
            return Err(GraphError::InvalidDegree);
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(GraphError::InvalidGamma(self.gamma));
        }
        Ok(self)
    }
}

/// Builds a reproducible undirected weighted graph from `config`.
///
/// Grid-tiled rejection sampling of distinct coordinates, followed by a 3×3
/// neighborhood scan per vertex that admits each unordered candidate pair
/// exactly once (from the endpoint with the smaller `x ^ y` hash) with
/// probability 1/4.
pub fn generate(config: GeneratorConfig) -> Result<Graph, GraphError> {
    let config = config.validate()?;
    let n = config.n as usize;

    let mut rng = SmallRng::seed_from_u64(config.seed);

    let k = grid_side(config.n, config.degree);
    let k_u32 = k as u32;
    let square_width = (MAX_COORD + k_u32 - 1) / k_u32;
    debug!(
        "generating graph: n={} seed={} degree={} gamma={} grid={}x{} square_width={}",
        config.n, config.seed, config.degree, config.gamma, k, k, square_width
    );

    let mut grid: Vec<Vec<Vec<VertexId>>> = vec![vec![Vec::new(); k]; k];
    let mut seen = HashSet::with_capacity(n);
    let mut vertices = Vec::with_capacity(n);

    for i in 0..n {
        let (x, y) = draw_distinct_coordinates(&mut rng, &mut seen)?;
        let id = VertexId::new(i);
        let cell_x = usize::min((x / square_width) as usize, k - 1);
        let cell_y = usize::min((y / square_width) as usize, k - 1);
        grid[cell_x][cell_y].push(id);
        vertices.push(Vertex {
            id,
            x,
            y,
            edges: Vec::new(),
        });
    }

    let mut edges = Vec::new();
    for v_idx in 0..n {
        let (vx, vy) = (vertices[v_idx].x, vertices[v_idx].y);
        let cell_x = usize::min((vx / square_width) as usize, k - 1);
        let cell_y = usize::min((vy / square_width) as usize, k - 1);
        let v_id = vertices[v_idx].id;
        let v_hash = vertices[v_idx].coord_hash();

        for nbx in neighbor_range(cell_x, k) {
            for nby in neighbor_range(cell_y, k) {
                let candidates = grid[nbx][nby].clone();
                for u_id in candidates {
                    if u_id == v_id {
                        continue;
                    }
                    let u_hash = vertices[u_id.index()].coord_hash();
                    if v_hash >= u_hash {
                        continue;
                    }

                    let admitted = rng.gen_range(0..4u32) == 0;
                    if !admitted {
                        continue;
                    }

                    let r = rng.gen_range(0..2 * MAX_COORD);
                    let euclidean = euclidean_distance(&vertices[v_idx], &vertices[u_id.index()]);
                    let weight = edge_weight(config.gamma, euclidean, r);

                    let edge_id = edges.len();
                    edges.push(Edge::new(v_id, u_id, weight));
                    vertices[v_idx].edges.push(crate::vertex::EdgeId::new(edge_id));
                    vertices[u_id.index()]
                        .edges
                        .push(crate::vertex::EdgeId::new(edge_id));
                }
            }
        }
    }

    info!(
        "generated graph: {} vertices, {} edges",
        vertices.len(),
        edges.len()
    );

    Ok(Graph::new(vertices, edges))
}

fn draw_distinct_coordinates(
    rng: &mut SmallRng,
    seen: &mut HashSet<(u32, u32)>,
) -> Result<(u32, u32), GraphError> {
    for _ in 0..MAX_COORDINATE_DRAWS_PER_VERTEX {
        let candidate = (rng.gen_range(0..MAX_COORD), rng.gen_range(0..MAX_COORD));
        if seen.insert(candidate) {
            return Ok(candidate);
        }
    }
    Err(GraphError::CoordinateSamplingExhausted(
        MAX_COORDINATE_DRAWS_PER_VERTEX,
    ))
}

/// `k = floor((3/2) * sqrt(N/D))`, clamped to at least 1 so the grid is
/// always well-formed even for tiny or sparse graphs.
fn grid_side(n: u32, degree: u32) -> usize {
    let ratio = f64::from(n) / f64::from(degree);
    let k = (1.5 * ratio.sqrt()).floor();
    usize::max(1, k as usize)
}

/// The boundary-clipped 3×3 (or smaller, for tiny grids) neighborhood of
/// grid index `b` along one axis: `[0, 2]` at the low edge, `[k-3, k-1]` at
/// the high edge, `[b-1, b+1]` elsewhere.
fn neighbor_range(b: usize, k: usize) -> std::ops::RangeInclusive<usize> {
    if k <= 3 {
        return 0..=(k - 1);
    }
    if b == 0 {
        0..=2
    } else if b == k - 1 {
        (k - 3)..=(k - 1)
    } else {
        (b - 1)..=(b + 1)
    }
}

fn euclidean_distance(a: &Vertex, b: &Vertex) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy)
}

/// `w = floor(γ·euclidean + (1−γ)·r)`, floored at `1` since edge weights
/// must be strictly positive.
fn edge_weight(gamma: f64, euclidean: f64, r: u32) -> u32 {
    let blended = gamma * euclidean + (1.0 - gamma) * f64::from(r);
    u32::max(1, blended.floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(n: u32, seed: u64, degree: u32, gamma: f64) -> GeneratorConfig {
        GeneratorConfig {
            n,
            seed,
            degree,
            gamma,
        }
    }

    #[test]
    fn rejects_empty_graph() {
        assert_eq!(
            generate(config(0, 0, 4, 1.0)),
            Err(GraphError::EmptyGraph)
        );
    }

    #[test]
    fn rejects_zero_degree() {
        assert_eq!(
            generate(config(4, 0, 0, 1.0)),
            Err(GraphError::InvalidDegree)
        );
    }

    #[test]
    fn rejects_out_of_range_gamma() {
        assert_eq!(
            generate(config(4, 0, 4, 1.5)),
            Err(GraphError::InvalidGamma(1.5))
        );
    }

    #[test]
    fn single_vertex_has_no_edges() {
        let graph = generate(config(1, 42, 5, 1.0)).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn vertices_have_distinct_coordinates() {
        let graph = generate(config(200, 7, 6, 0.5)).unwrap();
        let mut seen = HashSet::new();
        for v in graph.vertices() {
            assert!(seen.insert((v.x, v.y)), "duplicate coordinate at {v:?}");
        }
    }

    #[test]
    fn no_self_loops_or_parallel_edges() {
        let graph = generate(config(200, 7, 6, 0.5)).unwrap();
        for v in graph.vertices() {
            let mut targets = HashSet::new();
            for n in graph.neighbors(v.id) {
                assert_ne!(n.target, v.id, "self-loop at {:?}", v.id);
                assert!(
                    targets.insert(n.target),
                    "parallel edge {:?}->{:?}",
                    v.id,
                    n.target
                );
            }
        }
    }

    #[test]
    fn is_deterministic_given_same_seed() {
        let a = generate(config(150, 123, 5, 0.5)).unwrap();
        let b = generate(config(150, 123, 5, 0.5)).unwrap();
        assert_eq!(a.node_count(), b.node_count());
        assert_eq!(a.edge_count(), b.edge_count());
        for (va, vb) in a.vertices().iter().zip(b.vertices()) {
            assert_eq!((va.x, va.y), (vb.x, vb.y));
        }
    }

    #[test]
    fn all_edge_weights_are_positive() {
        let graph = generate(config(150, 9, 5, 0.0)).unwrap();
        for v in graph.vertices() {
            for n in graph.neighbors(v.id) {
                assert!(n.weight > 0);
            }
        }
    }
}
