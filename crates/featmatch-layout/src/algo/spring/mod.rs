use crate::algo::SpringOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};
use nalgebra::Vector2;
use rustc_hash::FxHashMap;

mod rng;

use rng::XorShift64Star;

type Vec2 = Vector2<f64>;

pub fn layout(graph: &Graph, opts: &SpringOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let mut sim = SimGraph::from_graph(graph);
    let mut rng = XorShift64Star::new(opts.random_seed);
    sim.seed_positions(&mut rng);
    sim.run_spring_embedder(opts);
    sim.rescale(opts.scale);

    let mut positions = std::collections::BTreeMap::new();
    for n in &sim.nodes {
        positions.insert(
            n.id.clone(),
            Point {
                x: n.pos.x,
                y: n.pos.y,
            },
        );
    }
    Ok(LayoutResult { positions })
}

#[derive(Debug, Clone)]
struct SimNode {
    id: String,
    pos: Vec2,
    disp: Vec2,
}

#[derive(Debug, Clone)]
struct SimGraph {
    nodes: Vec<SimNode>,
    // Symmetric adjacency as index pairs (a < b); self-loops and repeats are dropped.
    edges: Vec<(usize, usize)>,
}

impl SimGraph {
    const MIN_DISTANCE: f64 = 0.01;
    const TEMPERATURE_FACTOR: f64 = 0.1;

    fn from_graph(graph: &Graph) -> Self {
        let mut nodes: Vec<SimNode> = Vec::with_capacity(graph.nodes.len());
        let mut id_to_idx: FxHashMap<&str, usize> = FxHashMap::default();
        id_to_idx.reserve(graph.nodes.len());

        for (idx, n) in graph.nodes.iter().enumerate() {
            nodes.push(SimNode {
                id: n.id.clone(),
                pos: Vec2::zeros(),
                disp: Vec2::zeros(),
            });
            id_to_idx.insert(n.id.as_str(), idx);
        }

        let mut edges: Vec<(usize, usize)> = Vec::with_capacity(graph.edges.len());
        for e in &graph.edges {
            let Some(&a) = id_to_idx.get(e.source.as_str()) else {
                continue;
            };
            let Some(&b) = id_to_idx.get(e.target.as_str()) else {
                continue;
            };
            if a == b {
                continue;
            }
            let pair = (a.min(b), a.max(b));
            if !edges.contains(&pair) {
                edges.push(pair);
            }
        }

        Self { nodes, edges }
    }

    fn seed_positions(&mut self, rng: &mut XorShift64Star) {
        for n in &mut self.nodes {
            let x = rng.next_f64_unit();
            let y = rng.next_f64_unit();
            n.pos = Vec2::new(x, y);
        }
    }

    fn extent(&self) -> f64 {
        let mut min = Vec2::repeat(f64::INFINITY);
        let mut max = Vec2::repeat(f64::NEG_INFINITY);
        for n in &self.nodes {
            min = min.inf(&n.pos);
            max = max.sup(&n.pos);
        }
        let span = max - min;
        span.x.max(span.y)
    }

    fn run_spring_embedder(&mut self, opts: &SpringOptions) {
        let n = self.nodes.len();
        if n < 2 {
            return;
        }

        let k = opts
            .optimal_distance
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or_else(|| (1.0 / n as f64).sqrt());
        let iterations = opts.iterations.max(1);

        // Linear cooling from a tenth of the initial extent down to zero.
        let mut temperature = self.extent() * Self::TEMPERATURE_FACTOR;
        let cooling_step = temperature / (iterations as f64 + 1.0);

        for _ in 0..iterations {
            for node in &mut self.nodes {
                node.disp = Vec2::zeros();
            }

            // Repulsion between every pair.
            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = self.nodes[i].pos - self.nodes[j].pos;
                    let distance = delta.norm().max(Self::MIN_DISTANCE);
                    let force = delta * (k * k / (distance * distance));
                    self.nodes[i].disp += force;
                    self.nodes[j].disp -= force;
                }
            }

            // Attraction along edges.
            for &(a, b) in &self.edges {
                let delta = self.nodes[a].pos - self.nodes[b].pos;
                let distance = delta.norm().max(Self::MIN_DISTANCE);
                let force = delta * (distance / k);
                self.nodes[a].disp -= force;
                self.nodes[b].disp += force;
            }

            let mut total_movement = 0.0;
            for node in &mut self.nodes {
                let length = node.disp.norm().max(Self::MIN_DISTANCE);
                let step = node.disp * (temperature / length);
                node.pos += step;
                total_movement += step.norm();
            }

            temperature -= cooling_step;
            if total_movement / (n as f64) < opts.threshold {
                break;
            }
        }
    }

    fn rescale(&mut self, scale: f64) {
        if self.nodes.is_empty() {
            return;
        }
        let count = self.nodes.len() as f64;
        let mean = self.nodes.iter().fold(Vec2::zeros(), |acc, n| acc + n.pos) / count;
        for n in &mut self.nodes {
            n.pos -= mean;
        }
        let lim = self
            .nodes
            .iter()
            .map(|n| n.pos.amax())
            .fold(0.0_f64, f64::max);
        if lim > 0.0 && lim.is_finite() {
            let factor = scale / lim;
            for n in &mut self.nodes {
                n.pos *= factor;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SimGraph;
    use crate::graph::{Edge, Graph, Node};

    #[test]
    fn self_loops_and_repeated_edges_are_dropped() {
        let graph = Graph {
            nodes: vec![Node::new("a"), Node::new("b")],
            edges: vec![Edge::new("a", "a"), Edge::new("a", "b"), Edge::new("b", "a")],
        };
        let sim = SimGraph::from_graph(&graph);
        assert_eq!(sim.edges, vec![(0, 1)]);
    }

    #[test]
    fn rescale_centres_and_bounds_coordinates() {
        let graph = Graph {
            nodes: vec![Node::new("a"), Node::new("b"), Node::new("c")],
            edges: Vec::new(),
        };
        let mut sim = SimGraph::from_graph(&graph);
        sim.nodes[0].pos = nalgebra::Vector2::new(0.0, 0.0);
        sim.nodes[1].pos = nalgebra::Vector2::new(4.0, 0.0);
        sim.nodes[2].pos = nalgebra::Vector2::new(2.0, 6.0);
        sim.rescale(1.0);

        let max = sim.nodes.iter().map(|n| n.pos.amax()).fold(0.0, f64::max);
        assert!((max - 1.0).abs() < 1e-12, "max: {max}");
        let sum = sim.nodes.iter().fold(nalgebra::Vector2::zeros(), |acc, n| acc + n.pos);
        assert!(sum.norm() < 1e-12, "centroid drifted: {sum:?}");
    }
}
