use rand::{Rng, rngs::StdRng};

/// Reflection coefficient.
const ALPHA: f64 = 1.0;
/// Expansion coefficient.
const GAMMA: f64 = 2.0;
/// Contraction coefficient.
const RHO: f64 = -0.5;
/// Shrink coefficient.
const SIGMA: f64 = 0.5;

/// Scale applied to one coordinate per vertex of the initial simplex.
const INITIAL_SCALE: f64 = 1.1;
/// Coordinates at zero are offset by `(scale - 1) * ZERO_OFFSET` instead.
const ZERO_OFFSET: f64 = 1e-2;

/// Restarts scale each coordinate by a factor in `1 ± RESTART_SPREAD`.
const RESTART_SPREAD: f64 = 0.5;
/// Iterations without significant progress before a restart.
const RESTART_AFTER: usize = 100;
/// Restarts allowed per dimension before the search is done.
const RESTARTS_PER_DIM: usize = 10;

#[derive(Debug, Clone)]
struct Vertex {
    x: Vec<f64>,
    cost: f64,
}

impl Vertex {
    fn new(x: Vec<f64>, cost: &impl Fn(&[f64]) -> f64) -> Self {
        let cost = cost(&x);
        Self { x, cost }
    }
}

/// Downhill simplex (Nelder–Mead) minimizer with random restarts.
///
/// A settled simplex keeps its best vertex and redistributes the others
/// along the coordinate axes. The search is done once it settles without
/// progress after `RESTARTS_PER_DIM` restarts per dimension.
#[derive(Debug)]
pub(super) struct Simplex {
    vertices: Vec<Vertex>,
    restarts: usize,
    iterations: usize,
    rng: StdRng,
}

impl Simplex {
    /// Builds the initial simplex around `origin`, which must not be empty.
    pub(super) fn new(origin: Vec<f64>, rng: StdRng, cost: &impl Fn(&[f64]) -> f64) -> Self {
        let varied: Vec<Vertex> = (0..origin.len())
            .map(|i| Vertex::new(scaled(&origin, i, INITIAL_SCALE), cost))
            .collect();
        let mut vertices = vec![Vertex::new(origin, cost)];
        vertices.extend(varied);

        Self {
            vertices,
            restarts: 0,
            iterations: 0,
            rng,
        }
    }

    /// Performs one iteration. Returns `true` once the search is done.
    pub(super) fn step(&mut self, epsilon: f64, cost: &impl Fn(&[f64]) -> f64) -> bool {
        let n = self.vertices.len() - 1;
        self.iterations += 1;
        self.sort();

        #[allow(clippy::cast_precision_loss)]
        let mean = self.vertices.iter().map(|v| v.cost).sum::<f64>() / (n + 1) as f64;
        if mean - self.vertices[0].cost < epsilon || self.iterations > RESTART_AFTER {
            if self.restarts >= n * RESTARTS_PER_DIM {
                return true;
            }
            self.restart(cost);
            self.sort();
        }

        let centroid = centroid(&self.vertices[..n]);
        let best = self.vertices[0].cost;

        let reflected = Vertex::new(along(&centroid, &self.vertices[n].x, ALPHA), cost);
        if reflected.cost >= best && reflected.cost < self.vertices[n - 1].cost {
            self.vertices[n] = reflected;
            return false;
        }

        if reflected.cost < best {
            if best - reflected.cost > epsilon {
                self.restarts = 0;
                self.iterations = 0;
            }
            let expanded = Vertex::new(along(&centroid, &self.vertices[n].x, GAMMA), cost);
            self.vertices[n] = if expanded.cost < reflected.cost {
                expanded
            } else {
                reflected
            };
            return false;
        }

        let contracted = Vertex::new(along(&centroid, &self.vertices[n].x, RHO), cost);
        if contracted.cost < self.vertices[n].cost {
            self.vertices[n] = contracted;
            return false;
        }

        // Shrink toward the best vertex.
        let anchor = self.vertices[0].x.clone();
        for vertex in &mut self.vertices[1..] {
            let x = anchor
                .iter()
                .zip(&vertex.x)
                .map(|(a, v)| a + SIGMA * (v - a))
                .collect();
            *vertex = Vertex::new(x, cost);
        }
        false
    }

    /// The best vertex and its cost.
    pub(super) fn best(&self) -> (&[f64], f64) {
        let best = self
            .vertices
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .unwrap_or(&self.vertices[0]);
        (&best.x, best.cost)
    }

    fn sort(&mut self) {
        self.vertices.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    }

    /// Keeps the best vertex and scales one coordinate of each other vertex
    /// by a random factor.
    fn restart(&mut self, cost: &impl Fn(&[f64]) -> f64) {
        let anchor = self.vertices[0].x.clone();
        for i in 0..anchor.len() {
            let factor = self
                .rng
                .gen_range(1.0 - RESTART_SPREAD..=1.0 + RESTART_SPREAD);
            self.vertices[i + 1] = Vertex::new(scaled(&anchor, i, factor), cost);
        }
        self.restarts += 1;
        self.iterations = 0;
    }
}

fn scaled(x: &[f64], i: usize, factor: f64) -> Vec<f64> {
    let mut x = x.to_vec();
    if x[i] == 0.0 {
        x[i] = (factor - 1.0) * ZERO_OFFSET;
    } else {
        x[i] *= factor;
    }
    x
}

fn centroid(vertices: &[Vertex]) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let count = vertices.len() as f64;
    let mut sum = vec![0.0; vertices[0].x.len()];
    for vertex in vertices {
        for (s, x) in sum.iter_mut().zip(&vertex.x) {
            *s += x;
        }
    }
    sum.into_iter().map(|s| s / count).collect()
}

/// `centroid + k * (centroid - from)`.
fn along(centroid: &[f64], from: &[f64], k: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(from)
        .map(|(c, f)| c + k * (c - f))
        .collect()
}
