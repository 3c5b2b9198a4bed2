pub mod spring;

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Fruchterman-Reingold spring embedder.
    Spring(SpringOptions),
}

#[derive(Debug, Clone)]
pub struct SpringOptions {
    /// Seed for the initial placement.
    pub random_seed: u64,
    pub iterations: usize,
    /// Ideal distance between nodes. `None` uses `1 / sqrt(node_count)`.
    pub optimal_distance: Option<f64>,
    /// Largest absolute coordinate after rescaling.
    pub scale: f64,
    /// Stop early once the mean per-node movement of an iteration drops below this value.
    pub threshold: f64,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            iterations: 50,
            optimal_distance: None,
            scale: 1.0,
            threshold: 1e-4,
        }
    }
}

impl SpringOptions {
    pub fn with_seed(random_seed: u64) -> Self {
        Self {
            random_seed,
            ..Default::default()
        }
    }
}
