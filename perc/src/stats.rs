use std::fmt::Display;

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    error::{check_positive, Result},
    percolation::{Percolation, PercolationGrid},
};

////////////////////////////////////////////////////////////////////////////////

/// z-score of the two-sided 95% interval.
const CONFIDENCE_95: f64 = 1.96;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExperimentConfig {
    pub size: usize,
    pub trials: usize,
    /// Base seed; trial `i` uses `seed + i`. Drawn from entropy when unset.
    pub seed: Option<u64>,
    /// Worker count; rayon's default when unset.
    pub threads: Option<usize>,
}

impl ExperimentConfig {
    pub fn new(size: usize, trials: usize) -> Self {
        Self {
            size,
            trials,
            seed: None,
            threads: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("grid size", self.size)?;
        check_positive("trial count", self.trials)?;
        if let Some(threads) = self.threads {
            check_positive("thread count", threads)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Source of uniformly distributed integers.
pub trait UniformSource {
    /// Returns an integer in `[0, bound)`.
    fn uniform(&mut self, bound: usize) -> usize;
}

/// Adapts a `rand` generator.
pub struct RngSource<R>(pub R);

impl<R: Rng> UniformSource for RngSource<R> {
    fn uniform(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

/// Creates the random source for one trial.
pub trait SourceFactory: Sync {
    type Source: UniformSource;

    fn create(&self, trial: usize) -> Self::Source;
}

impl<F, S> SourceFactory for F
where
    F: Fn(usize) -> S + Sync,
    S: UniformSource,
{
    type Source = S;

    fn create(&self, trial: usize) -> S {
        self(trial)
    }
}

/// One `StdRng` per trial, seeded with `seed + trial`.
#[derive(Clone, Copy, Debug)]
pub struct SeededSources {
    pub seed: u64,
}

impl SourceFactory for SeededSources {
    type Source = RngSource<StdRng>;

    fn create(&self, trial: usize) -> Self::Source {
        RngSource(StdRng::seed_from_u64(self.seed.wrapping_add(trial as u64)))
    }
}

/// Creates the grid for one trial.
pub trait GridFactory: Sync {
    type Grid: PercolationGrid;

    fn create(&self, size: usize, trial: usize) -> Result<Self::Grid>;
}

impl<F, G> GridFactory for F
where
    F: Fn(usize, usize) -> Result<G> + Sync,
    G: PercolationGrid,
{
    type Grid = G;

    fn create(&self, size: usize, trial: usize) -> Result<G> {
        self(size, trial)
    }
}

fn fresh_grid(size: usize, _trial: usize) -> Result<Percolation> {
    Percolation::new(size)
}

////////////////////////////////////////////////////////////////////////////////

/// Percolation threshold estimate over independent trials.
///
/// All trials run inside the constructor; afterwards the samples are
/// read-only.
#[derive(Clone, Debug)]
pub struct PercolationStats {
    size: usize,
    samples: Vec<f64>,
}

impl PercolationStats {
    /// Runs `trials` experiments on `size`-by-`size` grids with a random seed.
    pub fn new(size: usize, trials: usize) -> Result<Self> {
        Self::with_config(&ExperimentConfig::new(size, trials))
    }

    /// Same as [`PercolationStats::new`] but reproducible.
    pub fn with_seed(size: usize, trials: usize, seed: u64) -> Result<Self> {
        Self::with_config(&ExperimentConfig::new(size, trials).with_seed(seed))
    }

    pub fn with_config(config: &ExperimentConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!("base seed {seed}");
        Self::run(config, &fresh_grid, &SeededSources { seed })
    }

    /// Runs the experiment with injected grids and random sources.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a zero size, trial count or thread count, and
    /// the first error raised by any trial.
    pub fn run<G, S>(config: &ExperimentConfig, grids: &G, sources: &S) -> Result<Self>
    where
        G: GridFactory,
        S: SourceFactory,
    {
        config.validate()?;
        let size = config.size;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads.unwrap_or(0))
            .build()?;
        info!(
            "running {} trials on a {size}x{size} grid with {} threads",
            config.trials,
            pool.current_num_threads(),
        );

        let samples = pool.install(|| {
            (0..config.trials)
                .into_par_iter()
                .map(|trial| {
                    let mut grid = grids.create(size, trial)?;
                    let mut source = sources.create(trial);
                    let opened = run_trial(&mut grid, &mut source)?;
                    let threshold = opened as f64 / (size * size) as f64;
                    debug!("trial {trial}: percolated after {opened} sites, threshold {threshold}");
                    Ok(threshold)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let stats = Self { size, samples };
        info!("mean threshold {}", stats.mean());
        Ok(stats)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    /// Per-trial thresholds in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.trials() as f64
    }

    /// Sample standard deviation. `NaN` for a single trial.
    pub fn stddev(&self) -> f64 {
        let n = self.trials();
        if n == 1 {
            return f64::NAN;
        }
        let mean = self.mean();
        let sum = self
            .samples
            .iter()
            .map(|x| (x - mean) * (x - mean))
            .sum::<f64>();
        (sum / (n - 1) as f64).sqrt()
    }

    pub fn confidence_lo(&self) -> f64 {
        self.mean() - self.half_width()
    }

    pub fn confidence_hi(&self) -> f64 {
        self.mean() + self.half_width()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.trials() as f64).sqrt()
    }
}

impl Display for PercolationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "mean                    = {}", self.mean())?;
        writeln!(f, "stddev                  = {}", self.stddev())?;
        writeln!(
            f,
            "95% confidence interval = {}, {}",
            self.confidence_lo(),
            self.confidence_hi()
        )
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Opens random blocked sites until the grid percolates and returns how many
/// were opened. At least one site is opened before the first check.
///
/// Blocked sites are found by redrawing; the expected number of draws grows
/// as the grid fills up.
pub fn run_trial<G, S>(grid: &mut G, source: &mut S) -> Result<usize>
where
    G: PercolationGrid + ?Sized,
    S: UniformSource + ?Sized,
{
    let size = grid.size();
    let mut opened = 0;
    loop {
        let (row, col) = loop {
            let row = source.uniform(size) + 1;
            let col = source.uniform(size) + 1;
            if !grid.is_open(row, col)? {
                break (row, col);
            }
        };
        grid.open(row, col)?;
        opened += 1;

        if grid.percolates() {
            return Ok(opened);
        }
    }
}
