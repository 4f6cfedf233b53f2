//! The grading driver: fixed battery, random battery, classification.

use std::io::Read as _;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tis_asm::{SolutionError, load_solution};
use tis_core::{Field, FieldError};
use tis_levels::Level;

use crate::score::Score;
use crate::seeds::{SeedIter, SeedRange};

/// Tuning defaults, shared by the CLI and the FFI surface.
pub mod defaults {
    pub const CYCLES_LIMIT: usize = 150_000;
    pub const TOTAL_CYCLES_LIMIT: usize = usize::MAX;
    pub const CHEAT_RATE: f64 = 0.05;
    pub const LIMIT_MULTIPLIER: f64 = 5.0;
    pub const NUM_THREADS: usize = 1;
    pub const T21_SIZE: usize = 15;
    pub const T30_SIZE: usize = 15;
    pub const RUN_FIXED: bool = true;
}

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Ask all in-flight runs to wind down at the next cycle boundary.
/// Partial scores are still reported. Safe to call from a signal
/// handler.
pub fn request_stop() {
    STOP_REQUESTED.store(true, Ordering::Relaxed);
}

#[must_use]
pub fn stop_requested() -> bool {
    STOP_REQUESTED.load(Ordering::Relaxed)
}

/// Re-arm after a stop, for embedders grading several solutions.
pub fn clear_stop() {
    STOP_REQUESTED.store(false, Ordering::Relaxed);
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid level ID {0:?}")]
    UnknownLevel(String),
    #[error("no target level set")]
    NoLevel,
    #[error("impossible to determine the level for {0:?}")]
    LevelNotDeduced(String),
    #[error("invalid file {path:?}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Solution(#[from] SolutionError),
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Run a prepared field until its outputs settle, a limit is hit, or a
/// fault fires.
fn run(field: &mut Field, cycles_limit: usize) -> Score {
    let mut sc = Score {
        instructions: field.instructions(),
        nodes: field.nodes_used(),
        ..Score::default()
    };
    loop {
        sc.cycles += 1;
        log::trace!("step {}", sc.cycles);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("current state:\n{}", field.state_dump());
        }
        match field.step() {
            Ok(()) => {}
            Err(hcf) => {
                log::info!("test aborted by HCF (node {},{}:{})", hcf.x, hcf.y, hcf.pc);
                sc.validated = false;
                return sc;
            }
        }
        if !field.active() || sc.cycles >= cycles_limit || stop_requested() {
            break;
        }
    }
    sc.validated = field.valid();
    sc
}

struct RandomOutcome {
    worst: Score,
    total_cycles: usize,
    failure_printed: bool,
}

#[derive(Clone, Copy)]
struct RandomCfg {
    cycles_limit: usize,
    total_cycles_limit: usize,
    cheat_rate: f64,
    total_random_tests: u32,
    compute_stats: bool,
}

/// One grading worker: pop seeds, generate, run, aggregate, until seeds
/// run out or a stop condition trips.
fn random_worker(
    seeds: &Mutex<SeedIter>,
    agg: &Mutex<RandomOutcome>,
    level: &Level,
    mut field: Field,
    cfg: RandomCfg,
) {
    loop {
        let seed = {
            let mut it = seeds.lock().expect("seed iterator lock");
            match it.next() {
                Some(s) => s,
                None => return,
            }
        };

        let Some(test) = level.random_test(seed) else {
            // Generator skipped this seed; a non-event.
            continue;
        };
        field.set_expected(test);
        let last = run(&mut field, cfg.cycles_limit);
        if stop_requested() {
            return;
        }

        // None of this is hot; holding the one lock for the whole
        // update keeps the bookkeeping simple.
        let mut agg = agg.lock().expect("score lock");
        agg.worst.random_test_ran += 1;
        agg.worst.instructions = last.instructions;
        agg.worst.nodes = last.nodes;
        agg.total_cycles += last.cycles;
        if last.validated {
            agg.worst.validated = true;
            agg.worst.cycles = agg.worst.cycles.max(last.cycles);
            agg.worst.random_test_valid += 1;
        } else {
            let timeout = if last.cycles == cfg.cycles_limit {
                " [timeout]"
            } else {
                ""
            };
            if std::mem::replace(&mut agg.failure_printed, true) {
                log::debug!("random test failed for seed: {seed}{timeout}");
            } else {
                log::info!("random test failed for seed: {seed}{timeout}");
                log::info!("{}", field.failure_report());
            }
        }
        if !cfg.compute_stats {
            // Enough passes to classify, and at least one failure seen.
            let enough = f64::from(agg.worst.random_test_valid)
                >= cfg.cheat_rate * f64::from(cfg.total_random_tests);
            if enough && agg.worst.random_test_valid < agg.worst.random_test_ran {
                return;
            }
        }
        if agg.total_cycles >= cfg.total_cycles_limit {
            return;
        }
    }
}

/// The simulator: a target level, seed ranges, tuning knobs, and the
/// outcome of the last run.
pub struct Simulator {
    level: Option<Level>,
    seed_ranges: Vec<SeedRange>,
    total_random_tests: u32,
    pub cycles_limit: usize,
    pub total_cycles_limit: usize,
    pub cheat_rate: f64,
    pub limit_multiplier: f64,
    num_threads: usize,
    pub t21_size: usize,
    pub t30_size: usize,
    pub run_fixed: bool,
    pub compute_stats: bool,
    pub permissive: bool,

    pub score: Score,
    pub error_message: String,
    pub total_cycles: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    #[must_use]
    pub fn new() -> Simulator {
        Simulator {
            level: None,
            seed_ranges: Vec::new(),
            total_random_tests: 0,
            cycles_limit: defaults::CYCLES_LIMIT,
            total_cycles_limit: defaults::TOTAL_CYCLES_LIMIT,
            cheat_rate: defaults::CHEAT_RATE,
            limit_multiplier: defaults::LIMIT_MULTIPLIER,
            num_threads: defaults::NUM_THREADS,
            t21_size: defaults::T21_SIZE,
            t30_size: defaults::T30_SIZE,
            run_fixed: defaults::RUN_FIXED,
            compute_stats: false,
            permissive: false,
            score: Score::default(),
            error_message: String::new(),
            total_cycles: 0,
        }
    }

    /// Queue the seeds `[begin, end)` for the random battery.
    pub fn add_seed_range(&mut self, begin: u32, end: u32) {
        self.seed_ranges.push(SeedRange { begin, end });
        self.total_random_tests += end.saturating_sub(begin);
        log::debug!(
            "seeds: {begin}..{} [{}]",
            end.saturating_sub(1),
            end.saturating_sub(begin)
        );
    }

    #[must_use]
    pub fn total_random_tests(&self) -> u32 {
        self.total_random_tests
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = Some(level);
    }

    #[must_use]
    pub fn has_level(&self) -> bool {
        self.level.is_some()
    }

    pub fn clear_level(&mut self) {
        self.level = None;
    }

    /// Select a builtin level by segment id or display name.
    pub fn set_level_by_name(&mut self, id: &str) -> Result<(), SimError> {
        let level = Level::find(id).ok_or_else(|| SimError::UnknownLevel(id.to_owned()))?;
        self.level = Some(level.clone());
        Ok(())
    }

    /// 0 resolves to the hardware thread count.
    pub fn set_num_threads(&mut self, n: usize) {
        let n = if n == 0 {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            n
        };
        log::info!("using {n} threads");
        self.num_threads = n;
    }

    /// Grade a solution file; `-` reads stdin. Without a target level,
    /// deduce one from the filename's segment prefix.
    pub fn simulate_file(&mut self, path: &str) -> Result<&Score, SimError> {
        let deduced = if self.level.is_some() {
            false
        } else {
            let filename = std::path::Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(path);
            let level = tis_levels::BUILTIN_LEVELS
                .iter()
                .find(|l| filename.starts_with(l.segment))
                .ok_or_else(|| SimError::LevelNotDeduced(filename.to_owned()))?;
            log::debug!("deduced level {} from filename {filename:?}", level.segment);
            self.level = Some(level.clone());
            true
        };

        let code = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| SimError::Io {
                    path: path.to_owned(),
                    source,
                })?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(|source| SimError::Io {
                path: path.to_owned(),
                source,
            })?
        };

        let result = self.simulate_code(&code);
        if deduced {
            self.level = None;
        }
        result.map(|()| &self.score)
    }

    /// Grade a solution string against the configured level.
    pub fn simulate_code(&mut self, code: &str) -> Result<(), SimError> {
        self.score = Score::default();
        self.error_message.clear();
        self.total_cycles = 0;

        let level = self.level.clone().ok_or(SimError::NoLevel)?;
        let mut field = level.field(self.t30_size)?;
        load_solution(&mut field, code, self.t21_size, self.permissive)?;
        log::debug!("layout:\n{}", field.layout_dump());

        let mut random_cycles_limit = self.cycles_limit;
        if self.run_fixed {
            self.score.validated = true;
            for id in 0..3u32 {
                field.set_expected(level.static_test(id));
                let last = run(&mut field, self.cycles_limit);
                self.score.instructions = last.instructions;
                self.score.nodes = last.nodes;
                self.total_cycles += last.cycles;
                log::info!(
                    "fixed test {} {} in {} cycles",
                    id + 1,
                    if last.validated { "validated" } else { "failed" },
                    last.cycles
                );
                if last.validated {
                    self.score.cycles = self.score.cycles.max(last.cycles);
                } else {
                    self.score.validated = false;
                    let timeout = if last.cycles == self.cycles_limit {
                        " [timeout]"
                    } else {
                        ""
                    };
                    self.error_message = format!(
                        "{}for fixed test {} after {} cycles{timeout}\n",
                        field.failure_report(),
                        id + 1,
                        last.cycles
                    );
                    break;
                }
                if !field.has_inputs() {
                    // Image test patterns have a single invariant test.
                    log::info!("secondary tests skipped for invariant level");
                    break;
                }
                if stop_requested() {
                    log::warn!("stop requested");
                    break;
                }
            }
            self.score.achievement =
                self.score.validated && level.has_achievement(&field, self.score.cycles);
        }

        let random_applicable = self.score.validated || !self.run_fixed || self.compute_stats;
        if random_applicable && !stop_requested() && !self.seed_ranges.is_empty() {
            if self.score.validated {
                let effective =
                    (self.score.cycles as f64 * self.limit_multiplier).ceil() as usize;
                random_cycles_limit = self.cycles_limit.min(effective);
                log::info!("setting random test timeout to {random_cycles_limit}");
            }
            let worst = self.run_seed_ranges(&level, field, random_cycles_limit)?;

            if self.run_fixed {
                self.score.random_test_ran = worst.random_test_ran;
                self.score.random_test_valid = worst.random_test_valid;
            } else {
                // Without fixed tests the worst random run is the score.
                self.score = worst;
            }
            self.score.cheat = self.score.random_test_ran == 0
                || self.score.random_test_ran != self.score.random_test_valid;
            self.score.hardcoded = f64::from(self.score.random_test_valid)
                <= f64::from(self.score.random_test_ran) * self.cheat_rate;

            log::info!(
                "random test results: {} passed out of {} total",
                self.score.random_test_valid,
                self.score.random_test_ran
            );
        }
        Ok(())
    }

    fn run_seed_ranges(
        &mut self,
        level: &Level,
        field: Field,
        random_cycles_limit: usize,
    ) -> Result<Score, SimError> {
        debug_assert!(!self.seed_ranges.is_empty());
        let cfg = RandomCfg {
            cycles_limit: random_cycles_limit,
            total_cycles_limit: self.total_cycles_limit,
            cheat_rate: self.cheat_rate,
            total_random_tests: self.total_random_tests,
            compute_stats: self.compute_stats,
        };
        let agg = Mutex::new(RandomOutcome {
            worst: Score::default(),
            total_cycles: 0,
            failure_printed: false,
        });

        if !field.has_inputs() {
            // Invariant levels only need one representative random run.
            log::info!("secondary random tests skipped for invariant level");
            let seeds = Mutex::new(SeedIter::new(vec![SeedRange { begin: 0, end: 1 }]));
            random_worker(&seeds, &agg, level, field, cfg);
        } else if self.num_threads > 1 {
            let seeds = Mutex::new(SeedIter::new(self.seed_ranges.clone()));
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.num_threads)
                .build()
                .map_err(|e| SimError::WorkerPool(e.to_string()))?;
            pool.scope(|s| {
                for _ in 0..self.num_threads {
                    let worker_field = field.clone();
                    let (seeds, agg) = (&seeds, &agg);
                    s.spawn(move |_| random_worker(seeds, agg, level, worker_field, cfg));
                }
            });
        } else {
            let seeds = Mutex::new(SeedIter::new(self.seed_ranges.clone()));
            random_worker(&seeds, &agg, level, field, cfg);
        }

        if stop_requested() {
            log::warn!("stop requested");
        }
        let outcome = agg.into_inner().expect("workers have exited");
        self.total_cycles += outcome.total_cycles;
        if self.total_cycles >= self.total_cycles_limit {
            log::info!(
                "total cycles timeout reached, stopping tests at {}",
                outcome.worst.random_test_ran
            );
        }
        Ok(outcome.worst)
    }
}
