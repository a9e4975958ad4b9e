//! Diverse multi-path search.
//!
//! A small pool of workers repeatedly resolves the target with randomized
//! discovery orders. Each worker owns a seed that it advances with
//! `seed = (seed * 17 + 31) % 10000` after every round and every attempt,
//! so runs are reproducible for a given configuration. Paths are
//! deduplicated by their exact step signature under one shared lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use alchemy_index::Element;
use hashbrown::HashSet;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::path::{Discovery, RecipePath};
use crate::request::Strategy;
use crate::rng::SeededRng;
use crate::traits::{respects_tiers, RecipeSource};

/// Advances a worker seed.
pub fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(17).wrapping_add(31) % 10_000
}

/// Collects up to `quota` distinct paths with a pool of randomized workers.
pub struct DiversePathSearch<'a> {
    source: &'a dyn RecipeSource,
    config: &'a SearchConfig,
    token: &'a CancelToken,
}

#[derive(Default)]
struct Collected {
    signatures: HashSet<String>,
    paths: Vec<RecipePath>,
}

impl<'a> DiversePathSearch<'a> {
    /// Creates a search over `source`, stopping when `token` leaves `Running`.
    pub fn new(
        source: &'a dyn RecipeSource,
        config: &'a SearchConfig,
        token: &'a CancelToken,
    ) -> Self {
        Self {
            source,
            config,
            token,
        }
    }

    /// Runs `min(quota, max_workers)` workers until the quota is met or all
    /// of them run out of new paths.
    ///
    /// Returns the distinct paths in acceptance order together with the
    /// visits of every attempt. A short list is a normal outcome; if the
    /// target cannot be reached at all, one unresolved path is returned.
    pub fn run(
        &self,
        target: &Element,
        strategy: Strategy,
        quota: usize,
    ) -> (Vec<RecipePath>, usize) {
        let quota = quota.max(1);
        let workers = quota.min(self.config.max_workers).max(1);
        let collected = Mutex::new(Collected::default());
        let visits = AtomicUsize::new(0);

        debug!(target = %target, ?strategy, quota, workers, "starting diverse path search");

        thread::scope(|scope| {
            for worker in 0..workers {
                let collected = &collected;
                let visits = &visits;
                scope.spawn(move || {
                    self.work(worker, target, strategy, quota, collected, visits);
                });
            }
        });

        let mut paths = collected.into_inner().paths;
        debug!(target = %target, found = paths.len(), quota, "diverse path search finished");
        if paths.is_empty() {
            paths.push(RecipePath::unresolved(target.clone()));
        }
        (paths, visits.into_inner())
    }

    fn work(
        &self,
        worker: usize,
        target: &Element,
        strategy: Strategy,
        quota: usize,
        collected: &Mutex<Collected>,
        visits: &AtomicUsize,
    ) {
        let mut seed = self.config.base_seed.wrapping_add(worker as u64);
        let mut stale = 0;

        for attempt in 0..self.config.max_attempts_per_worker {
            if !self.token.is_running() {
                break;
            }

            let resolver = RandomizedResolver::new(self.source);
            let (path, attempt_visits) = resolver.resolve(target, strategy, &mut seed);
            visits.fetch_add(attempt_visits, Ordering::Relaxed);
            seed = next_seed(seed);

            if !path.found {
                // Reachability does not depend on order; no later attempt can succeed.
                trace!(worker, attempt, "target unreachable");
                break;
            }

            let accepted = {
                let mut collected = collected.lock();
                if !self.token.is_running() {
                    false
                } else if collected.signatures.insert(path.signature()) {
                    collected.paths.push(path);
                    if collected.paths.len() >= quota && self.token.reach_quota() {
                        debug!(worker, quota, "path quota reached");
                    }
                    true
                } else {
                    false
                }
            };
            trace!(worker, attempt, accepted, "attempt finished");

            if accepted {
                stale = 0;
            } else {
                stale += 1;
                if stale >= self.config.max_stale_attempts {
                    debug!(worker, attempt, "worker exhausted distinct paths");
                    break;
                }
            }

            if !self.config.attempt_delay.is_zero() {
                thread::sleep(self.config.attempt_delay);
            }
        }
    }
}

/// Path resolver whose discovery order is shuffled from a seed.
///
/// Works on the reverse index: an element is discovered through a rule in
/// which an already-discovered element takes part, once the rule's other
/// ingredient is discovered too and the tier rule holds.
pub struct RandomizedResolver<'a> {
    source: &'a dyn RecipeSource,
}

impl<'a> RandomizedResolver<'a> {
    /// Creates a resolver over `source`.
    pub fn new(source: &'a dyn RecipeSource) -> Self {
        Self { source }
    }

    /// Resolves `target`, advancing `seed` after every round.
    pub fn resolve(
        &self,
        target: &Element,
        strategy: Strategy,
        seed: &mut u64,
    ) -> (RecipePath, usize) {
        match strategy {
            Strategy::Bfs => self.resolve_bfs(target, seed),
            Strategy::Dfs => self.resolve_dfs(target, seed),
        }
    }

    /// Rounds over the shuffled discovered set, each element's usages shuffled.
    fn resolve_bfs(&self, target: &Element, seed: &mut u64) -> (RecipePath, usize) {
        let mut discovery = Discovery::seeded(self.source);
        let mut visits = self.source.base_elements().len();

        'rounds: while !discovery.is_discovered(target) {
            let mut rng = SeededRng::new(*seed);
            *seed = next_seed(*seed);

            let mut frontier = discovery.order().to_vec();
            rng.shuffle(&mut frontier);

            let mut progressed = false;
            for element in &frontier {
                let found = self.expand(element, &mut discovery, &mut rng, |result| {
                    visits += 1;
                    progressed = true;
                    result == target
                });
                if found {
                    break 'rounds;
                }
            }
            if !progressed {
                break;
            }
        }

        (discovery.into_path(target), visits)
    }

    /// Stack seeded with the shuffled base set; each pop expands its usages.
    fn resolve_dfs(&self, target: &Element, seed: &mut u64) -> (RecipePath, usize) {
        let mut discovery = Discovery::seeded(self.source);
        if discovery.is_discovered(target) {
            return (discovery.into_path(target), 1);
        }

        let mut rng = SeededRng::new(*seed);
        *seed = next_seed(*seed);
        let mut stack = self.source.base_elements().to_vec();
        rng.shuffle(&mut stack);

        let mut visited = HashSet::new();
        let mut visits = 0;

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            visits += 1;

            let mut rng = SeededRng::new(*seed);
            *seed = next_seed(*seed);

            let mut pushed = Vec::new();
            let found = self.expand(&current, &mut discovery, &mut rng, |result| {
                pushed.push(result.clone());
                result == target
            });
            if found {
                break;
            }
            stack.extend(pushed);
        }

        (discovery.into_path(target), visits)
    }

    /// Tries every usage of `element` in shuffled order.
    ///
    /// `on_discover` runs for each new discovery and returns true to stop.
    /// Returns true if it stopped.
    fn expand(
        &self,
        element: &Element,
        discovery: &mut Discovery,
        rng: &mut SeededRng,
        mut on_discover: impl FnMut(&Element) -> bool,
    ) -> bool {
        let uses = self.source.uses_of(element);
        let mut order: Vec<usize> = (0..uses.len()).collect();
        rng.shuffle(&mut order);

        for i in order {
            let usage = &uses[i];
            if discovery.is_discovered(&usage.result)
                || !discovery.is_discovered(&usage.partner)
                || !respects_tiers(self.source, &usage.result, &usage.pair)
            {
                continue;
            }
            discovery.discover(usage.result.clone(), usage.pair.clone());
            if on_discover(&usage.result) {
                return true;
            }
        }
        false
    }
}
