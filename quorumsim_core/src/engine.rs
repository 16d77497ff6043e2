//! Cluster simulation engine.
//!
//! Steps a fixed pool of independent servers through discrete time. Each
//! server alternates between up and down, with sojourn lengths drawn from
//! the `SojournSampler`. The joint state of the pool is recorded once per
//! tick.
//!
//! # Initialization
//!
//! Every server starts **down** with a zero countdown, so on tick 0 it
//! immediately transitions up and draws its first uptime. The first sampled
//! sojourn therefore begins exactly at the start of the observed horizon.
//!
//! # Determinism
//!
//! The engine is not seeded by itself: it consumes whatever context it is
//! handed. Reproducibility comes either from a seeded context or from the
//! `SimulationCache` in front of it.

use crate::error::{Result, SimError};
use crate::params::SimulationParameters;
use crate::sampler::SojournSampler;
use quorumsim_env::SimulationContext;
use rand::Rng;
use tracing::debug;

/// Per-server state, owned by a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Server {
    /// Whether the server is currently up
    pub is_up: bool,

    /// Ticks remaining until the next transition
    pub countdown: u64,
}

impl Server {
    /// Down with zero countdown: transitions up on the first tick.
    pub const INITIAL: Server = Server {
        is_up: false,
        countdown: 0,
    };

    /// Advances the server by one tick.
    fn step<R: Rng + ?Sized>(&mut self, sampler: &SojournSampler, rng: &mut R) {
        if self.countdown == 0 {
            self.is_up = !self.is_up;
            self.countdown = if self.is_up {
                sampler.uptime(rng)
            } else {
                sampler.downtime(rng)
            };
        } else {
            self.countdown -= 1;
        }
    }
}

/// Joint up/down state of every server at one tick, in server-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot<'a> {
    states: &'a [bool],
}

impl<'a> StateSnapshot<'a> {
    /// Number of servers in the snapshot.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for snapshots produced by a valid run.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether server `index` is up, or `None` if out of range.
    pub fn is_up(&self, index: usize) -> Option<bool> {
        self.states.get(index).copied()
    }

    /// Counts up servers among the first `n`, or `None` if the snapshot
    /// holds fewer than `n` servers.
    pub fn up_count(&self, n: usize) -> Option<usize> {
        let states = self.states.get(..n)?;
        Some(states.iter().filter(|up| **up).count())
    }

    /// Returns the raw per-server states.
    pub fn as_slice(&self) -> &'a [bool] {
        self.states
    }
}

/// Time series of joint server states, one snapshot per tick.
///
/// Stored flat (`horizon * server_count` booleans) so long horizons stay
/// a single allocation. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    server_count: usize,
    states: Vec<bool>,
}

impl SimulationResult {
    /// Builds a result from explicit snapshots.
    ///
    /// Every snapshot must have exactly `server_count` entries. An empty
    /// iterator yields a zero-horizon result, which the aggregator rejects.
    pub fn from_snapshots<I, S>(server_count: usize, snapshots: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[bool]>,
    {
        crate::error::ensure_positive_count("server_count", server_count)?;

        let mut states = Vec::new();
        for (tick, snapshot) in snapshots.into_iter().enumerate() {
            let snapshot = snapshot.as_ref();
            if snapshot.len() != server_count {
                return Err(SimError::invalid(
                    "snapshots",
                    format!(
                        "snapshot at tick {} has {} entries, expected {}",
                        tick,
                        snapshot.len(),
                        server_count
                    ),
                ));
            }
            states.extend_from_slice(snapshot);
        }

        Ok(Self {
            server_count,
            states,
        })
    }

    /// Number of servers per snapshot.
    pub fn server_count(&self) -> usize {
        self.server_count
    }

    /// Number of recorded ticks.
    pub fn horizon(&self) -> usize {
        self.states.len() / self.server_count
    }

    /// Snapshot at `tick`, or `None` past the horizon.
    pub fn snapshot(&self, tick: usize) -> Option<StateSnapshot<'_>> {
        let start = tick.checked_mul(self.server_count)?;
        let end = start.checked_add(self.server_count)?;
        let states = self.states.get(start..end)?;
        Some(StateSnapshot { states })
    }

    /// Iterates snapshots in tick order.
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = StateSnapshot<'_>> + '_ {
        self.states
            .chunks_exact(self.server_count)
            .map(|states| StateSnapshot { states })
    }

    /// Fraction of ticks each server spent up, by server index.
    pub fn server_uptime(&self) -> Vec<f64> {
        let horizon = self.horizon();
        let mut up = vec![0usize; self.server_count];
        for snapshot in self.snapshots() {
            for (count, is_up) in up.iter_mut().zip(snapshot.as_slice()) {
                *count += usize::from(*is_up);
            }
        }
        up.into_iter()
            .map(|count| if horizon == 0 { 0.0 } else { count as f64 / horizon as f64 })
            .collect()
    }
}

/// Runs one simulation, drawing from the given context.
///
/// The context is held for the whole run so that concurrent callers cannot
/// interleave draws into this run's sequence.
pub fn simulate<C: SimulationContext>(
    ctx: &C,
    params: &SimulationParameters,
) -> Result<SimulationResult> {
    params.validate()?;
    debug!(
        "Simulating {} servers for {} ticks (mtbf={}, mttr={}, seed={})",
        params.server_count,
        params.horizon,
        params.mtbf,
        params.mttr,
        ctx.seed()
    );
    ctx.with_rng(|rng| simulate_with_rng(rng, params))
}

/// Runs one simulation against an explicit generator.
pub fn simulate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    params: &SimulationParameters,
) -> Result<SimulationResult> {
    params.validate()?;
    let sampler = SojournSampler::new(params.mtbf, params.mttr)?;

    let total = params.horizon.checked_mul(params.server_count).ok_or_else(|| {
        SimError::invalid("horizon", "horizon * server_count overflows usize")
    })?;

    let mut servers = vec![Server::INITIAL; params.server_count];
    let mut states = Vec::with_capacity(total);

    for _ in 0..params.horizon {
        for server in servers.iter_mut() {
            server.step(&sampler, rng);
        }
        states.extend(servers.iter().map(|s| s.is_up));
    }

    Ok(SimulationResult {
        server_count: params.server_count,
        states,
    })
}
