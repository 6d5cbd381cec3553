//! Trial Runner
//!
//! Drives one trial step by step over a freshly simulated price path:
//!
//! 1. τ = T − i·dt, mid = path[i]
//! 2. quote from the policy at the current inventory
//! 3. fills from the fill model
//! 4. ledger update and step record
//!
//! Every step is checked for non-finite values before the ledger changes,
//! so an aborted trial never records a corrupted position.

use crate::fill::FillVariant;
use crate::models::ModelSet;
use crate::process::ProcessVariant;
use crate::quoting::PolicyVariant;
use log::{debug, trace};
use mmsim_core::{
    PositionLedger, PositionState, PricePath, ProbabilityPolicy, Seed, Side, SimError, SimResult,
    StepRecord, TrialConfig, TrialResult,
};
use mmsim_ports::{FillModel, PriceProcess, QuotingPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Mixed into the trial seed to give the fill source its own stream
pub const FILL_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Lifecycle of a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// Created; no path generated yet
    Initialized,
    /// Steps before `next_step` have been recorded
    Running { next_step: usize },
    /// Every step recorded
    Completed,
    /// A step failed; no further steps will run
    Aborted,
}

/// Runs a single trial
///
/// Owns the trial's ledger and fill random source; the config and models are
/// borrowed and never mutated, so many runners can share them across threads.
pub struct TrialRunner<'a, P, Q, F>
where
    P: PriceProcess + ?Sized,
    Q: QuotingPolicy + ?Sized,
    F: FillModel + ?Sized,
{
    config: &'a TrialConfig,
    process: &'a P,
    policy: &'a Q,
    fill_model: &'a F,
    seed: Seed,
    path: Option<PricePath>,
    ledger: PositionLedger,
    fill_rng: StdRng,
    records: Vec<StepRecord>,
    state: TrialState,
}

impl<'a> TrialRunner<'a, ProcessVariant, PolicyVariant, FillVariant> {
    /// Runner over a configured model set
    pub fn from_models(
        config: &'a TrialConfig,
        models: &'a ModelSet,
        seed: Seed,
    ) -> SimResult<Self> {
        Self::new(config, &models.process, &models.policy, &models.fill, seed)
    }
}

impl<'a, P, Q, F> TrialRunner<'a, P, Q, F>
where
    P: PriceProcess + ?Sized,
    Q: QuotingPolicy + ?Sized,
    F: FillModel + ?Sized,
{
    /// Create a runner; the config is validated before anything else
    pub fn new(
        config: &'a TrialConfig,
        process: &'a P,
        policy: &'a Q,
        fill_model: &'a F,
        seed: Seed,
    ) -> SimResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            process,
            policy,
            fill_model,
            seed,
            path: None,
            ledger: PositionLedger::new(config.initial_cash, config.initial_inventory),
            fill_rng: StdRng::seed_from_u64(seed ^ FILL_STREAM),
            records: Vec::with_capacity(config.steps),
            state: TrialState::Initialized,
        })
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Current cash and inventory
    pub fn position(&self) -> PositionState {
        self.ledger.state()
    }

    /// Price path, once the first step has generated it
    pub fn path(&self) -> Option<&PricePath> {
        self.path.as_ref()
    }

    /// Steps recorded so far
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Advance one step
    ///
    /// Returns the new record, or `None` once the trial has completed.
    /// Any failure moves the runner to `Aborted`; stepping an aborted runner
    /// fails with `IncompleteTrial`.
    pub fn step(&mut self) -> SimResult<Option<StepRecord>> {
        let index = match self.state {
            TrialState::Initialized => {
                if let Err(e) = self.start() {
                    self.state = TrialState::Aborted;
                    return Err(e);
                }
                0
            }
            TrialState::Running { next_step } => next_step,
            TrialState::Completed => return Ok(None),
            TrialState::Aborted => return Err(self.incomplete()),
        };

        match self.advance(index) {
            Ok(record) => {
                self.records.push(record);
                self.state = if index + 1 >= self.config.steps {
                    TrialState::Completed
                } else {
                    TrialState::Running {
                        next_step: index + 1,
                    }
                };
                Ok(Some(record))
            }
            Err(e) => {
                debug!("trial seed {} aborted at step {}: {}", self.seed, index, e);
                self.state = TrialState::Aborted;
                Err(e)
            }
        }
    }

    /// Step to completion and return the result
    pub fn run(mut self) -> SimResult<TrialResult> {
        while self.step()?.is_some() {}
        self.finish()
    }

    /// Take the result of a completed trial
    pub fn finish(self) -> SimResult<TrialResult> {
        if self.state != TrialState::Completed {
            return Err(self.incomplete());
        }

        let result = TrialResult::new(self.seed, self.config.initial_wealth(), self.records)?;
        let metrics = result.metrics();
        if metrics.clamped_steps > 0 {
            debug!(
                "trial seed {}: fill probability clamped on {} of {} steps",
                self.seed,
                metrics.clamped_steps,
                result.len()
            );
        }
        debug!(
            "trial seed {} completed: pnl {:.4}, final inventory {}, fills {}/{}",
            self.seed, metrics.pnl, metrics.final_inventory, metrics.bid_fills, metrics.ask_fills
        );

        Ok(result)
    }

    fn start(&mut self) -> SimResult<()> {
        let path = self
            .process
            .simulate(self.config.steps, self.config.dt, self.seed)?;
        trace!(
            "trial seed {} started: {} over {} steps, policy {}, fills {}",
            self.seed,
            self.process.name(),
            self.config.steps,
            self.policy.name(),
            self.fill_model.name()
        );

        self.path = Some(path);
        self.state = TrialState::Running { next_step: 0 };
        Ok(())
    }

    fn advance(&mut self, step: usize) -> SimResult<StepRecord> {
        let Some(mid) = self.path.as_ref().and_then(|p| p.get(step)) else {
            return Err(self.incomplete());
        };
        if !mid.is_finite() {
            return Err(unstable(step, "mid_price", mid));
        }

        let tau = self.config.time_remaining(step);
        let position = self.ledger.state();

        let quote = self.policy.quote(mid, position.inventory, tau);
        if let Some((quantity, value)) = quote.first_non_finite() {
            return Err(unstable(step, quantity, value));
        }
        if quote.is_crossed() {
            debug!(
                "trial seed {} step {}: crossed quote bid {:.4} >= ask {:.4} at inventory {}",
                self.seed, step, quote.bid_price, quote.ask_price, position.inventory
            );
        }

        let outcome = self
            .fill_model
            .fill(&quote, position, self.config.dt, &mut self.fill_rng);
        for (quantity, value) in [
            ("bid_probability", outcome.bid_probability),
            ("ask_probability", outcome.ask_probability),
        ] {
            if !value.is_finite() {
                return Err(unstable(step, quantity, value));
            }
        }
        if self.config.probability_policy == ProbabilityPolicy::Reject {
            for (side, probability) in [
                (Side::Bid, outcome.bid_probability),
                (Side::Ask, outcome.ask_probability),
            ] {
                if probability >= 1.0 {
                    return Err(SimError::ProbabilityOutOfRange {
                        step,
                        side,
                        probability,
                    });
                }
            }
        }

        let after = PositionState::new(
            position.cash + outcome.delta_cash,
            position.inventory + outcome.delta_inventory,
        );
        let wealth = after.wealth(mid);
        if !wealth.is_finite() {
            return Err(unstable(step, "wealth", wealth));
        }
        self.ledger
            .update(outcome.delta_inventory, outcome.delta_cash);

        trace!(
            "step {}: tau={:.4} mid={:.4} r={:.4} bid={:.4} ask={:.4} q={} cash={:.4}",
            step,
            tau,
            mid,
            quote.reservation_price,
            quote.bid_price,
            quote.ask_price,
            after.inventory,
            after.cash
        );

        Ok(StepRecord {
            step,
            time_remaining: tau,
            mid_price: mid,
            reservation_price: quote.reservation_price,
            bid_price: quote.bid_price,
            ask_price: quote.ask_price,
            inventory: after.inventory,
            cash: after.cash,
            wealth,
            bid_filled: outcome.bid_filled,
            ask_filled: outcome.ask_filled,
            probability_clamped: outcome.probability_clamped(),
        })
    }

    fn incomplete(&self) -> SimError {
        SimError::IncompleteTrial {
            completed: self.records.len(),
            expected: self.config.steps,
        }
    }
}

fn unstable(step: usize, quantity: &'static str, value: f64) -> SimError {
    SimError::NumericalInstability {
        step,
        quantity,
        value,
    }
}
