//! Periodic generation and re-evaluation scheduling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use signals_core::{
    EventPublisher, MarketType, PriceSeries, PriceSeriesProvider, SeriesFetch, Signal, SignalEvent,
    SignalStore, Timeframe, TradingPair,
};
use signals_indicators::{IndicatorEngine, TrendClassifier};

use crate::factory::SignalFactory;
use crate::lifecycle::{MarketTick, SignalLifecycleManager};
use crate::trend_cache::TrendCache;

/// Cadence and resource limits for the two schedules.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How often new signals are generated across the pair matrix
    pub generation_interval: Duration,
    /// How often open signals are re-evaluated
    pub reevaluation_interval: Duration,
    /// Maximum concurrent work items per cycle
    pub concurrency: usize,
    /// Per-fetch upstream timeout
    pub fetch_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            generation_interval: Duration::from_secs(900),
            reevaluation_interval: Duration::from_secs(300),
            concurrency: 8,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Selects the price source by market type.
pub struct ProviderRouter {
    crypto: Arc<dyn PriceSeriesProvider>,
    forex: Arc<dyn PriceSeriesProvider>,
}

impl ProviderRouter {
    pub fn new(crypto: Arc<dyn PriceSeriesProvider>, forex: Arc<dyn PriceSeriesProvider>) -> Self {
        Self { crypto, forex }
    }

    /// Provider responsible for the given market.
    pub fn for_market(&self, market: MarketType) -> &Arc<dyn PriceSeriesProvider> {
        match market {
            MarketType::Crypto => &self.crypto,
            MarketType::Forex => &self.forex,
        }
    }
}

/// Result of one work item, for cycle accounting.
enum WorkOutcome {
    /// A signal was created or at least one transition happened
    Produced(usize),
    /// Nothing to do for this combination
    Idle,
    /// Upstream data missing or a write failed; retried next cycle
    Skipped,
}

/// Runs the generation and re-evaluation schedules.
///
/// Each schedule ticks independently and fans one work item per
/// pair+timeframe out into a bounded task set. A cycle always runs to
/// completion before its next tick, so no signal is ever processed by
/// two overlapping cycles. Item failures are isolated: logged, counted,
/// and retried on the next cycle.
pub struct Orchestrator {
    router: ProviderRouter,
    store: Arc<dyn SignalStore>,
    publisher: Arc<dyn EventPublisher>,
    indicators: IndicatorEngine,
    classifier: TrendClassifier,
    factory: SignalFactory,
    lifecycle: SignalLifecycleManager,
    trend_cache: TrendCache,
    config: OrchestratorConfig,
    universe: Vec<(TradingPair, MarketType)>,
    timeframes: Vec<Timeframe>,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        router: ProviderRouter,
        store: Arc<dyn SignalStore>,
        publisher: Arc<dyn EventPublisher>,
        factory: SignalFactory,
        config: OrchestratorConfig,
        universe: Vec<(TradingPair, MarketType)>,
        timeframes: Vec<Timeframe>,
    ) -> Self {
        Self {
            router,
            store,
            publisher,
            indicators: IndicatorEngine::new(),
            classifier: TrendClassifier::new(),
            factory,
            lifecycle: SignalLifecycleManager::new(),
            trend_cache: TrendCache::new(),
            config,
            universe,
            timeframes,
        }
    }

    /// Latest cached trend for a pair+timeframe.
    pub fn trend(&self, pair: &TradingPair, timeframe: Timeframe) -> Option<signals_core::TrendState> {
        self.trend_cache.get(pair, timeframe)
    }

    /// Run both schedules until the task is dropped or aborted.
    pub async fn run(self: Arc<Self>) {
        info!(
            pairs = self.universe.len(),
            timeframes = self.timeframes.len(),
            generation_secs = self.config.generation_interval.as_secs(),
            reevaluation_secs = self.config.reevaluation_interval.as_secs(),
            "starting orchestrator"
        );

        let generation = tokio::spawn({
            let this = Arc::clone(&self);
            async move { this.generation_loop().await }
        });
        let reevaluation = tokio::spawn({
            let this = Arc::clone(&self);
            async move { this.reevaluation_loop().await }
        });

        // The loops only end if aborted.
        let _ = tokio::join!(generation, reevaluation);
    }

    async fn generation_loop(self: Arc<Self>) {
        let mut ticker = interval(self.config.generation_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.generation_cycle().await;
        }
    }

    async fn reevaluation_loop(self: Arc<Self>) {
        let mut ticker = interval(self.config.reevaluation_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.reevaluation_cycle().await;
        }
    }

    /// One pass over the full pair × timeframe matrix.
    pub async fn generation_cycle(self: &Arc<Self>) {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks = JoinSet::new();

        for (pair, market) in self.universe.clone() {
            for timeframe in self.timeframes.clone() {
                let this = Arc::clone(self);
                let semaphore = Arc::clone(&semaphore);
                let pair = pair.clone();
                tasks.spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .expect("work semaphore closed");
                    this.generate_for(pair, market, timeframe).await
                });
            }
        }

        let (created, skipped) = Self::drain(&mut tasks, "generation").await;
        info!(created, skipped, "generation cycle complete");
    }

    /// One pass over all currently active signals, grouped so every
    /// signal for a pair+timeframe sees the same price snapshot.
    pub async fn reevaluation_cycle(self: &Arc<Self>) {
        let active = match self.store.active_signals().await {
            Ok(signals) => signals,
            Err(err) => {
                warn!(error = %err, "failed to load active signals, skipping cycle");
                return;
            }
        };
        if active.is_empty() {
            debug!("no active signals to re-evaluate");
            return;
        }

        let mut groups: HashMap<(TradingPair, Timeframe), Vec<Signal>> = HashMap::new();
        for signal in active {
            groups
                .entry((signal.pair.clone(), signal.timeframe))
                .or_default()
                .push(signal);
        }

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks = JoinSet::new();
        for ((pair, timeframe), signals) in groups {
            let this = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("work semaphore closed");
                this.reevaluate_group(pair, timeframe, signals).await
            });
        }

        let (transitioned, skipped) = Self::drain(&mut tasks, "re-evaluation").await;
        info!(transitioned, skipped, "re-evaluation cycle complete");
    }

    async fn drain(tasks: &mut JoinSet<WorkOutcome>, cycle: &str) -> (usize, usize) {
        let mut produced = 0usize;
        let mut skipped = 0usize;
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(WorkOutcome::Produced(count)) => produced += count,
                Ok(WorkOutcome::Idle) => {}
                Ok(WorkOutcome::Skipped) => skipped += 1,
                Err(err) => {
                    skipped += 1;
                    warn!(cycle, error = %err, "work item panicked");
                }
            }
        }
        (produced, skipped)
    }

    async fn generate_for(
        &self,
        pair: TradingPair,
        market: MarketType,
        timeframe: Timeframe,
    ) -> WorkOutcome {
        let Some(series) = self.fetch(&pair, market, timeframe).await else {
            return WorkOutcome::Skipped;
        };
        let Some(last) = series.last().copied() else {
            debug!(%pair, %timeframe, "empty price window, skipping");
            return WorkOutcome::Skipped;
        };

        let now = Utc::now();
        let snapshot = self.indicators.snapshot_series(&series);
        let trend = self.classifier.classify(&snapshot, now);
        self.trend_cache.replace(&pair, timeframe, trend);
        self.publisher.publish(SignalEvent::TrendUpdated {
            pair: pair.clone(),
            timeframe,
            trend,
        });

        match self.store.has_active(&pair, timeframe).await {
            Ok(true) => {
                debug!(%pair, %timeframe, "active signal exists, skipping generation");
                return WorkOutcome::Idle;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(%pair, %timeframe, error = %err, "de-duplication query failed");
                return WorkOutcome::Skipped;
            }
        }

        match self
            .factory
            .create(pair.clone(), market, timeframe, last.price, snapshot, trend, now)
        {
            Ok(Some(signal)) => {
                let created = signal.clone();
                if let Err(err) = self.store.insert(signal).await {
                    warn!(%pair, %timeframe, error = %err, "failed to persist new signal");
                    return WorkOutcome::Skipped;
                }
                self.publisher.publish(SignalEvent::Created {
                    signal: Box::new(created),
                });
                WorkOutcome::Produced(1)
            }
            Ok(None) => WorkOutcome::Idle,
            Err(err) => {
                warn!(%pair, %timeframe, error = %err, "discarding invalid signal candidate");
                WorkOutcome::Skipped
            }
        }
    }

    async fn reevaluate_group(
        &self,
        pair: TradingPair,
        timeframe: Timeframe,
        signals: Vec<Signal>,
    ) -> WorkOutcome {
        let market = signals[0].market;
        let Some(series) = self.fetch(&pair, market, timeframe).await else {
            return WorkOutcome::Skipped;
        };
        let Some(last) = series.last().copied() else {
            debug!(%pair, %timeframe, "empty price window, skipping");
            return WorkOutcome::Skipped;
        };

        let now = Utc::now();
        let snapshot = self.indicators.snapshot_series(&series);
        let trend = self.classifier.classify(&snapshot, now);
        self.trend_cache.replace(&pair, timeframe, trend);
        self.publisher.publish(SignalEvent::TrendUpdated {
            pair: pair.clone(),
            timeframe,
            trend,
        });

        let tick = MarketTick {
            price: last.price,
            trend,
            observed_at: now,
        };

        let mut transitioned = 0usize;
        for signal in signals {
            let signal_id = signal.id;
            let (updated, events) = self.lifecycle.evaluate(signal, &tick);
            if let Err(err) = self.store.update(updated).await {
                warn!(%signal_id, error = %err, "failed to persist re-evaluation");
                continue;
            }
            for event in events {
                transitioned += 1;
                self.publisher.publish(event);
            }
        }
        WorkOutcome::Produced(transitioned)
    }

    /// Fetch a price window, treating timeouts and unavailability as a
    /// skipped item rather than a failure.
    async fn fetch(
        &self,
        pair: &TradingPair,
        market: MarketType,
        timeframe: Timeframe,
    ) -> Option<PriceSeries> {
        let provider = self.router.for_market(market);
        let fetch = provider.fetch_series(pair, timeframe);
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(SeriesFetch::Available(series))) => Some(series),
            Ok(Ok(SeriesFetch::Unavailable { reason })) => {
                debug!(%pair, %timeframe, reason, "price source unavailable, skipping");
                None
            }
            Ok(Err(err)) => {
                warn!(%pair, %timeframe, error = %err, "price fetch failed");
                None
            }
            Err(_) => {
                warn!(
                    %pair,
                    %timeframe,
                    timeout_secs = self.config.fetch_timeout.as_secs(),
                    "price fetch timed out"
                );
                None
            }
        }
    }
}
