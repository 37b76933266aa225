//! The Signal entity and its lifecycle statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{IndicatorSnapshot, MarketType, PricePoint, Timeframe, TradingPair, TrendState};
use crate::error::SignalError;

/// Maximum number of re-evaluation price samples retained per signal.
pub const PRICE_HISTORY_CAP: usize = 100;

/// Trade direction recommendation.
///
/// HOLD is never materialized as a Signal; a factory run that does not
/// reach directional agreement simply emits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle status of a signal. Everything except `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    /// Signal is open and being re-evaluated each cycle
    #[default]
    Active,
    /// Stop loss hit, closed with a loss
    HitSl,
    /// First take profit hit
    HitTp1,
    /// Second take profit hit, maximum profit
    HitTp2,
    /// Validity window elapsed before any level was reached
    Expired,
    /// Market trend flipped away from the signal
    MarketInvalid,
    /// Technical conditions no longer support the signal
    TechnicalInvalid,
}

impl SignalStatus {
    /// Whether this status permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SignalStatus::Active)
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalStatus::Active => "active",
            SignalStatus::HitSl => "hit_sl",
            SignalStatus::HitTp1 => "hit_tp1",
            SignalStatus::HitTp2 => "hit_tp2",
            SignalStatus::Expired => "expired",
            SignalStatus::MarketInvalid => "market_invalid",
            SignalStatus::TechnicalInvalid => "technical_invalid",
        };
        write!(f, "{}", s)
    }
}

/// Resolution of a signal, written exactly once at the terminal transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Price observed at the tick that caused the transition
    pub final_price: f64,
    /// Realized profit/loss in percent (0 for expiry/invalidation)
    pub profit_loss: f64,
    /// Terminal status this outcome belongs to
    pub outcome_type: SignalStatus,
    pub closed_at: DateTime<Utc>,
    pub reason: String,
}

/// A trading recommendation tracked through its lifecycle.
///
/// Identity fields are fixed at creation; only the lifecycle manager
/// mutates status, trend copy, outcome, and the sampled price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: Uuid,
    pub pair: TradingPair,
    pub market: MarketType,
    pub timeframe: Timeframe,
    pub recommendation: Recommendation,
    /// Price at creation; all levels and profit/loss are relative to it
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    /// |take_profit_1 − entry| / |entry − stop_loss|
    pub risk_reward_ratio: f64,
    /// Confidence score in 0–100
    pub confidence: u8,
    pub indicators: IndicatorSnapshot,
    /// Human-readable derivation of the recommendation
    pub rationale: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: SignalStatus,
    /// Latest trend copy for the pair+timeframe
    pub market_trend: TrendState,
    pub outcome: Option<Outcome>,
    /// Prices sampled at each re-evaluation, most recent 100 kept
    pub price_history: Vec<PricePoint>,
    pub last_price_check: DateTime<Utc>,
}

impl Signal {
    /// Whether the validity window has elapsed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Signed percent move from entry to `exit` in the trade direction.
    pub fn profit_loss_pct(&self, exit: f64) -> f64 {
        match self.recommendation {
            Recommendation::Buy => (exit - self.entry_price) / self.entry_price * 100.0,
            Recommendation::Sell => (self.entry_price - exit) / self.entry_price * 100.0,
        }
    }

    /// Append a sampled price, dropping the oldest beyond the cap.
    pub fn record_price(&mut self, point: PricePoint) {
        self.price_history.push(point);
        if self.price_history.len() > PRICE_HISTORY_CAP {
            let excess = self.price_history.len() - PRICE_HISTORY_CAP;
            self.price_history.drain(..excess);
        }
    }

    /// Check the direction-consistent level invariant and risk/reward.
    ///
    /// BUY requires stop_loss < entry < tp1 < tp2; SELL is the mirror.
    pub fn validate_levels(&self) -> Result<(), SignalError> {
        if self.entry_price <= 0.0 {
            return Err(SignalError::NonPositivePrice(self.entry_price));
        }

        let ordered = match self.recommendation {
            Recommendation::Buy => {
                self.stop_loss < self.entry_price
                    && self.entry_price < self.take_profit_1
                    && self.take_profit_1 < self.take_profit_2
            }
            Recommendation::Sell => {
                self.stop_loss > self.entry_price
                    && self.entry_price > self.take_profit_1
                    && self.take_profit_1 > self.take_profit_2
            }
        };
        if !ordered {
            return Err(SignalError::InvalidLevels(format!(
                "{} levels out of order: sl={} entry={} tp1={} tp2={}",
                self.recommendation,
                self.stop_loss,
                self.entry_price,
                self.take_profit_1,
                self.take_profit_2
            )));
        }

        if self.risk_reward_ratio <= 0.0 {
            return Err(SignalError::NonPositiveRisk {
                entry: self.entry_price,
                stop_loss: self.stop_loss,
            });
        }
        Ok(())
    }
}
