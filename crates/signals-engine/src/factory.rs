//! Signal construction from a price snapshot and indicator classifications.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signals_core::{
    EmaTrend, IndicatorSnapshot, MacdMomentum, MarketType, Recommendation, RsiCondition, Signal,
    SignalError, SignalStatus, Timeframe, TradingPair, TrendState,
};

/// Price level offsets and validity window for new signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Stop loss distance from entry, in percent
    pub stop_loss_pct: f64,
    /// First take profit distance from entry, in percent
    pub take_profit_1_pct: f64,
    /// Second take profit distance from entry, in percent
    pub take_profit_2_pct: f64,
    /// Hours a signal stays valid before expiring
    pub validity_hours: i64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            stop_loss_pct: 1.5,
            take_profit_1_pct: 2.0,
            take_profit_2_pct: 5.0,
            validity_hours: 24,
        }
    }
}

impl FactoryConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.stop_loss_pct <= 0.0
            || self.take_profit_1_pct <= 0.0
            || self.take_profit_2_pct <= 0.0
        {
            return Err(SignalError::InvalidLevels(
                "Percentage offsets must be positive".into(),
            ));
        }
        if self.take_profit_1_pct >= self.take_profit_2_pct {
            return Err(SignalError::InvalidLevels(
                "First take profit must be closer than the second".into(),
            ));
        }
        if self.validity_hours <= 0 {
            return Err(SignalError::InvalidLevels(
                "Validity window must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Builds Signal entities when enough indicators agree on a direction.
#[derive(Debug, Clone, Default)]
pub struct SignalFactory {
    config: FactoryConfig,
}

impl SignalFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    /// Derive a signal for the pair, or nothing when indicators disagree.
    ///
    /// Requires at least 2 of 3 indicators leaning the same direction
    /// (RSI oversold leans bullish, overbought bearish). A candidate that
    /// violates its own level invariants is an error and must be
    /// discarded by the caller, not persisted.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        pair: TradingPair,
        market: MarketType,
        timeframe: Timeframe,
        current_price: f64,
        indicators: IndicatorSnapshot,
        market_trend: TrendState,
        now: DateTime<Utc>,
    ) -> Result<Option<Signal>, SignalError> {
        let Some(recommendation) = Self::recommendation(&indicators) else {
            return Ok(None);
        };

        let (stop_loss, take_profit_1, take_profit_2) =
            self.price_levels(current_price, recommendation);

        let risk = (current_price - stop_loss).abs();
        let reward = (take_profit_1 - current_price).abs();
        let risk_reward_ratio = if risk > 0.0 { reward / risk } else { 0.0 };

        let signal = Signal {
            id: Uuid::new_v4(),
            pair,
            market,
            timeframe,
            recommendation,
            entry_price: current_price,
            stop_loss,
            take_profit_1,
            take_profit_2,
            risk_reward_ratio,
            confidence: Self::confidence(&indicators),
            indicators,
            rationale: Self::rationale(&indicators, recommendation),
            created_at: now,
            expires_at: now + Duration::hours(self.config.validity_hours),
            status: SignalStatus::Active,
            market_trend,
            outcome: None,
            price_history: Vec::new(),
            last_price_check: now,
        };

        signal.validate_levels()?;
        Ok(Some(signal))
    }

    /// Count directional agreement; 2 of 3 required for a recommendation.
    fn recommendation(indicators: &IndicatorSnapshot) -> Option<Recommendation> {
        let mut bullish = 0u32;
        let mut bearish = 0u32;

        match indicators.ema {
            EmaTrend::Bullish => bullish += 1,
            EmaTrend::Bearish => bearish += 1,
            EmaTrend::Neutral => {}
        }
        match indicators.rsi {
            RsiCondition::Oversold => bullish += 1,
            RsiCondition::Overbought => bearish += 1,
            RsiCondition::Neutral => {}
        }
        match indicators.macd {
            MacdMomentum::Bullish => bullish += 1,
            MacdMomentum::Bearish => bearish += 1,
            MacdMomentum::Neutral => {}
        }

        if bullish >= 2 {
            Some(Recommendation::Buy)
        } else if bearish >= 2 {
            Some(Recommendation::Sell)
        } else {
            None
        }
    }

    /// Apply the percentage offsets in the trade direction.
    fn price_levels(&self, entry: f64, recommendation: Recommendation) -> (f64, f64, f64) {
        let sl = self.config.stop_loss_pct / 100.0;
        let tp1 = self.config.take_profit_1_pct / 100.0;
        let tp2 = self.config.take_profit_2_pct / 100.0;

        match recommendation {
            Recommendation::Buy => (entry * (1.0 - sl), entry * (1.0 + tp1), entry * (1.0 + tp2)),
            Recommendation::Sell => (entry * (1.0 + sl), entry * (1.0 - tp1), entry * (1.0 - tp2)),
        }
    }

    /// Base 50, plus 15/15/20 per firing indicator and 10 for full
    /// alignment, capped at 100.
    fn confidence(indicators: &IndicatorSnapshot) -> u8 {
        let mut confidence = 50u32;
        if !indicators.ema.is_neutral() {
            confidence += 15;
        }
        if !indicators.rsi.is_neutral() {
            confidence += 15;
        }
        if !indicators.macd.is_neutral() {
            confidence += 20;
        }
        if indicators.fully_aligned() {
            confidence += 10;
        }
        confidence.min(100) as u8
    }

    /// Deterministic explanation listing each firing indicator in
    /// EMA, RSI, MACD order.
    fn rationale(indicators: &IndicatorSnapshot, recommendation: Recommendation) -> String {
        let mut reasons = Vec::with_capacity(3);
        if !indicators.ema.is_neutral() {
            reasons.push(format!("EMA: {} trend", indicators.ema));
        }
        if !indicators.rsi.is_neutral() {
            reasons.push(format!("RSI: {} condition", indicators.rsi));
        }
        if !indicators.macd.is_neutral() {
            reasons.push(format!("MACD: {} momentum", indicators.macd));
        }
        format!("{} signal based on: {}", recommendation, reasons.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signals_core::Trend;

    fn snapshot(ema: EmaTrend, rsi: RsiCondition, macd: MacdMomentum) -> IndicatorSnapshot {
        IndicatorSnapshot { ema, rsi, macd }
    }

    fn create(indicators: IndicatorSnapshot) -> Result<Option<Signal>, SignalError> {
        let now = Utc::now();
        SignalFactory::default().create(
            "BTC/USDT".parse().unwrap(),
            MarketType::Crypto,
            Timeframe::Minute15,
            110_000.0,
            indicators,
            TrendState::new(Trend::Bullish, 100.0, now),
            now,
        )
    }

    #[test]
    fn test_two_bullish_creates_buy() {
        let signal = create(snapshot(
            EmaTrend::Bullish,
            RsiCondition::Neutral,
            MacdMomentum::Bullish,
        ))
        .unwrap()
        .unwrap();

        assert_eq!(signal.recommendation, Recommendation::Buy);
        assert_eq!(signal.status, SignalStatus::Active);
        assert!(signal.stop_loss < signal.entry_price);
        assert!(signal.entry_price < signal.take_profit_1);
        assert!(signal.take_profit_1 < signal.take_profit_2);
    }

    #[test]
    fn test_overbought_rsi_leans_bearish() {
        // EMA and MACD bullish outvote the overbought RSI: still a BUY
        let signal = create(snapshot(
            EmaTrend::Bullish,
            RsiCondition::Overbought,
            MacdMomentum::Bullish,
        ))
        .unwrap()
        .unwrap();
        assert_eq!(signal.recommendation, Recommendation::Buy);

        // But overbought plus bearish EMA reaches the SELL threshold
        let signal = create(snapshot(
            EmaTrend::Bearish,
            RsiCondition::Overbought,
            MacdMomentum::Neutral,
        ))
        .unwrap()
        .unwrap();
        assert_eq!(signal.recommendation, Recommendation::Sell);
    }

    #[test]
    fn test_disagreement_emits_nothing() {
        assert!(create(snapshot(
            EmaTrend::Bullish,
            RsiCondition::Overbought,
            MacdMomentum::Neutral,
        ))
        .unwrap()
        .is_none());

        assert!(create(IndicatorSnapshot::default()).unwrap().is_none());
    }

    #[test]
    fn test_default_levels_and_risk_reward() {
        let signal = create(snapshot(
            EmaTrend::Bullish,
            RsiCondition::Oversold,
            MacdMomentum::Bullish,
        ))
        .unwrap()
        .unwrap();

        assert!((signal.stop_loss - 108_350.0).abs() < 1e-6);
        assert!((signal.take_profit_1 - 112_200.0).abs() < 1e-6);
        assert!((signal.take_profit_2 - 115_500.0).abs() < 1e-6);
        // 2.0% reward over 1.5% risk
        assert!((signal.risk_reward_ratio - 2.0 / 1.5).abs() < 1e-10);
        assert!(signal.risk_reward_ratio > 0.0);
    }

    #[test]
    fn test_sell_levels_mirrored() {
        let signal = create(snapshot(
            EmaTrend::Bearish,
            RsiCondition::Neutral,
            MacdMomentum::Bearish,
        ))
        .unwrap()
        .unwrap();

        assert_eq!(signal.recommendation, Recommendation::Sell);
        assert!(signal.stop_loss > signal.entry_price);
        assert!(signal.entry_price > signal.take_profit_1);
        assert!(signal.take_profit_1 > signal.take_profit_2);
        assert!(signal.validate_levels().is_ok());
    }

    #[test]
    fn test_confidence_table() {
        let cases = [
            (EmaTrend::Neutral, RsiCondition::Neutral, MacdMomentum::Neutral, 50),
            (EmaTrend::Bullish, RsiCondition::Neutral, MacdMomentum::Neutral, 65),
            (EmaTrend::Neutral, RsiCondition::Oversold, MacdMomentum::Neutral, 65),
            (EmaTrend::Neutral, RsiCondition::Neutral, MacdMomentum::Bullish, 70),
            (EmaTrend::Bullish, RsiCondition::Oversold, MacdMomentum::Neutral, 80),
            (EmaTrend::Bullish, RsiCondition::Neutral, MacdMomentum::Bullish, 85),
            (EmaTrend::Neutral, RsiCondition::Oversold, MacdMomentum::Bullish, 85),
            (EmaTrend::Bullish, RsiCondition::Oversold, MacdMomentum::Bullish, 100),
        ];
        for (ema, rsi, macd, expected) in cases {
            assert_eq!(
                SignalFactory::confidence(&snapshot(ema, rsi, macd)),
                expected,
                "ema={:?} rsi={:?} macd={:?}",
                ema,
                rsi,
                macd
            );
        }
    }

    #[test]
    fn test_rationale_format() {
        let signal = create(snapshot(
            EmaTrend::Bullish,
            RsiCondition::Oversold,
            MacdMomentum::Bullish,
        ))
        .unwrap()
        .unwrap();

        assert_eq!(
            signal.rationale,
            "BUY signal based on: EMA: bullish trend, RSI: oversold condition, MACD: bullish momentum"
        );
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let now = Utc::now();
        let result = SignalFactory::default().create(
            "BTC/USDT".parse().unwrap(),
            MarketType::Crypto,
            Timeframe::Minute15,
            0.0,
            snapshot(EmaTrend::Bullish, RsiCondition::Neutral, MacdMomentum::Bullish),
            TrendState::unknown(now),
            now,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(FactoryConfig::default().validate().is_ok());

        let inverted = FactoryConfig {
            take_profit_1_pct: 5.0,
            take_profit_2_pct: 2.0,
            ..FactoryConfig::default()
        };
        assert!(inverted.validate().is_err());

        let negative = FactoryConfig {
            stop_loss_pct: -1.0,
            ..FactoryConfig::default()
        };
        assert!(negative.validate().is_err());
    }
}
