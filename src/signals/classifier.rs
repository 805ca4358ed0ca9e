// =============================================================================
// Signal Classifier — categorical hints derived from the last candle
// =============================================================================
//
// trend    : close > EMA_slow                      => UPTREND,    else DOWNTREND
// momentum : RSI < 30 => OVERSOLD, RSI > 70 => OVERBOUGHT,       else NEUTRAL
// volume   : vol > 1.5 * SMA => SPIKE, vol > SMA => HIGH,         else NORMAL/LOW
//
// All comparisons are strict.
// =============================================================================

use serde::Serialize;

use crate::indicators::IndicatorSnapshot;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const VOLUME_SPIKE_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendStatus {
    Uptrend,
    Downtrend,
}

impl std::fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uptrend => write!(f, "UPTREND"),
            Self::Downtrend => write!(f, "DOWNTREND"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MomentumStatus {
    Oversold,
    Overbought,
    Neutral,
}

impl std::fmt::Display for MomentumStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oversold => write!(f, "OVERSOLD"),
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolumeStatus {
    #[serde(rename = "SPIKE")]
    Spike,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "NORMAL/LOW")]
    NormalOrLow,
}

impl std::fmt::Display for VolumeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spike => write!(f, "SPIKE"),
            Self::High => write!(f, "HIGH"),
            Self::NormalOrLow => write!(f, "NORMAL/LOW"),
        }
    }
}

pub fn classify_trend(close: f64, ema_slow: f64) -> TrendStatus {
    if close > ema_slow {
        TrendStatus::Uptrend
    } else {
        TrendStatus::Downtrend
    }
}

pub fn classify_momentum(rsi: f64) -> MomentumStatus {
    if rsi < RSI_OVERSOLD {
        MomentumStatus::Oversold
    } else if rsi > RSI_OVERBOUGHT {
        MomentumStatus::Overbought
    } else {
        MomentumStatus::Neutral
    }
}

pub fn classify_volume(volume: f64, volume_sma: f64) -> VolumeStatus {
    if volume > VOLUME_SPIKE_MULTIPLIER * volume_sma {
        VolumeStatus::Spike
    } else if volume > volume_sma {
        VolumeStatus::High
    } else {
        VolumeStatus::NormalOrLow
    }
}

/// All three labels for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub trend: TrendStatus,
    pub momentum: MomentumStatus,
    pub volume: VolumeStatus,
}

impl Classification {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        Self {
            trend: classify_trend(snapshot.close, snapshot.ema_slow),
            momentum: classify_momentum(snapshot.rsi),
            volume: classify_volume(snapshot.volume, snapshot.volume_sma),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_is_strictly_above_ema() {
        assert_eq!(classify_trend(101.0, 100.0), TrendStatus::Uptrend);
        assert_eq!(classify_trend(99.0, 100.0), TrendStatus::Downtrend);
        assert_eq!(classify_trend(100.0, 100.0), TrendStatus::Downtrend);
    }

    #[test]
    fn momentum_boundaries() {
        assert_eq!(classify_momentum(30.0), MomentumStatus::Neutral);
        assert_eq!(classify_momentum(70.0), MomentumStatus::Neutral);
        assert_eq!(classify_momentum(29.99), MomentumStatus::Oversold);
        assert_eq!(classify_momentum(70.01), MomentumStatus::Overbought);
        assert_eq!(classify_momentum(0.0), MomentumStatus::Oversold);
        assert_eq!(classify_momentum(100.0), MomentumStatus::Overbought);
    }

    #[test]
    fn volume_boundaries() {
        assert_eq!(classify_volume(150.0, 100.0), VolumeStatus::High);
        assert_eq!(classify_volume(150.01, 100.0), VolumeStatus::Spike);
        assert_eq!(classify_volume(100.0, 100.0), VolumeStatus::NormalOrLow);
        assert_eq!(classify_volume(100.5, 100.0), VolumeStatus::High);
        assert_eq!(classify_volume(10.0, 100.0), VolumeStatus::NormalOrLow);
    }

    #[test]
    fn labels_serialise_to_wire_strings() {
        assert_eq!(serde_json::to_value(TrendStatus::Uptrend).unwrap(), "UPTREND");
        assert_eq!(serde_json::to_value(MomentumStatus::Overbought).unwrap(), "OVERBOUGHT");
        assert_eq!(serde_json::to_value(VolumeStatus::NormalOrLow).unwrap(), "NORMAL/LOW");
        assert_eq!(VolumeStatus::NormalOrLow.to_string(), "NORMAL/LOW");
        assert_eq!(TrendStatus::Downtrend.to_string(), "DOWNTREND");
    }

    #[test]
    fn classification_reads_snapshot_fields() {
        let snap = IndicatorSnapshot {
            close: 10.0,
            volume: 400.0,
            rsi: 25.0,
            ema_fast: 9.0,
            ema_mid: 8.0,
            ema_slow: 7.0,
            volume_sma: 200.0,
        };
        let c = Classification::from_snapshot(&snap);
        assert_eq!(c.trend, TrendStatus::Uptrend);
        assert_eq!(c.momentum, MomentumStatus::Oversold);
        assert_eq!(c.volume, VolumeStatus::Spike);
    }
}
