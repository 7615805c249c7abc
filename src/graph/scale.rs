//! Correlation scaling and risk-band classification.

use crate::config::VisualConfig;

/// Size multiplier for cross-tumor (diamond) genes.
pub const CROSS_TUMOR_SIZE_FACTOR: f64 = 1.5;

pub const HIGH_RISK_THRESHOLD: f64 = 0.75;
pub const MODERATE_RISK_THRESHOLD: f64 = 0.65;
pub const LOW_RISK_THRESHOLD: f64 = 0.50;

/// Position of `pcc` within `[min_correlation, 1]`, clamped to [0, 1].
///
/// A degenerate domain (threshold at 1) maps everything to the top.
pub fn normalized(pcc: f64, min_correlation: f64) -> f64 {
    let span = 1.0 - min_correlation;
    if span <= f64::EPSILON {
        return 1.0;
    }
    ((pcc - min_correlation) / span).clamp(0.0, 1.0)
}

pub fn node_size(pcc: f64, config: &VisualConfig) -> f64 {
    config.node_size.lerp(normalized(pcc, config.min_correlation))
}

pub fn edge_width(pcc: f64, config: &VisualConfig) -> f64 {
    config.edge_width.lerp(normalized(pcc, config.min_correlation))
}

/// Discrete risk classification used by the survival tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    /// Everything under the moderate threshold is low risk.
    pub fn classify(pcc: f64) -> Self {
        if pcc >= HIGH_RISK_THRESHOLD {
            RiskBand::High
        } else if pcc >= MODERATE_RISK_THRESHOLD {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskBand::High => "#8B0000",
            RiskBand::Moderate => "#FF4500",
            RiskBand::Low => "#FFA500",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::High => "High Risk",
            RiskBand::Moderate => "Moderate Risk",
            RiskBand::Low => "Low Risk",
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            RiskBand::High => HIGH_RISK_THRESHOLD,
            RiskBand::Moderate => MODERATE_RISK_THRESHOLD,
            RiskBand::Low => LOW_RISK_THRESHOLD,
        }
    }

    /// Strongest first, for legends.
    pub const ALL: [RiskBand; 3] = [RiskBand::High, RiskBand::Moderate, RiskBand::Low];
}
