use serde::{Deserialize, Serialize};

/// Fee bucket of a V3-style pool, in basis points. One (tokenA, tokenB,
/// fee tier) triple identifies at most one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    /// 0.01%
    Lowest,
    /// 0.05%
    Low,
    /// 0.3% - the most common tier.
    Medium,
    /// 1%
    High,
}

impl FeeTier {
    pub fn bps(&self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3000,
            FeeTier::High => 10000,
        }
    }

    pub fn from_bps(bps: u32) -> Option<Self> {
        match bps {
            100 => Some(FeeTier::Lowest),
            500 => Some(FeeTier::Low),
            3000 => Some(FeeTier::Medium),
            10000 => Some(FeeTier::High),
            _ => None,
        }
    }

    /// Fee as a percentage (e.g. 0.3 for the medium tier).
    pub fn as_percent(&self) -> f64 {
        self.bps() as f64 / 10_000.0
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        FeeTier::Medium
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = String;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        FeeTier::from_bps(bps).ok_or_else(|| format!("unknown fee tier: {bps} bps"))
    }
}

impl From<FeeTier> for u32 {
    fn from(tier: FeeTier) -> Self {
        tier.bps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bps_round_trip() {
        for tier in [FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High] {
            assert_eq!(FeeTier::from_bps(tier.bps()), Some(tier));
        }
        assert_eq!(FeeTier::from_bps(1234), None);
    }

    #[test]
    fn test_default_tier() {
        assert_eq!(FeeTier::default().bps(), 3000);
        assert_eq!(FeeTier::Medium.as_percent(), 0.3);
    }

    #[test]
    fn test_percent_across_tiers() {
        assert_eq!(FeeTier::Lowest.as_percent(), 0.01);
        assert_eq!(FeeTier::Low.as_percent(), 0.05);
        assert_eq!(FeeTier::High.as_percent(), 1.0);
    }
}
