//! Liquidity target percentage and its discrete steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Target share of the portfolio held in liquid instruments, `0..=100`.
///
/// Consumed by the optimizer; this crate only stores and steps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiquidityFactor(u8);

impl LiquidityFactor {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Build a factor, clamping to `0..=100`.
    #[must_use]
    pub fn saturating(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Apply `step` if the result stays in bounds, else `None`.
    ///
    /// Steps are all-or-nothing: at 3, a `-5` step is refused rather than
    /// clamped to 0.
    #[must_use]
    pub fn checked_step(self, step: LiquidityStep) -> Option<Self> {
        let next = i32::from(self.0) + step.delta();
        (0..=100).contains(&next).then(|| Self(next as u8))
    }
}

impl fmt::Display for LiquidityFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The six liquidity adjustments offered by the stepper controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidityStep {
    Down10,
    Down5,
    Down1,
    Up1,
    Up5,
    Up10,
}

impl LiquidityStep {
    /// Signed percentage change.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Down10 => -10,
            Self::Down5 => -5,
            Self::Down1 => -1,
            Self::Up1 => 1,
            Self::Up5 => 5,
            Self::Up10 => 10,
        }
    }

    /// Largest-first steps that move `from` to `to`.
    ///
    /// Used to drive the stepper to a requested target; every intermediate
    /// value stays in bounds.
    #[must_use]
    pub fn path(from: LiquidityFactor, to: LiquidityFactor) -> Vec<Self> {
        let mut steps = Vec::new();
        let mut gap = i32::from(to.value()) - i32::from(from.value());
        while gap != 0 {
            let step = match gap {
                g if g >= 10 => Self::Up10,
                g if g >= 5 => Self::Up5,
                g if g > 0 => Self::Up1,
                g if g <= -10 => Self::Down10,
                g if g <= -5 => Self::Down5,
                _ => Self::Down1,
            };
            gap -= step.delta();
            steps.push(step);
        }
        steps
    }
}

impl TryFrom<i32> for LiquidityStep {
    type Error = DomainError;

    fn try_from(delta: i32) -> Result<Self, Self::Error> {
        match delta {
            -10 => Ok(Self::Down10),
            -5 => Ok(Self::Down5),
            -1 => Ok(Self::Down1),
            1 => Ok(Self::Up1),
            5 => Ok(Self::Up5),
            10 => Ok(Self::Up10),
            other => Err(DomainError::InvalidLiquidityStep { delta: other }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrement_larger_than_value_is_refused() {
        let factor = LiquidityFactor::saturating(3);
        assert_eq!(factor.checked_step(LiquidityStep::Down5), None);
        assert_eq!(
            factor.checked_step(LiquidityStep::Up10),
            Some(LiquidityFactor::saturating(13))
        );
    }

    #[test]
    fn increment_past_hundred_is_refused() {
        let factor = LiquidityFactor::saturating(95);
        assert_eq!(factor.checked_step(LiquidityStep::Up10), None);
        assert_eq!(factor.checked_step(LiquidityStep::Up5), Some(LiquidityFactor::MAX));
    }

    #[test]
    fn only_known_deltas_convert() {
        assert_eq!(LiquidityStep::try_from(-5), Ok(LiquidityStep::Down5));
        assert!(LiquidityStep::try_from(2).is_err());
        assert!(LiquidityStep::try_from(0).is_err());
    }

    #[test]
    fn path_reaches_target() {
        let from = LiquidityFactor::saturating(50);
        let to = LiquidityFactor::saturating(27);
        let steps = LiquidityStep::path(from, to);

        let end = steps
            .iter()
            .try_fold(from, |f, s| f.checked_step(*s))
            .expect("all steps in bounds");
        assert_eq!(end, to);
        assert_eq!(
            steps,
            vec![
                LiquidityStep::Down10,
                LiquidityStep::Down10,
                LiquidityStep::Down1,
                LiquidityStep::Down1,
                LiquidityStep::Down1
            ]
        );
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(LiquidityFactor::saturating(250), LiquidityFactor::MAX);
    }
}
