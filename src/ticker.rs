use crate::Price;

use serde::Serialize;
use std::fmt::Display;

/// Movement of the live price between two polls.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    Unchanged,
}

impl PriceDirection {
    #[must_use]
    pub fn between(previous: Price, current: Price) -> Self {
        if current > previous {
            Self::Up
        } else if current < previous {
            Self::Down
        } else {
            Self::Unchanged
        }
    }
}

impl Display for PriceDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Unchanged => "unchanged",
        })
    }
}

/// Tracks the last live price and classifies each new one against it.
///
/// # Example
///
/// ```
/// use kline_range::{PriceDirection, PriceTicker};
///
/// let mut ticker = PriceTicker::new();
/// assert_eq!(ticker.observe(100.0), Some(PriceDirection::Unchanged));
/// assert_eq!(ticker.observe(101.5), Some(PriceDirection::Up));
/// assert_eq!(ticker.observe(f64::NAN), None);
/// assert_eq!(ticker.last(), Some(101.5));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PriceTicker {
    last: Option<Price>,
}

impl PriceTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already displayed price.
    #[must_use]
    pub fn starting_at(price: Price) -> Self {
        Self {
            last: price.is_finite().then_some(price),
        }
    }

    /// Records `price` and returns its direction relative to the previous one.
    ///
    /// Non-finite prices are dropped and leave the ticker untouched. The first
    /// observed price is [`PriceDirection::Unchanged`].
    pub fn observe(&mut self, price: Price) -> Option<PriceDirection> {
        if !price.is_finite() {
            return None;
        }
        let direction = self
            .last
            .map_or(PriceDirection::Unchanged, |previous| {
                PriceDirection::between(previous, price)
            });
        self.last = Some(price);
        Some(direction)
    }

    #[must_use]
    pub fn last(&self) -> Option<Price> {
        self.last
    }
}
