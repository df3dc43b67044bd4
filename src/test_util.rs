// src/test_util.rs

use crate::{Ohlcv, Price, Timestamp};

pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub open_time: Timestamp,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            open_time: 0,
        }
    }

    pub fn at(mut self, open_time: Timestamp) -> Self {
        self.open_time = open_time;
        self
    }
}

/// Convenience: bar with just a close price and timestamp (OHLC all equal to close).
pub fn bar(close: f64, time: Timestamp) -> Bar {
    Bar::new(close, close, close, close).at(time)
}

/// Bar with every field spelled out, time first as in a chart record.
pub fn ohlc(time: Timestamp, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar::new(open, high, low, close).at(time)
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn open_time(&self) -> Timestamp {
        self.open_time
    }
}
