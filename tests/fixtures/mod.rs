#![allow(dead_code)]

use kline_range::{Kline, Ohlcv, Price, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// OHLCV bar parsed from Binance CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
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

const OHLCV_PATH: &str = "tests/fixtures/data/btcusdt-1h.csv";
const KLINES_PATH: &str = "tests/fixtures/data/btcusdt-1h-klines.json";

/// BTCUSDT hourly bars from 2024-03-01T00:00Z, 72 rows.
pub const FIRST_OPEN_TIME: Timestamp = 1_709_251_200_000;
pub const LAST_OPEN_TIME: Timestamp = 1_709_506_800_000;
pub const LOWEST_PRICE: Price = 59_639.29;
pub const HIGHEST_PRICE: Price = 67_266.26;
pub const BAR_COUNT: usize = 72;

/// Load reference OHLCV bars from Binance.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load the same bars as raw exchange kline rows.
pub fn load_reference_klines() -> Vec<Kline> {
    let json = std::fs::read_to_string(KLINES_PATH)
        .unwrap_or_else(|e| panic!("failed to open {KLINES_PATH}: {e}"));
    serde_json::from_str(&json).unwrap_or_else(|e| panic!("invalid kline rows: {e}"))
}

fn load_records<T: DeserializeOwned>(path: &str, context: &str) -> Vec<T> {
    let mut reader =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    reader
        .deserialize()
        .map(|r| r.unwrap_or_else(|e| panic!("{context}: {e}")))
        .collect()
}
