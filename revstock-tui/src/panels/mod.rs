//! Buffer-drawn widgets.
//!
//! - CandleChart: OHLC candle rendering

pub mod candle_chart;

pub use candle_chart::CandleChartPanel;
