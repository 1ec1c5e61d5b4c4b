use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ChartSink;
use crate::models::{Candle, MarketAnalysis};

/// Number of candles charted.
pub const CHART_CANDLE_LIMIT: usize = 50;

/// One candlestick trace, oldest bar first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    pub x: Vec<usize>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl CandleSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Fixed chart styling sent once with the empty initial series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub increasing_color: String,
    pub decreasing_color: String,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font_color: String,
    pub grid_color: String,
    pub range_slider: bool,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            x_axis_title: "Candle".into(),
            y_axis_title: "Price".into(),
            increasing_color: "#26a69a".into(),
            decreasing_color: "#ef5350".into(),
            paper_bgcolor: "rgba(0,0,0,0)".into(),
            plot_bgcolor: "rgba(0,0,0,0)".into(),
            font_color: "#d1d4dc".into(),
            grid_color: "#2a2e39".into(),
            range_slider: false,
        }
    }
}

/// Take the `limit` most recent candles (received newest-first) and
/// reorder them oldest-first.
pub fn normalize_candles(candles: &[Candle], limit: usize) -> CandleSeries {
    let mut series = CandleSeries::default();
    for (i, c) in candles.iter().take(limit).rev().enumerate() {
        series.x.push(i);
        series.open.push(c.open);
        series.high.push(c.high);
        series.low.push(c.low);
        series.close.push(c.close);
    }
    series
}

/// Feeds market analysis into a [`ChartSink`], initializing it exactly once.
pub struct ChartAdapter {
    sink: Arc<dyn ChartSink>,
    initialized: AtomicBool,
}

impl ChartAdapter {
    pub fn new(sink: Arc<dyn ChartSink>) -> Self {
        Self {
            sink,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn ensure_initialized(&self) {
        if !self.initialized.swap(true, Ordering::AcqRel) {
            tracing::debug!("Initializing chart");
            self.sink.init(&ChartLayout::default(), &CandleSeries::default());
        }
    }

    /// Returns whether a redraw was issued. Absent or empty candles leave
    /// the chart as it was.
    pub fn update_chart(&self, analysis: &MarketAnalysis) -> bool {
        self.ensure_initialized();

        if analysis.candles.is_empty() {
            return false;
        }

        let series = normalize_candles(&analysis.candles, CHART_CANDLE_LIMIT);
        self.sink.redraw(&series);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingChart {
        inits: Mutex<Vec<(ChartLayout, CandleSeries)>>,
        redraws: Mutex<Vec<CandleSeries>>,
    }

    impl ChartSink for RecordingChart {
        fn init(&self, layout: &ChartLayout, series: &CandleSeries) {
            self.inits.lock().unwrap().push((layout.clone(), series.clone()));
        }

        fn redraw(&self, series: &CandleSeries) {
            self.redraws.lock().unwrap().push(series.clone());
        }
    }

    fn candle(close: f64) -> Candle {
        Candle {
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
        }
    }

    /// Newest first: close values n-1, n-2, ..., 0.
    fn newest_first(n: usize) -> Vec<Candle> {
        (0..n).rev().map(|i| candle(i as f64)).collect()
    }

    #[test]
    fn test_normalize_takes_most_recent_fifty_oldest_first() {
        let received = newest_first(80);
        let series = normalize_candles(&received, CHART_CANDLE_LIMIT);

        assert_eq!(series.len(), 50);
        // Displayed element 0 is received element 49.
        assert_eq!(series.close[0], received[49].close);
        assert_eq!(series.close[49], received[0].close);
        assert_eq!(series.x, (0..50).collect::<Vec<_>>());
        assert!(series.close.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_normalize_short_series_keeps_everything() {
        let received = newest_first(3);
        let series = normalize_candles(&received, CHART_CANDLE_LIMIT);
        assert_eq!(series.close, vec![0.0, 1.0, 2.0]);
        assert_eq!(series.high, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_candles_do_not_redraw() {
        let sink = Arc::new(RecordingChart::default());
        let adapter = ChartAdapter::new(sink.clone());

        let redrawn = adapter.update_chart(&MarketAnalysis::default());

        assert!(!redrawn);
        assert!(sink.redraws.lock().unwrap().is_empty());
        // First call still initializes the chart.
        assert_eq!(sink.inits.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_initializes_once_with_empty_series() {
        let sink = Arc::new(RecordingChart::default());
        let adapter = ChartAdapter::new(sink.clone());
        let analysis = MarketAnalysis {
            candles: newest_first(5),
            ..Default::default()
        };

        adapter.ensure_initialized();
        adapter.update_chart(&analysis);
        adapter.update_chart(&analysis);

        let inits = sink.inits.lock().unwrap();
        assert_eq!(inits.len(), 1);
        assert!(inits[0].1.is_empty());
        assert_eq!(inits[0].0.paper_bgcolor, "rgba(0,0,0,0)");
        assert_eq!(sink.redraws.lock().unwrap().len(), 2);
    }
}
