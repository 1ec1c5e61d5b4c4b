//! Pure snapshot → [`ViewPatch`](crate::view::ViewPatch) mappings and the
//! display formats they share.

pub mod analysis;
pub mod dashboard;
pub mod tournament;
pub mod trade_log;

pub use analysis::render_analysis;
pub use dashboard::render_dashboard;
pub use tournament::render_modal;
pub use trade_log::render_trade_stats;

/// Shown where a value is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// `$` prefix, 2 decimals.
pub fn currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Ratio rendered as a percentage with `decimals` places.
pub fn percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

/// Timeframe seconds displayed as minutes.
pub fn timeframe(seconds: u64) -> String {
    let minutes = seconds as f64 / 60.0;
    format!("{minutes} Min")
}

/// Support/resistance price, 5 decimals.
pub fn price_level(price: f64) -> String {
    format!("{price:.5}")
}

/// `in_progress` → `In progress`.
pub fn status_label(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().replace('_', " ");
            format!("{}{}", first.to_uppercase(), rest)
        }
        None => String::new(),
    }
}
