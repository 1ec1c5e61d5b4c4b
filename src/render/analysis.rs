use crate::models::{MarketAnalysis, PriceLevel};
use crate::view::{Region, ViewPatch};

use super::{percent, price_level, NOT_AVAILABLE};

/// Market-analysis summary fields and the free-text detail panel.
pub fn render_analysis(analysis: &MarketAnalysis) -> ViewPatch {
    let trend = analysis
        .trend
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("neutral")
        .to_uppercase();

    let rsi = analysis
        .indicators
        .rsi
        .as_ref()
        .map(|r| format!("{:.2} ({})", r.value, r.signal))
        .unwrap_or_else(|| NOT_AVAILABLE.into());

    let nearest = |levels: &[PriceLevel]| {
        levels
            .first()
            .map(|l| price_level(l.price))
            .unwrap_or_else(|| NOT_AVAILABLE.into())
    };

    ViewPatch::new()
        .text(Region::MarketTrend, trend)
        .text(Region::RsiValue, rsi)
        .text(Region::PatternCount, analysis.patterns.len().to_string())
        .text(Region::NearestSupport, nearest(&analysis.levels.support))
        .text(Region::NearestResistance, nearest(&analysis.levels.resistance))
        .text(Region::AnalysisDetail, detail_text(analysis))
}

fn detail_text(analysis: &MarketAnalysis) -> String {
    let mut lines = Vec::new();

    if analysis.patterns.is_empty() {
        lines.push("Patterns: none detected".to_string());
    } else {
        lines.push("Patterns:".to_string());
        for p in &analysis.patterns {
            lines.push(format!(
                "  {} - {} ({})",
                p.pattern,
                p.signal,
                percent(p.strength, 0)
            ));
        }
    }

    lines.push(level_line("Support", &analysis.levels.support));
    lines.push(level_line("Resistance", &analysis.levels.resistance));
    lines.join("\n")
}

fn level_line(label: &str, levels: &[PriceLevel]) -> String {
    if levels.is_empty() {
        return format!("{label}: none");
    }
    let prices: Vec<String> = levels.iter().map(|l| price_level(l.price)).collect();
    format!("{label}: {}", prices.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_analysis() {
        let analysis: MarketAnalysis = serde_json::from_value(json!({
            "trend": "uptrend",
            "patterns": [
                {"pattern": "Hammer", "signal": "CALL", "strength": 0.8},
                {"pattern": "Doji", "signal": "neutral", "strength": 0.456}
            ],
            "indicators": {"rsi": {"value": 71.234, "signal": "overbought"}, "macd": {"trend": "neutral"}},
            "levels": {
                "support": [{"price": 1.0842, "type": "support"}, {"price": 1.08}],
                "resistance": [{"price": 1.09123456}]
            },
            "candles": []
        }))
        .unwrap();

        let patch = render_analysis(&analysis);

        assert_eq!(patch.field(Region::MarketTrend), Some("UPTREND"));
        assert_eq!(patch.field(Region::RsiValue), Some("71.23 (overbought)"));
        assert_eq!(patch.field(Region::PatternCount), Some("2"));
        assert_eq!(patch.field(Region::NearestSupport), Some("1.08420"));
        assert_eq!(patch.field(Region::NearestResistance), Some("1.09123"));

        let detail = patch.field(Region::AnalysisDetail).unwrap();
        assert!(detail.contains("Hammer - CALL (80%)"));
        assert!(detail.contains("Doji - neutral (46%)"));
        assert!(detail.contains("Support: 1.08420, 1.08000"));
        assert!(detail.contains("Resistance: 1.09123"));
    }

    #[test]
    fn test_empty_analysis_renders_no_data() {
        // Backend answers `indicators: {}` and empty levels before enough candles.
        let analysis: MarketAnalysis = serde_json::from_value(json!({
            "patterns": [],
            "levels": {},
            "indicators": {},
            "trend": "neutral",
            "candles": []
        }))
        .unwrap();

        let patch = render_analysis(&analysis);

        assert_eq!(patch.field(Region::MarketTrend), Some("NEUTRAL"));
        assert_eq!(patch.field(Region::RsiValue), Some(NOT_AVAILABLE));
        assert_eq!(patch.field(Region::PatternCount), Some("0"));
        assert_eq!(patch.field(Region::NearestSupport), Some(NOT_AVAILABLE));
        let detail = patch.field(Region::AnalysisDetail).unwrap();
        assert!(detail.contains("Patterns: none detected"));
        assert!(detail.contains("Support: none"));
        assert!(detail.contains("Resistance: none"));
    }
}
