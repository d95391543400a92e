use crate::Result;
use bubblechart_render::{HighlightOptions, PlotOptions, SvgOptions};
use bubblepack::CollapseOptions;
use serde::{Deserialize, Serialize};

/// Everything a chart needs besides its data. Every field is optional in JSON; missing ones keep
/// their defaults.
///
/// ```json
/// { "spacing": 0.1, "collapse": { "iterations": 80 }, "plot": { "colormap": "magma" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Minimum gap between bubble outlines.
    pub spacing: f64,
    pub collapse: CollapseOptions,
    pub plot: PlotOptions,
    pub highlight: HighlightOptions,
    pub svg: SvgOptions,
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(ChartConfig::from_json("{}").unwrap(), ChartConfig::default());
    }

    #[test]
    fn nested_sections_merge_with_defaults() {
        let cfg = ChartConfig::from_json(
            r#"{"spacing": 0.1, "collapse": {"iterations": 80}, "highlight": {"lowAlpha": 0.05}}"#,
        )
        .unwrap();
        assert_eq!(cfg.spacing, 0.1);
        assert_eq!(cfg.collapse.iterations, 80);
        assert_eq!(cfg.collapse.stall_ratio, 0.1);
        assert_eq!(cfg.highlight.low_alpha, 0.05);
        assert_eq!(cfg.highlight.color, "firebrick");
        assert_eq!(cfg.plot, PlotOptions::default());
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut cfg = ChartConfig::default();
        cfg.plot.colormap = "cividis".to_string();
        cfg.svg.background = Some("white".to_string());
        let back = ChartConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ChartConfig::from_json(r#"{"spacing": "wide"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
