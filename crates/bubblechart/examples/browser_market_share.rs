//! Prints the browser market-share chart as SVG, plus a highlighted variant when run with
//! `--highlight`.
//!
//! ```sh
//! cargo run -p bubblechart --example browser_market_share > share.svg
//! ```

use bubblechart::{BubbleChart, ChartConfig, SvgOptions, demo};

fn main() -> bubblechart::Result<()> {
    let data = demo::browser_market_share();
    let config = ChartConfig {
        spacing: 0.1,
        svg: SvgOptions {
            diagram_id: Some("browser market share".to_string()),
            background: Some("white".to_string()),
            ..SvgOptions::default()
        },
        ..ChartConfig::default()
    };

    let mut chart = BubbleChart::with_config(&data.values, config)?;
    chart.collapse_configured();

    let svg = if std::env::args().any(|a| a == "--highlight") {
        chart.render_highlight_svg(&[3, 4], &data.labels, Some(data.colors.as_slice()))?
    } else {
        chart.render_svg(&data.labels, Some(data.colors.as_slice()))?
    };
    print!("{svg}");
    Ok(())
}
