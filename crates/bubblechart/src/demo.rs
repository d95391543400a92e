//! Sample input: desktop browser market share, with a hand-picked palette.

/// Parallel label/value/color columns, indexed identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

pub fn browser_market_share() -> Dataset {
    let rows = [
        ("firefox", 8.61, "#5A69AF"),
        ("chrome", 69.55, "#579E65"),
        ("safari", 8.36, "#F9C784"),
        ("edge", 4.12, "#FC944A"),
        ("ie", 2.76, "#F24C00"),
        ("opera", 2.43, "#00B825"),
    ];
    Dataset {
        labels: rows.iter().map(|r| r.0.to_string()).collect(),
        values: rows.iter().map(|r| r.1).collect(),
        colors: rows.iter().map(|r| r.2.to_string()).collect(),
    }
}
