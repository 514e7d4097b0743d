// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Percentage pie layout: wedge order, angles, in-slice label sizing and
//! placement, and the side legend. Nothing here draws; the caller renders
//! the returned slices however it likes.

use crate::config::{ChartConfig, FontCurve};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::HashMap;

/// Wedges start at 12 o'clock and run clockwise.
pub const START_ANGLE: f64 = 90.0;

pub const DEFAULT_COLOR: &str = "#9E9E9E";

static CATEGORY_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Income", "#4472C4"),
        ("Expense", "#ED7D31"),
        ("Remaining Balance", "#70AD47"),
        ("Etc", "#7F7F7F"),
        ("Stock", "#4472C4"),
        ("Mutual Fund", "#6F9FD8"),
        ("Real Estate", "#ED7D31"),
        ("Savings", "#5B9BD5"),
        ("Bond", "#A5A5A5"),
        ("Insurance", "#FFC000"),
        ("Annuity", "#9E480E"),
        ("401K", "#C00000"),
        ("403B", "#FF9999"),
        ("CC debt", "#C00000"),
        ("Car loan", "#7F6000"),
        ("Personal Loan", "#8064A2"),
        ("Mortgage", "#BF9000"),
        ("Etc.", "#7F7F7F"),
    ])
});

/// Label → hex colour lookup with a fallback for unknown labels.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: HashMap<String, String>,
    default: String,
}

impl Palette {
    pub fn new(colors: HashMap<String, String>, default: &str) -> Self {
        Self {
            colors,
            default: default.to_string(),
        }
    }

    pub fn color_for(&self, label: &str) -> &str {
        self.colors
            .get(label)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = CATEGORY_COLORS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Palette::new(colors, DEFAULT_COLOR)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: Decimal,
    pub fraction: f64,
    pub percent: f64,
    /// Degrees, counter-clockwise from 3 o'clock. `angle_end < angle_start`.
    pub angle_start: f64,
    pub angle_end: f64,
    pub font_size: f64,
    pub color: String,
    pub label_text: String,
    /// Label anchor in unit-radius coordinates.
    pub label_x: f64,
    pub label_y: f64,
}

impl ChartSlice {
    pub fn span(&self) -> f64 {
        self.angle_start - self.angle_end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub percent: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieLayout {
    pub slices: Vec<ChartSlice>,
    pub legend: Vec<LegendEntry>,
}

impl PieLayout {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

pub fn font_size_for(fraction: f64, cfg: &ChartConfig) -> f64 {
    let scale = match cfg.font_curve {
        FontCurve::Linear if cfg.reference_fraction > 0.0 => {
            (fraction / cfg.reference_fraction).min(1.0)
        }
        FontCurve::Linear => 1.0,
        FontCurve::Sqrt => fraction.max(0.0).sqrt(),
    };
    cfg.min_font_size + (cfg.max_font_size - cfg.min_font_size) * scale
}

pub fn legend_text(label: &str, percent: f64) -> String {
    format!("{} — {:.1}%", label, percent)
}

pub fn layout(values: &[(String, Decimal)], cfg: &ChartConfig, palette: &Palette) -> PieLayout {
    let mut kept: Vec<(&str, Decimal, f64)> = values
        .iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .filter_map(|(label, amount)| amount.to_f64().map(|v| (label.as_str(), *amount, v)))
        .collect();
    // Stable: equal amounts keep input order.
    kept.sort_by(|a, b| b.1.cmp(&a.1));

    let total: f64 = kept.iter().map(|(_, _, v)| v).sum();
    if kept.is_empty() || total.is_nan() || total <= 0.0 {
        tracing::debug!(entries = values.len(), "nothing to lay out");
        return PieLayout::default();
    }

    let mut slices = Vec::with_capacity(kept.len());
    let mut cumulative = 0.0;
    for (label, amount, v) in &kept {
        let fraction = v / total;
        let percent = fraction * 100.0;
        let angle_start = START_ANGLE - cumulative;
        cumulative += 360.0 * fraction;
        let angle_end = START_ANGLE - cumulative;
        let mid = ((angle_start + angle_end) / 2.0).to_radians();
        let label_text = if cfg.side_legend {
            format!("{:.1}%", percent)
        } else {
            format!("{}\n{:.1}%", label, percent)
        };
        slices.push(ChartSlice {
            label: label.to_string(),
            value: *amount,
            fraction,
            percent,
            angle_start,
            angle_end,
            font_size: font_size_for(fraction, cfg),
            color: palette.color_for(label).to_string(),
            label_text,
            label_x: mid.cos() * cfg.label_radius,
            label_y: mid.sin() * cfg.label_radius,
        });
    }

    let legend = if cfg.side_legend {
        let mut order: Vec<&ChartSlice> = slices.iter().collect();
        // Stable over wedge order, which already breaks ties by input order.
        order.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        let take = cfg.legend_top_n.unwrap_or(order.len());
        order
            .into_iter()
            .take(take)
            .map(|s| LegendEntry {
                label: s.label.clone(),
                percent: s.percent,
                text: legend_text(&s.label, s.percent),
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::debug!(slices = slices.len(), legend = legend.len(), %total, "laid out pie");
    PieLayout { slices, legend }
}
