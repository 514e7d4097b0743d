// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pfc::config::{ChartConfig, FontCurve};
use pfc::pie::{DEFAULT_COLOR, Palette, font_size_for, layout};
use rust_decimal::Decimal;
use std::collections::HashMap;

const EPS: f64 = 1e-9;

fn vals(pairs: &[(&str, i64)]) -> Vec<(String, Decimal)> {
    pairs
        .iter()
        .map(|(l, v)| (l.to_string(), Decimal::from(*v)))
        .collect()
}

fn labels(pie: &pfc::pie::PieLayout) -> Vec<&str> {
    pie.slices.iter().map(|s| s.label.as_str()).collect()
}

#[test]
fn summary_pie_filters_zero_and_breaks_ties_by_input_order() {
    let values = vals(&[
        ("Income", 600),
        ("Expense", 300),
        ("Remaining Balance", 300),
        ("Etc", 0),
    ]);
    let pie = layout(&values, &ChartConfig::default(), &Palette::default());

    assert_eq!(labels(&pie), ["Income", "Expense", "Remaining Balance"]);
    let pct: Vec<f64> = pie.slices.iter().map(|s| s.percent).collect();
    assert!((pct[0] - 50.0).abs() < EPS);
    assert!((pct[1] - 25.0).abs() < EPS);
    assert!((pct[2] - 25.0).abs() < EPS);

    let legend: Vec<&str> = pie.legend.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        legend,
        [
            "Income — 50.0%",
            "Expense — 25.0%",
            "Remaining Balance — 25.0%"
        ]
    );
}

#[test]
fn wedges_start_at_top_and_run_clockwise() {
    let values = vals(&[("Expense", 300), ("Income", 600), ("Remaining Balance", 300)]);
    let pie = layout(&values, &ChartConfig::default(), &Palette::default());

    assert_eq!(labels(&pie), ["Income", "Expense", "Remaining Balance"]);
    let first = &pie.slices[0];
    assert!((first.angle_start - 90.0).abs() < EPS);
    assert!((first.angle_end + 90.0).abs() < EPS);
    assert!((pie.slices[1].angle_start + 90.0).abs() < EPS);
    assert!((pie.slices[1].angle_end + 180.0).abs() < EPS);
    assert!((pie.slices[2].angle_end + 270.0).abs() < EPS);
    for pair in pie.slices.windows(2) {
        assert!((pair[0].angle_end - pair[1].angle_start).abs() < EPS);
    }
}

#[test]
fn spans_and_percentages_cover_the_whole_pie() {
    let values = vals(&[("A", 1), ("B", 1), ("C", 1), ("D", 7), ("E", 13)]);
    let pie = layout(&values, &ChartConfig::default(), &Palette::default());

    let span: f64 = pie.slices.iter().map(|s| s.span()).sum();
    let pct: f64 = pie.slices.iter().map(|s| s.percent).sum();
    assert!((span - 360.0).abs() < 1e-6);
    assert!((pct - 100.0).abs() < 1e-6);

    // one-decimal rounding need not add back up to exactly 100
    let rounded: f64 = pie
        .slices
        .iter()
        .map(|s| (s.percent * 10.0).round() / 10.0)
        .sum();
    assert!((rounded - 100.0).abs() <= 0.3);
}

#[test]
fn empty_and_all_zero_inputs_produce_nothing() {
    let cfg = ChartConfig::default();
    let palette = Palette::default();

    let pie = layout(&[], &cfg, &palette);
    assert!(pie.is_empty());
    assert!(pie.legend.is_empty());

    let pie = layout(&vals(&[("Income", 0), ("Etc", 0)]), &cfg, &palette);
    assert!(pie.slices.is_empty());
    assert!(pie.legend.is_empty());

    let negative = vec![("Loss".to_string(), Decimal::from(-5))];
    assert!(layout(&negative, &cfg, &palette).is_empty());
}

#[test]
fn legend_is_capped_to_top_n() {
    let cfg = ChartConfig {
        legend_top_n: Some(2),
        ..ChartConfig::default()
    };
    let values = vals(&[
        ("Stock", 10),
        ("Bond", 50),
        ("Savings", 20),
        ("401K", 40),
        ("Annuity", 30),
    ]);
    let pie = layout(&values, &cfg, &Palette::default());
    assert_eq!(pie.slices.len(), 5);
    let legend: Vec<&str> = pie.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(legend, ["Bond", "401K"]);
}

#[test]
fn legend_content_does_not_depend_on_input_order() {
    let cfg = ChartConfig::default();
    let palette = Palette::default();
    let a = layout(
        &vals(&[("Stock", 10), ("Bond", 50), ("Savings", 20)]),
        &cfg,
        &palette,
    );
    let b = layout(
        &vals(&[("Savings", 20), ("Stock", 10), ("Bond", 50)]),
        &cfg,
        &palette,
    );
    assert_eq!(a.legend, b.legend);
    assert_eq!(a.slices, b.slices);
}

#[test]
fn layout_is_deterministic() {
    let values = vals(&[("Mortgage", 250_000), ("Car loan", 18_000), ("CC debt", 4_200)]);
    let cfg = ChartConfig::default();
    let palette = Palette::default();
    assert_eq!(layout(&values, &cfg, &palette), layout(&values, &cfg, &palette));
}

#[test]
fn font_curves() {
    let sqrt = ChartConfig::default();
    assert_eq!(sqrt.font_curve, FontCurve::Sqrt);
    assert!((font_size_for(0.25, &sqrt) - 11.5).abs() < EPS);
    assert!((font_size_for(1.0, &sqrt) - 16.0).abs() < EPS);
    assert!((font_size_for(0.0, &sqrt) - 7.0).abs() < EPS);

    let linear = ChartConfig {
        font_curve: FontCurve::Linear,
        ..ChartConfig::default()
    };
    assert!((font_size_for(0.1, &linear) - 10.6).abs() < EPS);
    assert!((font_size_for(0.25, &linear) - 16.0).abs() < EPS);
    assert!((font_size_for(0.6, &linear) - 16.0).abs() < EPS);
}

#[test]
fn small_slices_get_smaller_labels() {
    let values = vals(&[("Big", 90), ("Small", 10)]);
    let pie = layout(&values, &ChartConfig::default(), &Palette::default());
    assert!(pie.slices[0].font_size > pie.slices[1].font_size);
    assert!(pie.slices[1].font_size >= 7.0);
}

#[test]
fn labels_sit_at_wedge_midpoint() {
    let values = vals(&[("Income", 600), ("Expense", 300), ("Remaining Balance", 300)]);
    let pie = layout(&values, &ChartConfig::default(), &Palette::default());

    // Income covers the right half; its midpoint is 3 o'clock.
    assert!((pie.slices[0].label_x - 0.68).abs() < EPS);
    assert!(pie.slices[0].label_y.abs() < EPS);
    // Expense spans -90..-180, midpoint -135 degrees.
    let r = 0.68 * std::f64::consts::FRAC_1_SQRT_2;
    assert!((pie.slices[1].label_x + r).abs() < 1e-9);
    assert!((pie.slices[1].label_y + r).abs() < 1e-9);
}

#[test]
fn label_text_depends_on_side_legend() {
    let values = vals(&[("Income", 600), ("Expense", 200)]);
    let with_legend = layout(&values, &ChartConfig::default(), &Palette::default());
    assert_eq!(with_legend.slices[0].label_text, "75.0%");

    let cfg = ChartConfig {
        side_legend: false,
        ..ChartConfig::default()
    };
    let inline = layout(&values, &cfg, &Palette::default());
    assert_eq!(inline.slices[0].label_text, "Income\n75.0%");
    assert_eq!(inline.slices[1].label_text, "Expense\n25.0%");
    assert!(inline.legend.is_empty());
}

#[test]
fn colors_come_from_the_palette() {
    let values = vals(&[("Stock", 10), ("Crypto", 5)]);
    let pie = layout(&values, &ChartConfig::default(), &Palette::default());
    assert_eq!(pie.slices[0].color, "#4472C4");
    assert_eq!(pie.slices[1].color, DEFAULT_COLOR);

    let custom = Palette::new(
        HashMap::from([("Crypto".to_string(), "#123456".to_string())]),
        "#000000",
    );
    let pie = layout(&values, &ChartConfig::default(), &custom);
    assert_eq!(pie.slices[0].color, "#000000");
    assert_eq!(pie.slices[1].color, "#123456");
}
