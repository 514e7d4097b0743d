// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart configuration, persisted in the `settings` table under `chart.*`.

use crate::errors::ConfigError;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontCurve {
    /// `min(fraction / reference_fraction, 1)`
    Linear,
    /// `sqrt(fraction)`
    Sqrt,
}

impl FontCurve {
    pub fn parse(s: &str) -> Result<FontCurve, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(FontCurve::Linear),
            "sqrt" => Ok(FontCurve::Sqrt),
            other => Err(ConfigError::UnknownCurve(other.to_string())),
        }
    }
}

impl fmt::Display for FontCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontCurve::Linear => f.write_str("linear"),
            FontCurve::Sqrt => f.write_str("sqrt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// 0.0 is the centre of the pie, 1.0 its edge.
    pub label_radius: f64,
    pub font_curve: FontCurve,
    /// Fraction at which the linear curve reaches the max font size.
    pub reference_fraction: f64,
    pub legend_top_n: Option<usize>,
    pub side_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_font_size: 7.0,
            max_font_size: 16.0,
            label_radius: 0.68,
            font_curve: FontCurve::Sqrt,
            reference_fraction: 0.25,
            legend_top_n: Some(12),
            side_legend: true,
        }
    }
}

pub const KEYS: [&str; 7] = [
    "min-font",
    "max-font",
    "label-radius",
    "curve",
    "reference-fraction",
    "legend-top",
    "side-legend",
];

fn setting_key(key: &str) -> Result<&'static str, ConfigError> {
    match key {
        "min-font" => Ok("chart.min_font_size"),
        "max-font" => Ok("chart.max_font_size"),
        "label-radius" => Ok("chart.label_radius"),
        "curve" => Ok("chart.font_curve"),
        "reference-fraction" => Ok("chart.reference_fraction"),
        "legend-top" => Ok("chart.legend_top_n"),
        "side-legend" => Ok("chart.side_legend"),
        other => Err(ConfigError::UnknownKey(other.to_string())),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_legend_top(value: &str) -> Result<Option<usize>, ConfigError> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let n = v.parse::<i64>().map_err(|_| ConfigError::InvalidValue {
        key: "legend-top".into(),
        value: value.to_string(),
    })?;
    if n < 0 {
        return Err(ConfigError::NegativeLegendTop(n));
    }
    Ok(if n == 0 { None } else { Some(n as usize) })
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for fs in [self.min_font_size, self.max_font_size] {
            if !(fs.is_finite() && fs > 0.0) {
                return Err(ConfigError::NonPositiveFont(fs));
            }
        }
        if self.min_font_size > self.max_font_size {
            return Err(ConfigError::FontRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if !(0.0..=1.0).contains(&self.label_radius) {
            return Err(ConfigError::LabelRadius(self.label_radius));
        }
        if !(self.reference_fraction > 0.0 && self.reference_fraction <= 1.0) {
            return Err(ConfigError::ReferenceFraction(self.reference_fraction));
        }
        Ok(())
    }

    /// Applies one `key = value` pair on top of this config. The result is
    /// not validated as a whole; call [`ChartConfig::validate`] afterwards.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "min-font" => self.min_font_size = parse_f64(key, value)?,
            "max-font" => self.max_font_size = parse_f64(key, value)?,
            "label-radius" => self.label_radius = parse_f64(key, value)?,
            "curve" => self.font_curve = FontCurve::parse(value)?,
            "reference-fraction" => self.reference_fraction = parse_f64(key, value)?,
            "legend-top" => self.legend_top_n = parse_legend_top(value)?,
            "side-legend" => self.side_legend = parse_bool(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "min-font" => self.min_font_size.to_string(),
            "max-font" => self.max_font_size.to_string(),
            "label-radius" => self.label_radius.to_string(),
            "curve" => self.font_curve.to_string(),
            "reference-fraction" => self.reference_fraction.to_string(),
            "legend-top" => self
                .legend_top_n
                .map(|n| n.to_string())
                .unwrap_or_else(|| "none".to_string()),
            "side-legend" => self.side_legend.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        })
    }

    /// Reads the stored overrides on top of the defaults and validates the result.
    pub fn load(conn: &Connection) -> Result<ChartConfig> {
        let mut cfg = ChartConfig::default();
        for key in KEYS {
            let stored: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key=?1",
                    params![setting_key(key)?],
                    |r| r.get(0),
                )
                .optional()?;
            if let Some(v) = stored {
                cfg.apply(key, &v)?;
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates the change before anything is written.
    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<ChartConfig> {
        let mut cfg = ChartConfig::load(conn)?;
        cfg.apply(key, value)?;
        cfg.validate()?;
        conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![setting_key(key)?, cfg.get(key)?],
        )?;
        tracing::info!(key, value, "chart setting updated");
        Ok(cfg)
    }

    pub fn reset(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM settings WHERE key LIKE 'chart.%'", [])?;
        Ok(())
    }
}
