use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Recognized information criterion statistics, in preference order.
pub const INFORMATION_CRITERIA: [&str; 2] = ["waic", "loo"];

/// One model's row of a comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRow {
    pub model: String,
    /// 0 is the best-ranked model.
    pub rank: usize,
    /// Named numeric statistics: the criterion value itself plus `se`,
    /// `p_<criterion>`, `dse`, and whatever else the comparison produced.
    pub stats: BTreeMap<String, f64>,
    /// Reporting scale of the criterion, e.g. `"deviance"` or `"log"`.
    pub scale: Option<String>,
}

impl CompareRow {
    /// Case-insensitive statistic lookup.
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// Model-comparison results, one row per model. Read-only for rendering
/// except for the optional in-place sort by rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    rows: Vec<CompareRow>,
}

impl ComparisonTable {
    pub fn new(rows: Vec<CompareRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CompareRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first of [`INFORMATION_CRITERIA`] carried by every row.
    pub fn criterion(&self) -> Result<&'static str> {
        if self.rows.is_empty() {
            return Err(Error::EmptyComparison);
        }
        INFORMATION_CRITERIA
            .iter()
            .copied()
            .find(|ic| self.rows.iter().all(|row| row.stat(ic).is_some()))
            .ok_or(Error::MissingCriterion {
                expected: &INFORMATION_CRITERIA,
            })
    }

    pub fn sort_by_rank(&mut self) {
        self.rows.sort_by_key(|row| row.rank);
    }
}

/// Which elements [`build_compare_data`] should produce.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// In-sample deviance points, the criterion without its penalization.
    pub insample_dev: bool,
    /// Standard-error bars on the criterion estimates.
    pub plot_standard_error: bool,
    /// Difference-to-best points with their own standard error.
    pub plot_ic_diff: bool,
    /// Sort the table by rank first so the best model is the reference.
    pub order_by_rank: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            insample_dev: true,
            plot_standard_error: true,
            plot_ic_diff: true,
            order_by_rank: true,
        }
    }
}

/// A horizontal error bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
}

/// Backend-agnostic geometry for a model-comparison plot, in the style of
/// the ranking plots in Statistical Rethinking: models on the y axis from
/// 0 down to -1, criterion values on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareData {
    pub criterion: String,
    /// x-axis label, the first row's reporting scale.
    pub scale_label: String,
    pub step: f64,
    /// Interleaved tick positions; models sit on the even ticks.
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    /// Criterion value per model, `(x, y)`.
    pub ic_points: Vec<(f64, f64)>,
    pub se_segments: Vec<Segment>,
    pub insample_points: Vec<(f64, f64)>,
    /// Criterion values for all but the top-ranked model, on the
    /// between-model ticks.
    pub diff_points: Vec<(f64, f64)>,
    pub diff_segments: Vec<Segment>,
    /// Vertical reference line at the best model's criterion value.
    pub reference_line: f64,
}

/// Evenly spaced positions from 0 to -1, one per model plus one between
/// each adjacent pair, with the between positions shifted by half a step.
fn interleaved_ticks(n_models: usize) -> (Vec<f64>, f64) {
    if n_models <= 1 {
        return (vec![0.0], -1.0);
    }
    let count = 2 * n_models - 1;
    let step = -1.0 / (count as f64 - 1.0);
    let mut positions: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();
    for position in positions.iter_mut().skip(1).step_by(2) {
        *position += step / 2.0;
    }
    (positions, step)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn required(row: &CompareRow, name: &str) -> Result<f64> {
    row.stat(name).ok_or_else(|| Error::MissingColumn {
        column: name.to_string(),
    })
}

/// Turn a comparison table into presentation-ready geometry.
///
/// Detects the information criterion, optionally sorts the table by rank in
/// place, and lays the models out on interleaved ticks between 0 and -1.
/// Statistics required by enabled options but absent from a row fail with
/// [`Error::MissingColumn`]; a table without a recognized criterion fails
/// with [`Error::MissingCriterion`].
pub fn build_compare_data(
    table: &mut ComparisonTable,
    opts: &CompareOptions,
) -> Result<CompareData> {
    let criterion = table.criterion()?;
    if opts.order_by_rank {
        table.sort_by_rank();
    }

    let (tick_positions, step) = interleaved_ticks(table.len());
    let mut tick_labels = vec![String::new(); tick_positions.len()];
    for (i, row) in table.rows().iter().enumerate() {
        tick_labels[2 * i] = row.model.clone();
    }

    let mut ic_points = Vec::with_capacity(table.len());
    let mut se_segments = Vec::new();
    let mut insample_points = Vec::new();
    let mut diff_points = Vec::new();
    let mut diff_segments = Vec::new();

    for (i, row) in table.rows().iter().enumerate() {
        let y = tick_positions[2 * i];
        let x = required(row, criterion)?;
        ic_points.push((x, y));

        if opts.plot_standard_error {
            let se = required(row, "se")?;
            se_segments.push(Segment {
                x0: x - se,
                x1: x + se,
                y,
            });
        }
        if opts.insample_dev {
            let penalty = required(row, &format!("p_{criterion}"))?;
            insample_points.push((x - 2.0 * penalty, y));
        }
        if opts.plot_ic_diff && i > 0 {
            let y_diff = tick_positions[2 * i - 1];
            let dse = required(row, "dse")?;
            diff_points.push((x, y_diff));
            diff_segments.push(Segment {
                x0: x - dse,
                x1: x + dse,
                y: y_diff,
            });
        }
    }

    let first = &table.rows()[0];
    let scale_label = first
        .scale
        .as_deref()
        .map_or_else(|| "Deviance".to_string(), capitalize);

    Ok(CompareData {
        criterion: criterion.to_string(),
        scale_label,
        step,
        tick_positions,
        tick_labels,
        reference_line: ic_points[0].0,
        ic_points,
        se_segments,
        insample_points,
        diff_points,
        diff_segments,
    })
}
