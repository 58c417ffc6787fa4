//! Growth chart data, coordinate mapping and pointer/idle index selection.
//!
//! The chart plots one of three fixed series over six month labels on a
//! 0–100 scale. Everything here is pure so the SVG controller only has to
//! copy the computed attributes onto elements.

use std::fmt::Write;

use crate::core::config::Padding;

/// Lowest plotted value.
pub const MIN_VALUE: f64 = 0.0;
/// Highest plotted value.
pub const MAX_VALUE: f64 = 100.0;
/// Smallest distance kept between the tooltip and the stage's side edges.
pub const TOOLTIP_EDGE_PX: f64 = 12.0;
/// Smallest distance kept between the tooltip and the stage's top edge.
pub const TOOLTIP_TOP_PX: f64 = 14.0;

/// Identifier of a plotted series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesKey {
    /// Revenue growth.
    Revenue,
    /// Lead growth.
    Leads,
    /// Return on investment.
    Roi,
}

impl SeriesKey {
    /// Every series in legend order.
    pub const ALL: [Self; 3] = [Self::Revenue, Self::Leads, Self::Roi];

    /// Value of the legend tag's `data-series` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Leads => "leads",
            Self::Roi => "roi",
        }
    }

    /// Parse a `data-series` attribute.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

/// One plotted series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Series {
    /// Series identifier.
    pub key: SeriesKey,
    /// Display name.
    pub name: &'static str,
    /// Unit suffix for readouts.
    pub unit: &'static str,
    /// Values aligned with [`ChartData::labels`].
    pub values: Vec<u32>,
}

/// Labels plus every series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartData {
    /// Month labels along the x axis.
    pub labels: Vec<&'static str>,
    series: [Series; 3],
}

impl Default for ChartData {
    fn default() -> Self {
        Self {
            labels: vec!["Мес 1", "Мес 2", "Мес 3", "Мес 4", "Мес 5", "Мес 6"],
            series: [
                Series {
                    key: SeriesKey::Revenue,
                    name: "Выручка",
                    unit: "%",
                    values: vec![12, 28, 45, 62, 76, 92],
                },
                Series {
                    key: SeriesKey::Leads,
                    name: "Лиды",
                    unit: "%",
                    values: vec![10, 18, 34, 49, 63, 78],
                },
                Series {
                    key: SeriesKey::Roi,
                    name: "ROI",
                    unit: "%",
                    values: vec![8, 16, 31, 44, 58, 71],
                },
            ],
        }
    }
}

impl ChartData {
    /// Series shown before any legend interaction.
    #[must_use]
    pub const fn default_key(&self) -> SeriesKey {
        SeriesKey::Revenue
    }

    /// Look up a series.
    #[must_use]
    pub fn series(&self, key: SeriesKey) -> &Series {
        match key {
            SeriesKey::Revenue => &self.series[0],
            SeriesKey::Leads => &self.series[1],
            SeriesKey::Roi => &self.series[2],
        }
    }

    /// Number of points per series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Every series has one value per label.
    #[cfg(test)]
    pub(crate) fn is_aligned(&self) -> bool {
        self.series
            .iter()
            .all(|series| series.values.len() == self.labels.len())
    }
}

/// Drawing area and the linear maps into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    /// viewBox width.
    pub width: f64,
    /// viewBox height.
    pub height: f64,
    /// Inner padding.
    pub pad: Padding,
    /// Points per series.
    pub points: usize,
}

impl ChartGeometry {
    /// Geometry for a viewBox and point count.
    #[must_use]
    pub const fn new(width: f64, height: f64, pad: Padding, points: usize) -> Self {
        Self {
            width,
            height,
            pad,
            points,
        }
    }

    /// Width between the side paddings.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.width - self.pad.left - self.pad.right
    }

    /// Height between the top and bottom paddings.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.height - self.pad.top - self.pad.bottom
    }

    /// Last valid index.
    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.points.saturating_sub(1)
    }

    /// x coordinate of point `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn x_at(&self, index: usize) -> f64 {
        let span = self.last_index().max(1) as f64;
        self.pad.left + self.inner_width() * (index as f64 / span)
    }

    /// y coordinate of `value` on the 0–100 scale.
    #[must_use]
    pub fn y_at(&self, value: f64) -> f64 {
        self.pad.top + self.inner_height() * (1.0 - (value - MIN_VALUE) / (MAX_VALUE - MIN_VALUE))
    }

    /// y coordinate of the baseline.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.pad.top + self.inner_height()
    }

    /// SVG path data for the polyline through `values`.
    #[must_use]
    pub fn line_path(&self, values: &[u32]) -> String {
        let mut path = String::new();
        for (idx, value) in values.iter().enumerate() {
            if idx > 0 {
                path.push(' ');
            }
            let command = if idx == 0 { 'M' } else { 'L' };
            let _ = write!(
                path,
                "{command} {:.2} {:.2}",
                self.x_at(idx),
                self.y_at(f64::from(*value))
            );
        }
        path
    }

    /// SVG path data for the area under `values`, closed along the baseline.
    #[must_use]
    pub fn area_path(&self, values: &[u32]) -> String {
        let base = self.baseline();
        format!(
            "{} L {:.2} {:.2} L {:.2} {:.2} Z",
            self.line_path(values),
            self.x_at(self.last_index()),
            base,
            self.x_at(0),
            base
        )
    }

    /// y coordinates of `lines + 1` horizontal grid lines.
    #[must_use]
    pub fn grid_rows(&self, lines: u32) -> Vec<f64> {
        if lines == 0 {
            return Vec::new();
        }
        (0..=lines)
            .map(|row| self.pad.top + self.inner_height() * (f64::from(row) / f64::from(lines)))
            .collect()
    }

    /// Point index nearest to a client x coordinate over the stage.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn nearest_index(&self, client_x: f64, stage_left: f64, stage_width: f64) -> usize {
        if stage_width <= 0.0 {
            return self.last_index();
        }
        let u = ((client_x - stage_left) / stage_width).clamp(0.0, 1.0);
        let index = (u * self.last_index() as f64).round() as usize;
        index.min(self.last_index())
    }
}

/// Tooltip anchor inside the stage for a pointer position.
#[must_use]
pub fn tooltip_anchor(
    client: (f64, f64),
    stage_origin: (f64, f64),
    stage_width: f64,
) -> (f64, f64) {
    let x = (client.0 - stage_origin.0)
        .max(TOOLTIP_EDGE_PX)
        .min(stage_width - TOOLTIP_EDGE_PX);
    let y = (client.1 - stage_origin.1).max(TOOLTIP_TOP_PX);
    (x, y)
}

/// Index swept by the idle animation at frame time `t_ms`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn idle_index(t_ms: f64, period_ms: f64, last_index: usize) -> usize {
    let s = ((t_ms / period_ms).sin() * 0.5 + 0.5) * last_index as f64;
    (s.round() as usize).min(last_index)
}

/// Everything the view needs to highlight one point.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    /// Highlighted index.
    pub index: usize,
    /// Crosshair / dot x.
    pub cx: f64,
    /// Dot y.
    pub cy: f64,
    /// Raw value.
    pub value: u32,
    /// KPI label, e.g. `Выручка • Мес 3`.
    pub kpi_label: String,
    /// Tooltip title (the month label).
    pub tooltip_title: String,
    /// Tooltip body, e.g. `Выручка: +45%`.
    pub tooltip_text: String,
}

/// Active series, geometry and interaction state of the growth chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartModel {
    data: ChartData,
    geometry: ChartGeometry,
    active: SeriesKey,
    engaged: bool,
    idle_index: Option<usize>,
}

impl ChartModel {
    /// Model over `data` drawn into `geometry`.
    #[must_use]
    pub fn new(data: ChartData, geometry: ChartGeometry) -> Self {
        let active = data.default_key();
        Self {
            data,
            geometry,
            active,
            engaged: false,
            idle_index: None,
        }
    }

    /// Geometry in use.
    #[must_use]
    pub const fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    /// Active series key.
    #[must_use]
    pub const fn active(&self) -> SeriesKey {
        self.active
    }

    /// Active series.
    #[must_use]
    pub fn series(&self) -> &Series {
        self.data.series(self.active)
    }

    /// Switch series. Returns `false` when `key` is already active.
    pub fn select(&mut self, key: SeriesKey) -> bool {
        if key == self.active {
            return false;
        }
        self.active = key;
        true
    }

    /// Line path of the active series.
    #[must_use]
    pub fn line_path(&self) -> String {
        self.geometry.line_path(&self.series().values)
    }

    /// Area path of the active series.
    #[must_use]
    pub fn area_path(&self) -> String {
        self.geometry.area_path(&self.series().values)
    }

    /// Marker centres of the active series.
    #[must_use]
    pub fn markers(&self) -> Vec<(f64, f64)> {
        self.series()
            .values
            .iter()
            .enumerate()
            .map(|(idx, value)| (self.geometry.x_at(idx), self.geometry.y_at(f64::from(*value))))
            .collect()
    }

    /// Highlight data for `index` (clamped to the series).
    #[must_use]
    pub fn highlight(&self, index: usize) -> Highlight {
        let index = index.min(self.geometry.last_index());
        let series = self.series();
        let value = series.values.get(index).copied().unwrap_or_default();
        let label = self.data.labels.get(index).copied().unwrap_or_default();
        Highlight {
            index,
            cx: self.geometry.x_at(index),
            cy: self.geometry.y_at(f64::from(value)),
            value,
            kpi_label: format!("{} • {label}", series.name),
            tooltip_title: label.to_string(),
            tooltip_text: format!("{}: +{value}{}", series.name, series.unit),
        }
    }

    /// Readout text for a value of the active series.
    #[must_use]
    pub fn readout(&self, value: i64) -> String {
        format!("+{value}{}", self.series().unit)
    }

    /// Pointer moved over the stage; returns the index to highlight.
    pub fn pointer_move(&mut self, client_x: f64, stage_left: f64, stage_width: f64) -> usize {
        self.engaged = true;
        self.geometry.nearest_index(client_x, stage_left, stage_width)
    }

    /// Pointer left; returns the resting index (the last point).
    pub fn pointer_leave(&mut self) -> usize {
        self.engaged = false;
        self.geometry.last_index()
    }

    /// Whether a real pointer currently drives the highlight.
    #[must_use]
    pub const fn engaged(&self) -> bool {
        self.engaged
    }

    /// Idle sweep at frame time `t_ms`; `Some` only when the index changed
    /// and no pointer is engaged.
    pub fn idle_step(&mut self, t_ms: f64, period_ms: f64) -> Option<usize> {
        if self.engaged {
            return None;
        }
        let index = idle_index(t_ms, period_ms, self.geometry.last_index());
        if self.idle_index == Some(index) {
            return None;
        }
        self.idle_index = Some(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ChartGeometry {
        ChartGeometry::new(720.0, 260.0, Padding::default(), 6)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn corners_map_exactly_for_every_series() {
        let geo = geometry();
        let data = ChartData::default();
        assert!(data.is_aligned());
        for key in SeriesKey::ALL {
            assert_eq!(data.series(key).values.len(), 6);
        }
        assert!(close(geo.x_at(0), 18.0));
        assert!(close(geo.x_at(5), 18.0 + geo.inner_width()));
        assert!(close(geo.y_at(100.0), 18.0));
        assert!(close(geo.y_at(0.0), 18.0 + geo.inner_height()));
        assert!(close(geo.inner_width(), 686.0));
        assert!(close(geo.inner_height(), 212.0));
    }

    #[test]
    fn line_and_area_paths() {
        let geo = geometry();
        let line = geo.line_path(&[0, 100]);
        assert_eq!(line, "M 18.00 230.00 L 155.20 18.00");
        let area = geo.area_path(&[0, 100]);
        assert!(area.starts_with(&line));
        assert!(area.ends_with("L 704.00 230.00 L 18.00 230.00 Z"));
    }

    #[test]
    fn centre_of_stage_rounds_half_up() {
        let geo = geometry();
        assert_eq!(geo.nearest_index(300.0, 0.0, 600.0), 3);
        assert_eq!(geo.nearest_index(299.9, 0.0, 600.0), 2);
        assert_eq!(geo.nearest_index(400.0, 100.0, 600.0), 3);
    }

    #[test]
    fn pointer_outside_stage_is_clamped() {
        let geo = geometry();
        assert_eq!(geo.nearest_index(-50.0, 0.0, 600.0), 0);
        assert_eq!(geo.nearest_index(900.0, 0.0, 600.0), 5);
        assert_eq!(geo.nearest_index(10.0, 0.0, 0.0), 5);
    }

    #[test]
    fn tooltip_stays_inside_stage() {
        assert_eq!(tooltip_anchor((5.0, 2.0), (0.0, 0.0), 400.0), (12.0, 14.0));
        assert_eq!(tooltip_anchor((399.0, 80.0), (0.0, 0.0), 400.0), (388.0, 80.0));
        assert_eq!(tooltip_anchor((150.0, 60.0), (100.0, 20.0), 400.0), (50.0, 40.0));
    }

    #[test]
    fn grid_rows_span_inner_height() {
        let rows = geometry().grid_rows(4);
        assert_eq!(rows.len(), 5);
        assert!(close(rows[0], 18.0));
        assert!(close(rows[4], 230.0));
        assert!(geometry().grid_rows(0).is_empty());
    }

    #[test]
    fn idle_sweep_covers_range() {
        assert_eq!(idle_index(0.0, 900.0, 5), 3);
        let quarter = 900.0 * std::f64::consts::FRAC_PI_2;
        assert_eq!(idle_index(quarter, 900.0, 5), 5);
        assert_eq!(idle_index(3.0 * quarter, 900.0, 5), 0);
    }

    #[test]
    fn idle_steps_only_on_change_and_when_idle() {
        let mut model = ChartModel::new(ChartData::default(), geometry());
        assert_eq!(model.idle_step(0.0, 900.0), Some(3));
        assert_eq!(model.idle_step(1.0, 900.0), None);
        model.pointer_move(10.0, 0.0, 600.0);
        assert_eq!(model.idle_step(900.0 * std::f64::consts::FRAC_PI_2, 900.0), None);
        assert_eq!(model.pointer_leave(), 5);
        assert!(!model.engaged());
        assert_eq!(model.idle_step(900.0 * std::f64::consts::FRAC_PI_2, 900.0), Some(5));
    }

    #[test]
    fn highlight_formats_readouts() {
        let mut model = ChartModel::new(ChartData::default(), geometry());
        let hl = model.highlight(2);
        assert_eq!(hl.value, 45);
        assert_eq!(hl.kpi_label, "Выручка • Мес 3");
        assert_eq!(hl.tooltip_title, "Мес 3");
        assert_eq!(hl.tooltip_text, "Выручка: +45%");
        assert!(model.select(SeriesKey::Roi));
        assert!(!model.select(SeriesKey::Roi));
        assert_eq!(model.highlight(99).value, 71);
        assert_eq!(model.readout(71), "+71%");
    }

    #[test]
    fn series_keys_round_trip_legend_attribute() {
        assert_eq!(SeriesKey::parse("leads"), Some(SeriesKey::Leads));
        assert_eq!(SeriesKey::parse("nope"), None);
    }

    #[test]
    fn markers_follow_active_series() {
        let mut model = ChartModel::new(ChartData::default(), geometry());
        model.select(SeriesKey::Leads);
        let markers = model.markers();
        assert_eq!(markers.len(), 6);
        assert!(close(markers[0].0, 18.0));
        assert!(close(markers[5].1, geometry().y_at(78.0)));
    }
}
