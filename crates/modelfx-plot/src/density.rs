//! Overlay density chart construction: validate arguments, reshape frames
//! into labeled layers.
//!
//! The output is a chart description, not pixels. A renderer draws one
//! density curve per layer, fills it with the layer's color at the shared
//! opacity, and facets by the per-observation facet keys when present.

use serde::Serialize;

use crate::frame::{Column, EvalFrame};

/// Which evaluation run a layer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayerSource {
    Results,
    Baseline,
}

impl LayerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerSource::Results => "Results",
            LayerSource::Baseline => "Baseline",
        }
    }
}

impl std::fmt::Display for LayerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for [`build_density_chart`].
#[derive(Debug, Clone)]
pub struct DensitySpec {
    /// Metric distribution from the evaluated models.
    pub results: Option<EvalFrame>,
    /// Metric distribution from the baseline models.
    pub baseline: Option<EvalFrame>,
    /// Name of the metric column; must exist (numeric) in every supplied frame.
    pub metric: String,
    /// Fill colors for the Results and Baseline layers, in that order.
    pub fills: [String; 2],
    /// Fill opacity, in `[0, 1]`.
    pub alpha: f64,
    /// Optional fixed x-axis range.
    pub x_range: Option<(f64, f64)>,
    /// Optional categorical column to facet by; must exist in every
    /// supplied frame and match the metric column's length.
    pub facet: Option<String>,
}

/// One labeled density layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityLayer {
    pub source: LayerSource,
    pub fill: String,
    /// Metric observations, verbatim from the frame.
    pub values: Vec<f64>,
    /// Per-observation facet key, parallel to `values`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
}

/// Renderable overlay density chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityChart {
    pub metric: String,
    pub layers: Vec<DensityLayer>,
    pub alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<String>,
}

/// Errors from density chart argument validation.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("neither a results nor a baseline frame was supplied")]
    NoInput,

    #[error("{frame} frame has no column {column:?}")]
    MissingColumn { frame: &'static str, column: String },

    #[error("{frame} frame column {column:?} is not {expected}")]
    WrongColumnKind {
        frame: &'static str,
        column: String,
        expected: &'static str,
    },

    #[error("{frame} frame column {column:?} has no observations")]
    EmptyColumn { frame: &'static str, column: String },

    #[error("{frame} frame facet column {column:?} has {got} values, metric has {expected}")]
    FacetLengthMismatch {
        frame: &'static str,
        column: String,
        got: usize,
        expected: usize,
    },

    #[error("opacity {0} is outside [0, 1]")]
    InvalidOpacity(f64),

    #[error("x-axis range [{lo}, {hi}] is not a finite increasing interval")]
    InvalidRange { lo: f64, hi: f64 },
}

/// Validate a [`DensitySpec`] and reshape it into a [`DensityChart`].
///
/// At least one frame must be supplied; a layer is produced for each one
/// that is, Results first. The metric column must be present, numeric, and
/// non-empty in every supplied frame, and the facet column (when requested)
/// present, categorical, and parallel to it.
pub fn build_density_chart(spec: &DensitySpec) -> Result<DensityChart, PlotError> {
    if spec.results.is_none() && spec.baseline.is_none() {
        return Err(PlotError::NoInput);
    }
    if !(0.0..=1.0).contains(&spec.alpha) {
        return Err(PlotError::InvalidOpacity(spec.alpha));
    }
    if let Some((lo, hi)) = spec.x_range {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(PlotError::InvalidRange { lo, hi });
        }
    }

    let inputs = [
        (LayerSource::Results, &spec.results, &spec.fills[0]),
        (LayerSource::Baseline, &spec.baseline, &spec.fills[1]),
    ];

    let mut layers = Vec::new();
    for (source, frame, fill) in inputs {
        let Some(frame) = frame else { continue };
        layers.push(build_layer(source, frame, fill, spec)?);
    }

    Ok(DensityChart {
        metric: spec.metric.clone(),
        layers,
        alpha: spec.alpha,
        x_range: spec.x_range,
        facet: spec.facet.clone(),
    })
}

fn build_layer(
    source: LayerSource,
    frame: &EvalFrame,
    fill: &str,
    spec: &DensitySpec,
) -> Result<DensityLayer, PlotError> {
    let name = source.as_str();

    let values = match frame.column(&spec.metric) {
        None => {
            return Err(PlotError::MissingColumn {
                frame: name,
                column: spec.metric.clone(),
            });
        }
        Some(Column::Categorical(_)) => {
            return Err(PlotError::WrongColumnKind {
                frame: name,
                column: spec.metric.clone(),
                expected: "numeric",
            });
        }
        Some(Column::Numeric(v)) => v.clone(),
    };
    if values.is_empty() {
        return Err(PlotError::EmptyColumn {
            frame: name,
            column: spec.metric.clone(),
        });
    }

    let facets = match &spec.facet {
        None => None,
        Some(col) => match frame.column(col) {
            None => {
                return Err(PlotError::MissingColumn {
                    frame: name,
                    column: col.clone(),
                });
            }
            Some(Column::Numeric(_)) => {
                return Err(PlotError::WrongColumnKind {
                    frame: name,
                    column: col.clone(),
                    expected: "categorical",
                });
            }
            Some(Column::Categorical(keys)) => {
                if keys.len() != values.len() {
                    return Err(PlotError::FacetLengthMismatch {
                        frame: name,
                        column: col.clone(),
                        got: keys.len(),
                        expected: values.len(),
                    });
                }
                Some(keys.clone())
            }
        },
    };

    Ok(DensityLayer {
        source,
        fill: fill.to_string(),
        values,
        facets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metric_frame(values: &[f64]) -> EvalFrame {
        let mut frame = EvalFrame::new();
        frame.insert_numeric("rmse", values.to_vec());
        frame
    }

    fn spec(results: Option<EvalFrame>, baseline: Option<EvalFrame>) -> DensitySpec {
        DensitySpec {
            results,
            baseline,
            metric: "rmse".to_string(),
            fills: ["#2c7fb8".to_string(), "#d95f0e".to_string()],
            alpha: 0.5,
            x_range: None,
            facet: None,
        }
    }

    #[test]
    fn both_frames_give_two_layers_results_first() {
        let chart = build_density_chart(&spec(
            Some(metric_frame(&[0.4, 0.5])),
            Some(metric_frame(&[0.6, 0.7])),
        ))
        .unwrap();
        assert_eq!(chart.layers.len(), 2);
        assert_eq!(chart.layers[0].source, LayerSource::Results);
        assert_eq!(chart.layers[0].fill, "#2c7fb8");
        assert_eq!(chart.layers[1].source, LayerSource::Baseline);
        assert_eq!(chart.layers[1].values, vec![0.6, 0.7]);
    }

    #[test]
    fn baseline_only_keeps_baseline_fill() {
        let chart = build_density_chart(&spec(None, Some(metric_frame(&[0.6])))).unwrap();
        assert_eq!(chart.layers.len(), 1);
        assert_eq!(chart.layers[0].source, LayerSource::Baseline);
        assert_eq!(chart.layers[0].fill, "#d95f0e");
    }

    #[test]
    fn no_input_rejected() {
        let err = build_density_chart(&spec(None, None)).unwrap_err();
        assert!(matches!(err, PlotError::NoInput));
    }

    #[test]
    fn opacity_out_of_range_rejected() {
        let mut s = spec(Some(metric_frame(&[0.4])), None);
        s.alpha = 1.2;
        let err = build_density_chart(&s).unwrap_err();
        assert!(matches!(err, PlotError::InvalidOpacity(_)));
    }

    #[test]
    fn degenerate_x_range_rejected() {
        let mut s = spec(Some(metric_frame(&[0.4])), None);
        s.x_range = Some((1.0, 1.0));
        let err = build_density_chart(&s).unwrap_err();
        assert!(matches!(err, PlotError::InvalidRange { .. }));
    }

    #[test]
    fn non_finite_x_range_rejected() {
        for range in [(f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            let mut s = spec(Some(metric_frame(&[0.4])), None);
            s.x_range = Some(range);
            let err = build_density_chart(&s).unwrap_err();
            assert!(matches!(err, PlotError::InvalidRange { .. }));
        }
    }

    #[test]
    fn missing_metric_column_names_the_frame() {
        let mut s = spec(Some(metric_frame(&[0.4])), Some(EvalFrame::new()));
        s.x_range = Some((0.0, 1.0));
        let err = build_density_chart(&s).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Baseline frame has no column \"rmse\""
        );
    }

    #[test]
    fn empty_metric_column_rejected() {
        let err = build_density_chart(&spec(Some(metric_frame(&[])), None)).unwrap_err();
        assert!(matches!(err, PlotError::EmptyColumn { .. }));
    }

    #[test]
    fn facet_keys_carried_per_observation() {
        let mut frame = metric_frame(&[0.4, 0.5]);
        frame.insert_categorical("fold", vec!["a".into(), "b".into()]);
        let mut s = spec(Some(frame), None);
        s.facet = Some("fold".to_string());
        let chart = build_density_chart(&s).unwrap();
        assert_eq!(
            chart.layers[0].facets.as_deref(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(chart.facet.as_deref(), Some("fold"));
    }

    #[test]
    fn categorical_metric_column_rejected() {
        let mut frame = EvalFrame::new();
        frame.insert_categorical("rmse", vec!["low".into(), "high".into()]);
        let err = build_density_chart(&spec(Some(frame), None)).unwrap_err();
        match err {
            PlotError::WrongColumnKind {
                frame,
                column,
                expected,
            } => {
                assert_eq!(frame, "Results");
                assert_eq!(column, "rmse");
                assert_eq!(expected, "numeric");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn numeric_facet_column_rejected() {
        let mut frame = metric_frame(&[0.4, 0.5]);
        frame.insert_numeric("fold", vec![1.0, 2.0]);
        let mut s = spec(Some(frame), None);
        s.facet = Some("fold".to_string());
        let err = build_density_chart(&s).unwrap_err();
        match err {
            PlotError::WrongColumnKind {
                frame,
                column,
                expected,
            } => {
                assert_eq!(frame, "Results");
                assert_eq!(column, "fold");
                assert_eq!(expected, "categorical");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn facet_length_mismatch_rejected() {
        let mut frame = metric_frame(&[0.4, 0.5]);
        frame.insert_categorical("fold", vec!["a".into()]);
        let mut s = spec(Some(frame), None);
        s.facet = Some("fold".to_string());
        let err = build_density_chart(&s).unwrap_err();
        assert!(matches!(err, PlotError::FacetLengthMismatch { .. }));
    }

    #[test]
    fn chart_serializes_without_absent_options() {
        let chart = build_density_chart(&spec(Some(metric_frame(&[0.4])), None)).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["metric"], "rmse");
        assert_eq!(json["layers"][0]["source"], "Results");
        assert!(json.get("x_range").is_none());
        assert!(json.get("facet").is_none());
    }
}
