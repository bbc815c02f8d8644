//! Typed widget update requests
//!
//! One request type per supported widget. [`WidgetUpdate`] wraps them all and
//! deserializes from a tagged JSON/YAML object (`{"type": "geckometer", ...}`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Native widgets
// =============================================================================

/// Number widget showing a value and the previous value for comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberAndSecondary {
    pub value: f64,
    pub previous_value: f64,
    /// Extra top-level payload keys; these may override `item`
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl NumberAndSecondary {
    pub fn new(value: f64, previous_value: f64) -> Self {
        Self {
            value,
            previous_value,
            extra: Map::new(),
        }
    }

    /// Add an extra top-level payload key
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Severity of a text list item
///
/// Deserialization is total: `null`, non-string values and unrecognised
/// names all map to `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<Value>")]
pub enum Severity {
    #[default]
    Default,
    Info,
    Alert,
}

impl Severity {
    /// Wire code: alert → 1, info → 2, everything else → 0
    pub fn code(self) -> u8 {
        match self {
            Severity::Alert => 1,
            Severity::Info => 2,
            Severity::Default => 0,
        }
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        match name {
            "alert" => Severity::Alert,
            "info" => Severity::Info,
            _ => Severity::Default,
        }
    }
}

impl From<Option<Value>> for Severity {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(name)) => Severity::from(name.as_str()),
            _ => Severity::Default,
        }
    }
}

/// A single line of a text widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    #[serde(default, rename = "type")]
    pub severity: Severity,
}

impl TextItem {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Default)
    }
}

/// Text widget: an ordered list of messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextList {
    pub items: Vec<TextItem>,
}

/// Red/amber/green status widget
///
/// Exactly three values and three labels, in red, amber, green order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rag {
    pub values: [f64; 3],
    pub labels: [String; 3],
}

impl Rag {
    pub fn new(values: [f64; 3], labels: [&str; 3]) -> Self {
        Self {
            values,
            labels: labels.map(str::to_string),
        }
    }
}

/// Line chart widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub values: Vec<f64>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default)]
    pub y_axis_label: Option<String>,
}

/// A slice of a pie widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieItem {
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub colour: Option<String>,
}

impl PieItem {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            label: None,
            colour: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }
}

/// Pie chart widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pie {
    pub items: Vec<PieItem>,
}

/// Gauge widget with a value between `min` and `max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geckometer {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// A stage of a funnel widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelItem {
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl FunnelItem {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// Funnel widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Funnel {
    pub items: Vec<FunnelItem>,
    /// Flip the widget's colours
    #[serde(default)]
    pub reverse: bool,
    /// Hide the percentage value
    #[serde(default)]
    pub hide_percentage: bool,
}

// =============================================================================
// Highcharts widgets
// =============================================================================

/// A labelled data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A named data series; points are passed to the chart unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<Value>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, data: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Highcharts pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighchartsPie {
    pub title: String,
    pub items: Vec<ChartPoint>,
}

/// Highcharts stacked horizontal bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighchartsStackedBar {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Overrides the default palette
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

/// Highcharts chart with an inner and an outer pie ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighchartsTwoPie {
    pub title: String,
    /// `[inner, outer]`
    pub series: [ChartSeries; 2],
}

/// Caller-built Highcharts configuration, forwarded unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighchartsCustom {
    pub raw: Value,
}

// =============================================================================
// Update
// =============================================================================

/// An update for any supported widget type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetUpdate {
    NumberAndSecondary(NumberAndSecondary),
    TextList(TextList),
    Rag(Rag),
    Line(Line),
    Pie(Pie),
    Geckometer(Geckometer),
    Funnel(Funnel),
    HighchartsPie(HighchartsPie),
    HighchartsStackedBar(HighchartsStackedBar),
    HighchartsTwoPie(HighchartsTwoPie),
    HighchartsCustom(HighchartsCustom),
}

impl WidgetUpdate {
    /// Widget type name as used in the tagged representation
    pub fn type_name(&self) -> &'static str {
        match self {
            WidgetUpdate::NumberAndSecondary(_) => "number_and_secondary",
            WidgetUpdate::TextList(_) => "text_list",
            WidgetUpdate::Rag(_) => "rag",
            WidgetUpdate::Line(_) => "line",
            WidgetUpdate::Pie(_) => "pie",
            WidgetUpdate::Geckometer(_) => "geckometer",
            WidgetUpdate::Funnel(_) => "funnel",
            WidgetUpdate::HighchartsPie(_) => "highcharts_pie",
            WidgetUpdate::HighchartsStackedBar(_) => "highcharts_stacked_bar",
            WidgetUpdate::HighchartsTwoPie(_) => "highcharts_two_pie",
            WidgetUpdate::HighchartsCustom(_) => "highcharts_custom",
        }
    }
}

macro_rules! impl_from_update {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for WidgetUpdate {
                fn from(update: $variant) -> Self {
                    WidgetUpdate::$variant(update)
                }
            }
        )*
    };
}

impl_from_update!(
    NumberAndSecondary,
    TextList,
    Rag,
    Line,
    Pie,
    Geckometer,
    Funnel,
    HighchartsPie,
    HighchartsStackedBar,
    HighchartsTwoPie,
    HighchartsCustom,
);
