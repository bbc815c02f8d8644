//! Push client implementation

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::Configuration;
use crate::encode;
use crate::error::{PushError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::widget::*;

/// Response envelope returned by the push service
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Value,
    #[serde(default)]
    error: Option<Value>,
}

impl Envelope {
    /// `false`, `null` and a missing field count as failure
    fn is_success(&self) -> bool {
        !matches!(self.success, Value::Null | Value::Bool(false))
    }

    fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Client bound to a single widget
///
/// Every method performs one synchronous POST and either returns `Ok(())` or
/// the first failure. There are no retries.
#[derive(Clone)]
pub struct PushClient {
    widget_key: String,
    config: Arc<Configuration>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PushClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushClient")
            .field("widget_key", &self.widget_key)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PushClient {
    /// Create a client using the installed process-wide configuration
    ///
    /// Without an installed configuration every push fails with
    /// [`PushError::Configuration`].
    pub fn new(widget_key: impl Into<String>) -> Result<Self> {
        let config = Configuration::installed().unwrap_or_default();
        Self::with_config(widget_key, config)
    }

    /// Create a client with an explicit configuration
    pub fn with_config(widget_key: impl Into<String>, config: Arc<Configuration>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(widget_key, config, transport))
    }

    /// Create a client that sends through the given transport
    pub fn with_transport(
        widget_key: impl Into<String>,
        config: Arc<Configuration>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            widget_key: widget_key.into(),
            config,
            transport,
        }
    }

    /// Key of the widget this client pushes to
    pub fn widget_key(&self) -> &str {
        &self.widget_key
    }

    /// Configuration used for every push
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Push a raw payload to the widget
    ///
    /// Sends `{"api_key": ..., "data": payload}` and decodes the
    /// `{"success": bool, "error": string}` envelope.
    #[instrument(skip(self, payload), fields(widget = %self.widget_key))]
    pub fn push(&self, payload: Value) -> Result<()> {
        if !self.config.has_api_key() {
            return Err(PushError::api_key_not_configured());
        }

        let url = self.config.send_url(&self.widget_key)?;
        debug!("Pushing to {}", url);

        let body = json!({
            "api_key": self.config.api_key,
            "data": payload,
        });
        let response = self.transport.post_json(&url, &body)?;

        let envelope: Envelope = serde_json::from_str(&response)?;
        if !envelope.is_success() {
            let message = envelope.error_message();
            warn!(error = %message, "push rejected");
            return Err(PushError::Api(message));
        }

        debug!("push accepted");
        Ok(())
    }

    /// Encode and push any widget update
    #[instrument(skip(self, update), fields(widget = %self.widget_key, kind = update.type_name()))]
    pub fn push_update(&self, update: &WidgetUpdate) -> Result<()> {
        let payload = encode::encode(update)?;
        self.push(payload)
    }

    // =========================================================================
    // Widget Types
    // =========================================================================

    /// Number widget with a secondary (previous) value
    ///
    /// `extra` keys are merged into the top level of the payload.
    pub fn number_and_secondary_value(
        &self,
        value: f64,
        previous_value: f64,
        extra: Map<String, Value>,
    ) -> Result<()> {
        self.push(encode::number_and_secondary(&NumberAndSecondary {
            value,
            previous_value,
            extra,
        })?)
    }

    /// Text widget
    pub fn text(&self, items: Vec<TextItem>) -> Result<()> {
        self.push(encode::text_list(&TextList { items }))
    }

    /// RAG widget; values and labels in red, amber, green order
    pub fn rag(&self, values: [f64; 3], labels: [&str; 3]) -> Result<()> {
        self.push(encode::rag(&Rag::new(values, labels))?)
    }

    /// Line chart widget
    pub fn line(
        &self,
        values: Vec<f64>,
        colour: Option<&str>,
        x_axis_label: Option<&str>,
        y_axis_label: Option<&str>,
    ) -> Result<()> {
        self.push(encode::line(&Line {
            values,
            colour: colour.map(str::to_string),
            x_axis_label: x_axis_label.map(str::to_string),
            y_axis_label: y_axis_label.map(str::to_string),
        })?)
    }

    /// Pie chart widget
    pub fn pie(&self, items: Vec<PieItem>) -> Result<()> {
        self.push(encode::pie(&Pie { items })?)
    }

    /// Geckometer (gauge) widget
    pub fn geckometer(&self, value: f64, min: f64, max: f64) -> Result<()> {
        self.push(encode::geckometer(&Geckometer { value, min, max })?)
    }

    /// Funnel widget
    pub fn funnel(&self, items: Vec<FunnelItem>, reverse: bool, hide_percentage: bool) -> Result<()> {
        self.push(encode::funnel(&Funnel {
            items,
            reverse,
            hide_percentage,
        })?)
    }

    /// Highcharts pie chart
    pub fn highcharts_pie(&self, chart: &HighchartsPie) -> Result<()> {
        self.push(encode::highcharts_pie(chart)?)
    }

    /// Highcharts stacked bar chart
    pub fn highcharts_stacked_bar(&self, chart: &HighchartsStackedBar) -> Result<()> {
        self.push(encode::highcharts_stacked_bar(chart)?)
    }

    /// Highcharts chart with two pie rings
    pub fn highcharts_two_pie(&self, chart: &HighchartsTwoPie) -> Result<()> {
        self.push(encode::highcharts_two_pie(chart)?)
    }

    /// Caller-built Highcharts configuration
    pub fn highcharts_custom(&self, raw: Value) -> Result<()> {
        self.push(encode::highcharts_custom(&HighchartsCustom { raw })?)
    }
}
