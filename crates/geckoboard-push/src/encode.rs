//! Widget payload encoders
//!
//! Each encoder maps a typed update to the `data` object the push service
//! expects for that widget type. Encoders are pure; sending is left to
//! [`PushClient`](crate::PushClient).
//!
//! Numbers go through [`number`]: whole values are sent as integers, and NaN
//! or infinite values are rejected rather than sent as `null`.

use serde_json::{json, Map, Value};

use crate::chart;
use crate::error::{PushError, Result};
use crate::widget::*;

/// Largest integer an `f64` holds exactly (2^53 - 1)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Encode any widget update into its wire payload
pub fn encode(update: &WidgetUpdate) -> Result<Value> {
    match update {
        WidgetUpdate::NumberAndSecondary(u) => number_and_secondary(u),
        WidgetUpdate::TextList(u) => Ok(text_list(u)),
        WidgetUpdate::Rag(u) => rag(u),
        WidgetUpdate::Line(u) => line(u),
        WidgetUpdate::Pie(u) => pie(u),
        WidgetUpdate::Geckometer(u) => geckometer(u),
        WidgetUpdate::Funnel(u) => funnel(u),
        WidgetUpdate::HighchartsPie(u) => highcharts_pie(u),
        WidgetUpdate::HighchartsStackedBar(u) => highcharts_stacked_bar(u),
        WidgetUpdate::HighchartsTwoPie(u) => highcharts_two_pie(u),
        WidgetUpdate::HighchartsCustom(u) => highcharts_custom(u),
    }
}

/// Encode a widget value: `5.0` becomes `5`, `2.5` stays `2.5`
///
/// NaN and infinities have no JSON form and fail with
/// [`PushError::InvalidValue`].
pub fn number(value: f64) -> Result<Value> {
    if !value.is_finite() {
        return Err(PushError::InvalidValue(format!(
            "{} is not a finite number",
            value
        )));
    }
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Ok(Value::from(value as i64))
    } else {
        Ok(Value::from(value))
    }
}

fn numbers(values: &[f64]) -> Result<Vec<Value>> {
    values.iter().map(|value| number(*value)).collect()
}

/// `{item: [{text:"", value}, {text:"", value: previous}]}` merged with `extra`
pub fn number_and_secondary(update: &NumberAndSecondary) -> Result<Value> {
    let mut payload = Map::new();
    payload.insert(
        "item".to_string(),
        json!([
            { "text": "", "value": number(update.value)? },
            { "text": "", "value": number(update.previous_value)? },
        ]),
    );
    // shallow merge: extra keys win
    for (key, value) in &update.extra {
        payload.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(payload))
}

pub fn text_list(update: &TextList) -> Value {
    let items: Vec<Value> = update
        .items
        .iter()
        .map(|item| json!({ "text": item.text, "type": item.severity.code() }))
        .collect();
    json!({ "item": items })
}

pub fn rag(update: &Rag) -> Result<Value> {
    let items = update
        .values
        .iter()
        .zip(&update.labels)
        .map(|(value, label)| Ok(json!({ "value": number(*value)?, "text": label })))
        .collect::<Result<Vec<Value>>>()?;
    Ok(json!({ "item": items }))
}

/// Unset settings are sent as `null`
pub fn line(update: &Line) -> Result<Value> {
    Ok(json!({
        "item": numbers(&update.values)?,
        "settings": {
            "axisx": update.x_axis_label,
            "axisy": update.y_axis_label,
            "colour": update.colour,
        }
    }))
}

/// Missing labels and colours are sent as explicit `null`
pub fn pie(update: &Pie) -> Result<Value> {
    let items = update
        .items
        .iter()
        .map(|item| {
            Ok(json!({
                "value": number(item.value)?,
                "label": item.label,
                "colour": item.colour,
            }))
        })
        .collect::<Result<Vec<Value>>>()?;
    Ok(json!({ "item": items }))
}

pub fn geckometer(update: &Geckometer) -> Result<Value> {
    Ok(json!({
        "item": number(update.value)?,
        "min": { "value": number(update.min)? },
        "max": { "value": number(update.max)? },
    }))
}

/// `type` and `percentage` keys are present only when their flag is set
pub fn funnel(update: &Funnel) -> Result<Value> {
    let items = update
        .items
        .iter()
        .map(|item| Ok(json!({ "value": number(item.value)?, "label": item.label })))
        .collect::<Result<Vec<Value>>>()?;

    let mut payload = Map::new();
    payload.insert("item".to_string(), Value::Array(items));
    if update.reverse {
        payload.insert("type".to_string(), json!("reverse"));
    }
    if update.hide_percentage {
        payload.insert("percentage".to_string(), json!("hide"));
    }
    Ok(Value::Object(payload))
}

pub fn highcharts_pie(update: &HighchartsPie) -> Result<Value> {
    Ok(Value::String(chart::pie(update)?))
}

pub fn highcharts_stacked_bar(update: &HighchartsStackedBar) -> Result<Value> {
    Ok(Value::String(chart::stacked_bar(update)?))
}

pub fn highcharts_two_pie(update: &HighchartsTwoPie) -> Result<Value> {
    Ok(Value::String(chart::two_pie(update)?))
}

/// Strings pass through as-is; any other structure is sent as its JSON text
pub fn highcharts_custom(update: &HighchartsCustom) -> Result<Value> {
    match &update.raw {
        Value::String(_) => Ok(update.raw.clone()),
        raw => Ok(Value::String(serde_json::to_string(raw)?)),
    }
}
