//! Highcharts configuration builders
//!
//! The remote widget renders a Highcharts configuration given as script
//! object-literal text. The configurations carry `formatter` functions, so
//! they are templated text rather than JSON. That text is opaque here: it is
//! never parsed or run, only transported.
//!
//! All three charts share the dashboard's dark theme: transparent background,
//! light grey titles, credits and animation disabled.

use crate::encode;
use crate::error::Result;
use crate::template::{escape_script_string, json_literal, Template};
use crate::widget::{HighchartsPie, HighchartsStackedBar, HighchartsTwoPie};

/// Palette used by the stacked bar chart unless the caller supplies one
pub const DEFAULT_COLORS: [&str; 10] = [
    "#2f7ed8", "#0d233a", "#8bbc21", "#910000", "#1aadce", "#492970", "#f28f43", "#77a1e5",
    "#c42525", "#a6c96a",
];

const TITLE_STYLE: &str = "{
        color: 'rgb(211, 212, 212)',
        fontWeight: 'normal',
        fontSize: '2.5em',
        fontFamily: 'Helvetica, Arial, sans-serif'
    }";

const PIE_TEMPLATE: Template = Template::new(
    "{
    chart: {
        backgroundColor: 'rgba(255, 255, 255, 0)',
        plotBackgroundColor: null,
        plotBorderWidth: null,
        plotShadow: false
    },
    credits: {
        enabled: false
    },
    title: {
        text: '{{title}}',
        style: {{title_style}}
    },
    plotOptions: {
        pie: {
            animation: false,
            allowPointSelect: true,
            cursor: 'pointer',
            dataLabels: {
                enabled: true,
                color: '#ffffff',
                formatter: function() {
                    return '<b>'+ this.point.name +'</b>: '+ this.y;
                },
                style: {
                    fontSize: '1.5em'
                }
            }
        }
    },
    series: [{
        type: 'pie',
        data: {{data}}
    }]
}",
);

const STACKED_BAR_TEMPLATE: Template = Template::new(
    "{
    chart: {
        backgroundColor: 'rgba(255, 255, 255, 0)',
        type: 'bar'
    },
    colors: {{colors}},
    credits: {
        enabled: false
    },
    title: {
        text: '{{title}}',
        style: {{title_style}}
    },
    xAxis: {
        categories: {{categories}},
        labels: {
            style: {
                color: 'rgb(211, 212, 212)'
            }
        }
    },
    yAxis: {
        allowDecimals: false,
        min: 0,
        title: {
            text: 'Count',
            style: {
                color: 'rgb(211, 212, 212)'
            }
        },
        labels: {
            style: {
                color: 'rgb(211, 212, 212)'
            }
        }
    },
    legend: {
        backgroundColor: 'rgba(255, 255, 255, 0)',
        reversed: true,
        align: 'center',
        verticalAlign: 'bottom',
        itemStyle: {
            color: 'rgb(211, 212, 212)',
            fontWeight: 'bold'
        }
    },
    plotOptions: {
        bar: {
            animation: false
        },
        series: {
            stacking: 'normal'
        }
    },
    series: {{series}}
}",
);

const TWO_PIE_TEMPLATE: Template = Template::new(
    "{
    chart: {
        type: 'pie',
        backgroundColor: 'rgba(255, 255, 255, 0)'
    },
    credits: {
        enabled: false
    },
    title: {
        text: '{{title}}',
        style: {{title_style}}
    },
    yAxis: {
        title: {
            text: '{{title}}'
        }
    },
    legend: {
        backgroundColor: 'rgba(255, 255, 255, 0)',
        reversed: true,
        align: 'left',
        verticalAlign: 'bottom',
        itemMarginTop: 15,
        itemMarginBottom: 15,
        layout: 'vertical',
        itemStyle: {
            color: 'rgb(211, 212, 212)',
            fontWeight: 'bold'
        }
    },
    plotOptions: {
        pie: {
            animation: false,
            shadow: false,
            center: ['50%', '50%'],
            showInLegend: true
        }
    },
    tooltip: {
        valueSuffix: ' alerts'
    },
    series: [{
        name: '{{inner_name}}',
        data: {{inner_data}},
        size: '60%',
        showInLegend: true,
        dataLabels: {
            formatter: function() {
                return this.y;
            },
            color: 'white',
            distance: -40
        }
    }, {
        name: '{{outer_name}}',
        showInLegend: false,
        data: {{outer_data}},
        size: '90%',
        innerSize: '70%',
        dataLabels: {
            enabled: true,
            color: '#eeeeee',
            connectorColor: '#eeeeee',
            formatter: function() {
                return this.y > 1 ? '<b>'+ this.point.name +':</b> '+ this.y : null;
            }
        }
    }]
}",
);

/// Pie chart with one `[label, value]` point per item
pub fn pie(chart: &HighchartsPie) -> Result<String> {
    let data = chart
        .items
        .iter()
        .map(|point| Ok((point.label.as_str(), encode::number(point.value)?)))
        .collect::<Result<Vec<_>>>()?;

    let title = escape_script_string(&chart.title);
    let data = json_literal(&data)?;

    PIE_TEMPLATE.render(&[
        ("title", title.as_str()),
        ("title_style", TITLE_STYLE),
        ("data", data.as_str()),
    ])
}

/// Stacked horizontal bar chart
pub fn stacked_bar(chart: &HighchartsStackedBar) -> Result<String> {
    let colors = match &chart.colors {
        Some(colors) => json_literal(colors)?,
        None => json_literal(&DEFAULT_COLORS)?,
    };

    let title = escape_script_string(&chart.title);
    let categories = json_literal(&chart.categories)?;
    let series = json_literal(&chart.series)?;

    STACKED_BAR_TEMPLATE.render(&[
        ("title", title.as_str()),
        ("title_style", TITLE_STYLE),
        ("colors", colors.as_str()),
        ("categories", categories.as_str()),
        ("series", series.as_str()),
    ])
}

/// Inner pie ring plus outer donut ring
pub fn two_pie(chart: &HighchartsTwoPie) -> Result<String> {
    let [inner, outer] = &chart.series;

    let title = escape_script_string(&chart.title);
    let inner_name = escape_script_string(&inner.name);
    let inner_data = json_literal(&inner.data)?;
    let outer_name = escape_script_string(&outer.name);
    let outer_data = json_literal(&outer.data)?;

    TWO_PIE_TEMPLATE.render(&[
        ("title", title.as_str()),
        ("title_style", TITLE_STYLE),
        ("inner_name", inner_name.as_str()),
        ("inner_data", inner_data.as_str()),
        ("outer_name", outer_name.as_str()),
        ("outer_data", outer_data.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::widget::{ChartPoint, ChartSeries};

    #[test]
    fn test_pie_chart() {
        let chart = pie(&HighchartsPie {
            title: "Browsers".to_string(),
            items: vec![ChartPoint::new("Firefox", 45.0), ChartPoint::new("Chrome", 55.5)],
        })
        .unwrap();

        let expected = r#"{
    chart: {
        backgroundColor: 'rgba(255, 255, 255, 0)',
        plotBackgroundColor: null,
        plotBorderWidth: null,
        plotShadow: false
    },
    credits: {
        enabled: false
    },
    title: {
        text: 'Browsers',
        style: {
        color: 'rgb(211, 212, 212)',
        fontWeight: 'normal',
        fontSize: '2.5em',
        fontFamily: 'Helvetica, Arial, sans-serif'
    }
    },
    plotOptions: {
        pie: {
            animation: false,
            allowPointSelect: true,
            cursor: 'pointer',
            dataLabels: {
                enabled: true,
                color: '#ffffff',
                formatter: function() {
                    return '<b>'+ this.point.name +'</b>: '+ this.y;
                },
                style: {
                    fontSize: '1.5em'
                }
            }
        }
    },
    series: [{
        type: 'pie',
        data: [["Firefox",45],["Chrome",55.5]]
    }]
}"#;
        assert_eq!(chart, expected);
    }

    #[test]
    fn test_pie_chart_rejects_non_finite_value() {
        let err = pie(&HighchartsPie {
            title: "Browsers".to_string(),
            items: vec![ChartPoint::new("Firefox", f64::NAN)],
        })
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_pie_title_escaped() {
        let chart = pie(&HighchartsPie {
            title: "Bob's \"best\"\nchart".to_string(),
            items: vec![],
        })
        .unwrap();

        assert!(chart.contains(r#"text: 'Bob\'s \"best\"\nchart'"#));
        assert!(chart.contains("data: []"));
    }

    #[test]
    fn test_stacked_bar_default_palette() {
        let chart = stacked_bar(&HighchartsStackedBar {
            title: "Tickets".to_string(),
            categories: vec!["Open".to_string(), "Closed".to_string()],
            series: vec![ChartSeries::new("Alice", vec![json!(1), json!(2)])],
            colors: None,
        })
        .unwrap();

        assert!(chart.contains("type: 'bar'"));
        assert!(chart.contains(
            r##"colors: ["#2f7ed8","#0d233a","#8bbc21","#910000","#1aadce","#492970","#f28f43","#77a1e5","#c42525","#a6c96a"]"##
        ));
        assert!(chart.contains(r#"categories: ["Open","Closed"]"#));
        assert!(chart.contains(r#"series: [{"name":"Alice","data":[1,2]}]"#));
        assert!(chart.contains("stacking: 'normal'"));
    }

    #[test]
    fn test_stacked_bar_custom_palette() {
        let chart = stacked_bar(&HighchartsStackedBar {
            title: "Tickets".to_string(),
            categories: vec![],
            series: vec![],
            colors: Some(vec!["#000000".to_string()]),
        })
        .unwrap();

        assert!(chart.contains(r##"colors: ["#000000"]"##));
        assert!(!chart.contains("#2f7ed8"));
    }

    #[test]
    fn test_two_pie_rings() {
        let chart = two_pie(&HighchartsTwoPie {
            title: "Alerts".to_string(),
            series: [
                ChartSeries::new("Severity", vec![json!(["High", 3])]),
                ChartSeries::new("Team's", vec![json!(["Ops", 2])]),
            ],
        })
        .unwrap();

        assert!(chart.contains("name: 'Severity',\n        data: [[\"High\",3]],\n        size: '60%'"));
        assert!(chart.contains("name: 'Team\\'s'"));
        assert!(chart.contains("innerSize: '70%'"));
        assert!(chart.contains("valueSuffix: ' alerts'"));
        assert_eq!(chart.matches("text: 'Alerts'").count(), 2);
    }
}
