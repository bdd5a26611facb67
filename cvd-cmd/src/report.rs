//! Plain-text renderings of the dashboard views.

use cvd_db::views::{
    MapView, SummaryView, TimeSeriesView, CASES_LABEL, DEATHS_LABEL, SUMMARY_HEADING,
};

pub fn render_summary(summary: &SummaryView) -> String {
    let mut out = format!("{}\n", SUMMARY_HEADING);
    if let Some(date) = &summary.date {
        out.push_str(&format!("as of {}\n", date));
    }
    out.push_str(&format!("{}: {}\n", CASES_LABEL, summary.cases_display()));
    out.push_str(&format!("{}: {}\n", DEATHS_LABEL, summary.deaths_display()));
    out
}

/// One line per series: date span and the latest defined smoothed value.
pub fn render_series(view: &TimeSeriesView) -> String {
    let chart = match view {
        TimeSeriesView::Warning { message } => return format!("{}\n", message),
        TimeSeriesView::Chart(chart) => chart,
    };
    let mut out = format!("{}\n", chart.title);
    for series in &chart.series {
        let first = series.points.first().map(|p| p.date.as_str()).unwrap_or("-");
        let last = series.points.last().map(|p| p.date.as_str()).unwrap_or("-");
        let latest = series
            .points
            .iter()
            .rev()
            .find_map(|p| p.value.map(|v| (p.date.as_str(), v)));
        let latest = match latest {
            Some((date, value)) => format!("{:.3} on {}", value, date),
            None => "n/a".to_string(),
        };
        out.push_str(&format!(
            "{}: {} to {} ({} days), latest {}\n",
            series.location,
            first,
            last,
            series.points.len(),
            latest
        ));
    }
    out
}

pub fn render_map(map: &MapView) -> String {
    let mut out = format!("{}\n", map.title);
    if map.regions.is_empty() {
        out.push_str("no regions for this date\n");
    }
    for region in &map.regions {
        out.push_str(&format!(
            "{}\t{}\t{:.2}\n",
            region.iso_code, region.location, region.value
        ));
    }
    out
}
