//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions are split across `assets/js/*.js` and loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module provides safe Rust wrappers that serialize data and call those globals.
//!
//! It also owns the browser side of the network: [`fetch_csv`] downloads the
//! dataset with the Fetch API and hands back the decoded CSV text.

use cvd_owid::compression::{decode_body, is_gzip_path};
use cvd_owid::error::{OwidError, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static MULTI_LINE_CHART_JS: &str = include_str!("../assets/js/multi-line-chart.js");
static CHOROPLETH_JS: &str = include_str!("../assets/js/choropleth.js");

/// Global functions promoted to `window` once the scripts are evaluated.
const CHART_FUNCTIONS: [&str; 6] = [
    "renderMultiLineChart",
    "renderChoropleth",
    "destroyChart",
    "initTooltip",
    "showTooltip",
    "hideTooltip",
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('CVD JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote `text` as a JS string literal.
///
/// JSON string syntax is a subset of JS string syntax, so location names with
/// quotes or apostrophes (`Cote d'Ivoire`) survive the trip.
fn js_string_literal(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart JS files define functions like `renderMultiLineChart(...)` via
/// `function` declarations. To make them globally accessible (not
/// block-scoped inside the setInterval callback), they are evaluated at
/// global scope via an indirect `eval()` once D3 is ready, then each function
/// is promoted to `window.*`. Calling this more than once is harmless.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, MULTI_LINE_CHART_JS, CHOROPLETH_JS].join("\n");

    let store_js = format!(
        "if (!window.__cvdChartsReady) {{ window.__cvdChartScripts = {}; }}",
        js_string_literal(&all_js)
    );
    let _ = js_sys::eval(&store_js);

    let promote = CHART_FUNCTIONS
        .iter()
        .map(|f| format!("if (typeof {f} !== 'undefined') window.{f} = {f};"))
        .collect::<Vec<_>>()
        .join("\n");

    let init_js = format!(
        r#"
        (function() {{
            if (window.__cvdChartsReady || window.__cvdChartsPolling) return;
            window.__cvdChartsPolling = true;
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__cvdChartScripts);
                    delete window.__cvdChartScripts;
                    {promote}
                    window.__cvdChartsReady = true;
                    console.log('CVD charts initialized');
                }}
            }}, 100);
        }})();
        "#
    );
    let _ = js_sys::eval(&init_js);
}

/// Build the JS that waits for the scripts and the container, then calls
/// `window.<function>(container, data, config)`.
fn render_script(function: &str, container_id: &str, data_json: &str, config_json: &str) -> String {
    let container = js_string_literal(container_id);
    let data = js_string_literal(data_json);
    let config = js_string_literal(config_json);
    format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__cvdChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({container})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({container}, {data}, {config});
                    }} catch(e) {{ console.error('[CVD] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#
    )
}

/// Render the smoothed death-rate chart, one line per series.
///
/// `data_json` is an array of `{location, points: [{date, value}]}`; a null
/// `value` breaks the line. Uses a polling loop to wait for D3.js to load,
/// chart scripts to initialize, and the container DOM element to exist.
pub fn render_multi_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&render_script(
        "renderMultiLineChart",
        container_id,
        data_json,
        config_json,
    ));
}

/// Render the vaccination choropleth.
///
/// `data_json` is an array of `{iso_code, location, value}`; `config_json`
/// carries the title, colour range and the world GeoJSON URL.
pub fn render_choropleth(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&render_script(
        "renderChoropleth",
        container_id,
        data_json,
        config_json,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById({}); if (el) el.innerHTML = '';",
        js_string_literal(container_id)
    ));
}

fn js_error(context: &str, err: JsValue) -> OwidError {
    OwidError::Fetch(format!("{}: {:?}", context, err))
}

/// Download `url` with the browser Fetch API.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let window = web_sys::window().ok_or_else(|| OwidError::Fetch("no window object".to_string()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| js_error("fetch rejected", e))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| js_error("unexpected fetch result", e))?;
    if !response.ok() {
        return Err(OwidError::ResponseStatus {
            status: response.status(),
            url: url.to_string(),
        });
    }
    let buffer = response
        .array_buffer()
        .map_err(|e| js_error("body unavailable", e))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| js_error("body read failed", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Download `url` and return its text, gunzipping `.gz` resources.
///
/// A `.gz` file served with `Content-Encoding: gzip` arrives already
/// inflated, so the gzip magic bytes decide.
pub async fn fetch_csv(url: &str) -> Result<String> {
    log::info!("[CVD] fetching {}", url);
    let bytes = fetch_bytes(url).await?;
    log::info!("[CVD] received {} bytes from {}", bytes.len(), url);
    let gzipped = is_gzip_path(url) && bytes.starts_with(&[0x1f, 0x8b]);
    decode_body(bytes, gzipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_literal_escapes_quotes() {
        assert_eq!(js_string_literal("Cote d'Ivoire"), "\"Cote d'Ivoire\"");
        assert_eq!(js_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(js_string_literal("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn test_render_script_passes_json_as_strings() {
        let script = render_script("renderChoropleth", "map", r#"[{"location":"Cote d'Ivoire"}]"#, "{}");
        assert!(script.contains("window.renderChoropleth(\"map\", \"[{\\\"location\\\":\\\"Cote d'Ivoire\\\"}]\", \"{}\")"));
        assert!(script.contains("document.getElementById(\"map\")"));
    }

    #[test]
    fn test_choropleth_shares_one_geojson_request() {
        assert_eq!(CHOROPLETH_JS.matches("d3.json(").count(), 1);
        assert!(CHOROPLETH_JS.contains("if (!__cvdWorldGeoPromise) {"));
        // a stale render must not draw over a newer one
        assert!(CHOROPLETH_JS.contains("if (render === __cvdChoroplethRender) draw(world);"));
    }
}
