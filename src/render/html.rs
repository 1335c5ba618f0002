use crate::chart::ScatterChart;
use crate::error::{ProfileError, Result};

/// Render a self-contained HTML page (chart embedded as JSON, drawn as inline SVG).
///
/// The page script is full of braces, so the chart JSON is spliced in by
/// replacing a `__DATA__` marker rather than through `format!()`.
pub fn render_html_chart(chart: &ScatterChart) -> Result<String> {
    let json = serde_json::to_string(chart).map_err(|e| ProfileError::Render(e.to_string()))?;
    // Keep a title like "</script>" from closing the data block early.
    let json = json.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Page Fault Profile</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  h2 { margin: 0; font-size: 18px; }
  .muted { color: #777; font-size: 13px; margin-top: 4px; }
  .main { padding: 12px 16px; }
  .axis { stroke: #333; stroke-width: 1; }
  .grid { stroke: #eee; stroke-width: 1; }
  .tick { font-size: 11px; fill: #555; font-variant-numeric: tabular-nums; }
  .label { font-size: 13px; fill: #222; }
  .point { fill: #1f77b4; }
  .point:hover { fill: #d62728; }
  #readout { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; height: 18px; }
</style>
</head>
<body>
<header>
  <h2 id="title"></h2>
  <div id="subtitle" class="muted"></div>
</header>

<div class="main">
  <div id="readout" class="muted"></div>
  <svg id="plot" width="960" height="600"></svg>
</div>

<script>
// Embedded chart data (JSON object literal)
const DATA = __DATA__;

const W = 960, H = 600;
const M = { left: 80, right: 24, top: 16, bottom: 56 };
const NS = "http://www.w3.org/2000/svg";

function fmt(x) {
  if (Math.abs(x) >= 1000 || Number.isInteger(x)) return String(Math.round(x));
  return x.toPrecision(3);
}

function bounds(values) {
  if (!values.length) return [0, 1];
  let lo = Math.min(...values), hi = Math.max(...values);
  const span = hi - lo;
  const pad = span > 0 ? span * 0.05 : Math.max(Math.abs(lo), 1) * 0.5;
  return [lo - pad, hi + pad];
}

function el(name, attrs, text) {
  const e = document.createElementNS(NS, name);
  for (const [k, v] of Object.entries(attrs)) e.setAttribute(k, v);
  if (text !== undefined) e.textContent = text;
  return e;
}

function render() {
  document.title = DATA.title;
  document.getElementById("title").textContent = DATA.title;
  document.getElementById("subtitle").textContent = DATA.subtitle || "";

  const svg = document.getElementById("plot");
  const [x0, x1] = bounds(DATA.points.map(p => p[0]));
  const [y0, y1] = bounds(DATA.points.map(p => p[1]));
  const sx = x => M.left + (x - x0) / (x1 - x0) * (W - M.left - M.right);
  const sy = y => H - M.bottom - (y - y0) / (y1 - y0) * (H - M.top - M.bottom);

  const TICKS = 8;
  for (let i = 0; i <= TICKS; i++) {
    const x = x0 + (x1 - x0) * i / TICKS;
    const y = y0 + (y1 - y0) * i / TICKS;
    svg.appendChild(el("line", { class: "grid", x1: sx(x), x2: sx(x), y1: M.top, y2: H - M.bottom }));
    svg.appendChild(el("line", { class: "grid", x1: M.left, x2: W - M.right, y1: sy(y), y2: sy(y) }));
    svg.appendChild(el("text", { class: "tick", x: sx(x), y: H - M.bottom + 16, "text-anchor": "middle" }, fmt(x)));
    svg.appendChild(el("text", { class: "tick", x: M.left - 6, y: sy(y) + 4, "text-anchor": "end" }, fmt(y)));
  }

  svg.appendChild(el("line", { class: "axis", x1: M.left, x2: W - M.right, y1: H - M.bottom, y2: H - M.bottom }));
  svg.appendChild(el("line", { class: "axis", x1: M.left, x2: M.left, y1: M.top, y2: H - M.bottom }));
  svg.appendChild(el("text", { class: "label", x: (M.left + W - M.right) / 2, y: H - 12, "text-anchor": "middle" }, DATA.x_label));
  svg.appendChild(el("text", {
    class: "label", x: 0, y: 0, "text-anchor": "middle",
    transform: `translate(18, ${(M.top + H - M.bottom) / 2}) rotate(-90)`
  }, DATA.y_label));

  const readout = document.getElementById("readout");
  for (const [x, y] of DATA.points) {
    const c = el("circle", { class: "point", cx: sx(x), cy: sy(y), r: 3 });
    c.onmouseenter = () => { readout.textContent = `${DATA.x_label}: ${fmt(x)}   ${DATA.y_label}: ${fmt(y)}`; };
    svg.appendChild(c);
  }
  readout.textContent = `${DATA.points.length} points`;
}

render();
</script>
</body>
</html>
"#;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
