use crate::calculator::models::CalculateForm;
use core_impact::calculator::QUERY_TYPE_PHRASES;
use core_impact::error::CalculatorResult;
use core_impact::{Catalog, ImpactEstimate};

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str, scripts: &[&str]) -> String {
    let scripts: String = scripts
        .iter()
        .map(|script| format!("  <script src=\"{}\"></script>\n", escape(script)))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
  <header class="site-header">
    <h1><a href="/">EcoAI</a></h1>
    <p>Impacto ambiental del uso de modelos de IA</p>
  </header>
  <main>
{body}
  </main>
  <footer class="site-footer">
    <p>Datos ilustrativos, sin garantía de exactitud científica.</p>
  </footer>
{scripts}</body>
</html>
"#,
        title = escape(title),
    )
}

fn options(values: &[String]) -> String {
    values
        .iter()
        .map(|value| {
            let value = escape(value);
            format!("          <option value=\"{value}\">{value}</option>\n")
        })
        .collect()
}

/// The calculator form. Query types fall back to the known list when the
/// dataset is empty.
#[must_use]
pub fn index_page(catalog: &Catalog) -> String {
    let query_types = if catalog.query_types.is_empty() {
        QUERY_TYPE_PHRASES
            .iter()
            .map(|(query_type, _)| (*query_type).to_string())
            .collect()
    } else {
        catalog.query_types.clone()
    };

    let body = format!(
        r#"    <section class="card">
      <h2>Calcula el impacto de tus consultas</h2>
      <form id="impactForm" method="post" action="/calcular">
        <label for="modelo">Modelo</label>
        <select id="modelo" name="modelo" required>
          <option value="">Selecciona un modelo</option>
{models}        </select>
        <label for="tipo_consulta">Tipo de consulta</label>
        <select id="tipo_consulta" name="tipo_consulta" required>
          <option value="">Selecciona un tipo</option>
{query_types}        </select>
        <small id="typeHint">Selecciona un tipo de consulta primero</small>
        <label for="cantidad" id="cantidadLabel">Cantidad</label>
        <input type="number" id="cantidad" name="cantidad" min="0" step="any" required>
        <span id="cantidadUnit"></span>
        <p id="formError" class="error hidden"></p>
        <button type="submit" id="submitBtn">Calcular impacto</button>
      </form>
    </section>
    <section class="card charts">
      <h2>Comparación entre modelos</h2>
      <div class="chart"><canvas id="modelComparisonChart"></canvas></div>
      <div class="chart"><canvas id="queryTypeChart"></canvas></div>
    </section>"#,
        models = options(&catalog.models),
        query_types = options(&query_types),
    );
    layout(
        "EcoAI - Calculadora de impacto",
        &body,
        &[CHART_JS_URL, "/static/js/main.js", "/static/js/charts.js"],
    )
}

fn estimate_section(estimate: &ImpactEstimate) -> String {
    format!(
        r#"    <section class="card result">
      <h2>Resultado</h2>
      <dl class="summary">
        <dt>Modelo</dt><dd>{model}</dd>
        <dt>Tipo de consulta</dt><dd>{query_type}</dd>
        <dt>Cantidad</dt><dd>{description}</dd>
      </dl>
      <div class="impacts">
        <article class="impact water">
          <h3>Agua</h3>
          <p class="value">{water} L</p>
          <p class="equivalence">{water_eq}</p>
        </article>
        <article class="impact energy">
          <h3>Energía</h3>
          <p class="value">{energy} kWh</p>
          <p class="equivalence">{energy_eq}</p>
        </article>
        <article class="impact carbon">
          <h3>Carbono</h3>
          <p class="value">{carbon} gCO2e</p>
          <p class="equivalence">{carbon_eq}</p>
        </article>
      </div>
    </section>"#,
        model = escape(&estimate.model),
        query_type = escape(&estimate.query_type),
        description = escape(&estimate.quantity_description),
        water = estimate.water_liters,
        energy = estimate.energy_kwh,
        carbon = estimate.carbon_grams_co2e,
        water_eq = escape(&estimate.equivalences.water),
        energy_eq = escape(&estimate.equivalences.energy),
        carbon_eq = escape(&estimate.equivalences.carbon),
    )
}

fn error_section(form: &CalculateForm, message: &str) -> String {
    format!(
        r#"    <section class="card result error">
      <h2>Resultado</h2>
      <p class="error-message">{message}</p>
      <dl class="summary">
        <dt>Modelo</dt><dd>{model}</dd>
        <dt>Tipo de consulta</dt><dd>{query_type}</dd>
        <dt>Cantidad</dt><dd>{quantity}</dd>
      </dl>
    </section>"#,
        message = escape(message),
        model = escape(&form.modelo),
        query_type = escape(&form.tipo_consulta),
        quantity = escape(&form.cantidad),
    )
}

#[must_use]
pub fn results_page(form: &CalculateForm, outcome: &CalculatorResult<ImpactEstimate>) -> String {
    let mut body = match outcome {
        Ok(estimate) => estimate_section(estimate),
        Err(err) => error_section(form, &err.to_string()),
    };
    body.push_str("\n    <p><a class=\"button\" href=\"/\">Nueva consulta</a></p>");
    layout("EcoAI - Resultado", &body, &["/static/js/main.js"])
}
