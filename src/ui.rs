use crate::charts;
use crate::survey::{color_for, Survey};

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_home() -> String {
    page("Learning App", HOME_BODY)
}

pub fn render_survey(survey: &Survey) -> String {
    let total = survey.total_votes().to_string();
    let rows = render_rows(survey);
    let charts = render_charts(survey);
    let body = fill(
        SURVEY_BODY,
        &[("TOTAL", &total), ("ROWS", &rows), ("CHARTS", &charts)],
    );
    page("Survey Lab", &body)
}

fn page(title: &str, body: &str) -> String {
    fill(
        PAGE_HTML,
        &[("TITLE", title), ("STYLE", STYLE), ("BODY", body)],
    )
}

/// Expands `{{KEY}}` placeholders in a single pass. Inserted values are not
/// scanned again, so user text that looks like a placeholder stays literal.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let expanded = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, &after[end + 2..]))
        });
        match expanded {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_rows(survey: &Survey) -> String {
    let removable = survey.options().len() > 1;
    survey
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let remove = if removable {
                format!(
                    r#"<form method="post" action="/survey/options/{id}/remove"><button class="btn-remove" type="submit" aria-label="Remove {name}">&times;</button></form>"#,
                    id = option.id,
                    name = escape_html(&option.name)
                )
            } else {
                String::new()
            };
            let disabled = if option.count == 0 { " disabled" } else { "" };

            format!(
                r#"<li class="option" style="border-color: {color}">
          <span class="swatch" style="background: {color}"></span>
          <span class="option-name">{name}</span>
          <div class="controls">
            <form method="post" action="/survey/options/{id}/decrement"><button class="btn-sub" type="submit" aria-label="Remove a vote"{disabled}>&minus;</button></form>
            <span class="count">{count}</span>
            <form method="post" action="/survey/options/{id}/increment"><button class="btn-add" type="submit" aria-label="Add a vote">+</button></form>
            {remove}
          </div>
        </li>"#,
                color = color_for(index),
                name = escape_html(&option.name),
                id = option.id,
                count = option.count,
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn render_charts(survey: &Survey) -> String {
    if survey.total_votes() == 0 {
        return EMPTY_CHARTS.to_string();
    }

    let options = survey.options();
    let cards = [
        ("Bar Chart", "Compare votes side by side", charts::bar_chart(options)),
        ("Pie Chart", "See the percentage breakdown", charts::pie_chart(options)),
        ("Line Chart", "Track the trend of votes", charts::line_chart(options)),
        (
            "Horizontal Bar Chart",
            "Another way to compare votes",
            charts::horizontal_bar_chart(options),
        ),
    ];

    let cards = cards
        .iter()
        .map(|(title, subtitle, svg)| {
            format!(
                r#"<article class="card chart-card">
        <h2>{title}</h2>
        <p class="subtitle">{subtitle}</p>
        {svg}
      </article>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");
    format!("<section class=\"charts\">\n      {cards}\n    </section>")
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>{{STYLE}}</style>
</head>
<body>
{{BODY}}
</body>
</html>
"#;

const HOME_BODY: &str = r#"  <main class="app home">
    <header>
      <h1>Learning App</h1>
      <p class="subtitle">An interactive place to learn and explore!</p>
    </header>

    <a class="card tile" href="/survey">
      <span class="tile-icon">&#128202;</span>
      <h2>Survey &amp; Graphs</h2>
      <p class="subtitle">Learn how surveys work and see data come to life with colorful charts!</p>
      <span class="tile-cta">Start Learning &rarr;</span>
    </a>

    <div class="card tile soon">
      <span class="tile-icon">&#128640;</span>
      <h2>More Coming Soon!</h2>
      <p class="subtitle">New learning activities will be added here</p>
    </div>
  </main>"#;

const SURVEY_BODY: &str = r#"  <main class="app">
    <a class="back" href="/">&larr; Back Home</a>

    <header>
      <h1>Survey Lab</h1>
      <p class="subtitle">What should we have for dinner? Let's collect votes and see the results!</p>
    </header>

    <section class="card">
      <h2>Survey Options</h2>
      <p class="subtitle">Click + to add a vote, &minus; to remove a vote. Total votes: <strong id="total">{{TOTAL}}</strong></p>
      <ul class="options">
        {{ROWS}}
      </ul>
      <form class="add-form" method="post" action="/survey/options">
        <input name="name" placeholder="Add a new option..." required pattern=".*\S.*" autocomplete="off" />
        <button class="btn-primary" type="submit">Add Option</button>
      </form>
    </section>

    {{CHARTS}}
  </main>"#;

const EMPTY_CHARTS: &str = r#"<section class="card empty">
      <p class="empty-title">Start voting to see the charts!</p>
      <p class="subtitle">Click the + buttons above to add votes and watch the graphs appear</p>
    </section>"#;

const STYLE: &str = r#"
    :root {
      --bg-1: #eef2ff;
      --bg-2: #f5e9ff;
      --ink: #1f2430;
      --muted: #5f6472;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(31, 36, 48, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px 14px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .home {
      min-height: 80vh;
      align-content: center;
      text-align: center;
    }

    header {
      text-align: center;
    }

    h1 {
      font-size: clamp(2rem, 5vw, 3.2rem);
      margin: 0 0 8px;
    }

    h2 {
      margin: 0 0 6px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .tile {
      display: grid;
      gap: 10px;
      color: inherit;
      text-decoration: none;
      transition: transform 150ms ease;
    }

    .tile:hover {
      transform: scale(1.02);
    }

    .tile-icon {
      font-size: 3rem;
    }

    .tile-cta {
      color: #2563eb;
      font-weight: 600;
    }

    .soon {
      opacity: 0.5;
    }

    .back {
      justify-self: start;
      color: var(--ink);
      text-decoration: none;
      border: 2px solid rgba(31, 36, 48, 0.15);
      border-radius: 12px;
      padding: 10px 16px;
      background: white;
    }

    .options {
      list-style: none;
      margin: 18px 0;
      padding: 0;
      display: grid;
      gap: 12px;
    }

    .option {
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 12px 16px;
      border: 2px solid;
      border-radius: 14px;
      background: white;
    }

    .swatch {
      width: 14px;
      height: 14px;
      border-radius: 50%;
      flex-shrink: 0;
    }

    .option-name {
      flex: 1;
      min-width: 0;
      font-size: 1.2rem;
      font-weight: 600;
      overflow: hidden;
      text-overflow: ellipsis;
      white-space: nowrap;
    }

    .controls {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .controls form {
      margin: 0;
    }

    .count {
      min-width: 2.5rem;
      text-align: center;
      font-size: 1.8rem;
      font-weight: 700;
    }

    button {
      appearance: none;
      border: none;
      cursor: pointer;
      font-weight: 700;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.92);
    }

    .btn-add,
    .btn-sub {
      width: 52px;
      height: 52px;
      border-radius: 50%;
      color: white;
      font-size: 1.6rem;
    }

    .btn-add {
      background: #22c55e;
    }

    .btn-sub {
      background: #ef4444;
    }

    .btn-sub:disabled {
      background: #d1d5db;
      color: #6b7280;
      cursor: default;
    }

    .btn-remove {
      width: 40px;
      height: 40px;
      border-radius: 50%;
      background: #b91c1c;
      color: white;
      font-size: 1.2rem;
    }

    .add-form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      padding-top: 16px;
      border-top: 1px solid rgba(31, 36, 48, 0.1);
    }

    .add-form input {
      flex: 1;
      min-width: 200px;
      height: 48px;
      padding: 0 14px;
      border-radius: 12px;
      border: 1px solid rgba(31, 36, 48, 0.2);
      font-size: 1.05rem;
    }

    .btn-primary {
      height: 48px;
      padding: 0 20px;
      border-radius: 12px;
      background: var(--ink);
      color: white;
      font-size: 1rem;
    }

    .charts {
      display: grid;
      gap: 24px;
    }

    .chart {
      width: 100%;
      height: auto;
      display: block;
      margin-top: 12px;
    }

    .chart-grid {
      stroke: rgba(31, 36, 48, 0.12);
      stroke-dasharray: 3 3;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 12px;
    }

    .pie-label {
      font-size: 14px;
    }

    .empty {
      text-align: center;
    }

    .empty-title {
      font-size: 1.4rem;
      margin: 0 0 6px;
    }

    @media (max-width: 600px) {
      .card {
        padding: 18px 14px;
      }
      .btn-add,
      .btn-sub {
        width: 46px;
        height: 46px;
      }
    }
"#;
