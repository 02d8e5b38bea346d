use crate::ledger::{day_key, Ledger};
use crate::registry::TaskRegistry;
use crate::state::{Notice, NoticeKind};
use crate::stats::{build_stats_at, day_percentage, window};
use chrono::NaiveDate;
use std::fmt::Write;

const TREND_WIDTH: f64 = 300.0;
const TREND_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthView {
    #[default]
    Login,
    Signup,
}

impl AuthView {
    pub fn from_query(view: Option<&str>) -> Self {
        match view {
            Some("signup") => Self::Signup,
            _ => Self::Login,
        }
    }
}

pub fn render_auth(view: AuthView, notice: Option<&Notice>) -> String {
    let (login_class, signup_class) = match view {
        AuthView::Login => ("auth-form active", "auth-form"),
        AuthView::Signup => ("auth-form", "auth-form active"),
    };
    AUTH_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{NOTICE}}", &render_notice(notice))
        .replace("{{LOGIN_CLASS}}", login_class)
        .replace("{{SIGNUP_CLASS}}", signup_class)
}

pub fn render_dashboard(
    name: &str,
    tasks: &TaskRegistry,
    ledger: &Ledger,
    today: NaiveDate,
    notice: Option<&Notice>,
) -> String {
    let days = window(today);
    APP_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{NOTICE}}", &render_notice(notice))
        .replace("{{USER}}", &escape_html(name))
        .replace("{{HEADER}}", &render_header(tasks))
        .replace("{{ROWS}}", &render_rows(tasks, ledger, &days))
        .replace("{{CHARTS}}", &render_charts(tasks, ledger, today))
}

fn render_notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(notice) => {
            let kind = match notice.kind {
                NoticeKind::Info => "ok",
                NoticeKind::Error => "error",
            };
            format!(
                r#"<div class="notice" data-type="{kind}" role="alert">{}</div>"#,
                escape_html(&notice.message)
            )
        }
        None => String::new(),
    }
}

fn render_header(tasks: &TaskRegistry) -> String {
    let mut html = String::from(r#"<th class="fixed-col">Timeline</th>"#);
    for task in tasks.labels() {
        let label = escape_html(task);
        let _ = write!(
            html,
            r#"<th><div class="task-head"><span>{label}</span><form method="post" action="/tasks/remove" class="remove-form"><input type="hidden" name="label" value="{label}" /><input type="hidden" name="confirmed" value="false" /><button type="submit" class="remove-btn" aria-label="Remove {label}">&#10005;</button></form></div></th>"#
        );
    }
    html.push_str(r#"<th class="end-col">Status</th>"#);
    html
}

fn render_rows(tasks: &TaskRegistry, ledger: &Ledger, days: &[NaiveDate]) -> String {
    let mut html = String::new();
    for day in days {
        let key = day_key(*day);
        let _ = write!(
            html,
            r#"<tr><td class="date-cell"><span class="date-main">{}</span><span class="date-sub">{}</span></td>"#,
            day.format("%b %-d"),
            day.format("%a")
        );
        for task in tasks.labels() {
            let label = escape_html(task);
            let checked = if ledger.is_checked(*day, task) { " checked" } else { "" };
            let _ = write!(
                html,
                r#"<td><form method="post" action="/toggle" class="toggle-form"><input type="hidden" name="day" value="{key}" /><input type="hidden" name="task" value="{label}" /><input type="checkbox" aria-label="{label} on {key}"{checked} /><noscript><button type="submit">Toggle</button></noscript></form></td>"#
            );
        }
        let percentage = day_percentage(ledger, tasks, *day);
        let class = if percentage == 100 { "status-cell full" } else { "status-cell" };
        let _ = write!(html, r#"<td class="{class}">{percentage}%</td></tr>"#);
    }
    html
}

fn render_charts(tasks: &TaskRegistry, ledger: &Ledger, today: NaiveDate) -> String {
    if tasks.is_empty() {
        return String::from(
            r#"<div class="chart-card"><h2>Overall</h2><div class="pie" style="background: conic-gradient(var(--border) 0% 100%)"><span class="pie-value">0%</span></div></div>
<div class="chart-card"><h2>Per task</h2><div class="bars"><div class="empty">No Data</div></div></div>
<div class="chart-card"><h2>Trend</h2><div class="trend"></div></div>"#,
        );
    }

    let stats = build_stats_at(today, tasks, ledger);
    let overall = stats.overall;

    let mut bars = String::new();
    for total in &stats.task_totals {
        let height = if total.height == 0.0 { 1.0 } else { total.height };
        let class = if total.height >= 100.0 { "bar full" } else { "bar" };
        let _ = write!(
            bars,
            r#"<div class="bar-wrapper"><div class="{class}" style="height:{height:.2}%" title="{} days"></div><div class="bar-label">{}</div></div>"#,
            total.days_checked,
            escape_html(&total.task)
        );
    }

    let series: Vec<u32> = stats.daily.iter().map(|point| point.percentage).collect();
    let line = trend_path(&series);

    format!(
        r#"<div class="chart-card"><h2>Overall</h2><div class="pie" style="background: conic-gradient(var(--primary) {overall}%, var(--border) 0%)"><span class="pie-value">{overall}%</span></div></div>
<div class="chart-card"><h2>Per task</h2><div class="bars">{bars}</div></div>
<div class="chart-card"><h2>Trend</h2><div class="trend"><svg viewBox="0 0 300 100" preserveAspectRatio="none" role="img" aria-label="Daily completion trend"><path d="{line} L {TREND_WIDTH} {TREND_HEIGHT} L 0 {TREND_HEIGHT} Z" class="area-path" /><path d="{line}" class="line-path" vector-effect="non-scaling-stroke" /></svg></div></div>"#
    )
}

pub fn trend_path(series: &[u32]) -> String {
    if series.is_empty() {
        return String::new();
    }
    let step = if series.len() > 1 {
        TREND_WIDTH / (series.len() - 1) as f64
    } else {
        0.0
    };
    let mut path = String::new();
    for (index, value) in series.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        let x = index as f64 * step;
        let y = TREND_HEIGHT - f64::from(*value);
        let _ = write!(path, "{command} {x:.2} {y:.2} ");
    }
    path.trim_end().to_string()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('{', "&#123;")
}

const STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #0d0f12;
      --card: #16191e;
      --border: #2a2f36;
      --ink: #e8e6e3;
      --muted: #8b857d;
      --primary: #3ddc84;
      --secondary: #4a90d9;
      --danger: #ff6b4a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .card {
      width: min(1100px, 100%);
      margin: 0 auto;
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 20px;
      padding: 28px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    .auth {
      width: min(420px, 100%);
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .auth-form {
      display: none;
      gap: 12px;
    }

    .auth-form.active {
      display: grid;
    }

    input[type="text"],
    input[type="email"],
    input[type="password"] {
      background: var(--bg);
      color: var(--ink);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 12px 14px;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--primary);
      color: #0d0f12;
    }

    button:active {
      transform: scale(0.98);
    }

    .link {
      color: var(--secondary);
      font-size: 0.9rem;
    }

    .ghost {
      background: transparent;
      color: var(--muted);
      border: 1px solid var(--border);
    }

    .add-task {
      display: flex;
      gap: 10px;
    }

    .add-task input {
      flex: 1;
    }

    .table-wrap {
      overflow-x: auto;
    }

    table {
      border-collapse: collapse;
      width: 100%;
      font-size: 0.9rem;
    }

    th,
    td {
      border-bottom: 1px solid var(--border);
      padding: 8px;
      text-align: center;
    }

    .task-head {
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 2px;
    }

    .remove-btn {
      background: transparent;
      color: #444;
      padding: 0 4px;
      font-size: 0.6rem;
    }

    .remove-btn:hover {
      color: var(--danger);
    }

    .date-cell {
      text-align: left;
    }

    .date-main {
      display: block;
      font-weight: 600;
    }

    .date-sub {
      display: block;
      font-size: 0.7rem;
      color: var(--muted);
    }

    .status-cell {
      color: #fff;
      font-size: 0.8rem;
    }

    .status-cell.full {
      color: var(--primary);
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .chart-card {
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 16px;
    }

    .pie {
      width: 140px;
      height: 140px;
      margin: 0 auto;
      border-radius: 50%;
      display: grid;
      place-items: center;
      position: relative;
    }

    .pie::after {
      content: "";
      position: absolute;
      inset: 14px;
      border-radius: 50%;
      background: var(--card);
    }

    .pie-value {
      position: relative;
      z-index: 1;
      font-size: 1.4rem;
      font-weight: 600;
    }

    .bars {
      height: 140px;
      display: flex;
      align-items: flex-end;
      gap: 8px;
    }

    .bar-wrapper {
      flex: 1;
      height: 100%;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      align-items: center;
      gap: 4px;
    }

    .bar {
      width: 100%;
      background: var(--secondary);
      border-radius: 6px 6px 0 0;
    }

    .bar.full {
      background: var(--primary);
    }

    .bar-label {
      font-size: 0.65rem;
      color: var(--muted);
      max-width: 100%;
      overflow: hidden;
      text-overflow: ellipsis;
      white-space: nowrap;
    }

    .empty {
      width: 100%;
      text-align: center;
      color: #444;
      padding: 10px;
    }

    .trend svg {
      width: 100%;
      height: 140px;
      display: block;
    }

    .area-path {
      fill: rgba(61, 220, 132, 0.15);
    }

    .line-path {
      fill: none;
      stroke: var(--primary);
      stroke-width: 2;
    }

    .notice {
      border-radius: 12px;
      padding: 12px 14px;
      font-size: 0.95rem;
    }

    .notice[data-type="error"] {
      background: rgba(255, 107, 74, 0.12);
      color: var(--danger);
    }

    .notice[data-type="ok"] {
      background: rgba(61, 220, 132, 0.12);
      color: var(--primary);
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
"#;

const AUTH_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="card auth" id="auth-screen">
    <header>
      <h1>Habit Tracker</h1>
    </header>
    {{NOTICE}}
    <form id="login-form" class="{{LOGIN_CLASS}}" method="post" action="/login">
      <input type="email" name="email" placeholder="Email" required />
      <input type="password" name="password" placeholder="Password" required />
      <button type="submit">Log in</button>
      <a class="link" href="/?view=signup">Need an identity? Sign up</a>
    </form>
    <form id="signup-form" class="{{SIGNUP_CLASS}}" method="post" action="/signup">
      <input type="text" name="name" placeholder="Name" required />
      <input type="email" name="email" placeholder="Email" required />
      <button type="submit">Sign up</button>
      <a class="link" href="/?view=login">Already registered? Log in</a>
    </form>
  </main>
</body>
</html>
"#;

const APP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="card" id="app-screen">
    <header>
      <div>
        <h1>Habit Tracker</h1>
        <span class="date-sub">Signed in as <strong id="user-display">{{USER}}</strong></span>
      </div>
      <form method="post" action="/logout">
        <button class="ghost" id="logout-btn" type="submit">Log out</button>
      </form>
    </header>
    {{NOTICE}}
    <form class="add-task" method="post" action="/tasks/add">
      <input type="text" id="task-input" name="label" placeholder="New task" autocomplete="off" />
      <button id="add-btn" type="submit">Add</button>
    </form>
    <section class="charts">
{{CHARTS}}
    </section>
    <div class="table-wrap">
      <table>
        <thead><tr id="header-row">{{HEADER}}</tr></thead>
        <tbody id="table-body">{{ROWS}}</tbody>
      </table>
    </div>
  </main>

  <script>
    document.querySelectorAll('.remove-form').forEach((form) => {
      form.addEventListener('submit', (event) => {
        const label = form.elements.label.value;
        if (!confirm(`Delete ${label}?`)) {
          event.preventDefault();
          return;
        }
        form.elements.confirmed.value = 'true';
      });
    });

    document.querySelectorAll('.toggle-form input[type="checkbox"]').forEach((box) => {
      box.addEventListener('change', () => box.form.submit());
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn dashboard_has_a_row_per_day() {
        let tasks = TaskRegistry::from(vec!["Read".to_string()]);
        let html = render_dashboard("Ada", &tasks, &Ledger::default(), today(), None);
        assert_eq!(html.matches("<tr><td class=\"date-cell\">").count(), 30);
        assert!(html.contains("Oct 16"));
        assert!(html.contains("Fri"));
        assert!(html.contains("Nov 14"));
        assert!(!html.contains("Nov 15"));
    }

    #[test]
    fn full_row_is_highlighted() {
        let tasks = TaskRegistry::from(vec!["Read".to_string()]);
        let mut ledger = Ledger::default();
        ledger.toggle(today(), "Read");
        let html = render_dashboard("Ada", &tasks, &ledger, today(), None);
        assert!(html.contains(r#"<td class="status-cell full">100%</td>"#));
        assert_eq!(html.matches(" checked />").count(), 1);
    }

    #[test]
    fn empty_registry_shows_empty_charts() {
        let html = render_dashboard("Ada", &TaskRegistry::default(), &Ledger::default(), today(), None);
        assert!(html.contains("No Data"));
        assert!(html.contains(r#"<span class="pie-value">0%</span>"#));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn labels_are_escaped() {
        let tasks = TaskRegistry::from(vec!["<b>\"x\"</b>".to_string()]);
        let html = render_dashboard("Ada", &tasks, &Ledger::default(), today(), None);
        assert!(html.contains("&lt;b&gt;&quot;x&quot;&lt;/b&gt;"));
        assert!(!html.contains("<b>\"x\"</b>"));
    }

    #[test]
    fn trend_path_spans_the_box() {
        let path = trend_path(&[0, 50, 100]);
        assert_eq!(path, "M 0.00 100.00 L 150.00 50.00 L 300.00 0.00");
        assert_eq!(trend_path(&[]), "");
    }

    #[test]
    fn auth_view_switches_active_form() {
        let html = render_auth(AuthView::from_query(Some("signup")), None);
        assert!(html.contains(r#"id="signup-form" class="auth-form active""#));
        assert!(html.contains(r#"id="login-form" class="auth-form""#));
        assert_eq!(AuthView::from_query(None), AuthView::Login);
    }

    #[test]
    fn notice_is_rendered_once() {
        let notice = Notice {
            kind: NoticeKind::Error,
            message: "Access Denied: Invalid Credentials".to_string(),
        };
        let html = render_auth(AuthView::Login, Some(&notice));
        assert!(html.contains(r#"data-type="error""#));
        assert!(html.contains("Access Denied: Invalid Credentials"));
    }
}
