use crate::models::{Task, TaskStats};
use crate::stats::{DayProgress, SessionStatus, format_minutes, motivational_message, tomorrow_note};

pub struct BoardView<'a> {
    pub display_date: String,
    pub player_number: String,
    pub tasks: &'a [Task],
    pub stats: TaskStats,
    pub progress: DayProgress,
    pub dark_mode: bool,
    pub show_welcome: bool,
}

pub fn render_index(view: &BoardView<'_>) -> String {
    let stats = &view.stats;
    let progress = &view.progress;
    let countdown = match progress.status {
        SessionStatus::Before => format!("Starts in {}", format_minutes(progress.minutes_remaining)),
        SessionStatus::During => format!("{} left", format_minutes(progress.minutes_remaining)),
        SessionStatus::After => "Complete! 🎉".to_string(),
    };
    let welcome = if view.show_welcome { WELCOME_HTML } else { "" };

    INDEX_HTML
        .replace("{{THEME}}", if view.dark_mode { "dark" } else { "light" })
        .replace("{{THEME_ICON}}", if view.dark_mode { "☀️" } else { "🌙" })
        .replace("{{WELCOME}}", welcome)
        .replace("{{DATE}}", &escape(&view.display_date))
        .replace("{{PLAYER}}", &escape(&view.player_number))
        .replace("{{PHASE}}", progress.phase)
        .replace("{{PERCENT}}", &format!("{:.0}", progress.percentage))
        .replace("{{COUNTDOWN}}", &countdown)
        .replace("{{CLOCK}}", &progress.clock)
        .replace("{{LEVEL}}", &stats.level.to_string())
        .replace("{{XP}}", &stats.xp.to_string())
        .replace("{{RATE}}", &stats.completion_rate.to_string())
        .replace("{{COMPLETED}}", &stats.completed.to_string())
        .replace("{{TOTAL}}", &stats.total.to_string())
        .replace("{{MOTIVATION}}", motivational_message(progress, stats))
        .replace("{{TOMORROW}}", tomorrow_note(stats))
        .replace("{{TASKS}}", &render_tasks(view.tasks))
}

fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return r#"<p class="empty">No quests yet. Add one above.</p>"#.to_string();
    }

    let items: String = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let (class, mark) = if task.done { ("quest done", "🏆") } else { ("quest", "⚔️") };
            format!(
                r#"<li class="{class}"><form method="post" action="/tasks/{index}/toggle"><button type="submit">{mark} {text}</button></form></li>"#,
                text = escape(&task.text),
            )
        })
        .collect();
    format!(r#"<ul class="quests">{items}</ul>"#)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const WELCOME_HTML: &str = r#"<section class="welcome">
      <h2>Welcome to the Game of Life!</h2>
      <p>Every day a new player takes over your quest list. Finish what you can; whatever is left is handed to tomorrow's player.</p>
    </section>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Taskroll</title>
  <style>
    :root {
      --bg: #f5f3ee;
      --ink: #24222a;
      --card: #ffffff;
      --muted: #7a7580;
      --accent: #5b4bdb;
      --good: #2f9e5b;
    }

    body.dark {
      --bg: #16151b;
      --ink: #ece9f3;
      --card: #23212b;
      --muted: #a29dab;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 14px;
    }

    .welcome {
      width: min(960px, 100%);
      margin: 0 auto 24px;
      background: var(--accent);
      color: #fff;
      border-radius: 20px;
      padding: 20px 24px;
    }

    .bar {
      height: 14px;
      border-radius: 999px;
      background: rgba(127, 127, 127, 0.2);
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 10px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .quests {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 8px;
    }

    .quest button {
      width: 100%;
      text-align: left;
      border: 1px solid rgba(127, 127, 127, 0.3);
      border-radius: 12px;
      padding: 12px;
      background: transparent;
      color: inherit;
      font: inherit;
      cursor: pointer;
    }

    .quest.done button {
      color: var(--good);
      text-decoration: line-through;
      opacity: 0.75;
    }

    .add {
      display: flex;
      gap: 8px;
    }

    .add input {
      flex: 1;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(127, 127, 127, 0.4);
      font: inherit;
    }

    .empty,
    .muted {
      color: var(--muted);
    }
  </style>
</head>
<body class="{{THEME}}">
  {{WELCOME}}
  <main class="app">
    <section class="card">
      <header>
        <h1>Player #{{PLAYER}}</h1>
        <p class="muted">{{DATE}}</p>
      </header>
      <div>
        <strong>{{PHASE}}</strong> <span class="muted">{{CLOCK}} · {{COUNTDOWN}}</span>
        <div class="bar"><span style="width: {{PERCENT}}%"></span></div>
      </div>
      <div class="stats">
        <div class="stat"><span class="label">Level</span><span class="value">{{LEVEL}}</span></div>
        <div class="stat"><span class="label">XP</span><span class="value">{{XP}}</span></div>
        <div class="stat"><span class="label">Done</span><span class="value">{{RATE}}%</span></div>
      </div>
      <p>{{MOTIVATION}}</p>
      <blockquote class="muted">Tomorrow's player: "{{TOMORROW}}"</blockquote>
      <form method="post" action="/dark-mode"><button type="submit">{{THEME_ICON}}</button></form>
    </section>
    <section class="card">
      <h2>Daily Quests ({{COMPLETED}}/{{TOTAL}})</h2>
      <form class="add" method="post" action="/tasks">
        <input name="text" placeholder="Add new quest..." autocomplete="off" />
        <button type="submit">Add</button>
      </form>
      {{TASKS}}
    </section>
  </main>
</body>
</html>
"#;
