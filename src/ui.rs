use crate::health::BrainState;
use crate::models::DashboardView;

pub fn render_index(view: &DashboardView) -> String {
    let state = match view.brain_state {
        BrainState::Healthy => "healthy",
        BrainState::Average => "average",
        BrainState::Rotten => "rotten",
    };
    let (toggle_label, goal_disabled) = if view.is_running {
        ("Stop Session", "disabled")
    } else {
        ("Start Focus", "")
    };
    let (tip_button, tip_disabled) = if view.is_tip_loading {
        ("Thinking...", "disabled")
    } else {
        ("Get a Focus Tip", "")
    };
    let (tip_body, tip_hidden) = match &view.tip_text {
        Some(text) => (format!("&quot;{}&quot;", escape_html(text)), ""),
        None => (String::new(), "hidden"),
    };

    INDEX_HTML
        .replace("{{STATUS}}", &view.status_label)
        .replace("{{STATUS_CLASS}}", &view.status_color_class)
        .replace("{{GOAL}}", &view.daily_goal_minutes.to_string())
        .replace("{{BRAIN_STATE}}", state)
        .replace("{{PERCENT}}", &format!("{:.0}", view.health_percent))
        .replace("{{PERCENT_RAW}}", &format!("{:.2}", view.health_percent))
        .replace("{{BAR_CLASS}}", &view.health_bar_class)
        .replace("{{TIMER}}", &view.timer_display)
        .replace("{{TOGGLE_LABEL}}", toggle_label)
        .replace("{{GOAL_DISABLED}}", goal_disabled)
        .replace("{{RUNNING}}", if view.is_running { "true" } else { "false" })
        .replace("{{TIP_LOADING}}", if view.is_tip_loading { "true" } else { "false" })
        .replace("{{TIP_BUTTON}}", tip_button)
        .replace("{{TIP_DISABLED}}", tip_disabled)
        .replace("{{TIP_HIDDEN}}", tip_hidden)
        .replace("{{TIP}}", &tip_body)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
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

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Focus Brain</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;700&family=JetBrains+Mono:wght@700&display=swap');

    :root {
      --bg: #000000;
      --ink: #f3f4f6;
      --muted: #9ca3af;
      --panel: #111827;
      --edge: #374151;
      --green: #22c55e;
      --green-soft: #4ade80;
      --yellow: #eab308;
      --yellow-soft: #facc15;
      --red: #dc2626;
      --red-soft: #ef4444;
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
      display: grid;
      place-items: center;
      padding: 24px 16px 40px;
    }

    .app {
      width: min(440px, 100%);
      display: grid;
      gap: 22px;
      text-align: center;
    }

    h1 {
      margin: 0;
      font-size: 1.5rem;
      letter-spacing: 0.2em;
      text-transform: uppercase;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .text-green-400 { color: var(--green-soft); }
    .text-yellow-400 { color: var(--yellow-soft); }
    .text-red-500 { color: var(--red-soft); }

    .brain {
      position: relative;
      width: 220px;
      height: 220px;
      margin: 0 auto;
    }

    .brain .glow {
      position: absolute;
      inset: 30px;
      border-radius: 50%;
      filter: blur(36px);
      opacity: 0.45;
    }

    .brain svg {
      position: relative;
      width: 100%;
      height: 100%;
    }

    .brain-variant {
      display: none;
    }

    .brain[data-state="healthy"] .brain-variant.healthy,
    .brain[data-state="average"] .brain-variant.average,
    .brain[data-state="rotten"] .brain-variant.rotten {
      display: block;
    }

    .brain[data-state="healthy"] .glow { background: var(--green); animation: pulse 2.4s ease-in-out infinite; }
    .brain[data-state="average"] .glow { background: var(--yellow); }
    .brain[data-state="rotten"] .glow { background: var(--red); }

    .bar {
      width: 100%;
      height: 16px;
      border-radius: 999px;
      border: 2px solid #4b5563;
      background: #1f2937;
      overflow: hidden;
    }

    .bar .fill {
      height: 100%;
      border-radius: 999px;
      transition: width 1s ease-out;
    }

    .bar-green { background: var(--green); }
    .bar-yellow { background: var(--yellow); }
    .bar-red { background: var(--red); }

    .percent {
      margin: 8px 0 0;
      color: #86efac;
      font-size: 0.9rem;
      font-weight: 500;
    }

    .timer {
      margin: 0;
      font-family: "JetBrains Mono", monospace;
      font-size: clamp(3.4rem, 14vw, 4.6rem);
      letter-spacing: -0.04em;
    }

    .timer-label {
      margin: 0;
      color: #6b7280;
      font-size: 0.8rem;
      letter-spacing: 0.2em;
      text-transform: uppercase;
    }

    button {
      appearance: none;
      border: none;
      cursor: pointer;
      font: inherit;
      font-weight: 700;
      transition: transform 150ms ease, opacity 150ms ease;
    }

    button:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .btn-toggle {
      width: 100%;
      padding: 16px 40px;
      border-radius: 999px;
      background: var(--green);
      color: #000;
      font-size: 1.1rem;
      letter-spacing: 0.08em;
      text-transform: uppercase;
      box-shadow: 0 0 20px rgba(52, 211, 153, 0.5);
    }

    .btn-toggle:hover {
      transform: scale(1.04);
    }

    .goal-toggle {
      background: transparent;
      color: var(--muted);
      font-weight: 500;
      font-size: 0.9rem;
    }

    .goal-form {
      display: none;
      gap: 8px;
      margin-top: 12px;
      padding: 8px;
      border: 1px solid var(--edge);
      border-radius: 10px;
      background: var(--panel);
    }

    .goal-form.open {
      display: flex;
    }

    .goal-form input {
      flex: 1;
      padding: 8px;
      border-radius: 6px;
      border: 1px solid #4b5563;
      background: #1f2937;
      color: var(--ink);
      font: inherit;
    }

    .goal-form button {
      padding: 8px 16px;
      border-radius: 6px;
      background: #16a34a;
      color: white;
    }

    .btn-tip {
      width: 100%;
      padding: 12px 24px;
      border-radius: 10px;
      border: 1px solid #15803d;
      background: rgba(20, 83, 45, 0.2);
      color: var(--green-soft);
      font-weight: 500;
    }

    .tip {
      margin-top: 14px;
      padding: 14px;
      border: 1px solid var(--edge);
      border-radius: 10px;
      background: var(--panel);
      color: #d1d5db;
      font-style: italic;
    }

    .tip[hidden] {
      display: none;
    }

    @keyframes pulse {
      0%, 100% { opacity: 0.35; }
      50% { opacity: 0.6; }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="status" class="{{STATUS_CLASS}}">{{STATUS}}</h1>
      <p class="subtitle">Today's Focus Time Goal: <span id="goal">{{GOAL}}</span> min</p>
    </header>

    <div class="brain" id="brain" data-state="{{BRAIN_STATE}}">
      <div class="glow"></div>
      <svg viewBox="0 0 100 100" aria-hidden="true">
        <g class="brain-variant healthy">
          <path d="M50 10 C 25 10, 10 30, 10 50 C 10 70, 25 90, 50 90 C 75 90, 90 70, 90 50 C 90 30, 75 10, 50 10 Z" fill="none" stroke="#4ade80" stroke-width="3" />
          <path d="M50 10 V 90" stroke="#4ade80" stroke-width="1.5" />
          <path d="M30 30 Q 40 20, 50 30 T 70 30" fill="none" stroke="#86efac" stroke-width="1.5" />
          <path d="M25 50 Q 37 40, 50 50 T 75 50" fill="none" stroke="#86efac" stroke-width="1.5" />
          <path d="M30 70 Q 40 80, 50 70 T 70 70" fill="none" stroke="#86efac" stroke-width="1.5" />
        </g>
        <g class="brain-variant average">
          <path d="M50 10 C 25 10, 10 30, 10 50 C 10 70, 25 90, 50 90 C 75 90, 90 70, 90 50 C 90 30, 75 10, 50 10 Z" fill="none" stroke="#facc15" stroke-width="2.5" />
          <path d="M50 10 V 90" stroke="#facc15" stroke-width="1" />
          <path d="M35 40 Q 45 45, 50 40 T 65 40" fill="none" stroke="#fde047" stroke-width="1" />
          <path d="M35 60 Q 45 65, 50 60 T 65 60" fill="none" stroke="#fde047" stroke-width="1" />
        </g>
        <g class="brain-variant rotten">
          <path d="M50 12 C 28 12, 12 33, 15 50 C 18 70, 25 88, 50 88 C 72 88, 88 67, 85 50 C 82 30, 75 12, 50 12 Z" fill="none" stroke="#ef4444" stroke-width="2" stroke-dasharray="4 4" />
          <path d="M50 12 V 88" stroke="#ef4444" stroke-width="0.5" stroke-dasharray="2 2" />
          <path d="M40 30 L 60 50 M 60 30 L 40 50" stroke="#f87171" stroke-width="1" />
          <path d="M40 60 L 60 80 M 60 60 L 40 80" stroke="#f87171" stroke-width="1" />
        </g>
      </svg>
    </div>

    <section>
      <div class="bar" role="progressbar" aria-label="Brain health" aria-valuemin="0" aria-valuemax="100" aria-valuenow="{{PERCENT_RAW}}" id="bar">
        <div class="fill {{BAR_CLASS}}" id="bar-fill" style="width: {{PERCENT_RAW}}%"></div>
      </div>
      <p class="percent"><span id="percent">{{PERCENT}}</span>% HEALTHY</p>
    </section>

    <section>
      <p class="timer" id="timer">{{TIMER}}</p>
      <p class="timer-label">Focus Session</p>
    </section>

    <form id="toggle-form" method="post" action="/session/toggle">
      <button class="btn-toggle" id="toggle" type="submit">{{TOGGLE_LABEL}}</button>
    </form>

    <section>
      <button class="goal-toggle" id="goal-toggle" type="button" {{GOAL_DISABLED}}>Change Daily Goal</button>
      <form class="goal-form" id="goal-form" method="post" action="/goal">
        <input type="number" name="minutes" id="goal-input" min="1" placeholder="Minutes" value="{{GOAL}}" />
        <button type="submit">Set</button>
      </form>
    </section>

    <section>
      <button class="btn-tip" id="tip-btn" type="button" {{TIP_DISABLED}}>{{TIP_BUTTON}}</button>
      <div class="tip" id="tip" {{TIP_HIDDEN}}>{{TIP}}</div>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const goalEl = document.getElementById('goal');
    const brainEl = document.getElementById('brain');
    const barEl = document.getElementById('bar');
    const barFillEl = document.getElementById('bar-fill');
    const percentEl = document.getElementById('percent');
    const timerEl = document.getElementById('timer');
    const toggleEl = document.getElementById('toggle');
    const goalToggleEl = document.getElementById('goal-toggle');
    const goalFormEl = document.getElementById('goal-form');
    const goalInputEl = document.getElementById('goal-input');
    const tipBtnEl = document.getElementById('tip-btn');
    const tipEl = document.getElementById('tip');

    let running = {{RUNNING}};
    let tipLoading = {{TIP_LOADING}};
    let poller = null;

    const render = (view) => {
      running = view.is_running;
      tipLoading = view.is_tip_loading;
      statusEl.textContent = view.status_label;
      statusEl.className = view.status_color_class;
      goalEl.textContent = view.daily_goal_minutes;
      brainEl.dataset.state = view.brain_state;
      barEl.setAttribute('aria-valuenow', view.health_percent.toFixed(2));
      barFillEl.className = `fill ${view.health_bar_class}`;
      barFillEl.style.width = `${view.health_percent}%`;
      percentEl.textContent = view.health_percent.toFixed(0);
      timerEl.textContent = view.timer_display;
      toggleEl.textContent = view.is_running ? 'Stop Session' : 'Start Focus';
      goalToggleEl.disabled = view.is_running;
      if (view.is_running) {
        closeGoal();
      }
      tipBtnEl.disabled = view.is_tip_loading;
      tipBtnEl.textContent = view.is_tip_loading ? 'Thinking...' : 'Get a Focus Tip';
      if (view.tip_text) {
        tipEl.textContent = `"${view.tip_text}"`;
        tipEl.hidden = false;
      } else {
        tipEl.hidden = true;
      }
      syncPolling();
    };

    const closeGoal = () => {
      goalFormEl.classList.remove('open');
      goalToggleEl.textContent = 'Change Daily Goal';
    };

    const call = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error(`Request failed: ${res.status}`);
      }
      render(await res.json());
    };

    const refresh = () => call('GET', '/api/state').catch((err) => console.error(err));

    const syncPolling = () => {
      const active = running || tipLoading;
      if (active && !poller) {
        poller = setInterval(refresh, 1000);
      } else if (!active && poller) {
        clearInterval(poller);
        poller = null;
      }
    };

    document.getElementById('toggle-form').addEventListener('submit', (event) => {
      event.preventDefault();
      call('POST', '/api/session/toggle').catch((err) => console.error(err));
    });

    goalToggleEl.addEventListener('click', () => {
      const open = goalFormEl.classList.toggle('open');
      goalToggleEl.textContent = open ? 'Cancel' : 'Change Daily Goal';
    });

    goalFormEl.addEventListener('submit', (event) => {
      event.preventDefault();
      const minutes = goalInputEl.value;
      const parsed = Number.parseInt(minutes, 10);
      if (Number.isNaN(parsed) || parsed <= 0) {
        return;
      }
      call('POST', '/api/goal', { minutes })
        .then(closeGoal)
        .catch((err) => console.error(err));
    });

    tipBtnEl.addEventListener('click', () => {
      tipBtnEl.disabled = true;
      tipBtnEl.textContent = 'Thinking...';
      tipEl.hidden = true;
      call('POST', '/api/tip').catch((err) => console.error(err));
    });

    syncPolling();
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::SessionState;

    fn view(is_running: bool) -> DashboardView {
        DashboardView {
            date_key: "focusData_2026-3-10".to_string(),
            session_state: if is_running {
                SessionState::Running
            } else {
                SessionState::Stopped
            },
            session_elapsed_seconds: 125,
            timer_display: "02:05".to_string(),
            total_focus_seconds_today: 1500,
            health_percent: 41.666,
            health_bar_class: "bar-yellow".to_string(),
            brain_state: BrainState::Average,
            status_label: "STAYING SHARP".to_string(),
            status_color_class: "text-yellow-400".to_string(),
            daily_goal_minutes: 60,
            is_running,
            tip_text: None,
            is_tip_loading: false,
        }
    }

    #[test]
    fn renders_current_values() {
        let html = render_index(&view(false));
        assert!(html.contains(r#"<h1 id="status" class="text-yellow-400">STAYING SHARP</h1>"#));
        assert!(html.contains(r#"data-state="average""#));
        assert!(html.contains(r#"<span id="percent">42</span>"#));
        assert!(html.contains(r#"<p class="timer" id="timer">02:05</p>"#));
        assert!(html.contains("Start Focus"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn running_session_locks_goal_setter() {
        let html = render_index(&view(true));
        assert!(html.contains(r#"id="toggle" type="submit">Stop Session</button>"#));
        assert!(html.contains(r#"type="button" disabled>Change Daily Goal"#));
        assert!(html.contains("let running = true;"));
    }

    #[test]
    fn reload_shows_current_tip() {
        let mut current = view(false);
        current.tip_text = Some("Focus <now> & \"later\"".to_string());
        let html = render_index(&current);
        assert!(html.contains(
            r#"<div class="tip" id="tip" >&quot;Focus &lt;now&gt; &amp; &quot;later&quot;&quot;</div>"#
        ));
        assert!(html.contains(r#"id="tip-btn" type="button" >Get a Focus Tip</button>"#));
        assert!(html.contains("let tipLoading = false;"));
    }

    #[test]
    fn reload_while_tip_loading_keeps_button_busy() {
        let mut current = view(false);
        current.is_tip_loading = true;
        let html = render_index(&current);
        assert!(html.contains(r#"id="tip-btn" type="button" disabled>Thinking...</button>"#));
        assert!(html.contains(r#"<div class="tip" id="tip" hidden></div>"#));
        assert!(html.contains("let tipLoading = true;"));
        assert!(!html.contains("{{"));
    }
}
