use crate::config::FuelConfig;

pub fn render_index(config: &FuelConfig) -> String {
    INDEX_HTML
        .replace("{{PRICE}}", &format!("{:.2}", config.fuel_price_per_liter))
        .replace("{{CAPACITY}}", &format_liters(config.tank.total_capacity_l))
        .replace("{{RESERVE}}", &format_liters(config.tank.reserve_capacity_l))
        .replace("{{THRESHOLD}}", &format!("{}", config.low_range_threshold_km))
}

fn format_liters(value: f64) -> String {
    let text = format!("{value:.1}");
    text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fuel Log</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f6;
      --bg-2: #c9dbe6;
      --ink: #22282c;
      --accent: #e4572e;
      --accent-2: #2f4858;
      --series-a: #3aa5a0;
      --series-b: #8a63d2;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e2ecf2 60%, #f4f7f9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f666b;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7b8186;
    }

    input {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      margin-top: 16px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: var(--accent-2);
    }

    button.primary {
      background: var(--accent);
    }

    button.danger {
      background: #a33b2b;
    }

    .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    #history {
      margin: 0;
      padding-left: 18px;
      max-height: 240px;
      overflow-y: auto;
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #767d82;
      font-size: 11px;
    }

    .line-a {
      fill: none;
      stroke: var(--series-a);
      stroke-width: 3;
    }

    .line-b {
      fill: none;
      stroke: var(--series-b);
      stroke-width: 3;
    }

    .legend span::before {
      content: "";
      display: inline-block;
      width: 12px;
      height: 12px;
      border-radius: 3px;
      margin-right: 6px;
      background: currentColor;
    }

    .legend .a {
      color: var(--series-a);
      margin-right: 16px;
    }

    .legend .b {
      color: var(--series-b);
    }

    .status {
      min-height: 1.2em;
      color: #5f666b;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Fuel Log</h1>
      <p class="subtitle">Tank {{CAPACITY}} L, reserve {{RESERVE}} L, fuel at {{PRICE}} €/L. Alert under {{THRESHOLD}} km before reserve.</p>
    </header>

    <section class="card">
      <h2>Trip</h2>
      <form id="trip-form" class="grid">
        <label>Trip (km)<input id="trip" type="number" step="0.1" min="0" required /></label>
        <label>Consumption (L/100 km)<input id="consumption" type="number" step="0.1" min="0" required /></label>
        <label>Date (optional)<input id="trip-date" type="date" /></label>
      </form>
      <div class="actions">
        <button class="primary" type="submit" form="trip-form">Calculate</button>
        <form method="post" action="/refuel" id="refuel-form"><button type="submit">Tank filled</button></form>
        <form method="post" action="/history/clear" id="clear-form"><button class="danger" type="submit">Reset history</button></form>
      </div>
      <div class="grid" style="margin-top: 16px">
        <div><label>Before reserve</label><span class="value" id="before-reserve">-- km</span></div>
        <div><label>Before refuel</label><span class="value" id="before-refuel">-- km</span></div>
        <div><label>Estimated cost</label><span class="value" id="cost">-- €</span></div>
      </div>
    </section>

    <section class="card">
      <h2>Consumption trend</h2>
      <div class="legend"><span class="a">Consumption (L/100 km)</span><span class="b">Trip (km)</span></div>
      <svg id="chart" viewBox="0 0 600 280" aria-label="Consumption chart" role="img"></svg>
    </section>

    <section class="grid">
      <div class="card">
        <h2>Monthly cost</h2>
        <div id="monthly"></div>
      </div>
      <div class="card">
        <h2>Report</h2>
        <form id="report-form" class="grid">
          <label>From<input id="start" type="date" required /></label>
          <label>To<input id="end" type="date" required /></label>
        </form>
        <div class="actions"><button type="submit" form="report-form">Generate report</button></div>
        <div id="report"></div>
      </div>
    </section>

    <section class="card">
      <h2>History</h2>
      <ul id="history"></ul>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const scale = (values, height, top, bottom) => {
      let min = Math.min(0, ...values);
      let max = Math.max(...values);
      if (min === max) {
        max += 1;
      }
      return (value) => height - bottom - ((value - min) * (height - top - bottom)) / (max - min);
    };

    const renderChart = (series) => {
      if (!series.labels.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No trips yet</text>';
        return;
      }

      const width = 600;
      const height = 280;
      const paddingX = 44;
      const top = 24;
      const bottom = 34;
      const count = series.labels.length;
      const step = count > 1 ? (width - paddingX * 2) / (count - 1) : 0;
      const x = (index) => paddingX + index * step;
      const yA = scale(series.consumption, height, top, bottom);
      const yB = scale(series.trip_km, height, top, bottom);
      const path = (values, y) =>
        values.map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(value).toFixed(2)}`).join(' ');

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const yPos = top + ((height - top - bottom) * i) / 4;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
      }

      const labelEvery = Math.max(1, Math.ceil(count / 8));
      const labels = series.labels
        .map((label, index) => index % labelEvery === 0
          ? `<text class="chart-label" x="${x(index)}" y="${height - bottom + 18}" text-anchor="middle">${label.slice(0, 5)}</text>`
          : '')
        .join('');

      chartEl.innerHTML = `
        ${grid}
        <path class="line-a" d="${path(series.consumption, yA)}" />
        <path class="line-b" d="${path(series.trip_km, yB)}" />
        ${labels}
      `;
    };

    const renderHistory = (entries) => {
      const list = document.getElementById('history');
      list.innerHTML = '';
      entries.forEach((entry) => {
        const item = document.createElement('li');
        item.textContent = entry.kind === 'refuel'
          ? `Tank filled on ${entry.date} - fuel price ${entry.fuel_price_per_liter.toFixed(2)} €/L`
          : `${entry.date} - trip ${entry.trip_km} km, ${entry.consumption_l_per_100km.toFixed(1)} L/100 km`;
        list.appendChild(item);
      });
    };

    const renderMonthly = (data) => {
      const target = document.getElementById('monthly');
      if (data.status === 'no_data') {
        target.textContent = data.message;
        return;
      }
      target.innerHTML = data.months
        .map((month) => `<p>${month.label}: ${month.total_cost.toFixed(2)} € (${month.total_liters.toFixed(1)} L)</p>`)
        .join('');
    };

    const refresh = async () => {
      const [history, monthly, chart] = await Promise.all([
        request('/api/history'),
        request('/api/monthly'),
        request('/api/chart')
      ]);
      renderHistory(history.entries);
      renderMonthly(monthly);
      renderChart(chart);
    };

    const asDayMonthYear = (iso) => {
      if (!iso) {
        return null;
      }
      const [year, month, day] = iso.split('-');
      return `${day}/${month}/${year}`;
    };

    const notify = (alert) => {
      if ('Notification' in window && Notification.permission === 'granted') {
        new Notification(alert.title, { body: alert.body });
      }
      setStatus(alert.body, 'error');
    };

    document.getElementById('trip-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const body = {
        trip: document.getElementById('trip').value,
        consumption: document.getElementById('consumption').value,
        date: asDayMonthYear(document.getElementById('trip-date').value)
      };
      request('/api/calculate', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      })
        .then((data) => {
          const p = data.projection;
          document.getElementById('before-reserve').textContent = `${p.remaining_distance_before_reserve_km.toFixed(1)} km`;
          document.getElementById('before-refuel').textContent = `${p.total_distance_before_refuel_km.toFixed(1)} km`;
          document.getElementById('cost').textContent = `${p.estimated_cost.toFixed(2)} €`;
          if (data.alert) {
            notify(data.alert);
          } else {
            setStatus('Saved', 'ok');
          }
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('refuel-form').addEventListener('submit', (event) => {
      event.preventDefault();
      request('/api/refuel', { method: 'POST' })
        .then(() => {
          ['before-reserve', 'before-refuel'].forEach((id) => { document.getElementById(id).textContent = '-- km'; });
          document.getElementById('cost').textContent = '-- €';
          document.getElementById('trip').value = '';
          document.getElementById('consumption').value = '';
          setStatus('Refuel logged', 'ok');
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('clear-form').addEventListener('submit', (event) => {
      event.preventDefault();
      if (!confirm('Delete the whole history?')) {
        return;
      }
      request('/api/history', { method: 'DELETE' })
        .then(() => {
          document.getElementById('report').textContent = '';
          setStatus('History cleared', 'ok');
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('report-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const start = document.getElementById('start').value;
      const end = document.getElementById('end').value;
      const target = document.getElementById('report');
      if (start > end) {
        setStatus('The start date must be before the end date.', 'error');
        return;
      }
      request(`/api/report?start=${encodeURIComponent(start)}&end=${encodeURIComponent(end)}`)
        .then((data) => {
          target.innerHTML = data.status === 'no_data'
            ? `<p>${data.message}</p>`
            : `<p>Total distance: ${data.report.total_trip_km.toFixed(1)} km</p>
               <p>Average consumption: ${data.report.average_consumption.toFixed(2)} L/100 km</p>`;
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    if ('Notification' in window) {
      Notification.requestPermission();
    }

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
