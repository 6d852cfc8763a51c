use crate::models::Preferences;

pub fn render_index(preferences: &Preferences) -> String {
    let theme = if preferences.dark_mode { "dark" } else { "light" };
    INDEX_HTML
        .replace("{{THEME}}", theme)
        .replace("{{LANG}}", &preferences.language)
        .replace("{{TARGET}}", &preferences.target_kcal.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{LANG}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Compteur de cals</title>
  <style>
    :root {
      --bg: #0b0b0f;
      --panel: #14141b;
      --card: #1a1a22;
      --ink: #e6e6eb;
      --muted: #9da3ae;
      --faint: #6b7280;
      --line: #262631;
      --accent: #6366f1;
      --danger: #ef4444;
    }

    body.light {
      --bg: #f6f6f9;
      --panel: #ffffff;
      --card: #eef0f4;
      --ink: #1c1c22;
      --muted: #5b6270;
      --faint: #8a90a0;
      --line: #d9dce3;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      display: flex;
      flex-direction: column;
    }

    .content {
      flex: 1;
      width: min(760px, 100%);
      margin: 0 auto;
      padding: clamp(16px, 2vw, 24px);
      display: flex;
      flex-direction: column;
      gap: 16px;
      min-height: 0;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    h1 {
      margin: 0;
      font-size: clamp(22px, 2vw + 10px, 30px);
    }

    .menu {
      position: relative;
    }

    .menu-btn {
      border: 0;
      background: var(--card);
      color: var(--ink);
      width: 36px;
      height: 36px;
      border-radius: 8px;
      cursor: pointer;
      font-size: 18px;
    }

    .menu-panel {
      position: absolute;
      right: 0;
      top: 44px;
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 12px;
      display: none;
      flex-direction: column;
      gap: 10px;
      min-width: 220px;
      z-index: 10;
    }

    .menu-panel.open {
      display: flex;
    }

    .menu-panel label {
      font-size: 13px;
      color: var(--muted);
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 8px;
    }

    .tabbar {
      display: flex;
      gap: 24px;
      border-bottom: 1px solid var(--line);
    }

    .tabbar button {
      appearance: none;
      border: 0;
      background: transparent;
      cursor: pointer;
      color: var(--muted);
      font-weight: 700;
      font-size: 16px;
      padding: 10px 2px 12px;
      border-bottom: 3px solid transparent;
    }

    .tabbar button.active {
      color: var(--ink);
      border-bottom-color: var(--accent);
    }

    .panel {
      display: none;
      flex-direction: column;
      gap: 12px;
    }

    .panel.active {
      display: flex;
    }

    .row {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .row.spread {
      justify-content: space-between;
    }

    input[type="search"],
    input[type="number"] {
      background: var(--card);
      color: var(--ink);
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 10px 12px;
      font-size: 15px;
    }

    input[type="search"] {
      flex: 1;
    }

    button.primary {
      border: 0;
      background: var(--accent);
      color: #fff;
      border-radius: 8px;
      padding: 10px 16px;
      font-size: 15px;
      cursor: pointer;
    }

    button.primary:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .hint {
      color: var(--muted);
      font-size: 14px;
    }

    .error {
      color: var(--danger);
      font-size: 14px;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      padding: 14px;
      display: flex;
      flex-direction: column;
      gap: 8px;
    }

    .card .name {
      font-weight: 700;
    }

    .nutri {
      display: inline-block;
      min-width: 22px;
      text-align: center;
      border-radius: 6px;
      padding: 2px 6px;
      font-weight: 700;
      color: #fff;
      text-transform: uppercase;
      font-size: 12px;
    }

    .daystrip {
      display: flex;
      gap: 6px;
      overflow-x: auto;
      padding-bottom: 4px;
    }

    .daystrip button {
      border: 0;
      background: var(--card);
      color: var(--muted);
      border-radius: 10px;
      min-width: 52px;
      padding: 8px 4px;
      cursor: pointer;
      white-space: pre-line;
      font-size: 12px;
      line-height: 1.4;
    }

    .daystrip button.selected {
      background: var(--accent);
      color: #fff;
    }

    .track {
      position: relative;
      background: var(--card);
      border-radius: 999px;
      height: 26px;
      overflow: hidden;
    }

    .track .fill {
      position: absolute;
      inset: 0 auto 0 0;
      border-radius: 999px;
    }

    .track .text {
      position: absolute;
      inset: 0;
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 0 10px;
      font-size: 12px;
      color: var(--ink);
    }

    .items {
      display: flex;
      flex-direction: column;
      gap: 8px;
      max-height: 45vh;
      overflow-y: auto;
    }

    .item {
      background: var(--card);
      border-radius: 10px;
      padding: 10px 12px;
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .item .qty {
      width: 76px;
    }

    .item .del {
      border: 0;
      background: transparent;
      color: var(--danger);
      cursor: pointer;
      font-size: 16px;
    }

    .grid {
      display: grid;
      gap: 6px;
    }

    .grid .weeklabel {
      color: var(--faint);
      font-size: 11px;
      text-align: center;
    }

    .grid .daylabel {
      color: var(--muted);
      font-size: 12px;
      line-height: 28px;
      height: 28px;
    }

    .grid .cell {
      height: 28px;
      border-radius: 6px;
      font-size: 11px;
      display: grid;
      place-items: center;
      color: var(--ink);
    }

    .legend {
      display: flex;
      align-items: center;
      gap: 10px;
      color: var(--muted);
      font-size: 12px;
    }

    .legend .bar {
      flex: 1 1 140px;
      height: 10px;
      border-radius: 999px;
      background: linear-gradient(90deg, #8b5cf6, #ec4899 70%, #ef4444);
    }

    .monthnav button {
      border: 0;
      background: var(--card);
      color: var(--ink);
      width: 34px;
      height: 34px;
      border-radius: 8px;
      cursor: pointer;
    }

    .subtabs {
      display: flex;
      gap: 16px;
      border-bottom: 1px solid var(--line);
    }

    .subtabs button {
      appearance: none;
      border: 0;
      background: transparent;
      color: var(--muted);
      cursor: pointer;
      font-size: 14px;
      padding: 6px 2px 8px;
      border-bottom: 2px solid transparent;
    }

    .subtabs button.active {
      color: var(--ink);
      border-bottom-color: var(--accent);
    }
  </style>
</head>
<body class="{{THEME}}">
  <div class="content">
    <header>
      <h1 data-i18n="title"></h1>
      <div class="menu">
        <button class="menu-btn" id="menu-btn" aria-label="Menu">&#9776;</button>
        <div class="menu-panel" id="menu-panel">
          <label><span data-i18n="menu.theme"></span>
            <button class="primary" id="theme-toggle"></button>
          </label>
          <label><span data-i18n="menu.language"></span>
            <button class="primary" id="lang-toggle"></button>
          </label>
          <label><span data-i18n="menu.target"></span>
            <input type="number" id="target-input" min="800" step="50" value="{{TARGET}}" />
          </label>
          <label><span data-i18n="menu.clear"></span>
            <button class="primary" id="clear-btn">&#10006;</button>
          </label>
        </div>
      </div>
    </header>

    <nav class="tabbar" role="tablist">
      <button data-tab="search" class="active" data-i18n="tab.search"></button>
      <button data-tab="history" data-i18n="tab.history"></button>
      <button data-tab="tracking" data-i18n="tab.tracking"></button>
    </nav>

    <section class="panel active" id="panel-search">
      <div class="row">
        <input type="search" id="search-input" autocomplete="off" spellcheck="false" />
        <button class="primary" id="search-btn" data-i18n="search.go"></button>
      </div>
      <div class="error" id="search-error" hidden></div>
      <div class="card" id="result-card" hidden>
        <div class="row spread">
          <span class="name" id="result-name"></span>
          <span>
            <span id="result-kcal"></span>
            <span class="nutri" id="result-nutri" hidden></span>
          </span>
        </div>
        <div class="row spread"><span class="hint" data-i18n="search.fat"></span><span id="result-fat"></span></div>
        <div class="row spread"><span class="hint" data-i18n="search.sugars"></span><span id="result-sugars"></span></div>
        <div class="row spread"><span class="hint" data-i18n="search.proteins"></span><span id="result-proteins"></span></div>
        <div class="row">
          <button class="primary" id="save-btn" data-i18n="search.save"></button>
          <button class="primary" id="fav-btn">&#9825;</button>
        </div>
      </div>
      <div class="subtabs">
        <button data-subtab="favorites" class="active" data-i18n="search.favorites"></button>
        <button data-subtab="recents" data-i18n="search.recents"></button>
      </div>
      <div class="items" id="subtab-list"></div>
    </section>

    <section class="panel" id="panel-history">
      <div class="daystrip" id="day-strip"></div>
      <div class="row spread">
        <span class="hint" data-i18n="history.total"></span>
        <span id="day-total"></span>
      </div>
      <div class="track" id="bar-carbs"></div>
      <div class="track" id="bar-fat"></div>
      <div class="track" id="bar-protein"></div>
      <div class="items" id="day-items"></div>
    </section>

    <section class="panel" id="panel-tracking">
      <div class="row spread">
        <span class="name" id="month-label"></span>
        <span class="monthnav">
          <button id="month-prev">&#8249;</button>
          <button id="month-next">&#8250;</button>
        </span>
      </div>
      <div class="legend">
        <span id="legend-target"></span>
        <span class="bar"></span>
      </div>
      <div class="grid" id="month-grid"></div>
    </section>
  </div>

  <script>
    let lang = '{{LANG}}';
    let target = Number('{{TARGET}}') || 2000;

    const STRINGS = {
      fr: {
        'title': 'Compteur de cals',
        'tab.search': 'Recherche',
        'tab.history': 'Historique',
        'tab.tracking': 'Suivi',
        'menu.theme': 'Thème',
        'menu.language': 'Langue',
        'menu.target': 'Objectif kcal',
        'menu.clear': 'Tout effacer',
        'search.go': 'Chercher',
        'search.placeholder': 'Chercher un aliment (ex: yaourt, pomme...)',
        'search.save': 'Enregistrer',
        'search.fat': 'Lipides',
        'search.sugars': 'Sucres',
        'search.proteins': 'Protéines',
        'search.favorites': 'Favoris',
        'search.recents': 'Récents',
        'search.error': 'Aucun produit trouvé.',
        'search.product': 'Produit',
        'history.total': 'Total du jour',
        'history.empty': 'Aucun aliment enregistré ce jour.',
        'macro.carbs': 'Glucides',
        'macro.fat': 'Lipides',
        'macro.protein': 'Protéines',
        'weekdays': ['Dim.', 'Lun.', 'Mar.', 'Mer.', 'Jeu.', 'Ven.', 'Sam.'],
        'months': ['janvier', 'février', 'mars', 'avril', 'mai', 'juin',
                   'juillet', 'août', 'septembre', 'octobre', 'novembre', 'décembre']
      },
      en: {
        'title': 'Calorie counter',
        'tab.search': 'Search',
        'tab.history': 'History',
        'tab.tracking': 'Tracking',
        'menu.theme': 'Theme',
        'menu.language': 'Language',
        'menu.target': 'Target kcal',
        'menu.clear': 'Clear all',
        'search.go': 'Search',
        'search.placeholder': 'Search a food (e.g. yogurt, apple...)',
        'search.save': 'Save',
        'search.fat': 'Fat',
        'search.sugars': 'Sugars',
        'search.proteins': 'Proteins',
        'search.favorites': 'Favorites',
        'search.recents': 'Recents',
        'search.error': 'No product found.',
        'search.product': 'Product',
        'history.total': 'Day total',
        'history.empty': 'Nothing saved this day.',
        'macro.carbs': 'Carbs',
        'macro.fat': 'Fat',
        'macro.protein': 'Proteins',
        'weekdays': ['Sun.', 'Mon.', 'Tue.', 'Wed.', 'Thu.', 'Fri.', 'Sat.'],
        'months': ['January', 'February', 'March', 'April', 'May', 'June',
                   'July', 'August', 'September', 'October', 'November', 'December']
      }
    };
    const t = (key) => STRINGS[lang][key] ?? key;

    const NUTRI_COLORS = { a: '#1fa363', b: '#7ac547', c: '#f5c100', d: '#ef8200', e: '#e63e11' };
    const MACRO_COLORS = { carbs: '#ff9f43', fat: '#9980FA', protein: '#1dd1a1' };

    const pad = (n) => String(n).padStart(2, '0');
    const isoDate = (d) => `${d.getFullYear()}-${pad(d.getMonth() + 1)}-${pad(d.getDate())}`;
    const isoMonth = (d) => `${d.getFullYear()}-${pad(d.getMonth() + 1)}`;

    async function api(path, options) {
      const res = await fetch(path, options);
      if (!res.ok) throw new Error(await res.text() || `HTTP ${res.status}`);
      return res.status === 204 ? null : res.json();
    }

    function applyStrings() {
      document.documentElement.lang = lang;
      document.querySelectorAll('[data-i18n]').forEach((el) => {
        el.textContent = t(el.dataset.i18n);
      });
      document.getElementById('search-input').placeholder = t('search.placeholder');
      document.getElementById('theme-toggle').textContent =
        document.body.classList.contains('dark') ? '☀' : '☾';
      document.getElementById('lang-toggle').textContent = lang.toUpperCase();
      document.getElementById('legend-target').textContent = `max ${target} kcal`;
    }

    /* ---------- tabs ---------- */
    document.querySelectorAll('.tabbar button').forEach((btn) => {
      btn.addEventListener('click', () => {
        document.querySelectorAll('.tabbar button').forEach((b) => b.classList.remove('active'));
        document.querySelectorAll('.panel').forEach((p) => p.classList.remove('active'));
        btn.classList.add('active');
        document.getElementById(`panel-${btn.dataset.tab}`).classList.add('active');
      });
    });

    /* ---------- menu ---------- */
    const menuPanel = document.getElementById('menu-panel');
    document.getElementById('menu-btn').addEventListener('click', () => {
      menuPanel.classList.toggle('open');
    });

    async function putPreferences() {
      const prefs = {
        dark_mode: document.body.classList.contains('dark'),
        language: lang,
        target_kcal: target,
      };
      try {
        const stored = await api('/api/preferences', {
          method: 'PUT',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(prefs),
        });
        target = stored.target_kcal;
        document.getElementById('target-input').value = target;
      } catch {}
      applyStrings();
    }

    document.getElementById('theme-toggle').addEventListener('click', () => {
      document.body.classList.toggle('dark');
      document.body.classList.toggle('light');
      putPreferences();
    });
    document.getElementById('lang-toggle').addEventListener('click', () => {
      lang = lang === 'fr' ? 'en' : 'fr';
      putPreferences().then(refreshAll);
    });
    document.getElementById('target-input').addEventListener('change', (e) => {
      target = Number(e.target.value) || 2000;
      putPreferences().then(refreshAll);
    });
    document.getElementById('clear-btn').addEventListener('click', async () => {
      try { await api('/api/data', { method: 'DELETE' }); } catch {}
      refreshAll();
    });

    /* ---------- search tab ---------- */
    let result = null;
    let favorites = [];
    let recents = [];
    let subtab = 'favorites';

    function renderValue(v, unit) {
      return typeof v === 'number' ? `${v} ${unit}` : '—';
    }

    function kcalOf(n) {
      const v = n ? n['energy-kcal_100g'] : null;
      return typeof v === 'number' ? v : null;
    }

    function renderResult() {
      const card = document.getElementById('result-card');
      if (!result) { card.hidden = true; return; }
      card.hidden = false;
      const n = result.nutriments || {};
      document.getElementById('result-name').textContent =
        result.product_name || t('search.product');
      const kcal = kcalOf(n);
      document.getElementById('result-kcal').textContent =
        kcal !== null ? `${kcal} kcal` : '—';
      const nutri = document.getElementById('result-nutri');
      const grade = (result.nutriscore_grade || '').toLowerCase();
      if (NUTRI_COLORS[grade]) {
        nutri.hidden = false;
        nutri.textContent = grade;
        nutri.style.background = NUTRI_COLORS[grade];
      } else {
        nutri.hidden = true;
      }
      document.getElementById('result-fat').textContent = renderValue(n.fat_100g, 'g');
      document.getElementById('result-sugars').textContent = renderValue(n.sugars_100g, 'g');
      document.getElementById('result-proteins').textContent = renderValue(n.proteins_100g, 'g');
      const isFav = favorites.some((f) => f.item.product_name === result.product_name);
      document.getElementById('fav-btn').innerHTML = isFav ? '&#9829;' : '&#9825;';
    }

    function renderSubtab() {
      const list = document.getElementById('subtab-list');
      list.innerHTML = '';
      const entries = subtab === 'favorites' ? favorites : recents;
      entries.forEach((entry) => {
        const row = document.createElement('div');
        row.className = 'item';
        const name = document.createElement('span');
        name.textContent = entry.item.product_name || t('search.product');
        name.style.flex = '1';
        const kcal = document.createElement('span');
        const k = kcalOf(entry.item.nutriments);
        kcal.className = 'hint';
        kcal.textContent = k !== null ? `${k} kcal` : '—';
        row.append(name, kcal);
        row.addEventListener('click', () => {
          result = entry.item;
          renderResult();
        });
        list.appendChild(row);
      });
    }

    async function loadLists() {
      try { favorites = await api('/api/favorites'); } catch { favorites = []; }
      try { recents = await api('/api/recents'); } catch { recents = []; }
      renderSubtab();
      renderResult();
    }

    document.querySelectorAll('.subtabs button').forEach((btn) => {
      btn.addEventListener('click', () => {
        document.querySelectorAll('.subtabs button').forEach((b) => b.classList.remove('active'));
        btn.classList.add('active');
        subtab = btn.dataset.subtab;
        renderSubtab();
      });
    });

    async function doSearch() {
      const input = document.getElementById('search-input');
      const q = input.value.trim();
      if (!q) return;
      const errorLine = document.getElementById('search-error');
      errorLine.hidden = true;
      document.getElementById('search-btn').disabled = true;
      try {
        result = await api(`/api/search?q=${encodeURIComponent(q)}`);
        renderResult();
      } catch {
        result = null;
        renderResult();
        errorLine.hidden = false;
        errorLine.textContent = t('search.error');
      } finally {
        document.getElementById('search-btn').disabled = false;
      }
    }

    document.getElementById('search-btn').addEventListener('click', doSearch);
    document.getElementById('search-input').addEventListener('keydown', (e) => {
      if (e.key === 'Enter') doSearch();
    });

    document.getElementById('save-btn').addEventListener('click', async () => {
      if (!result) return;
      try {
        await api('/api/history', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(result),
        });
      } catch {}
    });

    document.getElementById('fav-btn').addEventListener('click', async () => {
      if (!result) return;
      try {
        await api('/api/favorites/toggle', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ id: String(Date.now()), item: result }),
        });
      } catch {}
    });

    /* ---------- history tab ---------- */
    let selectedDate = new Date();

    function renderDayStrip() {
      const strip = document.getElementById('day-strip');
      strip.innerHTML = '';
      const base = new Date();
      for (let i = -7; i <= 7; i += 1) {
        const d = new Date(base);
        d.setDate(base.getDate() + i);
        const btn = document.createElement('button');
        const weekday = t('weekdays')[d.getDay()].replace('.', '').toUpperCase();
        btn.textContent = `${weekday}\n${d.getDate()}`;
        if (isoDate(d) === isoDate(selectedDate)) btn.classList.add('selected');
        btn.addEventListener('click', () => {
          selectedDate = d;
          renderDayStrip();
          loadDay();
        });
        strip.appendChild(btn);
      }
    }

    function renderBar(el, label, value, max, color) {
      const pct = max > 0 ? (value / max) * 100 : 0;
      el.innerHTML = '';
      const fill = document.createElement('div');
      fill.className = 'fill';
      fill.style.width = `${Math.min(100, pct)}%`;
      fill.style.background = color;
      const text = document.createElement('div');
      text.className = 'text';
      text.innerHTML = `<span>${Math.round(pct)}%</span>` +
        `<span>${label} · ${Math.round(value)} g / ${max} g</span>`;
      el.append(fill, text);
    }

    async function loadDay() {
      let day;
      try {
        day = await api(`/api/day?date=${isoDate(selectedDate)}`);
      } catch { return; }
      target = day.target_kcal;
      document.getElementById('day-total').textContent =
        `${day.totals.grams} g · ${Math.round(day.totals.kcal)} kcal`;
      renderBar(document.getElementById('bar-carbs'), t('macro.carbs'),
        day.totals.carbs_g, day.limits.carbs_g, MACRO_COLORS.carbs);
      renderBar(document.getElementById('bar-fat'), t('macro.fat'),
        day.totals.fat_g, day.limits.fat_g, MACRO_COLORS.fat);
      renderBar(document.getElementById('bar-protein'), t('macro.protein'),
        day.totals.protein_g, day.limits.protein_g, MACRO_COLORS.protein);

      const list = document.getElementById('day-items');
      list.innerHTML = '';
      if (day.items.length === 0) {
        const hint = document.createElement('div');
        hint.className = 'hint';
        hint.textContent = t('history.empty');
        list.appendChild(hint);
        return;
      }
      day.items.forEach((item) => {
        const row = document.createElement('div');
        row.className = 'item';
        const del = document.createElement('button');
        del.className = 'del';
        del.innerHTML = '&#128465;';
        del.addEventListener('click', async () => {
          try { await api(`/api/history/${item.id}`, { method: 'DELETE' }); } catch {}
        });
        const name = document.createElement('span');
        name.textContent = item.product_name;
        name.style.flex = '1';
        const qty = document.createElement('input');
        qty.type = 'number';
        qty.className = 'qty';
        qty.min = '0';
        qty.step = '10';
        qty.value = item.quantity;
        qty.addEventListener('change', async () => {
          const quantity = Math.max(0, Math.trunc(Number(qty.value) || 0));
          try {
            await api(`/api/history/${item.id}`, {
              method: 'PATCH',
              headers: { 'Content-Type': 'application/json' },
              body: JSON.stringify({ quantity }),
            });
          } catch {}
        });
        const kcal = document.createElement('span');
        kcal.className = 'hint';
        const base = kcalOf(item.nutriments);
        kcal.textContent = base !== null
          ? `${Math.round((base * item.quantity) / 100)} kcal` : '—';
        row.append(del, name, qty, kcal);
        list.appendChild(row);
      });
    }

    /* ---------- tracking tab ---------- */
    let monthCursor = new Date();
    monthCursor.setDate(1);

    document.getElementById('month-prev').addEventListener('click', () => {
      monthCursor.setMonth(monthCursor.getMonth() - 1);
      loadTracking();
    });
    document.getElementById('month-next').addEventListener('click', () => {
      monthCursor.setMonth(monthCursor.getMonth() + 1);
      loadTracking();
    });

    async function loadTracking() {
      let tracking;
      try {
        tracking = await api(`/api/tracking?month=${isoMonth(monthCursor)}`);
      } catch { return; }
      target = tracking.target_kcal;
      document.getElementById('month-label').textContent =
        `${t('months')[monthCursor.getMonth()]} ${monthCursor.getFullYear()}`;
      document.getElementById('legend-target').textContent = `max ${target} kcal`;

      const grid = document.getElementById('month-grid');
      grid.innerHTML = '';
      grid.style.gridTemplateColumns =
        `56px repeat(${tracking.weeks.length}, minmax(28px, 1fr))`;
      grid.appendChild(document.createElement('div'));
      tracking.weeks.forEach((week) => {
        const label = document.createElement('div');
        label.className = 'weeklabel';
        const [, m, d] = week.split('-');
        label.textContent = `${d}/${m}`;
        grid.appendChild(label);
      });
      tracking.rows.forEach((row) => {
        const dayLabel = document.createElement('div');
        dayLabel.className = 'daylabel';
        dayLabel.textContent = t('weekdays')[row.weekday];
        grid.appendChild(dayLabel);
        row.cells.forEach((cell) => {
          const el = document.createElement('div');
          el.className = 'cell';
          el.style.background = cell.color;
          if (cell.in_month) {
            el.textContent = cell.kcal > 0 ? cell.kcal : '';
            el.title = `${cell.date} · ${cell.kcal} kcal (${Math.round(cell.pct)}%)`;
            if (cell.pct > 100) el.style.color = '#fff';
          }
          grid.appendChild(el);
        });
      });
    }

    /* ---------- change notifications ---------- */
    function refreshAll() {
      applyStrings();
      loadLists();
      loadDay();
      loadTracking();
    }

    async function watchUpdates() {
      let revision = 0;
      try {
        revision = (await api('/api/updates')).revision;
      } catch {}
      for (;;) {
        try {
          const next = (await api(`/api/updates?since=${revision}`)).revision;
          if (next !== revision) {
            revision = next;
            refreshAll();
          }
        } catch {
          await new Promise((resolve) => setTimeout(resolve, 2000));
        }
      }
    }

    renderDayStrip();
    refreshAll();
    watchUpdates();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_index_substitutes_preferences() {
        let html = render_index(&Preferences {
            dark_mode: false,
            language: "en".to_string(),
            target_kcal: 1800,
        });
        assert!(html.contains("class=\"light\""));
        assert!(html.contains("lang = 'en'"));
        assert!(html.contains("value=\"1800\""));
        assert!(!html.contains("{{"));
    }
}
