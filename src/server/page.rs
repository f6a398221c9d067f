//! The interactive viewer page.
//!
//! The page holds no logic of its own beyond rendering: every count, filter,
//! sort and diff comes from the JSON API.

use crate::reports::STYLES;
use axum::response::Html;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Build Log Viewer</title>
    {{STYLES}}
    <style>
        .toolbar { display: flex; gap: 12px; align-items: center; margin-bottom: 20px; flex-wrap: wrap; }
        .toolbar input[type=search] { flex: 1; min-width: 240px; padding: 8px; border-radius: 4px;
            border: 1px solid var(--border-color); background: var(--card-bg); color: var(--text-color); }
        .panes { display: grid; grid-template-columns: 3fr 2fr; gap: 20px; }
        .clickable { cursor: pointer; }
        #detail:empty::before { content: "Select an asset or a bundle."; color: #a6adc8; }
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <h1>Build Log Viewer</h1>
        <p class="muted" id="log-info"></p>
    </div>

    <div class="summary-cards" id="summary"></div>

    <div class="toolbar">
        <input type="search" id="search" placeholder="Filter assets by path">
        <label>Compare with previous log <input type="file" id="compare" accept=".json,application/json"></label>
    </div>

    <div class="section" id="changes"></div>

    <div class="panes">
        <div>
            <table>
                <thead>
                    <tr>
                        <th class="sortable" data-sort="path">Asset</th>
                        <th class="sortable" data-sort="bundles">Bundles</th>
                    </tr>
                </thead>
                <tbody id="assets"></tbody>
            </table>
        </div>
        <div id="detail"></div>
    </div>

    <div class="footer">bundle-log viewer</div>
</div>
<script>
const state = { q: "", sort: "none", dir: "asc" };

function el(tag, text, cls) {
    const node = document.createElement(tag);
    if (text !== undefined && text !== null) node.textContent = String(text);
    if (cls) node.className = cls;
    return node;
}

function card(title, value, cls) {
    const c = el("div", null, "card");
    c.appendChild(el("div", title, "card-title"));
    c.appendChild(el("div", value, "card-value " + (cls || "")));
    return c;
}

async function getJson(url, options) {
    const response = await fetch(url, options);
    const body = await response.json();
    if (!response.ok) {
        throw new Error(body.error ? body.error.message : response.statusText);
    }
    return body;
}

async function loadSummary() {
    const s = await getJson("/api/summary");
    document.getElementById("log-info").textContent = "Log: " + s.log_file;
    const target = document.getElementById("summary");
    target.replaceChildren(
        card("Assets", s.assets), card("Bundles", s.bundles),
        card("Files", s.files), card("GUIDs", s.guids));
}

async function loadAssets() {
    const params = new URLSearchParams({ q: state.q, sort: state.sort, dir: state.dir });
    const data = await getJson("/api/assets?" + params);
    const body = document.getElementById("assets");
    body.replaceChildren(...data.rows.map(row => {
        const tr = el("tr", null, "clickable");
        tr.appendChild(el("td", row.path, "mono"));
        tr.appendChild(el("td", row.bundle_count));
        tr.addEventListener("click", () => showAsset(row.path));
        return tr;
    }));
}

function bundleLink(hash) {
    const a = el("a", hash, "mono clickable");
    a.addEventListener("click", () => showBundle(hash));
    return a;
}

async function showAsset(path) {
    const params = new URLSearchParams({ path });
    const [mapping, lookup] = await Promise.all([
        getJson("/api/assets/bundles?" + params),
        getJson("/api/assets/lookup?" + params),
    ]);
    const detail = document.getElementById("detail");
    detail.replaceChildren(el("h2", path, "mono"));
    detail.appendChild(el("h3", "Bundles (" + mapping.bundle_count + ")"));
    const table = el("table");
    for (const [hash, guids] of Object.entries(mapping.bundles || {})) {
        const tr = el("tr");
        const td = el("td");
        td.appendChild(bundleLink(hash));
        tr.appendChild(td);
        tr.appendChild(el("td", guids.join(", "), "mono"));
        table.appendChild(tr);
    }
    detail.appendChild(table);
    detail.appendChild(el("h3", "Packed into"));
    const list = el("ul");
    for (const hash of lookup.bundles) {
        const li = el("li");
        li.appendChild(bundleLink(hash));
        list.appendChild(li);
    }
    detail.appendChild(list);
}

async function showBundle(hash) {
    const detail = document.getElementById("detail");
    try {
        const bundle = await getJson("/api/bundles/" + encodeURIComponent(hash));
        detail.replaceChildren(el("h2", hash, "mono"));
        if (bundle.crc !== undefined) detail.appendChild(el("p", "CRC " + bundle.crc, "muted"));
        const table = el("table");
        const head = el("tr");
        ["Asset", "GUID", "Size"].forEach(h => head.appendChild(el("th", h)));
        table.appendChild(head);
        for (const file of bundle.files) {
            const tr = el("tr");
            tr.appendChild(el("td", file.asset_path, "mono"));
            tr.appendChild(el("td", file.guid, "mono"));
            tr.appendChild(el("td", file.size === undefined ? "-" : file.size));
            table.appendChild(tr);
        }
        detail.appendChild(table);
    } catch (err) {
        detail.replaceChildren(el("p", err.message, "muted"));
    }
}

function renderChanges(report) {
    const target = document.getElementById("changes");
    target.replaceChildren(el("h2", "Changes"));
    const entries = Object.entries(report.bundleChanges);
    if (!report.addedAssets.length && !report.removedAssets.length && !entries.length) {
        target.appendChild(el("p", "No changes.", "muted"));
        return;
    }
    const table = el("table");
    const row = (badge, label, clickHash) => {
        const tr = el("tr");
        const b = el("td");
        b.appendChild(el("span", badge, "badge badge-" + badge));
        tr.appendChild(b);
        const td = el("td");
        td.appendChild(clickHash ? bundleLink(label) : el("span", label, "mono"));
        tr.appendChild(td);
        table.appendChild(tr);
    };
    report.addedAssets.forEach(path => row("added", path, false));
    report.removedAssets.forEach(path => row("removed", path, false));
    entries.forEach(([hash, change]) => row(change.status, hash, change.status !== "removed"));
    target.appendChild(table);
}

document.getElementById("search").addEventListener("input", event => {
    state.q = event.target.value;
    loadAssets();
});

document.querySelectorAll("th.sortable").forEach(th => th.addEventListener("click", () => {
    const key = th.dataset.sort;
    state.dir = state.sort === key && state.dir === "asc" ? "desc" : "asc";
    state.sort = key;
    loadAssets();
}));

document.getElementById("compare").addEventListener("change", async event => {
    const file = event.target.files[0];
    if (!file) return;
    const target = document.getElementById("changes");
    try {
        const report = await getJson("/api/compare", {
            method: "POST",
            headers: { "Content-Type": "application/json" },
            body: await file.text(),
        });
        renderChanges(report);
    } catch (err) {
        target.replaceChildren(el("p", "Comparison failed: " + err.message, "muted"));
    }
});

loadSummary();
loadAssets();
</script>
</body>
</html>
"##;

/// Render the viewer page with the shared report stylesheet inlined.
pub(crate) fn render_page() -> String {
    PAGE_TEMPLATE.replace("{{STYLES}}", STYLES)
}

pub(super) async fn handle_page() -> Html<String> {
    Html(render_page())
}
