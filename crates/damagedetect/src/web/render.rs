//! Server-side HTML for the dashboard pages.
//!
//! Pages are assembled with `format!` from small presentational pieces: a
//! status pulse, one card per record, and a shared layout with the site
//! navigation. All free text is escaped before it is interpolated.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::records::{DamageRecord, DroneRecord};

const STYLESHEET: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#0b0f19;color:#e5e7eb}\
nav{display:flex;gap:1.5rem;align-items:center;padding:1rem 2rem;border-bottom:1px solid #1f2937}\
nav .brand{font-weight:700;margin-right:auto}\
nav a{color:#e5e7eb;text-decoration:none}\
main{padding:2rem;display:flex;flex-direction:column;align-items:center}\
h1.title{font-size:2.25rem;text-decoration:underline;text-underline-offset:4px}\
.hero{font-size:3rem;font-weight:600;text-align:center}.hero .accent{color:#06b6d4}\
.subtitle{color:#9ca3af;margin:1rem 0 2rem}\
.button{padding:.5rem 1.25rem;border-radius:9999px;border:1px solid #374151;color:#e5e7eb;text-decoration:none}\
.button.primary{background:#2563eb;border-color:#2563eb}\
.cards{display:flex;flex-direction:column;align-items:center;gap:.25rem;margin-top:2rem}\
.card{position:relative;display:flex;justify-content:space-between;width:700px;margin:1rem;padding:1.5rem;border-radius:.5rem;background:rgba(229,231,235,.1)}\
.fields{display:flex;gap:2rem;padding:0 1rem}\
.field{display:flex;flex-direction:column;white-space:nowrap}\
.field h3{margin:0;font-size:.875rem;font-weight:500;color:#9ca3af}.field p{margin:.25rem 0 0}\
.gear{position:absolute;top:.5rem;right:.5rem;background:none;border:0;color:#9ca3af}\
.pulse{position:absolute;top:.5rem;left:.5rem;display:flex;width:1rem;height:1rem}\
.pulse span{position:absolute;width:100%;height:100%;border-radius:9999px}\
.pulse .ping{opacity:.75;animation:ping 1s cubic-bezier(0,0,.2,1) infinite}\
@keyframes ping{75%,100%{transform:scale(2);opacity:0}}\
.actions{display:flex;gap:.5rem;align-items:center}\
.action{padding:.25rem .75rem;border-radius:.25rem;border:0;white-space:nowrap}\
.action.confirm{background:rgba(34,197,94,.2);color:#22c55e}\
.action.deny{background:rgba(239,68,68,.2);color:#ef4444}\
.updated{color:#6b7280;font-size:.75rem}\
.bg-red-500{background:#ef4444}.bg-orange-500{background:#f97316}\
.bg-yellow-500{background:#eab308}.bg-cyan-500{background:#06b6d4}\
.bg-gray-500{background:#6b7280}.bg-blue-500{background:#3b82f6}\
.bg-green-500{background:#22c55e}";

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Animated status dot in the given background class.
#[must_use]
pub fn pulse(color_class: &str) -> String {
    format!(
        "<span class=\"pulse\"><span class=\"ping {color_class}\"></span><span class=\"{color_class}\"></span></span>"
    )
}

fn field(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><h3>{label}</h3><p>{}</p></div>",
        escape(value)
    )
}

/// Card for one damage finding, with Confirm and Deny actions.
#[must_use]
pub fn damage_card(record: &DamageRecord) -> String {
    format!(
        "<div class=\"card\" data-status=\"{status}\">\
<div class=\"fields\">{damage}{status_field}{location}</div>\
<button class=\"gear\" title=\"Settings\">&#9881;</button>{pulse}\
<div class=\"actions\">\
<button class=\"action confirm\">Confirm</button>\
<button class=\"action deny\">Deny</button>\
</div></div>",
        status = record.status,
        damage = field("Damage", &record.damage_type),
        status_field = field("Status", record.status.as_str()),
        location = field("Location", &record.damage_location),
        pulse = pulse(record.status.color_class()),
    )
}

/// Card for one drone, keyed by its name, with a Cancel Task action.
#[must_use]
pub fn drone_card(record: &DroneRecord) -> String {
    format!(
        "<div class=\"card\" data-key=\"{key}\" data-status=\"{status}\">\
<div class=\"fields\">{name}{status_field}{location}{task}</div>\
<button class=\"gear\" title=\"Settings\">&#9881;</button>{pulse}\
<div class=\"actions\">\
<button class=\"action deny\">Cancel Task</button>\
</div></div>",
        key = escape(&record.name),
        status = record.status,
        name = field("Name", &record.name),
        status_field = field("Status", record.status.as_str()),
        location = field("Location", &record.location),
        task = field("Task", &record.current_task),
        pulse = pulse(record.status.color_class()),
    )
}

fn navbar(site: &SiteConfig) -> String {
    let mut links = String::new();
    for item in &site.nav_items {
        let _ = write!(
            links,
            "<a href=\"{}\">{}</a>",
            escape(&item.href),
            escape(&item.label)
        );
    }
    format!(
        "<nav><span class=\"brand\">{}</span>{links}</nav>",
        escape(&site.name)
    )
}

/// Wrap `body` in the shared page chrome.
#[must_use]
pub fn layout(site: &SiteConfig, title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<meta name=\"description\" content=\"{description}\">\
<title>{title} | {name}</title><style>{STYLESHEET}</style></head>\
<body>{nav}<main>{body}</main></body></html>",
        description = escape(&site.description),
        title = escape(title),
        name = escape(&site.name),
        nav = navbar(site),
    )
}

/// Landing page.
#[must_use]
pub fn home_page(site: &SiteConfig) -> String {
    let body = format!(
        "<section><div class=\"hero\">Fly&nbsp;<span class=\"accent\">Safe&nbsp;</span>with&nbsp;<br>{name}</div>\
<div class=\"subtitle\">Do your line maintenance faster and safer than ever before.</div>\
<div class=\"actions\">\
<a class=\"button primary\" href=\"{docs}\" target=\"_blank\" rel=\"noopener noreferrer\">Documentation</a>\
<a class=\"button\" href=\"{github}\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>\
</div></section>",
        name = escape(&site.name),
        docs = escape(&site.links.docs),
        github = escape(&site.links.github),
    );
    layout(site, "Home", &body)
}

/// Damage status page.
#[must_use]
pub fn damage_page(
    site: &SiteConfig,
    records: &[DamageRecord],
    refreshed: bool,
    rendered_at: DateTime<Utc>,
) -> String {
    let cards: String = records.iter().map(damage_card).collect();
    let rescan = if refreshed {
        "<a class=\"button\" href=\"/dashboard\">Initial scan</a>"
    } else {
        "<a class=\"button\" href=\"/dashboard?refresh=true\">Rescan</a>"
    };
    let body = format!(
        "<h1 class=\"title\">Damage Status</h1>{rescan}\
<div class=\"cards\">{cards}</div>{updated}",
        updated = updated_line(rendered_at),
    );
    layout(site, "Damage Status", &body)
}

/// Drone fleet page.
#[must_use]
pub fn drone_page(site: &SiteConfig, drones: &[DroneRecord], rendered_at: DateTime<Utc>) -> String {
    let cards: String = drones.iter().map(drone_card).collect();
    let body = format!(
        "<h1 class=\"title\">Drone Status</h1><div class=\"cards\">{cards}</div>{updated}",
        updated = updated_line(rendered_at),
    );
    layout(site, "Drone Status", &body)
}

fn updated_line(rendered_at: DateTime<Utc>) -> String {
    format!(
        "<p class=\"updated\">Updated {}</p>",
        rendered_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
