//! Server-rendered HTML for the public pages and the admin area.

mod admin;
mod public;

pub(crate) use admin::{dashboard_page, login_page};
pub(crate) use public::{employers_page, home_page, join_page, EmployersView, JoinView};

use crate::infra::SiteLinks;
use chrono::{Datelike, Utc};
use missionable::workflows::talent::TECH_STACK_OPTIONS;
use std::fmt::Write;

pub(crate) const SITE_NAME: &str = "MissionAble Systems";

/// Outcome banner shown above a form or the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Error(String),
    Success { title: String, body: String },
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps page content with the document head, navigation bar and footer.
pub(crate) fn layout(links: &SiteLinks, title: &str, content: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(html, "<title>{}</title>", escape_html(title)).expect("title");
    html.push_str("</head>\n<body>\n");
    html.push_str(&navbar(links));
    writeln!(html, "<main id=\"main\">\n{content}\n</main>").expect("main content");
    html.push_str(&footer());
    html.push_str("</body>\n</html>\n");
    html
}

fn navbar(links: &SiteLinks) -> String {
    let mut html = String::new();
    html.push_str("<header role=\"banner\">\n<nav aria-label=\"Main navigation\">\n");
    writeln!(
        html,
        "<a class=\"brand\" href=\"{}\">Mission<span>Able</span> Systems</a>",
        links.home()
    )
    .expect("brand link");
    html.push_str("<ul>\n");
    for (path, label) in [
        ("/join", "Join Talent Network"),
        ("/employers", "Hire Talent"),
        ("/admin/login", "Admin"),
    ] {
        writeln!(html, "<li><a href=\"{}\">{label}</a></li>", links.to(path))
            .expect("nav link");
    }
    html.push_str("</ul>\n</nav>\n</header>\n");
    html
}

fn footer() -> String {
    format!(
        "<footer role=\"contentinfo\">\n<p>Mission<span>Able</span> Systems</p>\n\
         <p>&copy; {} {SITE_NAME}. All rights reserved.</p>\n\
         <p>Connecting exceptional tech talent with the organizations that need them.</p>\n\
         </footer>\n",
        Utc::now().year()
    )
}

pub(crate) fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Error(message) => {
            format!("<div class=\"alert\" role=\"alert\">{}</div>\n", escape_html(message))
        }
        Notice::Success { title, body } => format!(
            "<div class=\"confirmation\" role=\"status\">\n<h2>{}</h2>\n<p>{}</p>\n</div>\n",
            escape_html(title),
            escape_html(body)
        ),
    }
}

/// Checkbox group over the skill catalog; `selected` entries stay checked.
pub(crate) fn skill_checkboxes(name: &str, legend: &str, selected: &[String]) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<fieldset>\n<legend>{legend} <span aria-hidden=\"true\">*</span></legend>\n<p>Select all that apply.</p>"
    )
    .expect("skill legend");
    for skill in TECH_STACK_OPTIONS {
        let checked = selected
            .iter()
            .any(|chosen| chosen.eq_ignore_ascii_case(skill));
        let skill = escape_html(skill);
        writeln!(
            html,
            "<label><input type=\"checkbox\" name=\"{name}\" value=\"{skill}\"{}> {skill}</label>",
            if checked { " checked" } else { "" }
        )
        .expect("skill option");
    }
    html.push_str("</fieldset>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn layout_links_are_prefixed_with_base_path() {
        let html = layout(&SiteLinks::new("/missionable"), "Home", "<p>hi</p>");
        assert!(html.contains("href=\"/missionable/join\""));
        assert!(html.contains("href=\"/missionable/admin/login\""));
        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains("All rights reserved."));
    }

    #[test]
    fn skill_checkboxes_keep_previous_selection() {
        let html = skill_checkboxes("tech_stack", "Tech Stack", &["rust".to_string()]);
        assert!(html.contains("value=\"Rust\" checked"));
        assert!(html.contains("value=\"Python\">"));
    }
}
