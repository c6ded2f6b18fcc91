use super::{escape_html, layout, render_notice, Notice};
use crate::infra::SiteLinks;
use missionable::workflows::admin::TalentDashboard;
use missionable::workflows::is_web_url;
use missionable::workflows::talent::{
    ClearanceFilter, ExperienceThreshold, TalentFilter, TalentProfile, TECH_STACK_OPTIONS,
};
use std::fmt::Write;

pub(crate) fn login_page(links: &SiteLinks, email: &str, error: Option<&str>) -> String {
    let mut html = String::from(
        "<section>\n<h1>Admin Login</h1>\n<p>Access the MissionAble talent dashboard.</p>\n",
    );
    writeln!(
        html,
        "<form method=\"post\" action=\"{}\">",
        links.to("/admin/login")
    )
    .expect("form open");
    if let Some(message) = error {
        html.push_str(&render_notice(&Notice::Error(message.to_string())));
    }
    writeln!(
        html,
        "<label for=\"email\">Email</label>\n\
         <input id=\"email\" name=\"email\" type=\"email\" required autocomplete=\"username\" \
         placeholder=\"admin@missionable.systems\" value=\"{}\">\n\
         <label for=\"password\">Password</label>\n\
         <input id=\"password\" name=\"password\" type=\"password\" required autocomplete=\"current-password\">\n\
         <button type=\"submit\">Sign In</button>\n</form>\n</section>",
        escape_html(email)
    )
    .expect("login fields");

    layout(links, "Admin Login", &html)
}

/// Resume link carrying the current criteria so a failed download
/// re-renders the same filtered view.
fn resume_href(links: &SiteLinks, id: &str, criteria: &TalentFilter) -> String {
    let mut pairs = vec![("id", id)];
    if !criteria.skill_term.is_empty() {
        pairs.push(("skill", criteria.skill_term.as_str()));
    }
    if criteria.clearance != ClearanceFilter::Any {
        pairs.push(("clearance", criteria.clearance.as_param()));
    }
    if criteria.min_experience != ExperienceThreshold::Any {
        pairs.push(("experience", criteria.min_experience.as_param()));
    }
    let query = serde_urlencoded::to_string(pairs).expect("string pairs encode");
    format!("{}?{query}", links.to("/admin/resume"))
}

pub(crate) fn dashboard_page(
    links: &SiteLinks,
    dashboard: &TalentDashboard,
    notice: Option<&Notice>,
) -> String {
    let total = dashboard.total();
    let criteria = dashboard.criteria();
    let mut html = String::new();

    writeln!(
        html,
        "<section class=\"dashboard\">\n<header>\n<h1>Talent Dashboard</h1>\n\
         <p>{total} profile{} in the network</p>\n\
         <form method=\"post\" action=\"{}\"><button type=\"submit\">Sign Out</button></form>\n</header>",
        if total == 1 { "" } else { "s" },
        links.to("/admin/logout")
    )
    .expect("dashboard header");

    if let Some(notice) = notice {
        html.push_str(&render_notice(notice));
    }

    html.push_str(&filter_form(links, criteria));
    writeln!(html, "<p class=\"summary\">{}</p>", dashboard.summary()).expect("summary");

    let visible = dashboard.visible();
    if visible.is_empty() {
        html.push_str("<p class=\"empty\">No profiles match the current filters.</p>\n");
    } else {
        for profile in visible {
            html.push_str(&talent_card(links, profile, criteria));
        }
    }
    html.push_str("</section>\n");

    layout(links, "Admin Dashboard", &html)
}

fn filter_form(links: &SiteLinks, criteria: &TalentFilter) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<form class=\"filters\" method=\"get\" action=\"{}\">\n\
         <label for=\"skill\">Filter by Skill</label>\n<select id=\"skill\" name=\"skill\">\n\
         <option value=\"\">All Skills</option>",
        links.to("/admin")
    )
    .expect("filter form open");

    let mut known = false;
    for skill in TECH_STACK_OPTIONS {
        let selected = criteria.skill_term.eq_ignore_ascii_case(skill);
        known |= selected;
        writeln!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(skill),
            if selected { " selected" } else { "" }
        )
        .expect("skill option");
    }
    // Free-text terms from a hand-edited URL still show as the active choice.
    if !known && !criteria.skill_term.is_empty() {
        writeln!(
            html,
            "<option value=\"{0}\" selected>{0}</option>",
            escape_html(&criteria.skill_term)
        )
        .expect("custom skill option");
    }
    html.push_str("</select>\n");

    html.push_str(
        "<label for=\"clearance\">Clearance Eligible</label>\n<select id=\"clearance\" name=\"clearance\">\n",
    );
    for (option, label) in [
        (ClearanceFilter::Any, "All"),
        (ClearanceFilter::Eligible, "Yes"),
        (ClearanceFilter::NotEligible, "No"),
    ] {
        writeln!(
            html,
            "<option value=\"{}\"{}>{label}</option>",
            option.as_param(),
            if criteria.clearance == option { " selected" } else { "" }
        )
        .expect("clearance option");
    }
    html.push_str("</select>\n");

    html.push_str(
        "<label for=\"experience\">Min. Experience</label>\n<select id=\"experience\" name=\"experience\">\n",
    );
    for option in ExperienceThreshold::ALL {
        writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            option.as_param(),
            if criteria.min_experience == option { " selected" } else { "" },
            option.label()
        )
        .expect("experience option");
    }
    html.push_str("</select>\n<button type=\"submit\">Apply</button>\n</form>\n");
    html
}

fn talent_card(links: &SiteLinks, profile: &TalentProfile, criteria: &TalentFilter) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<article class=\"talent\">\n<h2>{}</h2>\n<p>{}</p>",
        escape_html(&profile.full_name),
        escape_html(&profile.email)
    )
    .expect("card heading");
    if profile.clearance_eligible {
        html.push_str("<span class=\"badge\">Clearance Eligible</span>\n");
    }

    html.push_str("<ul class=\"skills\">");
    for skill in &profile.tech_stack {
        write!(html, "<li>{}</li>", escape_html(skill)).expect("skill tag");
    }
    html.push_str("</ul>\n");

    let years = profile.years_of_experience;
    writeln!(
        html,
        "<p><strong>Experience:</strong> {years} year{}</p>\n<p><strong>Work Pref:</strong> {}</p>",
        if years == 1 { "" } else { "s" },
        profile.work_preference.label()
    )
    .expect("card details");
    if let Some(linkedin) = profile.linkedin.as_deref().filter(|url| is_web_url(url)) {
        writeln!(
            html,
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">LinkedIn Profile</a></p>",
            escape_html(linkedin)
        )
        .expect("linkedin link");
    }
    if let Some(accommodations) = &profile.accommodation_preferences {
        writeln!(
            html,
            "<div class=\"accommodations\"><p>Accommodations</p><p>{}</p></div>",
            escape_html(accommodations)
        )
        .expect("accommodations");
    }

    if profile.has_resume() {
        writeln!(
            html,
            "<p><a class=\"button\" href=\"{}\">Download Resume</a></p>",
            escape_html(&resume_href(links, &profile.id.0, criteria))
        )
        .expect("resume link");
    } else {
        html.push_str("<p>No resume uploaded</p>\n");
    }
    writeln!(
        html,
        "<p class=\"joined\">Joined {}</p>\n</article>",
        profile.created_at.format("%b %-d, %Y")
    )
    .expect("joined date");
    html
}
