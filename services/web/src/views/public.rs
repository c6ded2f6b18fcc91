use super::{escape_html, layout, render_notice, skill_checkboxes, Notice, SITE_NAME};
use crate::infra::SiteLinks;
use missionable::workflows::employer::InquiryForm;
use missionable::workflows::talent::{TalentSignup, WorkPreference, EXPERIENCE_LEVELS};
use std::fmt::Write;

/// State of the talent sign-up page.
#[derive(Debug)]
pub(crate) enum JoinView<'a> {
    Blank,
    Rejected {
        signup: &'a TalentSignup,
        message: String,
    },
    Submitted,
}

#[derive(Debug)]
pub(crate) enum EmployersView<'a> {
    Blank,
    Rejected {
        form: &'a InquiryForm,
        message: String,
    },
    Submitted,
}

pub(crate) fn home_page(links: &SiteLinks) -> String {
    let join = links.to("/join");
    let employers = links.to("/employers");
    let mut html = String::new();

    writeln!(
        html,
        "<section class=\"hero\">\n<h1>Tech Talent. <span>Mission Ready.</span></h1>\n\
         <p>{SITE_NAME} connects skilled tech professionals with disabilities to employers and \
         federal contractors seeking exceptional, cleared-ready talent.</p>\n\
         <p><a class=\"button\" href=\"{join}\">Join the Talent Network</a> \
         <a class=\"button\" href=\"{employers}\">Hire Talent</a></p>\n</section>"
    )
    .expect("hero section");

    html.push_str(
        "<section aria-labelledby=\"how-it-works-heading\">\n\
         <h2 id=\"how-it-works-heading\">How It Works</h2>\n\
         <p>A streamlined process that puts talent and employers on a direct path to \
         mission-critical outcomes.</p>\n",
    );
    for (step, title, description) in [
        (
            "01",
            "Create Your Profile",
            "Tech professionals sign up, showcase their skills, and upload a resume. Optional accommodation preferences keep things confidential.",
        ),
        (
            "02",
            "Get Matched",
            "Our team reviews profiles and connects qualified candidates with employers actively seeking skilled, mission-ready talent.",
        ),
        (
            "03",
            "Start Your Mission",
            "Employers engage directly with vetted professionals. Onboarding support ensures a smooth transition to your new role.",
        ),
    ] {
        writeln!(
            html,
            "<article class=\"step\"><span>{step}</span><h3>{title}</h3><p>{description}</p></article>"
        )
        .expect("step card");
    }
    html.push_str("</section>\n");

    html.push_str(
        "<section aria-labelledby=\"why-heading\">\n<h2 id=\"why-heading\">Why MissionAble</h2>\n",
    );
    for (title, description) in [
        (
            "Proven Talent",
            "Every professional in our network brings verified technical skills and real-world experience to the table.",
        ),
        (
            "Clearance Ready",
            "We identify candidates eligible for security clearances, reducing onboarding time for federal contracts.",
        ),
        (
            "Section 503 &amp; OFCCP",
            "Hiring through MissionAble helps federal contractors meet disability inclusion requirements and compliance goals.",
        ),
    ] {
        writeln!(
            html,
            "<article class=\"value\"><h3>{title}</h3><p>{description}</p></article>"
        )
        .expect("value card");
    }
    html.push_str("</section>\n");

    writeln!(
        html,
        "<section class=\"cta\">\n<h2>Ready to Get Started?</h2>\n\
         <p>Whether you&#39;re a professional looking for your next mission or an employer \
         seeking top-tier talent, MissionAble is your platform.</p>\n\
         <p><a class=\"button\" href=\"{join}\">Join the Talent Network</a> \
         <a class=\"button\" href=\"{employers}\">Hire Talent</a></p>\n</section>"
    )
    .expect("cta section");

    layout(links, SITE_NAME, &html)
}

pub(crate) fn join_page(links: &SiteLinks, view: &JoinView<'_>) -> String {
    let mut html = String::from(
        "<section>\n<h1>Join the Talent Network</h1>\n\
         <p>Create your profile to get matched with employers and federal contractors seeking \
         mission-ready tech talent.</p>\n</section>\n",
    );

    let (signup, notice) = match view {
        JoinView::Submitted => {
            html.push_str(&render_notice(&Notice::Success {
                title: "Profile Submitted".to_string(),
                body: "Thank you for joining the MissionAble talent network. Our team will review your profile and reach out when opportunities align with your skills.".to_string(),
            }));
            return layout(links, "Join the Talent Network", &html);
        }
        JoinView::Blank => (None, None),
        JoinView::Rejected { signup, message } => {
            (Some(*signup), Some(Notice::Error(message.clone())))
        }
    };

    writeln!(
        html,
        "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">",
        links.to("/join")
    )
    .expect("form open");
    if let Some(notice) = &notice {
        html.push_str(&render_notice(notice));
    }

    let text = |value: Option<&str>| escape_html(value.unwrap_or_default());
    writeln!(
        html,
        "<label for=\"full_name\">Full Name <span aria-hidden=\"true\">*</span></label>\n\
         <input id=\"full_name\" name=\"full_name\" type=\"text\" required placeholder=\"Jane Doe\" value=\"{}\">",
        text(signup.map(|s| s.full_name.as_str()))
    )
    .expect("full name");
    writeln!(
        html,
        "<label for=\"email\">Email <span aria-hidden=\"true\">*</span></label>\n\
         <input id=\"email\" name=\"email\" type=\"email\" required placeholder=\"jane@example.com\" value=\"{}\">",
        text(signup.map(|s| s.email.as_str()))
    )
    .expect("email");
    writeln!(
        html,
        "<label for=\"linkedin\">LinkedIn Profile</label>\n\
         <input id=\"linkedin\" name=\"linkedin\" type=\"url\" placeholder=\"https://linkedin.com/in/janedoe\" value=\"{}\">",
        text(signup.and_then(|s| s.linkedin.as_deref()))
    )
    .expect("linkedin");

    let selected = signup.map(|s| s.tech_stack.as_slice()).unwrap_or_default();
    html.push_str(&skill_checkboxes("tech_stack", "Tech Stack", selected));

    let years = signup.and_then(|s| s.years_of_experience);
    html.push_str(
        "<label for=\"years_of_experience\">Years of Experience <span aria-hidden=\"true\">*</span></label>\n\
         <select id=\"years_of_experience\" name=\"years_of_experience\" required>\n\
         <option value=\"\">Select experience level</option>\n",
    );
    for level in EXPERIENCE_LEVELS {
        writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            level.years,
            if years == Some(level.years) { " selected" } else { "" },
            level.label
        )
        .expect("experience option");
    }
    html.push_str("</select>\n");

    let clearance = signup.and_then(|s| s.clearance_eligible);
    writeln!(
        html,
        "<fieldset>\n<legend>Security Clearance Eligibility <span aria-hidden=\"true\">*</span></legend>\n\
         <label><input type=\"radio\" name=\"clearance_eligible\" value=\"yes\" required{}> Yes</label>\n\
         <label><input type=\"radio\" name=\"clearance_eligible\" value=\"no\"{}> No</label>\n</fieldset>",
        if clearance == Some(true) { " checked" } else { "" },
        if clearance == Some(false) { " checked" } else { "" }
    )
    .expect("clearance");

    let preference = signup.and_then(|s| s.work_preference);
    html.push_str(
        "<fieldset>\n<legend>Work Preference <span aria-hidden=\"true\">*</span></legend>\n",
    );
    for option in WorkPreference::ALL {
        writeln!(
            html,
            "<label><input type=\"radio\" name=\"work_preference\" value=\"{label}\" required{}> {label}</label>",
            if preference == Some(option) { " checked" } else { "" },
            label = option.label()
        )
        .expect("work preference");
    }
    html.push_str("</fieldset>\n");

    writeln!(
        html,
        "<label for=\"accommodation_preferences\">Accommodation Preferences <span>(optional)</span></label>\n\
         <p>This information is kept confidential and shared only when relevant.</p>\n\
         <textarea id=\"accommodation_preferences\" name=\"accommodation_preferences\" rows=\"3\" \
         placeholder=\"e.g., screen reader support, flexible scheduling, captioning for meetings\">{}</textarea>",
        text(signup.and_then(|s| s.accommodation_preferences.as_deref()))
    )
    .expect("accommodations");

    html.push_str(
        "<label for=\"resume\">Resume Upload</label>\n\
         <input id=\"resume\" name=\"resume\" type=\"file\" accept=\".pdf,.doc,.docx\">\n\
         <p>PDF, DOC, or DOCX (max 10 MB)</p>\n\
         <button type=\"submit\">Submit Profile</button>\n</form>\n",
    );

    layout(links, "Join the Talent Network", &html)
}

pub(crate) fn employers_page(links: &SiteLinks, view: &EmployersView<'_>) -> String {
    let mut html = String::from(
        "<section>\n<h1>Hire Mission-Ready Talent</h1>\n\
         <p>Tell us about the role you&#39;re looking to fill and our team will connect you with \
         qualified professionals from the MissionAble network.</p>\n</section>\n",
    );

    let (form, notice) = match view {
        EmployersView::Submitted => {
            html.push_str(&render_notice(&Notice::Success {
                title: "Inquiry Received".to_string(),
                body: "Thank you for your interest. Our team will review your requirements and get back to you with qualified candidates.".to_string(),
            }));
            return layout(links, "Hire Talent", &html);
        }
        EmployersView::Blank => (None, None),
        EmployersView::Rejected { form, message } => {
            (Some(*form), Some(Notice::Error(message.clone())))
        }
    };

    writeln!(
        html,
        "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">",
        links.to("/employers")
    )
    .expect("form open");
    if let Some(notice) = &notice {
        html.push_str(&render_notice(notice));
    }

    writeln!(
        html,
        "<label for=\"company_name\">Company Name <span aria-hidden=\"true\">*</span></label>\n\
         <input id=\"company_name\" name=\"company_name\" type=\"text\" required placeholder=\"Acme Corp\" value=\"{}\">\n\
         <label for=\"contact_email\">Contact Email <span aria-hidden=\"true\">*</span></label>\n\
         <input id=\"contact_email\" name=\"contact_email\" type=\"email\" required placeholder=\"hiring@acme.com\" value=\"{}\">\n\
         <label for=\"role_description\">Role Description <span aria-hidden=\"true\">*</span></label>\n\
         <textarea id=\"role_description\" name=\"role_description\" required rows=\"5\" \
         placeholder=\"Describe the role, responsibilities, and any relevant details (clearance requirements, project type, etc.)\">{}</textarea>",
        escape_html(form.map(|f| f.company_name.as_str()).unwrap_or_default()),
        escape_html(form.map(|f| f.contact_email.as_str()).unwrap_or_default()),
        escape_html(form.map(|f| f.role_description.as_str()).unwrap_or_default()),
    )
    .expect("inquiry fields");

    let selected = form.map(|f| f.required_skills.as_slice()).unwrap_or_default();
    html.push_str(&skill_checkboxes("required_skills", "Required Skills", selected));
    html.push_str("<button type=\"submit\">Submit Inquiry</button>\n</form>\n");

    layout(links, "Hire Talent", &html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_join_form_keeps_entered_values() {
        let signup = TalentSignup {
            full_name: "Jane <Doe>".to_string(),
            email: "jane@example.com".to_string(),
            years_of_experience: Some(6),
            clearance_eligible: Some(false),
            work_preference: Some(WorkPreference::OnSite),
            ..TalentSignup::default()
        };
        let html = join_page(
            &SiteLinks::new("/missionable"),
            &JoinView::Rejected {
                signup: &signup,
                message: "Please select at least one skill from the tech stack.".to_string(),
            },
        );

        assert!(html.contains("role=\"alert\">Please select at least one skill from the tech stack."));
        assert!(html.contains("value=\"Jane &lt;Doe&gt;\""));
        assert!(html.contains("<option value=\"6\" selected>6-9 years</option>"));
        assert!(html.contains("value=\"no\" checked"));
        assert!(html.contains("value=\"On-site\" required checked"));
        assert!(html.contains("action=\"/missionable/join\""));
    }

    #[test]
    fn submitted_views_replace_the_form() {
        let links = SiteLinks::new("");
        let join = join_page(&links, &JoinView::Submitted);
        assert!(join.contains("Profile Submitted"));
        assert!(!join.contains("<form"));

        let employers = employers_page(&links, &EmployersView::Submitted);
        assert!(employers.contains("Inquiry Received"));
        assert!(!employers.contains("<form"));
    }

    #[test]
    fn home_page_links_into_both_forms() {
        let html = home_page(&SiteLinks::new("/missionable"));
        assert!(html.contains("Tech Talent. <span>Mission Ready.</span>"));
        assert!(html.contains("href=\"/missionable/employers\""));
    }
}
