use clap::Args;
use missionable::backend::{HostedBackend, RemoteDataService};
use missionable::config::AppConfig;
use missionable::error::AppError;
use missionable::workflows::admin::{SessionGate, TalentDashboard};
use missionable::workflows::talent::{ClearanceFilter, ExperienceThreshold, TalentFilter};
use std::fmt::Write;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct TalentListArgs {
    /// Admin account email
    #[arg(long)]
    pub(crate) email: String,
    /// Admin account password
    #[arg(long)]
    pub(crate) password: String,
    /// Case-insensitive substring matched against any listed skill
    #[arg(long)]
    pub(crate) skill: Option<String>,
    /// Clearance eligibility: all, yes or no
    #[arg(long, default_value = "all")]
    pub(crate) clearance: String,
    /// Minimum years of experience: all, 3, 6 or 10
    #[arg(long, default_value = "all")]
    pub(crate) experience: String,
}

impl TalentListArgs {
    fn criteria(&self) -> TalentFilter {
        TalentFilter {
            skill_term: self.skill.clone().unwrap_or_default(),
            clearance: ClearanceFilter::from_param(&self.clearance),
            min_experience: ExperienceThreshold::from_param(&self.experience),
        }
    }
}

pub(crate) async fn run_talent_listing(args: TalentListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let backend = Arc::new(HostedBackend::from_config(&config.backend)?);

    let gate = SessionGate::new(backend.clone());
    let session = gate.sign_in(&args.email, &args.password).await?;
    let listing = backend.list_talents(&session).await;
    gate.sign_out(&session.access_token).await;

    let dashboard = TalentDashboard::new(listing?).with_criteria(args.criteria());
    print!("{}", render_listing(&dashboard));
    Ok(())
}

pub(crate) fn render_listing(dashboard: &TalentDashboard) -> String {
    let mut output = String::new();
    writeln!(output, "MissionAble talent network").expect("heading");
    writeln!(output, "{}", dashboard.summary()).expect("summary");

    let visible = dashboard.visible();
    if visible.is_empty() {
        writeln!(output, "\nNo profiles match the current filters.").expect("empty notice");
        return output;
    }

    for profile in visible {
        writeln!(
            output,
            "\n{} <{}>{}",
            profile.full_name,
            profile.email,
            if profile.clearance_eligible {
                " [clearance eligible]"
            } else {
                ""
            }
        )
        .expect("profile heading");
        writeln!(
            output,
            "  Experience: {} year{} | Work pref: {}",
            profile.years_of_experience,
            if profile.years_of_experience == 1 { "" } else { "s" },
            profile.work_preference.label()
        )
        .expect("profile details");
        writeln!(output, "  Skills: {}", profile.tech_stack.join(", ")).expect("skills");
        if let Some(linkedin) = &profile.linkedin {
            writeln!(output, "  LinkedIn: {linkedin}").expect("linkedin");
        }
        if let Some(accommodations) = &profile.accommodation_preferences {
            writeln!(output, "  Accommodations: {accommodations}").expect("accommodations");
        }
        writeln!(
            output,
            "  Resume: {} | Joined {}",
            profile.resume_path.as_deref().unwrap_or("none"),
            profile.created_at.format("%Y-%m-%d")
        )
        .expect("resume line");
    }
    output
}
