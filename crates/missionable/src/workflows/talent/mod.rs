//! Talent sign-up intake and the admin-side filter engine over talent profiles.

pub mod catalog;
pub mod domain;
pub mod filter;
pub mod intake;

pub use catalog::{ExperienceLevel, EXPERIENCE_LEVELS, TECH_STACK_OPTIONS};
pub use domain::{NewTalentProfile, TalentId, TalentProfile, WorkPreference};
pub use filter::{filter_profiles, ClearanceFilter, ExperienceThreshold, TalentFilter};
pub use intake::{
    ResumeAttachment, SubmissionError, SubmissionReceipt, TalentIntakeService, TalentSignup,
    MAX_RESUME_BYTES, RESUME_EXTENSIONS,
};
