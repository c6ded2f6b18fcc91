//! Authenticated admin surface: session gate, talent dashboard, resume retrieval.

pub mod dashboard;
pub mod resume;
pub mod session;

pub use dashboard::{DashboardAccess, DashboardLoader, DashboardSummary, TalentDashboard};
pub use resume::{download_file_name, ResumeDownload, ResumeError, ResumeRetriever, SIGNED_URL_TTL};
pub use session::{GateDecision, LoginError, SessionGate};
