use std::sync::Arc;

use tracing::{debug, error};

use super::session::{GateDecision, SessionGate};
use crate::backend::{RemoteDataService, Session};
use crate::workflows::talent::{filter_profiles, TalentFilter, TalentProfile};

/// Fetched talent collection plus the criteria currently applied to it.
/// Owned by a single request; the fetched records are never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TalentDashboard {
    profiles: Vec<TalentProfile>,
    criteria: TalentFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub showing: usize,
    pub total: usize,
}

impl std::fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {} profiles", self.showing, self.total)
    }
}

impl TalentDashboard {
    pub fn new(profiles: Vec<TalentProfile>) -> Self {
        Self {
            profiles,
            criteria: TalentFilter::default(),
        }
    }

    pub fn with_criteria(mut self, criteria: TalentFilter) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn set_criteria(&mut self, criteria: TalentFilter) {
        self.criteria = criteria;
    }

    pub fn clear_criteria(&mut self) {
        self.criteria = TalentFilter::default();
    }

    pub fn criteria(&self) -> &TalentFilter {
        &self.criteria
    }

    pub fn visible(&self) -> Vec<&TalentProfile> {
        filter_profiles(&self.profiles, &self.criteria)
    }

    pub fn total(&self) -> usize {
        self.profiles.len()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            showing: self.visible().len(),
            total: self.total(),
        }
    }

    /// Looks through the full fetched set, not only the visible subset.
    pub fn find(&self, id: &str) -> Option<&TalentProfile> {
        self.profiles.iter().find(|profile| profile.id.0 == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAccess {
    RedirectToLogin,
    Ready {
        session: Session,
        dashboard: TalentDashboard,
    },
}

/// Runs the session gate and, only when it admits the request, the listing fetch.
pub struct DashboardLoader<B: ?Sized> {
    gate: SessionGate<B>,
    backend: Arc<B>,
}

impl<B> DashboardLoader<B>
where
    B: RemoteDataService + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            gate: SessionGate::new(Arc::clone(&backend)),
            backend,
        }
    }

    pub async fn load(&self, access_token: Option<&str>) -> DashboardAccess {
        let session = match self.gate.check(access_token).await {
            GateDecision::Authenticated(session) => session,
            GateDecision::RedirectToLogin => return DashboardAccess::RedirectToLogin,
        };

        let profiles = match self.backend.list_talents(&session).await {
            Ok(profiles) => {
                debug!(count = profiles.len(), "talent profiles fetched");
                profiles
            }
            Err(err) => {
                error!(error = %err, "talent listing failed; showing an empty dashboard");
                Vec::new()
            }
        };

        DashboardAccess::Ready {
            session,
            dashboard: TalentDashboard::new(profiles),
        }
    }
}
