//! Process-wide mirror of the remote catalog plus the admin session flag.
//!
//! `AppState` is built once (see `main.rs`) and shared by handle; consumers
//! read consistent [`Snapshot`]s from it. Writes go through the gateway and
//! become visible only after the caller runs [`AppState::refresh_data`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::models::{Course, Material, Meeting, SiteConfig};
use crate::remote::DataGateway;
use crate::session::{SESSION_ACTIVE, SESSION_KEY, SessionStorage, is_marked_active};

/// One complete, consistent view of every collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub courses: Vec<Course>,
    pub materials: Vec<Material>,
    pub meetings: Vec<Meeting>,
    pub site_config: SiteConfig,
}

impl Snapshot {
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Materials of one course in server order. Unknown ids give an empty list.
    pub fn materials_for_course(&self, course_id: &str) -> Vec<&Material> {
        self.materials
            .iter()
            .filter(|m| m.course_id == course_id)
            .collect()
    }

    /// Meetings ordered by start time, earliest first. Ties keep server
    /// order; meetings with an unreadable date go last.
    pub fn meetings_by_date(&self) -> Vec<&Meeting> {
        let mut meetings: Vec<(&Meeting, _)> =
            self.meetings.iter().map(|m| (m, m.starts_at())).collect();
        meetings.sort_by(|(_, a), (_, b)| match (a, b) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        meetings.into_iter().map(|(m, _)| m).collect()
    }

    pub fn featured_courses(&self, count: usize) -> &[Course] {
        &self.courses[..count.min(self.courses.len())]
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshStats {
    pub courses: usize,
    pub materials: usize,
    pub meetings: usize,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    gateway: Arc<dyn DataGateway>,
    session: Arc<dyn SessionStorage>,
    admin: AdminConfig,
    is_admin: AtomicBool,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl AppState {
    /// The admin flag starts from whatever marker the session storage holds.
    pub fn new(
        gateway: Arc<dyn DataGateway>,
        session: Arc<dyn SessionStorage>,
        admin: AdminConfig,
    ) -> Self {
        let restored = is_marked_active(session.as_ref());
        if restored {
            info!("restored admin session");
        }

        Self {
            inner: Arc::new(Inner {
                gateway,
                session,
                admin,
                is_admin: AtomicBool::new(restored),
                snapshot: RwLock::new(Arc::new(Snapshot::default())),
            }),
        }
    }

    pub fn gateway(&self) -> Arc<dyn DataGateway> {
        self.inner.gateway.clone()
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.read().await.clone()
    }

    /// Fetches every collection and swaps the whole snapshot in one step.
    ///
    /// Failed collections come back empty from the gateway. Concurrent
    /// refreshes are not ordered: whichever finishes last wins.
    pub async fn refresh_data(&self) -> RefreshStats {
        let gateway = &self.inner.gateway;
        let (courses, materials, meetings, site_config) = tokio::join!(
            gateway.get_courses(),
            gateway.get_materials(),
            gateway.get_meetings(),
            gateway.get_site_config(),
        );

        let stats = RefreshStats {
            courses: courses.len(),
            materials: materials.len(),
            meetings: meetings.len(),
        };

        let snapshot = Snapshot {
            courses,
            materials,
            meetings,
            site_config,
        };
        *self.inner.snapshot.write().await = Arc::new(snapshot);

        info!(
            "refreshed catalog: {} courses, {} materials, {} meetings",
            stats.courses, stats.materials, stats.meetings
        );
        stats
    }

    pub fn is_admin(&self) -> bool {
        self.inner.is_admin.load(Ordering::SeqCst)
    }

    /// Compares against the configured admin password. A mismatch changes
    /// nothing.
    pub fn login(&self, password: &str) -> bool {
        match self.inner.admin.password.as_deref() {
            Some(expected) if expected == password => {
                self.enter_admin_session();
                true
            }
            Some(_) => {
                warn!("admin login rejected");
                false
            }
            None => {
                warn!("admin login attempted but no admin password is configured");
                false
            }
        }
    }

    /// Same as [`login`](Self::login) but the remote `checkLogin` action
    /// decides.
    pub async fn login_remote(&self, password: &str) -> bool {
        if self.inner.gateway.verify_login(password).await {
            self.enter_admin_session();
            true
        } else {
            warn!("remote admin login rejected");
            false
        }
    }

    pub fn logout(&self) {
        if self.inner.is_admin.swap(false, Ordering::SeqCst) {
            info!("admin logged out");
        }
        self.inner.session.remove(SESSION_KEY);
    }

    fn enter_admin_session(&self) {
        self.inner.is_admin.store(true, Ordering::SeqCst);
        self.inner.session.set(SESSION_KEY, SESSION_ACTIVE);
        info!("admin logged in");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialKind;

    fn material(id: &str, course_id: &str) -> Material {
        Material {
            id: id.to_string(),
            course_id: course_id.to_string(),
            title: format!("material {}", id),
            description: String::new(),
            kind: MaterialKind::Text,
            content_url: String::new(),
            access_password: None,
        }
    }

    fn meeting(id: &str, date: &str) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: id.to_string(),
            date: date.to_string(),
            description: None,
            platform: "Zoom".to_string(),
            link: String::new(),
            is_locked: false,
            access_password: None,
        }
    }

    #[test]
    fn filters_materials_by_course() {
        let snapshot = Snapshot {
            materials: vec![material("1", "A"), material("2", "B")],
            ..Default::default()
        };

        let for_a = snapshot.materials_for_course("A");
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].id, "1");
        assert!(snapshot.materials_for_course("Z").is_empty());
    }

    #[test]
    fn meetings_sorted_ascending() {
        let snapshot = Snapshot {
            meetings: vec![
                meeting("late", "2024-03-10"),
                meeting("bad", "someday"),
                meeting("early", "2024-01-05"),
            ],
            ..Default::default()
        };

        let order: Vec<_> = snapshot.meetings_by_date().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(order, vec!["early", "late", "bad"]);
        // the stored order is left alone
        assert_eq!(snapshot.meetings[0].id, "late");
    }

    #[test]
    fn featured_courses_caps_at_len() {
        let snapshot = Snapshot::default();
        assert!(snapshot.featured_courses(3).is_empty());
        assert!(snapshot.course("missing").is_none());
    }
}
