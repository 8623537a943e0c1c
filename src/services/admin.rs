use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::models::{Course, Material, Meeting};
use crate::remote::{DataGateway, MutationOutcome};
use crate::state::AppState;

/// Dashboard-side writes to the catalog.
///
/// Requires the admin session on the local store. The check only mirrors
/// what the dashboard shows; the remote API enforces nothing on our behalf.
/// Nothing here refreshes the store: call [`AppState::refresh_data`] once
/// the writes you care about have finished.
pub struct AdminService {
    state: AppState,
    gateway: Arc<dyn DataGateway>,
}

impl AdminService {
    pub fn new(state: AppState) -> Self {
        let gateway = state.gateway();
        Self { state, gateway }
    }

    fn ensure_admin(&self) -> Result<(), AppError> {
        if self.state.is_admin() {
            Ok(())
        } else {
            Err(AppError::NotAuthorized)
        }
    }

    pub async fn save_course(&self, course: &Course) -> Result<MutationOutcome, AppError> {
        self.ensure_admin()?;
        info!("saving course {} ({})", course.id, course.title);
        Ok(self.gateway.save_course(course).await)
    }

    pub async fn delete_course(&self, id: &str) -> Result<MutationOutcome, AppError> {
        self.ensure_admin()?;
        info!("deleting course {}", id);
        Ok(self.gateway.delete_course(id).await)
    }

    pub async fn save_material(&self, material: &Material) -> Result<MutationOutcome, AppError> {
        self.ensure_admin()?;
        info!("saving material {} for course {}", material.id, material.course_id);
        Ok(self.gateway.save_material(material).await)
    }

    pub async fn delete_material(&self, id: &str) -> Result<MutationOutcome, AppError> {
        self.ensure_admin()?;
        info!("deleting material {}", id);
        Ok(self.gateway.delete_material(id).await)
    }

    pub async fn save_meeting(&self, meeting: &Meeting) -> Result<MutationOutcome, AppError> {
        self.ensure_admin()?;
        info!("saving meeting {} ({})", meeting.id, meeting.title);
        Ok(self.gateway.save_meeting(meeting).await)
    }

    pub async fn delete_meeting(&self, id: &str) -> Result<MutationOutcome, AppError> {
        self.ensure_admin()?;
        info!("deleting meeting {}", id);
        Ok(self.gateway.delete_meeting(id).await)
    }
}
