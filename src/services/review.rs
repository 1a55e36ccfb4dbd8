use crate::domain::application::ReviewStatus;
use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::types::ApplicationId;
use crate::models::event::{ListEvent, ListEventSink};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Whether `user` may open the review dashboard at all.
pub fn can_review(user: &AuthenticatedUser) -> bool {
    check_role(SERVICE_ACCESS_ROLE, &user.roles) || check_role(SERVICE_ADMIN_ROLE, &user.roles)
}

/// Moves an application to `status` and notifies the shared dashboard state.
///
/// Only administrators may do this. The check is advisory: the remote service
/// enforces the same rule.
pub fn change_status(
    user: &AuthenticatedUser,
    events: &dyn ListEventSink,
    application_id: i64,
    status: ReviewStatus,
) -> ServiceResult<()> {
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        log::warn!(
            "User {} attempted to set application {application_id} to {status:?} without admin role",
            user.email
        );
        return Err(ServiceError::Unauthorized);
    }

    let application = ApplicationId::new(application_id)?;

    events.dispatch(ListEvent::StatusChanged {
        application,
        status,
    });

    Ok(())
}
