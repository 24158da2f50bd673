use crate::entities::EntityRow;
use crate::services::PayloadResolutionError;

/// Built fresh for every delivered event.
///
/// `Ok(None)` means the row no longer exists, which is a normal outcome. An
/// error affects this delivery only.
#[derive(Debug)]
pub struct SubscriptionPayload {
    pub event: String,
    pub entity: Result<Option<EntityRow>, PayloadResolutionError>,
}
