use tracing::info;
use uuid::Uuid;

use crate::models::notification::{
    Audience, NotificationDispatch, NotificationRequest, NotificationTarget,
};
use crate::store::Store;
use crate::utils::error::AppError;

pub async fn targets(store: &dyn Store) -> Result<Vec<NotificationTarget>, AppError> {
    let events = store.list_events().await?;
    Ok(events
        .into_iter()
        .map(|summary| NotificationTarget {
            id: summary.event.id,
            name: summary.event.label().to_string(),
        })
        .collect())
}

pub async fn audience(store: &dyn Store, event_id: Option<Uuid>) -> Result<Audience, AppError> {
    let recipients = store.count_registrations(event_id).await?;
    Ok(Audience {
        event_id,
        recipients,
    })
}

/// Resolves the audience of a notification. No transport is wired up, so
/// the dispatch is reported as simulated.
pub async fn dispatch(
    store: &dyn Store,
    request: NotificationRequest,
) -> Result<NotificationDispatch, AppError> {
    request.validate()?;
    let audience = audience(store, request.event_id).await?;

    info!(
        channel = ?request.channel,
        event_id = ?request.event_id,
        recipients = audience.recipients,
        "Notification dispatch simulated"
    );

    Ok(NotificationDispatch {
        channel: request.channel,
        event_id: request.event_id,
        recipients: audience.recipients,
        simulated: true,
    })
}
