use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::{entity::audit_logs, error::AppResult, middleware::auth::AuthUser};

/// Appends one row to `audit_logs`.
pub async fn log_audit<C>(
    db: &C,
    user_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()>
where
    C: ConnectionTrait,
{
    audit_logs::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id),
        action: Set(action.to_string()),
        resource: Set(resource.map(str::to_string)),
        metadata: Set(metadata),
        created_at: NotSet,
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Audit entry for an admin mutation. Failures are logged and swallowed so the mutation still
/// reports success.
pub async fn record<C>(db: &C, user: &AuthUser, action: &str, resource: &str, metadata: Value)
where
    C: ConnectionTrait,
{
    if let Err(err) = log_audit(db, Some(user.user_id), action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, resource, "audit log failed");
    }
}
