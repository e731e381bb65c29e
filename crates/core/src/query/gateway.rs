//! Query Gateway dispatch: name lookup, authorization, params, execution.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use toonshelf_shared::AdminGate;
use tracing::{debug, info, warn};

use super::action::QueryAction;
use super::error::QueryError;
use super::kind::ActionKind;

/// Executes parsed actions against the catalog.
///
/// Implementations return the JSON payload placed under `data`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Runs one action.
    async fn execute(&self, action: QueryAction) -> Result<Value, QueryError>;
}

/// The `{action, params}` request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// Action name.
    pub action: String,
    /// Action parameters. Absent and `null` are read as `{}`.
    #[serde(default)]
    pub params: Value,
}

/// Applies the admin gate uniformly before running an action.
#[derive(Clone)]
pub struct QueryGateway {
    gate: Arc<AdminGate>,
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for QueryGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryGateway")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl QueryGateway {
    /// Creates a gateway.
    #[must_use]
    pub fn new(gate: Arc<AdminGate>, store: Arc<dyn CatalogStore>) -> Self {
        Self { gate, store }
    }

    /// Resolves and runs one request.
    ///
    /// Unknown names fail before authorization; write actions are authorized
    /// before their params are read.
    ///
    /// # Errors
    ///
    /// - `UnknownAction` for an unrecognized name.
    /// - `Unauthorized` for a write without a verified admin credential.
    /// - `InvalidParams` if params do not fit the action.
    /// - Whatever the store reports.
    pub async fn dispatch(
        &self,
        request: QueryRequest,
        authorization: Option<&str>,
    ) -> Result<Value, QueryError> {
        let QueryRequest { action, params } = request;
        let Some(kind) = ActionKind::from_name(&action) else {
            warn!(action = %action, "Unknown query action");
            return Err(QueryError::UnknownAction(action));
        };

        if kind.requires_admin() {
            let admin = self.gate.authenticate(authorization).map_err(|e| {
                warn!(action = %kind, reason = %e, "Write action rejected");
                QueryError::Unauthorized
            })?;
            info!(action = %kind, email = %admin.email, "Admin write");
        }

        let action = QueryAction::parse(kind, params)?;
        debug!(action = %kind, "Executing query action");
        self.store.execute(action).await.inspect_err(|e| {
            warn!(action = %kind, error = %e, "Query action failed");
        })
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
