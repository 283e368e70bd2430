use axum::extract::FromRef;

use crate::plan_store::PlanStore;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedPlanStore = Arc<dyn PlanStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub plan_store: GuardedPlanStore,
}

impl FromRef<ServerState> for GuardedPlanStore {
    fn from_ref(input: &ServerState) -> Self {
        input.plan_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
