//! Health report served by `GET /health`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Overall health of the process.
///
/// # Example
/// ```
/// use launchbot_api::utils::health::{ComponentHealth, HealthStatus};
///
/// let status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("database"))
///     .add_component(ComponentHealth::unhealthy("credentials", "not authorized"))
///     .finish();
///
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub components: Vec<ComponentHealth>,
    /// Unix timestamp when the check ran.
    pub timestamp: i64,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self { is_healthy: true, components: Vec::new(), timestamp: Utc::now().timestamp() }
    }

    /// Add a component health check; returns self for chaining.
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Healthy only when every required component is healthy.
    pub fn finish(mut self) -> Self {
        self.is_healthy = self.components.iter().all(|c| c.is_healthy || !c.required);
        self
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of an individual component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    /// Whether a failure here makes the whole process unhealthy.
    pub required: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, required: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, required: true, message: Some(message.into()) }
    }

    /// Report the component without letting it fail the overall status.
    pub fn informational(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
