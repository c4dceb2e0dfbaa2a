use core_impact::ImpactCalculator;
use std::sync::Arc;

// Shared services for the page handlers
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<ImpactCalculator>,
}

impl AppState {
    #[must_use]
    pub const fn new(calculator: Arc<ImpactCalculator>) -> Self {
        Self { calculator }
    }
}
