use core_impact::ImpactCalculator;
use std::sync::Arc;

#[derive(Clone)]
pub struct State {
    pub calculator: Arc<ImpactCalculator>,
}

impl State {
    #[must_use]
    pub const fn new(calculator: Arc<ImpactCalculator>) -> Self {
        Self { calculator }
    }
}
