//! Training infrastructure: the episode loop that drives a learning player
//! through the train environment, and rolling metrics.

pub mod metrics;
pub mod trainer;
