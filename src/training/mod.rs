mod trainer;
mod worker;

pub use trainer::Trainer;
pub use worker::{GradientStep, LogisticGradient};
