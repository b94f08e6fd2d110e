mod accumulator;
mod gradient;
mod params;

pub use accumulator::GradientAccumulator;
pub use gradient::Gradient;
pub use params::Params;
