// Domain layer: core models, the field normalizer and ports (interfaces).
// No I/O here; adapters live under src/adapters.

pub mod model;
pub mod normalize;
pub mod ports;
