// Domain layer: rotation models and the time port. No filesystem access here.

pub mod model;
pub mod ports;
