// Domain layer: value types and ports (interfaces). Kept free of runtime and HTTP concerns.

pub mod model;
pub mod ports;
