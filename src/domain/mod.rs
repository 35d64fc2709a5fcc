// Domain layer: submodel model types and ports (interfaces).

pub mod model;
pub mod ports;
