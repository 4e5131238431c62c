// Domain layer: message models and ports (interfaces) to the model endpoint.

pub mod model;
pub mod ports;
