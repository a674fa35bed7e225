// Domain layer: request/response models and the scoring port.

pub mod model;
pub mod ports;
