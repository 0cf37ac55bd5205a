// Domain layer: entity model and the service port. No I/O here.

pub mod model;
pub mod ports;
