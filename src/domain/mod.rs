// Domain layer: order models and the store port.

pub mod model;
pub mod ports;
