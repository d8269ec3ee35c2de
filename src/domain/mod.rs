// Domain layer: query and response models plus the page source port.

pub mod model;
pub mod ports;
