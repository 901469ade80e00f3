// Domain layer: models, the backend-neutral query description and ports.

pub mod model;
pub mod ports;
pub mod query;
