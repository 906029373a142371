// Domain layer: action metadata, intermediate models and ports (interfaces).
// No I/O happens here; storage and config are reached only through the traits in `ports`.

pub mod model;
pub mod ports;
