// Domain layer: core models and ports (interfaces). No knowledge of files or CLI.

pub mod model;
pub mod ports;
