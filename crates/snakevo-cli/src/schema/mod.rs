pub mod hyper_params;
pub mod model;
