// Module exports for models

pub mod layout;
pub mod settings;
pub mod shift;
