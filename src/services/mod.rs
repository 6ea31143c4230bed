// Service module exports

pub mod layout;
pub mod pdf;
pub mod settings;
