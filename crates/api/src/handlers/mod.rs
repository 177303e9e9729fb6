//! HTTP handlers, one module per resource.

pub mod bills;
pub mod categories;
pub mod civis;
pub mod profiles;
pub mod threads;
