pub mod api;
pub mod conf;
pub mod core;
pub mod index;
pub mod io;
pub mod nav;
pub mod service;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
