//! Static asset server and content store for a photography studio site.
//!
//! The [`assets`] responder resolves request paths against ordered candidate
//! roots and is served over HTTP by [`server`]. The [`store`] keeps the
//! studio's records and tags uploaded images with their [`media`]
//! orientation when they are saved.

pub mod assets;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod media;
pub mod models;
pub mod server;
pub mod store;
