mod auth;
mod config;
mod media;
mod server;

pub use auth::AuthConfig;
pub use config::Config;
pub use media::MediaConfig;
pub use server::ServerConfig;
