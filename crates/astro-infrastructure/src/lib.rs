//! Infrastructure layer: config files, the HTTP backend client, the Socket.IO
//! transport and a token-based auth provider.

pub mod config_service;
pub mod engine_io;
pub mod http_backend;
pub mod paths;
pub mod socket_io;
pub mod static_auth;

pub use config_service::ConfigService;
pub use http_backend::HttpBackend;
pub use paths::AstroPaths;
pub use socket_io::SocketIoTransport;
pub use static_auth::StaticTokenAuthProvider;
