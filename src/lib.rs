pub mod config;
pub mod db;
pub mod env;

pub use config::{
    database_connection_string, settings, ClientCredentials, ConnectionSettings, KeyRole,
    PublicSettings, Setting,
};
pub use env::EnvSnapshot;
