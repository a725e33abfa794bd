#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod db;

#[cfg(feature = "server")]
pub mod rest;

#[cfg(feature = "server")]
pub mod openapi;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod telemetry;

#[cfg(feature = "server")]
pub mod health;

// Portal domain modules
#[cfg(feature = "server")]
pub mod repo;

#[cfg(feature = "server")]
pub mod roles;

#[cfg(feature = "server")]
pub mod search;
