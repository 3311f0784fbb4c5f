pub mod configuration;
pub mod console;
pub mod domain;
pub mod subscription_client;
pub mod telemetry;
pub mod unsubscribe;
pub mod validation;
pub mod wizard;
