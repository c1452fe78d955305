//! Embassy task implementations

pub mod motor;
pub mod sensor;
pub mod server;

pub use motor::motor_task;
pub use sensor::sensor_task;
pub use server::server_task;
