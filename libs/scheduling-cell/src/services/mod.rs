pub mod availability;
pub mod booking;
pub mod consistency;
pub mod lifecycle;
