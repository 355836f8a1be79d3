// Domain layer - readings, series ingestion and poll state
pub mod level;
pub mod poll_state;
pub mod reading;
