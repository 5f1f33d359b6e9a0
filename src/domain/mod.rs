// Domain layer - Selection, sensor data and history models
pub mod history;
pub mod selection;
pub mod sensor_data;
