pub mod auth_log;
pub mod weather_refresh;
