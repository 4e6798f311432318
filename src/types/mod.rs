pub mod forecast;
pub mod forecast_field;
pub mod lat_lon;
