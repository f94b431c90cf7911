pub mod dataset;
pub mod locale;
pub mod record;
