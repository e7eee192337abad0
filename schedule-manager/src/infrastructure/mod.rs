pub mod holiday_repo;
pub mod lead_time_repo;
pub mod status_repo;
