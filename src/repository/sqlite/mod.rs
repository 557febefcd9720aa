mod climb_repository;
mod settings_repository;

pub use climb_repository::ClimbRepository;
pub use settings_repository::SettingsRepository;
