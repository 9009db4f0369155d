mod memory;
mod settings_traits;

pub use memory::InMemorySettingsRepository;
pub use settings_traits::SettingsRepositoryTrait;
