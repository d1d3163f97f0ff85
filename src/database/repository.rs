pub mod collections_repository;
pub mod games_repository;
pub mod patrons_repository;
pub mod save_states_repository;
pub mod settings_repository;
