//! Contrôle de concurrence (verrous par collection)

pub mod lock_manager;
