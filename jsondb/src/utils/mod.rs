// FICHIER : jsondb/src/utils/mod.rs

// =========================================================================
//  JSONDB UTILS - Foundation Layer
// =========================================================================

pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;
pub mod macros;

// --- FAÇADES SÉMANTIQUES ---

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{JsonDbError, Result};
}

/// **Data Abstraction** : Manipulation JSON.
pub mod data {
    pub use super::json::{json, parse, stringify, stringify_pretty, values_equal, Map, Value};
    pub use serde::{Deserialize, Serialize};
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::core::{JsonDbError, Result};
    pub use super::data::{json, Deserialize, Map, Serialize, Value};
    pub use tracing::{debug, error, info, instrument, warn};
}

pub use error::{JsonDbError, Result};
pub use logger::init_logging;
