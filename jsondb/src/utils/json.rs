// FICHIER : jsondb/src/utils/json.rs

use crate::utils::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Number, Value};

/// Parse une chaîne JSON en un type T.
/// Trace un extrait du contenu en cas d'échec pour aider au débogage.
pub fn parse<T: DeserializeOwned>(s: &str) -> Result<T> {
    match serde_json::from_str(s) {
        Ok(val) => Ok(val),
        Err(e) => {
            let snippet: String = s.chars().take(100).collect();
            warn!(error = %e, snippet = %snippet, "parsing JSON échoué");
            Err(e.into())
        }
    }
}

/// Convertit un type T en chaîne JSON compacte.
pub fn stringify<T: Serialize>(v: &T) -> Result<String> {
    Ok(serde_json::to_string(v)?)
}

/// Convertit un type T en chaîne JSON formatée (pretty).
pub fn stringify_pretty<T: Serialize>(v: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(v)?)
}

/// Égalité stricte, sauf pour les nombres comparés par valeur (`12 == 12.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::Number(n1), Value::Number(n2)) => numbers_equal(n1, n2),
        _ => false,
    }
}

// 2^64 : au-delà, un flottant n'a plus de contrepartie entière JSON
const INTEGRAL_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Valeur entière exacte d'un nombre : entier JSON, ou flottant sans partie fractionnaire.
pub fn exact_integer(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.into());
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < INTEGRAL_LIMIT)
        .map(|f| f as i128)
}

// Les entiers se comparent exactement (pas de passage par f64 au-delà de 2^53).
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (exact_integer(a), exact_integer(b)) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.as_f64() == b.as_f64(),
        _ => false,
    }
}

/// Nom lisible du type d'une valeur (messages d'erreur).
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
