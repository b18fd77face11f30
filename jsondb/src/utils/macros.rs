// FICHIER : jsondb/src/utils/macros.rs

/// Construit un `Document` (objet JSON) depuis un littéral objet.
/// Sert aussi bien pour les documents que pour les filtres et les valeurs d'update.
///
/// ```
/// use jsondb::doc;
/// let d = doc!({ "stringKey": "asdf", "intKey": 12 });
/// assert_eq!(d["intKey"], 12);
/// ```
#[macro_export]
macro_rules! doc {
    ({ $($body:tt)* }) => {
        match $crate::utils::json::json!({ $($body)* }) {
            $crate::utils::json::Value::Object(map) => map,
            // json!({..}) produit toujours un objet
            _ => unreachable!(),
        }
    };
}
