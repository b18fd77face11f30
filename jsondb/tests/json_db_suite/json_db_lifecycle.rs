// FICHIER : jsondb/tests/json_db_suite/json_db_lifecycle.rs

use crate::{init_test_env, seed_reference_collection, TEST_COLLECTION};
use jsondb::json_db::query::{create_collection, insert_into, select_from};
use jsondb::{doc, CollectionsManager, StorageEngine};

#[tokio::test]
async fn create_collection_writes_empty_file() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);

    assert!(mgr
        .create_collection(&create_collection(TEST_COLLECTION))
        .await
        .unwrap());

    let path = env.cfg.collection_path(TEST_COLLECTION).unwrap();
    assert!(path.ends_with("newDatabase/newCollection.json"));

    let raw = std::fs::read_to_string(&path).expect("fichier de collection");
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, serde_json::json!({ "nextIndex": 0, "documents": [] }));
}

#[tokio::test]
async fn reopening_root_sees_previous_data() {
    let env = init_test_env().await;
    {
        let mgr = CollectionsManager::new(&env.storage);
        seed_reference_collection(&mgr).await;
    }

    // Nouveau moteur sur la même racine : l'état vit uniquement sur disque
    let reopened = StorageEngine::open(env.cfg.clone()).await.unwrap();
    let mgr = CollectionsManager::new(&reopened);

    assert_eq!(mgr.count(TEST_COLLECTION).await.unwrap(), 3);
    let index = mgr
        .insert(insert_into(TEST_COLLECTION, doc!({ "stringKey": "new" })))
        .await
        .unwrap();
    assert_eq!(index, 3);

    let raw = std::fs::read_to_string(env.cfg.collection_path(TEST_COLLECTION).unwrap()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["nextIndex"], 4);
    assert_eq!(parsed["documents"][3]["_index"], 3);
}

#[tokio::test]
async fn list_and_drop_collections() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);

    mgr.create_collection(&create_collection("users")).await.unwrap();
    mgr.create_collection(&create_collection("articles")).await.unwrap();

    assert_eq!(
        mgr.list_collections().await.unwrap(),
        vec!["articles".to_string(), "users".to_string()]
    );

    assert!(mgr.drop_collection("users").await.unwrap());
    assert!(!mgr.drop_collection("users").await.unwrap());
    assert_eq!(mgr.list_collections().await.unwrap(), vec!["articles"]);

    let err = mgr.select(&select_from("users").build()).await.unwrap_err();
    assert_eq!(err.code(), "ERR_COLLECTION_NOT_FOUND");
}

#[tokio::test]
async fn stored_documents_keep_insertion_order() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    seed_reference_collection(&mgr).await;

    let docs = mgr.select(&select_from(TEST_COLLECTION).build()).await.unwrap();
    let indexes: Vec<u64> = docs.iter().filter_map(|d| d["_index"].as_u64()).collect();
    assert_eq!(indexes, vec![0, 1, 2]);

    // Les clés conservent leur ordre d'insertion, `_index` en dernier
    let keys: Vec<&str> = docs[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["stringKey", "intKey", "_index"]);
}
