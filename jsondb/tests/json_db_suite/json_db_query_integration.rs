// FICHIER : jsondb/tests/json_db_suite/json_db_query_integration.rs

use crate::{init_test_env, seed_reference_collection, TEST_COLLECTION};
use jsondb::json_db::query::{
    create_collection, delete_all_from, delete_from, insert_into, select_from, update,
};
use jsondb::{doc, CollectionsManager, QueryEngine, QueryOutcome};

#[tokio::test]
async fn index_assignment_never_reuses_values() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);

    engine.submit(create_collection("c")).await.unwrap();

    let first = engine.submit(insert_into("c", doc!({ "n": 1 }))).await.unwrap();
    let second = engine.submit(insert_into("c", doc!({ "n": 2 }))).await.unwrap();
    assert_eq!(first, QueryOutcome::Inserted(0));
    assert_eq!(second, QueryOutcome::Inserted(1));

    let removed = engine
        .submit(delete_from("c").where_(doc!({ "_index": 0 })))
        .await
        .unwrap();
    assert_eq!(removed, QueryOutcome::Deleted(1));

    let third = engine.submit(insert_into("c", doc!({ "n": 3 }))).await.unwrap();
    assert_eq!(third, QueryOutcome::Inserted(2));
}

#[tokio::test]
async fn select_by_scalar_filter_returns_exact_match() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);

    engine.submit(create_collection(TEST_COLLECTION)).await.unwrap();
    engine
        .submit(insert_into(TEST_COLLECTION, doc!({ "stringKey": "asdf", "intKey": 12 })))
        .await
        .unwrap();
    engine
        .submit(insert_into(TEST_COLLECTION, doc!({ "stringKey": "qwerty", "intKey": 7 })))
        .await
        .unwrap();

    let outcome = engine
        .submit(select_from(TEST_COLLECTION).where_(doc!({ "intKey": 12 })))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        QueryOutcome::Selected(vec![doc!({ "stringKey": "asdf", "intKey": 12, "_index": 0 })])
    );
}

#[tokio::test]
async fn nested_filter_matches_recursively() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);

    engine.submit(create_collection("nested")).await.unwrap();
    engine
        .submit(insert_into(
            "nested",
            doc!({ "fieldA": "x", "fieldB": { "fieldBA": 1, "fieldBB": true } }),
        ))
        .await
        .unwrap();
    engine
        .submit(insert_into(
            "nested",
            doc!({ "fieldA": "y", "fieldB": { "fieldBA": 1, "fieldBB": false } }),
        ))
        .await
        .unwrap();

    let outcome = engine
        .submit(select_from("nested").where_(doc!({ "fieldB": { "fieldBB": true } })))
        .await
        .unwrap();
    let docs = outcome.documents().expect("résultat de sélection");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["fieldA"], "x");
}

#[tokio::test]
async fn update_changes_only_matching_documents() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);
    seed_reference_collection(&mgr).await;

    let outcome = engine
        .submit(
            update(TEST_COLLECTION)
                .to(doc!({ "stringKey": "qwerty" }))
                .where_(doc!({ "intKey": 12 })),
        )
        .await
        .unwrap();
    assert_eq!(outcome, QueryOutcome::Updated(1));

    let docs = mgr.select(&select_from(TEST_COLLECTION).build()).await.unwrap();
    assert_eq!(docs[0], doc!({ "stringKey": "qwerty", "intKey": 12, "_index": 0 }));
    assert_eq!(docs[1]["stringKey"], "qwerty");
    assert_eq!(docs[2]["stringKey"], "uiop");

    // Aucun document ciblé : compte nul
    let none = engine
        .submit(
            update(TEST_COLLECTION)
                .to(doc!({ "stringKey": "zzz" }))
                .where_(doc!({ "intKey": 99 })),
        )
        .await
        .unwrap();
    assert_eq!(none, QueryOutcome::Updated(0));
}

#[tokio::test]
async fn update_by_index_reports_actual_modifications() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);
    seed_reference_collection(&mgr).await;

    let hit = engine
        .submit(
            update(TEST_COLLECTION)
                .to(doc!({ "flag": true }))
                .where_(doc!({ "index": 1, "intKey": 7 })),
        )
        .await
        .unwrap();
    assert_eq!(hit, QueryOutcome::Updated(1));

    let miss = engine
        .submit(
            update(TEST_COLLECTION)
                .to(doc!({ "flag": true }))
                .where_(doc!({ "index": 1, "intKey": 12 })),
        )
        .await
        .unwrap();
    assert_eq!(miss, QueryOutcome::Updated(0));

    let out_of_range = engine
        .submit(
            update(TEST_COLLECTION)
                .to(doc!({ "flag": true }))
                .where_(doc!({ "index": 10 })),
        )
        .await
        .unwrap();
    assert_eq!(out_of_range, QueryOutcome::Updated(0));

    let flagged = mgr
        .select(&select_from(TEST_COLLECTION).where_(doc!({ "flag": true })))
        .await
        .unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["intKey"], 7);
}

#[tokio::test]
async fn delete_removes_only_matching_documents() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);
    seed_reference_collection(&mgr).await;

    let outcome = engine
        .submit(delete_from(TEST_COLLECTION).where_(doc!({ "intKey": 14 })))
        .await
        .unwrap();
    assert_eq!(outcome, QueryOutcome::Deleted(1));

    let gone = engine
        .submit(select_from(TEST_COLLECTION).where_(doc!({ "intKey": 14 })))
        .await
        .unwrap();
    assert_eq!(gone, QueryOutcome::Selected(vec![]));
    assert_eq!(mgr.count(TEST_COLLECTION).await.unwrap(), 2);

    let cleared = engine.submit(delete_all_from(TEST_COLLECTION)).await.unwrap();
    assert_eq!(cleared, QueryOutcome::Deleted(2));
}

#[tokio::test]
async fn index_fast_path_still_applies_other_keys() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);
    seed_reference_collection(&mgr).await;

    let rejected = engine
        .submit(select_from(TEST_COLLECTION).where_(doc!({ "index": 1, "stringKey": "zzz" })))
        .await
        .unwrap();
    assert_eq!(rejected, QueryOutcome::Selected(vec![]));

    let accepted = engine
        .submit(select_from(TEST_COLLECTION).where_(doc!({ "index": 1, "stringKey": "qwerty" })))
        .await
        .unwrap();
    assert_eq!(accepted.documents().map(<[_]>::len), Some(1));

    // Position 0 : pas de traitement particulier pour la première position
    let first = engine
        .submit(select_from(TEST_COLLECTION).where_(doc!({ "index": 0 })))
        .await
        .unwrap();
    assert_eq!(first.documents().unwrap()[0]["stringKey"], "asdf");
}

#[tokio::test]
async fn json_descriptors_are_routed_like_typed_queries() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage);
    let engine = QueryEngine::new(&mgr);

    let created = engine
        .submit(serde_json::json!({ "type": "create_collection", "name": "docs" }))
        .await
        .unwrap();
    assert_eq!(created, QueryOutcome::Created(true));

    let inserted = engine
        .submit(serde_json::json!({
            "type": "insert",
            "collection": "docs",
            "document": { "title": "hello" }
        }))
        .await
        .unwrap();
    assert_eq!(inserted, QueryOutcome::Inserted(0));

    let selected = engine
        .submit(serde_json::json!({
            "type": "select",
            "collection": "docs",
            "filter": { "title": "hello" }
        }))
        .await
        .unwrap();
    assert_eq!(selected.documents().map(<[_]>::len), Some(1));
}
