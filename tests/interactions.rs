// tests/interactions.rs
//
// Interest accumulation end to end: the like/click scenario, commutativity,
// the unknown-kind no-op, and concurrent same-user updates.

use std::sync::Arc;

use chrono::Utc;

use article_engine::config::{ConfigHandle, EngineConfig};
use article_engine::interests::InteractionKind;
use article_engine::service::Engine;
use article_engine::store::{MemoryStore, Store};
use article_engine::types::{Article, User, UserId};

fn article(id: &str, keywords: &[&str], views: u64) -> Article {
    Article {
        id: id.into(),
        title: id.to_string(),
        body: format!("body of {id}"),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        views,
        impressions: 0,
        updated_at: Utc::now(),
    }
}

async fn engine_with(articles: Vec<Article>, users: Vec<User>) -> Arc<Engine> {
    let store = MemoryStore::new();
    for a in articles {
        store.insert_article(a).await;
    }
    for u in users {
        store.insert_user(u).await;
    }
    Arc::new(Engine::new(
        Arc::new(store),
        ConfigHandle::new(EngineConfig::default()),
    ))
}

#[tokio::test]
async fn like_then_click_accumulates_per_keyword() {
    // Article A carries ["rust","gc"], B carries ["rust"]; U starts empty.
    let eng = engine_with(
        vec![
            article("A", &["rust", "gc"], 9),
            article("B", &["rust"], 3),
        ],
        vec![User::new("U", "test user")],
    )
    .await;
    let u: UserId = "U".into();

    eng.apply_interaction(&u, &"A".into(), Some(InteractionKind::Like))
        .await
        .unwrap();
    let after_like = eng.store().fetch_user(&u).await.unwrap().unwrap();
    assert_eq!(after_like.interests.weight_of("rust"), 5);
    assert_eq!(after_like.interests.weight_of("gc"), 5);
    assert_eq!(after_like.interests.len(), 2);

    eng.apply_interaction(&u, &"B".into(), Some(InteractionKind::Click))
        .await
        .unwrap();
    let after_click = eng.store().fetch_user(&u).await.unwrap().unwrap();
    assert_eq!(after_click.interests.weight_of("rust"), 6);
    assert_eq!(after_click.interests.weight_of("gc"), 5);

    // Both articles match the top interests; A leads on views.
    let rec = eng.recommend(&u).await.unwrap();
    let ids: Vec<&str> = rec.iter().map(|a| a.id.0.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[tokio::test]
async fn totals_are_order_independent() {
    let arts = || {
        vec![
            article("A", &["rust", "gc"], 0),
            article("B", &["rust"], 0),
            article("C", &["gc", "wasm"], 0),
        ]
    };
    let script: Vec<(&str, InteractionKind)> = vec![
        ("A", InteractionKind::Like),
        ("B", InteractionKind::Click),
        ("C", InteractionKind::Share),
        ("A", InteractionKind::Click),
    ];

    let forward = engine_with(arts(), vec![User::new("U", "u")]).await;
    for (aid, kind) in &script {
        forward
            .apply_interaction(&"U".into(), &(*aid).into(), Some(*kind))
            .await
            .unwrap();
    }

    let backward = engine_with(arts(), vec![User::new("U", "u")]).await;
    for (aid, kind) in script.iter().rev() {
        backward
            .apply_interaction(&"U".into(), &(*aid).into(), Some(*kind))
            .await
            .unwrap();
    }

    let f = forward.store().fetch_user(&"U".into()).await.unwrap().unwrap();
    let b = backward.store().fetch_user(&"U".into()).await.unwrap().unwrap();
    for kw in ["rust", "gc", "wasm"] {
        assert_eq!(
            f.interests.weight_of(kw),
            b.interests.weight_of(kw),
            "total for {kw} must not depend on application order"
        );
    }
    // rust: like(A,5) + click(B,1) + click(A,1) = 7; gc: 5+5+1 = 11; wasm: 5.
    assert_eq!(f.interests.weight_of("rust"), 7);
    assert_eq!(f.interests.weight_of("gc"), 11);
    assert_eq!(f.interests.weight_of("wasm"), 5);
}

#[tokio::test]
async fn unknown_kind_is_a_noop_not_an_error() {
    let eng = engine_with(
        vec![article("A", &["rust"], 0)],
        vec![User::new("U", "u")],
    )
    .await;

    eng.apply_interaction(&"U".into(), &"A".into(), InteractionKind::parse("hover"))
        .await
        .unwrap();

    let u = eng.store().fetch_user(&"U".into()).await.unwrap().unwrap();
    assert!(u.interests.is_empty(), "no entries, not even at weight 0");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_same_user_interactions_all_land() {
    let articles: Vec<Article> = (0..20)
        .map(|i| article(&format!("a{i}"), &["shared"], 0))
        .collect();
    let eng = engine_with(articles, vec![User::new("U", "u")]).await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let eng = Arc::clone(&eng);
        handles.push(tokio::spawn(async move {
            eng.apply_interaction(
                &"U".into(),
                &format!("a{i}").as_str().into(),
                Some(InteractionKind::Like),
            )
            .await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    // 20 likes × weight 5 on the shared keyword; additive, nothing lost.
    let u = eng.store().fetch_user(&"U".into()).await.unwrap().unwrap();
    assert_eq!(u.interests.weight_of("shared"), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_counter_bumps_all_land() {
    let eng = engine_with(vec![article("A", &["rust"], 0)], vec![]).await;

    let mut handles = Vec::new();
    for _ in 0..32 {
        let eng = Arc::clone(&eng);
        handles.push(tokio::spawn(async move {
            eng.store().update_article_counters(&"A".into(), 1, 1).await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    let a = eng.store().fetch_article(&"A".into()).await.unwrap().unwrap();
    assert_eq!((a.views, a.impressions), (32, 32));
}
