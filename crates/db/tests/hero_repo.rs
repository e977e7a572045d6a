//! Integration tests for `HeroRepo` against a real database.

use heroes_db::models::hero::HeroInput;
use heroes_db::repositories::HeroRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_hero(name: &str) -> HeroInput {
    HeroInput::new(name, name.to_lowercase().replace(' ', "-"))
}

fn full_hero() -> HeroInput {
    let mut input = HeroInput::new("Batman", "batman");
    input.powerstats = json!({"intelligence": 100, "strength": 26})
        .as_object()
        .cloned()
        .unwrap();
    input.biography = json!({"fullName": "Bruce Wayne", "aliases": ["Dark Knight"]})
        .as_object()
        .cloned()
        .unwrap();
    input
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_find_round_trips_documents(pool: PgPool) {
    let id = HeroRepo::create(&pool, &full_hero()).await.unwrap();

    let hero = HeroRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(hero.id, id);
    assert_eq!(hero.name, "Batman");
    assert_eq!(hero.slug, "batman");
    assert_eq!(hero.powerstats, json!({"intelligence": 100, "strength": 26}));
    assert_eq!(
        hero.biography,
        json!({"fullName": "Bruce Wayne", "aliases": ["Dark Knight"]})
    );
    assert_eq!(hero.work, json!({}));
    assert_eq!(hero.images, json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ids_are_unique(pool: PgPool) {
    let a = HeroRepo::create(&pool, &new_hero("A")).await.unwrap();
    let b = HeroRepo::create(&pool, &new_hero("B")).await.unwrap();
    assert_ne!(a, b);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_allowed(pool: PgPool) {
    HeroRepo::create(&pool, &HeroInput::new("One", "same")).await.unwrap();
    HeroRepo::create(&pool, &HeroInput::new("Two", "same")).await.unwrap();
    assert_eq!(HeroRepo::count(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    assert!(HeroRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_page_slices_in_id_order(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(
            HeroRepo::create(&pool, &new_hero(&format!("Hero {i}")))
                .await
                .unwrap(),
        );
    }

    let page = HeroRepo::list_page(&pool, 2, 2).await.unwrap();
    let got: Vec<_> = page.iter().map(|h| h.id).collect();
    assert_eq!(got, ids[2..4].to_vec());

    let tail = HeroRepo::list_page(&pool, 2, 4).await.unwrap();
    assert_eq!(tail.len(), 1);

    let past_end = HeroRepo::list_page(&pool, 2, 10).await.unwrap();
    assert!(past_end.is_empty());

    assert_eq!(HeroRepo::count(&pool).await.unwrap(), 5);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_case_insensitive_substring(pool: PgPool) {
    for name in ["Spiderman", "Batman", "Wonder Woman", "MANTIS", "Thor"] {
        HeroRepo::create(&pool, &new_hero(name)).await.unwrap();
    }

    let pattern = heroes_core::search::contains_pattern("man");
    let found = HeroRepo::search_by_name(&pool, &pattern).await.unwrap();
    let names: Vec<_> = found.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Spiderman", "Batman", "Wonder Woman", "MANTIS"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    HeroRepo::create(&pool, &new_hero("Agent_47")).await.unwrap();
    HeroRepo::create(&pool, &new_hero("AgentX47")).await.unwrap();

    let pattern = heroes_core::search::contains_pattern("t_4");
    let found = HeroRepo::search_by_name(&pool, &pattern).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Agent_47");
}

// ---------------------------------------------------------------------------
// Replace / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_overwrites_all_columns(pool: PgPool) {
    let id = HeroRepo::create(&pool, &full_hero()).await.unwrap();

    let replacement = HeroInput::new("The Batman", "the-batman");
    assert!(HeroRepo::replace(&pool, id, &replacement).await.unwrap());

    let hero = HeroRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(hero.name, "The Batman");
    assert_eq!(hero.slug, "the-batman");
    // Replace, not merge: previously set documents are cleared.
    assert_eq!(hero.powerstats, json!({}));
    assert_eq!(hero.biography, json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_missing_returns_false(pool: PgPool) {
    let updated = HeroRepo::replace(&pool, 424_242, &new_hero("Nobody"))
        .await
        .unwrap();
    assert!(!updated);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: PgPool) {
    let id = HeroRepo::create(&pool, &new_hero("Temp")).await.unwrap();

    assert!(HeroRepo::delete(&pool, id).await.unwrap());
    assert!(HeroRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(!HeroRepo::delete(&pool, id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Bulk insert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_create_inserts_all_rows(pool: PgPool) {
    let inputs: Vec<_> = (0..25).map(|i| new_hero(&format!("Bulk {i}"))).collect();

    let inserted = HeroRepo::bulk_create(&pool, &inputs).await.unwrap();
    assert_eq!(inserted, 25);
    assert_eq!(HeroRepo::count(&pool).await.unwrap(), 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_create_empty_is_noop(pool: PgPool) {
    assert_eq!(HeroRepo::bulk_create(&pool, &[]).await.unwrap(), 0);
    assert_eq!(HeroRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    heroes_db::health_check(&pool).await.unwrap();
}
