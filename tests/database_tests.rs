mod common;

use anyhow::Result;
use common::setup_test_db;
use wedding_guestbook::database::models::Wish;

#[tokio::test]
async fn test_wish_creation_and_retrieval() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let wish = Wish::create(&db.pool, "Anna".to_string(), "Be happy!".to_string()).await?;
    assert!(wish.id > 0);
    assert_eq!(wish.name, "Anna");
    assert_eq!(wish.message, "Be happy!");
    assert!(!wish.created_at.is_empty());

    let found = Wish::find_by_id(&db.pool, wish.id).await?;
    assert_eq!(found, Some(wish));

    Ok(())
}

#[tokio::test]
async fn test_wish_not_found() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let result = Wish::find_by_id(&db.pool, 99).await?;
    assert!(result.is_none());

    Ok(())
}

#[tokio::test]
async fn test_ids_are_unique() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = Wish::create(&db.pool, "A".to_string(), "one".to_string()).await?;
    let second = Wish::create(&db.pool, "B".to_string(), "two".to_string()).await?;
    assert_ne!(first.id, second.id);

    Ok(())
}

#[tokio::test]
async fn test_list_orders_newest_first() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Wish::upsert(&db.pool, 1, "Old", "first", "2024-05-01T10:00:00.000Z").await?;
    Wish::upsert(&db.pool, 2, "Newest", "third", "2024-05-03T10:00:00.000Z").await?;
    Wish::upsert(&db.pool, 3, "Middle", "second", "2024-05-02T10:00:00.000Z").await?;

    let wishes = Wish::list_all(&db.pool).await?;
    let ids: Vec<i64> = wishes.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    Ok(())
}

#[tokio::test]
async fn test_list_breaks_timestamp_ties_by_id() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Wish::upsert(&db.pool, 5, "A", "a", "2024-05-01T10:00:00.000Z").await?;
    Wish::upsert(&db.pool, 6, "B", "b", "2024-05-01T10:00:00.000Z").await?;

    let ids: Vec<i64> = Wish::list_all(&db.pool).await?.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![6, 5]);

    Ok(())
}

#[tokio::test]
async fn test_delete_by_id_reports_rows_affected() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let wish = Wish::create(&db.pool, "Anna".to_string(), "Hi".to_string()).await?;

    assert_eq!(Wish::delete_by_id(&db.pool, wish.id).await?, 1);
    assert_eq!(Wish::delete_by_id(&db.pool, wish.id).await?, 0);
    assert!(Wish::find_by_id(&db.pool, wish.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_delete_all_returns_count() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    for i in 0..3 {
        Wish::create(&db.pool, format!("Guest {i}"), "Hooray".to_string()).await?;
    }

    assert_eq!(Wish::delete_all(&db.pool).await?, 3);
    assert!(Wish::list_all(&db.pool).await?.is_empty());
    assert_eq!(Wish::delete_all(&db.pool).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_upsert_inserts_and_overwrites() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Wish::upsert(&db.pool, 10, "Anna", "Hello", "2024-06-01T12:00:00.000Z").await?;
    Wish::upsert(&db.pool, 10, "Anna K.", "Hello again", "2024-06-02T12:00:00.000Z").await?;

    let wishes = Wish::list_all(&db.pool).await?;
    assert_eq!(wishes.len(), 1);
    assert_eq!(wishes[0].id, 10);
    assert_eq!(wishes[0].name, "Anna K.");
    assert_eq!(wishes[0].message, "Hello again");
    assert_eq!(wishes[0].created_at, "2024-06-02T12:00:00.000Z");

    Ok(())
}

#[tokio::test]
async fn test_insert_after_explicit_ids_does_not_collide() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Wish::upsert(&db.pool, 50, "Restored", "old", "2024-06-01T12:00:00.000Z").await?;
    let fresh = Wish::create(&db.pool, "Fresh".to_string(), "new".to_string()).await?;

    assert!(fresh.id > 50);
    assert_eq!(Wish::list_all(&db.pool).await?.len(), 2);

    Ok(())
}
