use engine::{CategoryPatch, Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::Database;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    let engine = engine_with_db().await;

    let created = engine
        .create_category("Food", Some("Groceries and dining"))
        .await
        .unwrap();

    let (category, expenses) = engine.category(created.id).await.unwrap();
    assert_eq!(category.id, created.id);
    assert_eq!(category.name, "Food");
    assert_eq!(category.description.as_deref(), Some("Groceries and dining"));
    assert!(category.updated_at >= category.created_at);
    assert!(expenses.is_empty());
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let engine = engine_with_db().await;

    let err = engine.create_category("", None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine.create_category("   ", None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let engine = engine_with_db().await;

    engine.create_category("Food", None).await.unwrap();
    let err = engine.create_category("Food", None).await.unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    let categories = engine.list_categories().await.unwrap();
    let with_name = categories
        .iter()
        .filter(|(category, _)| category.name == "Food")
        .count();
    assert_eq!(with_name, 1);
}

#[tokio::test]
async fn name_comparison_is_case_sensitive() {
    let engine = engine_with_db().await;

    engine.create_category("Food", None).await.unwrap();
    engine.create_category("food", None).await.unwrap();

    assert_eq!(engine.list_categories().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_description_keeps_name() {
    let engine = engine_with_db().await;
    let created = engine.create_category("Food", None).await.unwrap();

    let updated = engine
        .update_category(
            created.id,
            CategoryPatch {
                name: None,
                description: Some(Some("Everything edible".to_string())),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Food");
    assert_eq!(updated.description.as_deref(), Some("Everything edible"));
}

#[tokio::test]
async fn update_name_keeps_description() {
    let engine = engine_with_db().await;
    let created = engine
        .create_category("Food", Some("Groceries"))
        .await
        .unwrap();

    let updated = engine
        .update_category(
            created.id,
            CategoryPatch {
                name: Some("Meals".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Meals");
    assert_eq!(updated.description.as_deref(), Some("Groceries"));
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn explicit_empty_description_clears_it() {
    let engine = engine_with_db().await;
    let created = engine
        .create_category("Food", Some("Groceries"))
        .await
        .unwrap();

    let updated = engine
        .update_category(
            created.id,
            CategoryPatch {
                name: None,
                description: Some(None),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn empty_name_patch_is_ignored() {
    let engine = engine_with_db().await;
    let created = engine.create_category("Food", None).await.unwrap();

    let updated = engine
        .update_category(
            created.id,
            CategoryPatch {
                name: Some("  ".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Food");
}

#[tokio::test]
async fn rename_onto_existing_name_is_rejected() {
    let engine = engine_with_db().await;
    engine.create_category("Food", None).await.unwrap();
    let other = engine.create_category("Travel", None).await.unwrap();

    let err = engine
        .update_category(
            other.id,
            CategoryPatch {
                name: Some("Food".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    // Re-asserting the current name is not a conflict.
    let updated = engine
        .update_category(
            other.id,
            CategoryPatch {
                name: Some("Travel".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Travel");
}

#[tokio::test]
async fn update_missing_category_not_found() {
    let engine = engine_with_db().await;

    let err = engine
        .update_category(42, CategoryPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn get_missing_category_not_found() {
    let engine = engine_with_db().await;

    let err = engine.category(42).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_category_removes_its_expenses() {
    let engine = engine_with_db().await;
    let food = engine.create_category("Food", None).await.unwrap();
    let travel = engine.create_category("Travel", None).await.unwrap();

    for title in ["Coffee", "Lunch", "Dinner"] {
        engine
            .create_expense(title, 10.0, food.id, None, None)
            .await
            .unwrap();
    }
    engine
        .create_expense("Train ticket", 23.0, travel.id, None, None)
        .await
        .unwrap();

    engine.delete_category(food.id).await.unwrap();

    let err = engine.category(food.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let expenses = engine.list_expenses().await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].0.title, "Train ticket");
}

#[tokio::test]
async fn delete_missing_category_is_an_error() {
    let engine = engine_with_db().await;

    let err = engine.delete_category(42).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn list_is_newest_first_with_counts() {
    let engine = engine_with_db().await;
    let food = engine.create_category("Food", None).await.unwrap();
    let travel = engine.create_category("Travel", None).await.unwrap();

    engine
        .create_expense("Coffee", 3.0, food.id, None, None)
        .await
        .unwrap();

    let categories = engine.list_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    // Most recently created first; counts reflect current expenses.
    assert_eq!(categories[0].0.id, travel.id);
    assert_eq!(categories[0].1, 0);
    assert_eq!(categories[1].0.id, food.id);
    assert_eq!(categories[1].1, 1);
}

#[tokio::test]
async fn category_expenses_are_newest_date_first() {
    let engine = engine_with_db().await;
    let food = engine.create_category("Food", None).await.unwrap();

    let old = chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let new = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    engine
        .create_expense("Older", 1.0, food.id, None, Some(old))
        .await
        .unwrap();
    engine
        .create_expense("Newer", 2.0, food.id, None, Some(new))
        .await
        .unwrap();

    let (_, expenses) = engine.category(food.id).await.unwrap();
    assert_eq!(expenses[0].title, "Newer");
    assert_eq!(expenses[1].title, "Older");
}
