//! Repository tests against a real PostgreSQL database.
//!
//! Ignored by default; run with `DATABASE_URL` set and `--ignored`.

use serde_json::json;
use sqlx::PgPool;
use vinventory_core::ingredient::{normalize_ingredient_patch, normalize_new_ingredient};
use vinventory_core::product::{normalize_new_product, normalize_product_patch};
use vinventory_db::repositories::{IngredientRepo, ProductRepo};

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_create_applies_defaults(pool: PgPool) {
    let draft = normalize_new_product(&json!({ "name": " Barolo ", "brand": "" })).unwrap();
    let product = ProductRepo::create(&pool, &draft).await.unwrap();

    assert_eq!(product.name, "Barolo");
    assert_eq!(product.brand, None);
    assert!(!product.organic);
    assert!(!product.vegan);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_patch_leaves_other_columns_untouched(pool: PgPool) {
    let draft = normalize_new_product(&json!({
        "name": "Rioja",
        "brand": "Muga",
        "organic": true,
    }))
    .unwrap();
    let created = ProductRepo::create(&pool, &draft).await.unwrap();

    let patch = normalize_product_patch(&json!({ "sku": "X" })).unwrap();
    let updated = ProductRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.sku.as_deref(), Some("X"));
    assert_eq!(updated.name, "Rioja");
    assert_eq!(updated.brand.as_deref(), Some("Muga"));
    assert!(updated.organic);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_update_of_missing_row_is_none(pool: PgPool) {
    let patch = normalize_product_patch(&json!({ "sku": "X" })).unwrap();
    assert!(ProductRepo::update(&pool, 999_999, &patch).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_delete_reports_removal(pool: PgPool) {
    let draft = normalize_new_product(&json!({ "name": "Cava" })).unwrap();
    let created = ProductRepo::create(&pool, &draft).await.unwrap();

    assert!(ProductRepo::delete(&pool, created.id).await.unwrap());
    assert!(!ProductRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProductRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_image_url_can_be_cleared(pool: PgPool) {
    let draft = normalize_new_product(&json!({ "name": "Prosecco" })).unwrap();
    let created = ProductRepo::create(&pool, &draft).await.unwrap();

    let with_image = ProductRepo::set_image_url(&pool, created.id, Some("https://x/y.png"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_image.image_url.as_deref(), Some("https://x/y.png"));

    let cleared = ProductRepo::set_image_url(&pool, created.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.image_url, None);
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn ingredient_allergens_round_trip(pool: PgPool) {
    let draft = normalize_new_ingredient(&json!({
        "name": "Casein",
        "allergens": "milk, dairy",
    }))
    .unwrap();
    let created = IngredientRepo::create(&pool, &draft).await.unwrap();
    assert_eq!(created.allergens, vec!["milk", "dairy"]);

    let patch = normalize_ingredient_patch(&json!({ "allergens": null })).unwrap();
    let updated = IngredientRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.allergens.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn ingredients_list_alphabetically(pool: PgPool) {
    for name in ["Tartaric acid", "Casein", "Gum arabic"] {
        let draft = normalize_new_ingredient(&json!({ "name": name })).unwrap();
        IngredientRepo::create(&pool, &draft).await.unwrap();
    }

    let names: Vec<String> = IngredientRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Casein", "Gum arabic", "Tartaric acid"]);
}
