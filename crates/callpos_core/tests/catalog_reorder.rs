use callpos_core::db::open_db_in_memory;
use callpos_core::{
    max_key, CatalogRepoError, CatalogService, CatalogServiceError, SqliteCatalogRepository,
    DEFAULT_KEY_LEN,
};
use uuid::Uuid;

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

fn service(conn: &rusqlite::Connection) -> CatalogService<SqliteCatalogRepository<'_>> {
    CatalogService::new(SqliteCatalogRepository::try_new(conn).unwrap())
}

fn names(categories: &[callpos_core::Category]) -> Vec<&str> {
    categories
        .iter()
        .map(|category| category.name.as_str())
        .collect()
}

#[test]
fn seeded_categories_list_in_seed_order_with_even_ranks() {
    let conn = setup();
    let service = service(&conn);

    let seeded = service
        .seed_categories(vec![
            "Pizza".to_string(),
            "Burgers".to_string(),
            "Drinks".to_string(),
            "Desserts".to_string(),
        ])
        .unwrap();
    assert_eq!(seeded.len(), 4);

    let listed = service.list_categories().unwrap();
    assert_eq!(names(&listed), vec!["Pizza", "Burgers", "Drinks", "Desserts"]);
    for pair in listed.windows(2) {
        assert!(pair[0].rank < pair[1].rank);
    }
    for category in &listed {
        assert_eq!(category.rank.len(), DEFAULT_KEY_LEN);
    }
}

#[test]
fn moving_a_category_updates_exactly_one_rank() {
    let conn = setup();
    let service = service(&conn);

    service
        .seed_categories(vec![
            "Pizza".to_string(),
            "Burgers".to_string(),
            "Drinks".to_string(),
            "Desserts".to_string(),
        ])
        .unwrap();
    let before = service.list_categories().unwrap();
    let moved = before[3].clone();

    // Drag "Desserts" to the front.
    let new_rank = service.move_category(moved.uuid, Some(0)).unwrap();
    let after = service.list_categories().unwrap();
    assert_eq!(names(&after), vec!["Desserts", "Pizza", "Burgers", "Drinks"]);
    assert_eq!(after[0].rank, new_rank);

    // Every other row kept its rank untouched.
    for category in &before[..3] {
        let unchanged = after
            .iter()
            .find(|candidate| candidate.uuid == category.uuid)
            .unwrap();
        assert_eq!(unchanged.rank, category.rank);
    }
}

#[test]
fn moving_to_middle_and_end_lands_between_the_right_neighbors() {
    let conn = setup();
    let service = service(&conn);

    service
        .seed_categories(vec![
            "Pizza".to_string(),
            "Burgers".to_string(),
            "Drinks".to_string(),
            "Desserts".to_string(),
        ])
        .unwrap();
    let listed = service.list_categories().unwrap();
    let pizza = listed[0].uuid;

    service.move_category(pizza, Some(2)).unwrap();
    let listed = service.list_categories().unwrap();
    assert_eq!(names(&listed), vec!["Burgers", "Drinks", "Pizza", "Desserts"]);

    // `None` appends; oversized indexes clamp to the end.
    service.move_category(pizza, None).unwrap();
    let listed = service.list_categories().unwrap();
    assert_eq!(names(&listed), vec!["Burgers", "Drinks", "Desserts", "Pizza"]);

    service.move_category(pizza, Some(99)).unwrap();
    let listed = service.list_categories().unwrap();
    assert_eq!(names(&listed), vec!["Burgers", "Drinks", "Desserts", "Pizza"]);
}

#[test]
fn created_category_appends_after_all_existing_rows() {
    let conn = setup();
    let service = service(&conn);

    service
        .seed_categories(vec!["Pizza".to_string(), "Drinks".to_string()])
        .unwrap();
    let created = service.create_category("Sides").unwrap();

    let listed = service.list_categories().unwrap();
    assert_eq!(names(&listed), vec!["Pizza", "Drinks", "Sides"]);
    assert_eq!(listed.last().unwrap().uuid, created.uuid);
}

#[test]
fn appending_still_works_when_a_seeded_rank_hits_the_maximum_sentinel() {
    let conn = setup();
    let service = service(&conn);

    // The default span divides evenly by 5, so the last seeded rank is the
    // reserved maximum key itself.
    let seeded = service
        .seed_categories(vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
            "E".to_string(),
        ])
        .unwrap();
    assert_eq!(seeded.len(), 5);
    let listed = service.list_categories().unwrap();
    assert_eq!(listed.last().unwrap().rank, max_key(DEFAULT_KEY_LEN));

    let created = service.create_category("F").unwrap();
    assert!(created.rank > max_key(DEFAULT_KEY_LEN));
    let listed = service.list_categories().unwrap();
    assert_eq!(listed.last().unwrap().uuid, created.uuid);
}

#[test]
fn product_ordering_is_scoped_to_its_category() {
    let conn = setup();
    let service = service(&conn);

    let pizza = service.create_category("Pizza").unwrap();
    let drinks = service.create_category("Drinks").unwrap();

    service
        .seed_products(
            pizza.uuid,
            vec![
                ("Margherita".to_string(), 899),
                ("Pepperoni".to_string(), 999),
                ("Hawaiian".to_string(), 1099),
            ],
        )
        .unwrap();
    service
        .seed_products(
            drinks.uuid,
            vec![("Cola".to_string(), 250), ("Water".to_string(), 150)],
        )
        .unwrap();

    let pizzas = service.list_products(pizza.uuid).unwrap();
    let hawaiian = pizzas[2].uuid;
    service.move_product(hawaiian, Some(0)).unwrap();

    let pizzas = service.list_products(pizza.uuid).unwrap();
    let pizza_names: Vec<&str> = pizzas.iter().map(|product| product.name.as_str()).collect();
    assert_eq!(pizza_names, vec!["Hawaiian", "Margherita", "Pepperoni"]);

    // The other category's order is untouched.
    let drink_list = service.list_products(drinks.uuid).unwrap();
    let drink_names: Vec<&str> = drink_list
        .iter()
        .map(|product| product.name.as_str())
        .collect();
    assert_eq!(drink_names, vec!["Cola", "Water"]);
}

#[test]
fn deleted_rows_keep_their_rank_but_leave_the_ordering() {
    let conn = setup();
    let service = service(&conn);

    service
        .seed_categories(vec![
            "Pizza".to_string(),
            "Burgers".to_string(),
            "Drinks".to_string(),
        ])
        .unwrap();
    let listed = service.list_categories().unwrap();
    let burgers = listed[1].clone();

    service.delete_category(burgers.uuid).unwrap();
    let listed = service.list_categories().unwrap();
    assert_eq!(names(&listed), vec!["Pizza", "Drinks"]);

    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    let tombstone = callpos_core::CatalogRepository::get_category(&repo, burgers.uuid, true)
        .unwrap()
        .unwrap();
    assert!(tombstone.is_deleted);
    assert_eq!(tombstone.rank, burgers.rank);
}

#[test]
fn service_rejects_invalid_input_before_touching_storage() {
    let conn = setup();
    let service = service(&conn);

    assert!(matches!(
        service.create_category("   ").unwrap_err(),
        CatalogServiceError::InvalidName
    ));
    assert!(matches!(
        service.seed_categories(Vec::new()).unwrap_err(),
        CatalogServiceError::EmptySeed
    ));

    let pizza = service.create_category("Pizza").unwrap();
    assert!(matches!(
        service
            .create_product(pizza.uuid, "Margherita", -1)
            .unwrap_err(),
        CatalogServiceError::InvalidPrice(-1)
    ));

    let unknown = Uuid::new_v4();
    assert!(matches!(
        service.move_category(unknown, Some(0)).unwrap_err(),
        CatalogServiceError::CategoryNotFound(id) if id == unknown
    ));
    assert!(matches!(
        service.move_product(unknown, None).unwrap_err(),
        CatalogServiceError::ProductNotFound(id) if id == unknown
    ));
}

#[test]
fn seeding_a_non_empty_scope_is_rejected() {
    let conn = setup();
    let service = service(&conn);

    service.create_category("Pizza").unwrap();
    let err = service
        .seed_categories(vec!["Drinks".to_string()])
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogServiceError::Repo(CatalogRepoError::SeedTargetNotEmpty("categories"))
    ));
}

#[test]
fn repository_requires_a_migrated_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteCatalogRepository::try_new(&conn).unwrap_err();
    assert!(matches!(
        err,
        CatalogRepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}
