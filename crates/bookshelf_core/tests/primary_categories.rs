use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::fixtures::{BookFactory, SCIENCE_CATEGORY_NAME};
use bookshelf_core::{
    CatalogService, CategorizationRepository, CategoryRepository, SqliteCategorizationRepository,
    SqliteCategoryRepository,
};

#[test]
fn primaries_returns_only_the_primary_category() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new()
        .with_primary_category()
        .with_secondary_category()
        .create(&conn)
        .unwrap();

    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    let science = repo.find_by_name(SCIENCE_CATEGORY_NAME).unwrap().unwrap();

    assert_eq!(repo.primaries().unwrap(), vec![science]);
}

#[test]
fn primaries_is_empty_for_book_without_categories() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new().create(&conn).unwrap();

    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    assert!(repo.primaries().unwrap().is_empty());
    assert_eq!(repo.count_primaries().unwrap(), 0);
}

#[test]
fn primaries_is_empty_when_only_secondary_links_exist() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new()
        .with_secondary_category()
        .create(&conn)
        .unwrap();

    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    assert!(repo.primaries().unwrap().is_empty());
}

#[test]
fn categorization_primaries_filters_exactly_on_flag() {
    let conn = open_db_in_memory().unwrap();
    let first = BookFactory::new()
        .with_primary_category()
        .with_secondary_category()
        .create(&conn)
        .unwrap();
    let second = BookFactory::new()
        .name("Second book")
        .with_secondary_category()
        .with_primary_category()
        .create(&conn)
        .unwrap();
    BookFactory::new().create(&conn).unwrap();

    let expected: Vec<_> = first
        .categorizations
        .iter()
        .chain(second.categorizations.iter())
        .filter(|link| link.primary)
        .cloned()
        .collect();

    let repo = SqliteCategorizationRepository::try_new(&conn).unwrap();
    let primaries = repo.primaries().unwrap();
    assert_eq!(primaries.len(), 2);
    assert_eq!(primaries, expected);
    assert!(primaries.iter().all(|link| link.primary));
}

#[test]
fn primaries_keeps_one_row_per_primary_join() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new()
        .with_primary_category()
        .create(&conn)
        .unwrap();
    BookFactory::new()
        .with_primary_category()
        .create(&conn)
        .unwrap();

    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    let primaries = repo.primaries().unwrap();
    assert_eq!(primaries.len(), 2);
    assert!(primaries
        .iter()
        .all(|category| category.name.as_deref() == Some(SCIENCE_CATEGORY_NAME)));
    assert_eq!(repo.count_primaries().unwrap(), 2);
}

#[test]
fn primaries_repeats_a_category_linked_primary_by_two_books() {
    let conn = open_db_in_memory().unwrap();
    let first = BookFactory::new()
        .with_primary_category()
        .create(&conn)
        .unwrap();
    let second = BookFactory::new().name("Another").create(&conn).unwrap();

    let shared_category = first.categorizations[0].category_id;
    SqliteCategorizationRepository::try_new(&conn)
        .unwrap()
        .create_categorization(
            &bookshelf_core::NewCategorization::new(second.book.id, shared_category)
                .primary(true),
        )
        .unwrap();

    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    let ids: Vec<_> = repo
        .primaries()
        .unwrap()
        .into_iter()
        .map(|category| category.id)
        .collect();
    assert_eq!(ids, vec![shared_category, shared_category]);
}

#[test]
fn primaries_reflects_rows_created_after_a_previous_call() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    assert!(repo.primaries().unwrap().is_empty());

    BookFactory::new()
        .with_primary_category()
        .create(&conn)
        .unwrap();

    assert_eq!(repo.primaries().unwrap().len(), 1);
}

#[test]
fn catalog_service_renders_summary_line() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new()
        .with_primary_category()
        .with_secondary_category()
        .create(&conn)
        .unwrap();

    let service = CatalogService::new(SqliteCategoryRepository::try_new(&conn).unwrap());
    assert_eq!(service.primary_category_count().unwrap(), 1);
    assert_eq!(service.primary_categories().unwrap().len(), 1);
    assert_eq!(
        service.primary_categories_summary().unwrap(),
        "# of primary categories: 1"
    );
}
