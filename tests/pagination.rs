use storefront_api::{
    response::Meta,
    routes::params::{Pagination, STORE_PER_PAGE, StoreQuery},
};

#[test]
fn defaults_and_clamps() {
    assert_eq!(Pagination::default().normalize(), (1, 20, 0));

    let page = Pagination {
        page: Some(0),
        per_page: Some(500),
    };
    assert_eq!(page.normalize(), (1, 100, 0));

    let page = Pagination {
        page: Some(3),
        per_page: Some(0),
    };
    assert_eq!(page.normalize(), (3, 1, 2));
}

#[test]
fn huge_page_saturates_instead_of_overflowing() {
    let page = Pagination {
        page: Some(i64::MAX),
        per_page: Some(20),
    };
    let (number, per_page, offset) = page.normalize();
    assert_eq!(number, i64::MAX);
    assert_eq!(per_page, 20);
    assert_eq!(offset, i64::MAX);
    assert!(offset >= 0);

    let store = StoreQuery {
        page: Some(i64::MAX),
        ..StoreQuery::default()
    };
    let (_, per_page, offset) = store.pagination().normalize();
    assert_eq!(per_page, STORE_PER_PAGE);
    assert_eq!(offset, i64::MAX);
}

#[test]
fn last_page_rounds_up() {
    assert_eq!(Meta::new(1, 12, 25).last_page, Some(3));
    assert_eq!(Meta::new(1, 12, 0).last_page, Some(1));
}
