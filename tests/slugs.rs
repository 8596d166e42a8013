use std::collections::HashSet;

use storefront_api::slug::{
    CATEGORY_SUFFIX_LEN, PRODUCT_SUFFIX_LEN, candidate_sku, candidate_slug, slugify,
};

#[test]
fn slugify_collapses_separators() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("  Smart   Phone -- X  "), "smart-phone-x");
    assert_eq!(slugify("Café Crème"), "caf-cr-me");
    assert_eq!(slugify("---"), "");
}

#[test]
fn candidate_slugs_carry_a_lowercase_suffix() {
    let slug = candidate_slug("Phone", PRODUCT_SUFFIX_LEN);
    let (base, suffix) = slug.rsplit_once('-').expect("suffix separator");
    assert_eq!(base, "phone");
    assert_eq!(suffix.len(), PRODUCT_SUFFIX_LEN);
    assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    let category = candidate_slug("Home & Garden", CATEGORY_SUFFIX_LEN);
    assert!(category.starts_with("home-garden-"));
    assert_eq!(category.len(), "home-garden-".len() + CATEGORY_SUFFIX_LEN);
}

#[test]
fn hundred_generated_slugs_are_distinct() {
    let slugs: HashSet<String> = (0..100)
        .map(|_| candidate_slug("Same Name", PRODUCT_SUFFIX_LEN))
        .collect();
    assert_eq!(slugs.len(), 100);
}

#[test]
fn skus_are_prefixed_uppercase() {
    let sku = candidate_sku();
    let code = sku.strip_prefix("SKU-").expect("SKU- prefix");
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}
