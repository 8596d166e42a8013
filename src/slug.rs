use rand::Rng;

pub const PRODUCT_SUFFIX_LEN: usize = 5;
pub const CATEGORY_SUFFIX_LEN: usize = 4;
const SKU_LEN: usize = 8;

/// Lowercase ASCII slug: every run of non-alphanumerics becomes one hyphen, ends trimmed.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut prev_hyphen = true;
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub fn random_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// `slugify(name + "-" + random)`; callers retry until the slug is free.
pub fn candidate_slug(name: &str, suffix_len: usize) -> String {
    slugify(&format!("{name}-{}", random_suffix(suffix_len)))
}

/// `SKU-` followed by uppercase alphanumerics; callers retry until the SKU is free.
pub fn candidate_sku() -> String {
    let code: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SKU_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("SKU-{code}")
}
