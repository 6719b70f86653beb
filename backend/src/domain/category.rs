use shared::CategoryCount;

/// Count entries per category, keeping the order in which categories first appear
pub fn count_categories<'a, I>(categories: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    for category in categories {
        match counts.iter_mut().find(|c| c.category == category) {
            Some(existing) => existing.count += 1,
            None => counts.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }
    }
    counts
}
