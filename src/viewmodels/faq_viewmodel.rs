// ============================================================================
// FAQ VIEWMODEL - search and category filter
// ============================================================================

use crate::models::{FaqCategory, FaqItem};
use crate::state::FaqFilter;

fn matches_search(item: &FaqItem, needle: &str) -> bool {
    needle.is_empty()
        || item.question.to_lowercase().contains(needle)
        || item.answer.to_lowercase().contains(needle)
        || item.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn matches_category(item: &FaqItem, category: Option<FaqCategory>) -> bool {
    category.map_or(true, |c| item.category == c)
}

/// Items passing both the search and the category filter, in catalogue order.
pub fn filter_faq<'a>(items: &'a [FaqItem], filter: &FaqFilter) -> Vec<&'a FaqItem> {
    let needle = filter.search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| matches_search(item, &needle) && matches_category(item, filter.category))
        .collect()
}

pub fn summary_line(shown: usize, total: usize) -> String {
    format!("Showing {} of {} questions", shown, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FAQ_ITEMS;

    fn filter(search: &str, category: Option<FaqCategory>) -> FaqFilter {
        FaqFilter {
            search: search.to_string(),
            category,
            ..Default::default()
        }
    }

    #[test]
    fn empty_filter_shows_everything() {
        let shown = filter_faq(FAQ_ITEMS, &FaqFilter::default());
        assert_eq!(shown.len(), FAQ_ITEMS.len());
        assert_eq!(summary_line(shown.len(), FAQ_ITEMS.len()), "Showing 8 of 8 questions");
    }

    #[test]
    fn search_covers_tags_case_insensitively() {
        let ids: Vec<u32> = filter_faq(FAQ_ITEMS, &filter("BUDDHISM", None))
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![6]);
    }

    #[test]
    fn search_and_category_combine() {
        let shown = filter_faq(FAQ_ITEMS, &filter("timing", Some(FaqCategory::Practical)));
        let ids: Vec<u32> = shown.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4]);

        let culture = filter("photography", Some(FaqCategory::Culture));
        assert!(filter_faq(FAQ_ITEMS, &culture).is_empty());
    }
}
