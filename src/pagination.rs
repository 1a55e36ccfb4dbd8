use serde::Serialize;

/// Page links to render around `current`, with `None` marking an ellipsis.
///
/// Always shows `edge` pages at both ends and `before`/`after` pages around the
/// current one.
fn page_window(
    total_pages: usize,
    current: usize,
    edge: usize,
    before: usize,
    after: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(before));
    let mid_end = (current + after + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// A fetched page of rows together with the page links for the pager.
#[derive(Debug, Serialize)]
pub struct Paginated<'a, T> {
    pub items: &'a [T],
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<'a, T> Paginated<'a, T> {
    pub fn new(items: &'a [T], current_page: usize, total: usize, page_size: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = total.div_ceil(page_size.max(1));

        let pages = page_window(total_pages, current_page, 2, 2, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
