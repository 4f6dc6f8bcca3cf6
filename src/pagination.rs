use serde::Serialize;

/// Above this many pages the page list is truncated around the current page
const MAX_UNTRUNCATED_PAGES: u32 = 7;

/// `ceil(total_items / page_size)`; zero items means zero pages
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Normalize a raw `page` parameter.
///
/// The leading integer of `raw` is used (`"3abc"` is 3, `"2.9"` is 2).
/// Absent, non-numeric, zero and negative values all become 1. There is no
/// upper clamp: a page past the end just yields an empty listing.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    raw.and_then(leading_integer)
        .map(|page| page.clamp(1, i64::from(u32::MAX)) as u32)
        .unwrap_or(1)
}

/// Optional sign followed by the leading ASCII digits of the trimmed input
///
/// Trailing garbage is ignored; `None` when no digit follows the sign.
/// Magnitudes beyond `i64` saturate.
pub fn leading_integer(raw: &str) -> Option<i64> {
    let value = raw.trim();
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// One entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page numbers to display for `current_page` out of `total_pages`.
///
/// Up to seven pages are listed in full. Beyond that the first and last page
/// are always shown, with `current_page ± 1` (kept inside `2..=total_pages-1`)
/// between them and an ellipsis wherever numbers are skipped.
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= MAX_UNTRUNCATED_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let last = total_pages;
    let start = current_page.saturating_sub(1).max(2);
    let end = current_page.saturating_add(1).min(last - 1);

    let mut items = vec![PageItem::Page(1)];
    if start > end {
        // current page is out of range, nothing sits between first and last
        items.push(PageItem::Ellipsis);
    } else {
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((start..=end).map(PageItem::Page));
        if end < last - 1 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.push(PageItem::Page(last));
    items
}

/// Previous page, absent on the first page
pub fn previous_page(current_page: u32) -> Option<u32> {
    (current_page > 1).then(|| current_page - 1)
}

/// Next page, absent on the last page or when there are no pages
pub fn next_page(current_page: u32, total_pages: u32) -> Option<u32> {
    (current_page < total_pages).then(|| current_page + 1)
}

/// Everything a listing needs to draw its navigation controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
    pub pages: Vec<PageItem>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

impl Pagination {
    pub fn new(current_page: u32, page_size: u32, total_items: u64) -> Self {
        let total = total_pages(total_items, page_size);
        Pagination {
            current_page,
            total_pages: total,
            total_items,
            page_size,
            pages: page_window(current_page, total),
            previous: previous_page(current_page),
            next: next_page(current_page, total),
        }
    }
}
