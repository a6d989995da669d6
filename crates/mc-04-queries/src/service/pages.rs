//! Page splitting for range requests.

/// Split `count` records starting at `start` into `(start, len)` pages of at
/// most `page_size` records.
pub fn page_ranges(start: u32, count: u32, page_size: u32) -> Vec<(u32, u32)> {
    let page_size = page_size.max(1);
    let mut pages = Vec::with_capacity(count.div_ceil(page_size) as usize);
    let mut offset = 0;
    while offset < count {
        let len = page_size.min(count - offset);
        pages.push((start + offset, len));
        offset += len;
    }
    pages
}
