use serde::Deserialize;

/// Page size the list endpoint uses when `page_size` is not sent.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Upper bound accepted by the server for `page_size`; used to fetch a
/// whole dataset in a single request.
pub const MAX_PAGE_SIZE: usize = 10_000;

/// DRF `PageNumberPagination` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer with an envelope when pagination is enabled
/// and with a bare array otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page(Paginated<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListResponse::Page(p) => &p.results,
            ListResponse::Bare(v) => v,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Page(p) => p.results,
            ListResponse::Bare(v) => v,
        }
    }

    /// Total item count, known only for the envelope form.
    pub fn count(&self) -> Option<usize> {
        match self {
            ListResponse::Page(p) => Some(p.count),
            ListResponse::Bare(_) => None,
        }
    }

    pub fn next(&self) -> Option<&str> {
        match self {
            ListResponse::Page(p) => p.next.as_deref(),
            ListResponse::Bare(_) => None,
        }
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_and_bare_array() {
        let page: ListResponse<u32> =
            serde_json::from_str(r#"{"count": 51, "next": "http://x/?page=2", "previous": null, "results": [1, 2]}"#)
                .unwrap();
        assert_eq!(page.count(), Some(51));
        assert_eq!(page.next(), Some("http://x/?page=2"));
        assert_eq!(page.items(), &[1, 2]);

        let bare: ListResponse<u32> = serde_json::from_str("[3, 4, 5]").unwrap();
        assert_eq!(bare.count(), None);
        assert_eq!(bare.next(), None);
        assert_eq!(bare.into_items(), vec![3, 4, 5]);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, DEFAULT_PAGE_SIZE), 0);
        assert_eq!(total_pages(25, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(total_pages(26, DEFAULT_PAGE_SIZE), 2);
        assert_eq!(total_pages(10, 0), 0);
    }
}
