//! Cursor-based pagination.
//!
//! A [`Page`] is one server response; [`paginate`] drains a fetch function
//! into a single ordered collection. Pages are requested strictly
//! sequentially since cursor N+1 is only known after page N returns.

use std::future::Future;

use linear_client::Connection;

/// One fetched page of a connection.
///
/// `next_cursor` is an opaque server token and must be passed back unmodified
/// to retrieve the following page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<T> From<Connection<T>> for Page<T> {
    fn from(conn: Connection<T>) -> Self {
        Self {
            items: conn.nodes,
            has_more: conn.page_info.has_next_page,
            next_cursor: conn.page_info.end_cursor,
        }
    }
}

/// Drain every page of a connection into one ordered `Vec`.
///
/// Calls `fetch(None)` first, then threads each page's `next_cursor` into the
/// following call until a page reports `has_more == false`. Item order is the
/// server's, preserved across pages. There is no iteration cap; callers that
/// want fewer items truncate the result.
///
/// All-or-nothing: the first fetch error propagates immediately and anything
/// collected so far is dropped. No retries.
pub async fn paginate<T, E, F, Fut>(mut fetch: F) -> std::result::Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = std::result::Result<Page<T>, E>>,
{
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch(cursor.take()).await?;
        all.extend(page.items);
        if !page.has_more {
            return Ok(all);
        }
        cursor = page.next_cursor;
    }
}
