use tracing::{debug, error};

use super::{json_request, ApiClient};
use crate::gateway::{ApiRequest, GatewayError};
use crate::models::{Book, BookQuery, BookUpdate, Page};

const BOOKS_PATH: &str = "/api/books/";

impl ApiClient {
    /// One page of the catalog for `query`.
    pub async fn list_books(&self, query: &BookQuery, page: u32) -> Result<Page<Book>, GatewayError> {
        let request = ApiRequest::get(BOOKS_PATH).with_query(query.to_query_pairs(page));
        self.gateway().send_json(request).await.map_err(|e| {
            error!(error = %e, page, "Error fetching books");
            e
        })
    }

    pub async fn get_book(&self, id: u64) -> Result<Book, GatewayError> {
        self.gateway()
            .send_json(ApiRequest::get(format!("{}{}/", BOOKS_PATH, id)))
            .await
    }

    pub async fn update_book(&self, id: u64, update: &BookUpdate) -> Result<Book, GatewayError> {
        let request = json_request(ApiRequest::put(format!("{}{}/", BOOKS_PATH, id)), update)?;
        self.gateway().send_json(request).await
    }

    /// Start accumulating pages for `query`, beginning at page 1.
    pub fn book_pager(&self, query: BookQuery) -> BookPager<'_> {
        BookPager::new(self, query)
    }
}

/// Infinite-scroll style accumulation over the paged book list.
pub struct BookPager<'a> {
    client: &'a ApiClient,
    query: BookQuery,
    next_page: Option<u32>,
    books: Vec<Book>,
    total: Option<u64>,
}

impl<'a> BookPager<'a> {
    pub fn new(client: &'a ApiClient, query: BookQuery) -> Self {
        Self {
            client,
            query,
            next_page: Some(1),
            books: Vec::new(),
            total: None,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    /// Everything fetched so far, in page order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn into_books(self) -> Vec<Book> {
        self.books
    }

    /// Server-side total from the most recent page.
    pub fn total_count(&self) -> Option<u64> {
        self.total
    }

    /// Fetch the next page and append it. Returns how many books it added,
    /// `0` once the listing is exhausted. On error nothing is changed.
    pub async fn fetch_next_page(&mut self) -> Result<usize, GatewayError> {
        let Some(page) = self.next_page else {
            return Ok(0);
        };

        let result = self.client.list_books(&self.query, page).await?;
        let added = result.results.len();
        self.next_page = result.next_page_number();
        self.total = Some(result.count);
        self.books.extend(result.results);
        debug!(
            page,
            added,
            next_page = ?self.next_page,
            accumulated = self.books.len(),
            "Fetched book page"
        );
        Ok(added)
    }

    /// Keep fetching until there is no next page or `limit` books are held.
    pub async fn fetch_all(&mut self, limit: Option<usize>) -> Result<&[Book], GatewayError> {
        while self.has_next_page() {
            if limit.is_some_and(|limit| self.books.len() >= limit) {
                break;
            }
            self.fetch_next_page().await?;
        }
        Ok(&self.books)
    }
}
