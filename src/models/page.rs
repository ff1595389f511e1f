use serde::{Deserialize, Serialize};
use url::Url;

/// One page of a paginated list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// The page number encoded in the `next` link, if there is a further page.
    ///
    /// A `next` link without a parsable `page` parameter ends pagination.
    pub fn next_page_number(&self) -> Option<u32> {
        let next = self.next.as_deref()?;
        let url = Url::parse(next).ok()?;
        let page = url
            .query_pairs()
            .find_map(|(k, v)| (k == "page").then_some(v))?;
        page.parse().ok()
    }
}
