use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
}

/// A catalog record as returned by `/api/books/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub isbn: Option<String>,
    pub isbn13: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u64>,
    pub original_publication_year: Option<i32>,
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub language_code: Option<String>,
    pub goodreads_book_id: Option<i64>,
    #[serde(default)]
    pub reserved: bool,
}

impl Book {
    /// Authors joined the way the edit form shows them.
    pub fn authors_line(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Writable fields for `PUT /api/books/{id}/`.
///
/// Authors go over the wire as one comma-separated `authors_input` string.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    pub authors_input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_publication_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl From<&Book> for BookUpdate {
    fn from(book: &Book) -> Self {
        BookUpdate {
            title: book.title.clone(),
            original_title: book.original_title.clone(),
            authors_input: book.authors_line(),
            isbn: book.isbn.clone(),
            isbn13: book.isbn13.clone(),
            average_rating: book.average_rating,
            ratings_count: book.ratings_count,
            original_publication_year: book.original_publication_year,
            image_url: book.image_url.clone(),
            small_image_url: book.small_image_url.clone(),
            language_code: book.language_code.clone(),
        }
    }
}

/// Reservation state filter on the book list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservationFilter {
    #[default]
    All,
    Reserved,
    Available,
}

impl ReservationFilter {
    /// Value of the `reserved` query parameter; `None` leaves it off.
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            ReservationFilter::All => None,
            ReservationFilter::Reserved => Some("true"),
            ReservationFilter::Available => Some("false"),
        }
    }
}

impl std::str::FromStr for ReservationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ReservationFilter::All),
            "reserved" => Ok(ReservationFilter::Reserved),
            "available" => Ok(ReservationFilter::Available),
            other => Err(format!(
                "unknown reservation filter '{}': expected all, reserved or available",
                other
            )),
        }
    }
}

/// Search, ordering and filter applied to every page of a book listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub reservation: ReservationFilter,
}

impl BookQuery {
    pub fn to_query_pairs(&self, page: u32) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), page.to_string())];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(ordering) = self.ordering.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("ordering".to_string(), ordering.to_string()));
        }
        if let Some(reserved) = self.reservation.as_query_value() {
            pairs.push(("reserved".to_string(), reserved.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_from_api_json() {
        let raw = r#"{
            "id": 7,
            "title": "Dune",
            "original_title": "Dune",
            "authors": [{"name": "Frank Herbert"}, {"name": "Brian Herbert"}],
            "isbn": "0441172717",
            "average_rating": 4.25,
            "ratings_count": 1000,
            "original_publication_year": 1965,
            "reserved": true
        }"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.id, 7);
        assert!(book.reserved);
        assert_eq!(book.isbn13, None);
        assert_eq!(book.authors_line(), "Frank Herbert, Brian Herbert");
    }

    #[test]
    fn ingested_book_with_numeric_ids_decodes() {
        let raw = r#"{
            "id": 3,
            "goodreads_book_id": 2767052,
            "best_book_id": 2767052,
            "work_id": 2792775,
            "books_count": 272,
            "isbn": "439023483",
            "isbn13": "9780439023480",
            "authors": [{"name": "Suzanne Collins"}],
            "original_publication_year": 2008,
            "original_title": "The Hunger Games",
            "title": "The Hunger Games (The Hunger Games, #1)",
            "language_code": "eng",
            "average_rating": 4.34,
            "ratings_count": 4780653,
            "ratings_1": 66715,
            "image_url": "https://images.gr-assets.com/books/1447303603m/2767052.jpg",
            "small_image_url": null,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
            "reserved": false
        }"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.goodreads_book_id, Some(2767052));
        assert_eq!(book.ratings_count, Some(4780653));
        assert_eq!(book.average_rating, Some(4.34));
    }

    #[test]
    fn update_carries_authors_input() {
        let book = Book {
            id: 1,
            title: "Emma".to_string(),
            original_title: None,
            authors: vec![Author {
                name: "Jane Austen".to_string(),
            }],
            isbn: None,
            isbn13: None,
            average_rating: None,
            ratings_count: None,
            original_publication_year: Some(1815),
            image_url: None,
            small_image_url: None,
            language_code: None,
            goodreads_book_id: None,
            reserved: false,
        };
        let body = serde_json::to_value(BookUpdate::from(&book)).unwrap();
        assert_eq!(body["authors_input"], "Jane Austen");
        assert_eq!(body["original_publication_year"], 1815);
        assert!(body.get("isbn").is_none());
        assert!(body.get("authors").is_none());
    }

    #[test]
    fn query_pairs_skip_empty_and_all() {
        let query = BookQuery {
            search: Some(String::new()),
            ordering: Some("-average_rating".to_string()),
            reservation: ReservationFilter::All,
        };
        assert_eq!(
            query.to_query_pairs(2),
            vec![
                ("page".to_string(), "2".to_string()),
                ("ordering".to_string(), "-average_rating".to_string()),
            ]
        );
    }

    #[test]
    fn available_filter_sends_reserved_false() {
        let query = BookQuery {
            reservation: "available".parse().unwrap(),
            ..Default::default()
        };
        assert!(query
            .to_query_pairs(1)
            .contains(&("reserved".to_string(), "false".to_string())));
    }
}
