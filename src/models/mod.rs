pub mod book;
pub mod ingestion;
pub mod page;
pub mod reservation;
pub mod token;

pub use book::*;
pub use ingestion::*;
pub use page::*;
pub use reservation::*;
pub use token::*;
