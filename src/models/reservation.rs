use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Reserved,
    Returned,
    Canceled,
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserved" => Ok(ReservationStatus::Reserved),
            "returned" => Ok(ReservationStatus::Returned),
            "canceled" => Ok(ReservationStatus::Canceled),
            other => Err(format!(
                "unknown reservation status '{}': expected reserved, returned or canceled",
                other
            )),
        }
    }
}

/// The list endpoint returns the book as a bare id, detail views may nest it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum BookRef {
    Id(u64),
    Summary { id: u64, title: String },
}

impl BookRef {
    pub fn id(&self) -> u64 {
        match self {
            BookRef::Id(id) | BookRef::Summary { id, .. } => *id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub book: BookRef,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateReservation {
    pub name: String,
    pub email: String,
    pub book: u64,
}

/// Response body of a successful reservation, e.g. `{"message": "Book reserved successfully!"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Partial update for `PATCH /api/reservations/{id}/`. Unset fields are left alone.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}
