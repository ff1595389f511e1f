use super::{json_request, ApiClient};
use crate::gateway::{ApiRequest, GatewayError};
use crate::models::{CreateReservation, MessageResponse, Page, Reservation, ReservationUpdate};

const RESERVATIONS_PATH: &str = "/api/reservations/";

fn reservation_path(id: u64) -> String {
    format!("{}{}/", RESERVATIONS_PATH, id)
}

impl ApiClient {
    pub async fn create_reservation(
        &self,
        reservation: &CreateReservation,
    ) -> Result<MessageResponse, GatewayError> {
        let request = json_request(ApiRequest::post(RESERVATIONS_PATH), reservation)?;
        self.gateway().send_json(request).await
    }

    pub async fn list_reservations(&self) -> Result<Page<Reservation>, GatewayError> {
        self.gateway()
            .send_json(ApiRequest::get(RESERVATIONS_PATH))
            .await
    }

    pub async fn list_reservations_for_book(
        &self,
        book_id: u64,
    ) -> Result<Page<Reservation>, GatewayError> {
        let request = ApiRequest::get(RESERVATIONS_PATH)
            .with_query(vec![("book".to_string(), book_id.to_string())]);
        self.gateway().send_json(request).await
    }

    pub async fn update_reservation(
        &self,
        id: u64,
        update: &ReservationUpdate,
    ) -> Result<Reservation, GatewayError> {
        let request = json_request(ApiRequest::patch(reservation_path(id)), update)?;
        self.gateway().send_json(request).await
    }

    pub async fn delete_reservation(&self, id: u64) -> Result<(), GatewayError> {
        self.gateway()
            .send(ApiRequest::delete(reservation_path(id)))
            .await?;
        Ok(())
    }
}
