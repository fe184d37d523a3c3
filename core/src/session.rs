//! One call per API operation.
//!
//! `PetFriends` pairs the request builder with a `Transport` so scenarios
//! write `api.get_list_of_pets(&key, PetFilter::MyPets)?` and get back the
//! status and decoded body. Non-2xx statuses are returned, not raised.

use std::path::Path;

use crate::client::PetFriendsClient;
use crate::error::ApiError;
use crate::form::Photo;
use crate::http::HttpRequest;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{AuthKey, PetFilter};

#[derive(Debug, Clone)]
pub struct PetFriends<T = UreqTransport> {
    client: PetFriendsClient,
    transport: T,
}

impl PetFriends<UreqTransport> {
    /// Session over the blocking ureq transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> PetFriends<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: PetFriendsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    pub fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_api_key(email, password))
    }

    pub fn get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_list_of_pets(auth_key, filter))
    }

    pub fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse, ApiError> {
        let photo = Photo::load(photo_path)?;
        self.send(
            self.client
                .build_add_new_pet(auth_key, name, animal_type, age, &photo),
        )
    }

    pub fn add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.send(
            self.client
                .build_add_new_pet_without_photo(auth_key, name, animal_type, age),
        )
    }

    pub fn add_pet_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse, ApiError> {
        let photo = Photo::load(photo_path)?;
        self.send(self.client.build_add_pet_photo(auth_key, pet_id, &photo))
    }

    pub fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.send(
            self.client
                .build_update_pet_info(auth_key, pet_id, name, animal_type, age),
        )
    }

    pub fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_delete_pet(auth_key, pet_id))
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        Ok(self.client.parse(response))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::response::ResponseBody;

    /// Replays canned responses and records what was sent.
    struct Canned {
        responses: RefCell<Vec<HttpResponse>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(responses: Vec<(u16, &str)>) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .into_iter()
                        .rev()
                        .map(|(status, body)| HttpResponse {
                            status,
                            headers: Vec::new(),
                            body: body.to_string(),
                        })
                        .collect(),
                ),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for &Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop()
                .ok_or_else(|| ApiError::Transport("no canned response left".into()))
        }
    }

    #[test]
    fn non_success_status_is_returned_not_raised() {
        let canned = Canned::new(vec![(403, "<html>Forbidden</html>")]);
        let api = PetFriends::with_transport("http://svc", &canned);

        let resp = api.get_api_key("bad@example.com", "nope").unwrap();
        assert_eq!(resp.status, 403);
        assert!(matches!(resp.body, ResponseBody::Text(_)));
        assert!(!resp.body.has_key("key"));
    }

    #[test]
    fn calls_go_to_the_configured_base_url() {
        let canned = Canned::new(vec![(200, r#"{"key":"abc"}"#), (200, r#"{"pets":[]}"#)]);
        let api = PetFriends::with_transport("http://svc/", &canned);

        let key = api.get_api_key("a", "b").unwrap().body.auth_key().unwrap();
        let pets = api.get_list_of_pets(&key, PetFilter::MyPets).unwrap();
        assert_eq!(pets.body.pets().unwrap().len(), 0);

        let sent = canned.sent.borrow();
        assert_eq!(sent[0].url, "http://svc/api/key");
        assert_eq!(sent[1].url, "http://svc/api/pets?filter=my_pets");
        assert_eq!(sent[1].method, HttpMethod::Get);
        assert_eq!(sent[1].header("auth_key"), Some("abc"));
    }

    #[test]
    fn missing_photo_fails_before_sending() {
        let canned = Canned::new(vec![]);
        let api = PetFriends::with_transport("http://svc", &canned);

        let err = api
            .add_pet_photo(&AuthKey::new("k"), "p1", Path::new("missing/cat.jpg"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Photo { .. }));
        assert!(canned.sent.borrow().is_empty());
    }

    #[test]
    fn transport_failure_propagates() {
        let canned = Canned::new(vec![]);
        let api = PetFriends::with_transport("http://svc", &canned);
        let err = api.delete_pet(&AuthKey::new("k"), "p1").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
