//! Stateless HTTP request builder and response decoder for the PetFriends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation has a `build_*` method producing an
//! `HttpRequest`; every response goes through the single `parse` method,
//! which never inspects the status. Interpreting `403` or `400` is left to
//! the caller.

use crate::form::{urlencoded, MultipartForm, Photo};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::response::ApiResponse;
use crate::types::{AuthKey, PetFilter};

/// Synchronous, stateless request builder for the PetFriends API.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET api/key` with the credentials as headers.
    pub fn build_get_api_key(&self, email: &str, password: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/key", self.base_url),
            headers: vec![
                ("email".to_string(), email.to_string()),
                ("password".to_string(), password.to_string()),
            ],
            body: None,
        }
    }

    pub fn build_get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!(
                "{}/api/pets?{}",
                self.base_url,
                urlencoded(&[("filter", filter.as_str())])
            ),
            headers: auth_headers(auth_key),
            body: None,
        }
    }

    pub fn build_add_new_pet(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
        photo: &Photo,
    ) -> HttpRequest {
        let form = MultipartForm::new()
            .text("name", name)
            .text("animal_type", animal_type)
            .text("age", age)
            .file("pet_photo", photo);
        self.multipart(HttpMethod::Post, "api/pets", auth_key, form)
    }

    pub fn build_add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> HttpRequest {
        self.form(
            HttpMethod::Post,
            "api/create_pet_simple",
            auth_key,
            &[("name", name), ("animal_type", animal_type), ("age", age)],
        )
    }

    pub fn build_add_pet_photo(&self, auth_key: &AuthKey, pet_id: &str, photo: &Photo) -> HttpRequest {
        let form = MultipartForm::new().file("pet_photo", photo);
        self.multipart(
            HttpMethod::Post,
            &format!("api/pets/set_photo/{pet_id}"),
            auth_key,
            form,
        )
    }

    pub fn build_update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> HttpRequest {
        self.form(
            HttpMethod::Put,
            &format!("api/pets/{pet_id}"),
            auth_key,
            &[("name", name), ("animal_type", animal_type), ("age", age)],
        )
    }

    pub fn build_delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/api/pets/{pet_id}", self.base_url),
            headers: auth_headers(auth_key),
            body: None,
        }
    }

    /// Decode any response into status plus body. Never fails.
    pub fn parse(&self, response: HttpResponse) -> ApiResponse {
        ApiResponse::from(response)
    }

    fn multipart(
        &self,
        method: HttpMethod,
        path: &str,
        auth_key: &AuthKey,
        form: MultipartForm,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}/{path}", self.base_url),
            headers: auth_headers(auth_key),
            body: Some(RequestBody::Multipart(form)),
        }
    }

    fn form(
        &self,
        method: HttpMethod,
        path: &str,
        auth_key: &AuthKey,
        fields: &[(&str, &str)],
    ) -> HttpRequest {
        let mut headers = auth_headers(auth_key);
        headers.push((
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ));
        HttpRequest {
            method,
            url: format!("{}/{path}", self.base_url),
            headers,
            body: Some(RequestBody::Bytes(urlencoded(fields).into_bytes())),
        }
    }
}

fn auth_headers(auth_key: &AuthKey) -> Vec<(String, String)> {
    vec![("auth_key".to_string(), auth_key.key.clone())]
}
