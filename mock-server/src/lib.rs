use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "demo@petfriends.test";
pub const DEMO_PASSWORD: &str = "demo-password";
const SHELTER_EMAIL: &str = "shelter@petfriends.test";

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

/// Text fields of create and update requests. Absent fields read as `""`.
#[derive(Debug, Default, Deserialize)]
pub struct PetFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: String,
}

#[derive(Clone, Debug)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password: String,
    pub key: String,
}

impl Account {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            key: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    accounts: Vec<Account>,
    pets: Vec<Pet>,
}

impl Store {
    fn owner(&self, headers: &HeaderMap) -> Result<String, Reject> {
        let key = headers
            .get("auth_key")
            .and_then(|v| v.to_str().ok())
            .ok_or(Reject::Forbidden)?;
        self.accounts
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.id.clone())
            .ok_or(Reject::Forbidden)
    }

    fn owned_pet_mut(&mut self, owner: &str, id: &str) -> Result<&mut Pet, Reject> {
        self.pets
            .iter_mut()
            .find(|p| p.id == id && p.user_id == owner)
            .ok_or(Reject::BadRequest("pet not found"))
    }

    fn insert(&mut self, owner: String, fields: PetFields, pet_photo: String) -> Pet {
        let pet = Pet {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            animal_type: fields.animal_type,
            age: fields.age,
            pet_photo,
            user_id: owner,
            created_at: now(),
        };
        self.pets.push(pet.clone());
        pet
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Rejections, rendered the way the service renders them: HTML pages.
#[derive(Debug)]
pub enum Reject {
    Forbidden,
    BadRequest(&'static str),
}

impl IntoResponse for Reject {
    fn into_response(self) -> Response {
        match self {
            Reject::Forbidden => (
                StatusCode::FORBIDDEN,
                Html("<h1>Forbidden</h1><p>Please provide 'auth_key' Header</p>"),
            )
                .into_response(),
            Reject::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                Html(format!("<h1>Bad Request</h1><p>{reason}</p>")),
            )
                .into_response(),
        }
    }
}

/// The service with the demo account and a shelter pet, so that
/// "all pets" is never empty.
pub fn app() -> Router {
    app_with_accounts(vec![Account::new(DEMO_EMAIL, DEMO_PASSWORD)])
}

pub fn app_with_accounts(accounts: Vec<Account>) -> Router {
    let mut store = Store::default();
    let shelter = Account::new(SHELTER_EMAIL, &Uuid::new_v4().to_string());
    store.insert(
        shelter.id.clone(),
        PetFields {
            name: "Барсик".to_string(),
            animal_type: "Кот".to_string(),
            age: "5".to_string(),
        },
        String::new(),
    );
    store.accounts.push(shelter);
    store.accounts.extend(accounts);

    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(create_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/set_photo/{id}", post(set_photo))
        .route("/api/pets/{id}", put(update_pet).delete(delete_pet))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> Result<Json<serde_json::Value>, Reject> {
    let email = header(&headers, "email");
    let password = header(&headers, "password");
    let store = db.read().await;
    let account = store
        .accounts
        .iter()
        .find(|a| Some(a.email.as_str()) == email && Some(a.password.as_str()) == password)
        .ok_or(Reject::Forbidden)?;
    Ok(Json(serde_json::json!({ "key": account.key })))
}

async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PetList>, Reject> {
    let store = db.read().await;
    let owner = store.owner(&headers)?;
    let pets = store.pets.iter().rev();
    let pets = match query.filter.as_str() {
        "" => pets.cloned().collect(),
        "my_pets" => pets.filter(|p| p.user_id == owner).cloned().collect(),
        _ => return Err(Reject::BadRequest("unknown filter")),
    };
    Ok(Json(PetList { pets }))
}

async fn create_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Pet>, Reject> {
    let owner = db.read().await.owner(&headers)?;
    let (fields, photo) = read_multipart(multipart).await?;
    let photo = photo.ok_or(Reject::BadRequest("pet_photo is required"))?;
    let pet_photo = photo_data_url(&photo)?;

    let pet = db.write().await.insert(owner, fields, pet_photo);
    debug!(pet_id = %pet.id, "created pet with photo");
    Ok(Json(pet))
}

async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(fields): Form<PetFields>,
) -> Result<Json<Pet>, Reject> {
    let mut store = db.write().await;
    let owner = store.owner(&headers)?;
    let pet = store.insert(owner, fields, String::new());
    debug!(pet_id = %pet.id, "created pet");
    Ok(Json(pet))
}

async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Pet>, Reject> {
    let owner = db.read().await.owner(&headers)?;
    let (_, photo) = read_multipart(multipart).await?;
    let photo = photo.ok_or(Reject::BadRequest("pet_photo is required"))?;
    let pet_photo = photo_data_url(&photo)?;

    let mut store = db.write().await;
    let pet = store.owned_pet_mut(&owner, &id)?;
    pet.pet_photo = pet_photo;
    Ok(Json(pet.clone()))
}

/// Empty fields leave the stored value untouched.
async fn update_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(fields): Form<PetFields>,
) -> Result<Json<Pet>, Reject> {
    let mut store = db.write().await;
    let owner = store.owner(&headers)?;
    let pet = store.owned_pet_mut(&owner, &id)?;
    if !fields.name.is_empty() {
        pet.name = fields.name;
    }
    if !fields.animal_type.is_empty() {
        pet.animal_type = fields.animal_type;
    }
    if !fields.age.is_empty() {
        pet.age = fields.age;
    }
    Ok(Json(pet.clone()))
}

async fn delete_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Reject> {
    let mut store = db.write().await;
    let owner = store.owner(&headers)?;
    let before = store.pets.len();
    store.pets.retain(|p| !(p.id == id && p.user_id == owner));
    if store.pets.len() == before {
        return Err(Reject::BadRequest("pet not found"));
    }
    debug!(pet_id = %id, "deleted pet");
    Ok(StatusCode::OK)
}

/// Split a multipart body into text fields and the `pet_photo` bytes.
async fn read_multipart(mut multipart: Multipart) -> Result<(PetFields, Option<Vec<u8>>), Reject> {
    let mut fields = PetFields::default();
    let mut photo = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Reject::BadRequest("malformed multipart body"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| Reject::BadRequest("malformed multipart body"))?;
        let text = || String::from_utf8_lossy(&bytes).into_owned();
        match name.as_str() {
            "name" => fields.name = text(),
            "animal_type" => fields.animal_type = text(),
            "age" => fields.age = text(),
            "pet_photo" => photo = Some(bytes.to_vec()),
            _ => {}
        }
    }
    Ok((fields, photo))
}

fn photo_data_url(bytes: &[u8]) -> Result<String, Reject> {
    if !bytes.starts_with(&JPEG_MAGIC) {
        return Err(Reject::BadRequest("pet_photo must be a JPEG image"));
    }
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn now() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    format!("{secs:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_serializes_to_json() {
        let pet = Pet {
            id: "p1".to_string(),
            name: "Тёма".to_string(),
            animal_type: "Енот".to_string(),
            age: "2".to_string(),
            pet_photo: String::new(),
            user_id: "u1".to_string(),
            created_at: "0".to_string(),
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["name"], "Тёма");
        assert_eq!(json["age"], "2");
        assert_eq!(json["pet_photo"], "");
    }

    #[test]
    fn pet_fields_default_to_empty() {
        let fields: PetFields = serde_json::from_str(r#"{"name":"tESTo"}"#).unwrap();
        assert_eq!(fields.name, "tESTo");
        assert!(fields.animal_type.is_empty());
        assert!(fields.age.is_empty());
    }

    #[test]
    fn list_query_filter_is_optional() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.filter.is_empty());
    }

    #[test]
    fn accounts_get_distinct_keys() {
        let a = Account::new("a@x", "p");
        let b = Account::new("a@x", "p");
        assert_ne!(a.key, b.key);
        assert_eq!(a.key.len(), 64);
    }

    #[test]
    fn photo_must_be_jpeg() {
        assert!(photo_data_url(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap().starts_with("data:image/jpeg;base64,"));
        assert!(photo_data_url(b"\x89PNG\r\n\x1a\n").is_err());
        assert!(photo_data_url(&[]).is_err());
    }

    #[test]
    fn owner_requires_known_key() {
        let account = Account::new("a@x", "p");
        let store = Store {
            accounts: vec![account.clone()],
            pets: Vec::new(),
        };
        let mut headers = HeaderMap::new();
        assert!(matches!(store.owner(&headers), Err(Reject::Forbidden)));

        headers.insert("auth_key", account.key.parse().unwrap());
        assert_eq!(store.owner(&headers).unwrap(), account.id);

        let reversed: String = account.key.chars().rev().collect();
        headers.insert("auth_key", reversed.parse().unwrap());
        assert!(matches!(store.owner(&headers), Err(Reject::Forbidden)));
    }
}
