//! Every API operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives each `PetFriends`
//! operation over real HTTP with the ureq transport. Statuses the service
//! uses for rejections (403, 400) must come back as data.

mod common;

use petfriends_core::{ApiError, AuthKey, PetFilter, PetFriends, ResponseBody};

fn login(api: &PetFriends, config: &petfriends_core::Config) -> AuthKey {
    let resp = api
        .get_api_key(&config.valid.email, &config.valid.password)
        .unwrap();
    assert_eq!(resp.status, 200);
    resp.body.auth_key().expect("key in body")
}

#[test]
fn pet_lifecycle() {
    let config = common::mock_config();
    let api = PetFriends::new(&config.base_url);

    // Step 1: authenticate.
    let key = login(&api, &config);

    // Step 2: my pets start empty, all pets do not.
    let mine = api.get_list_of_pets(&key, PetFilter::MyPets).unwrap();
    assert_eq!(mine.status, 200);
    assert!(mine.body.pets().unwrap().is_empty());
    let all = api.get_list_of_pets(&key, PetFilter::All).unwrap();
    assert!(!all.body.pets().unwrap().is_empty());

    // Step 3: create with a photo.
    let created = api
        .add_new_pet(&key, "Тёма", "Енот", "2", &config.image("Prikol_Enot.jpg"))
        .unwrap();
    assert_eq!(created.status, 200);
    let pet = created.body.pet().unwrap();
    assert_eq!(pet.name, "Тёма");
    assert_eq!(pet.animal_type, "Енот");
    assert!(pet.pet_photo.starts_with("data:image/jpeg;base64,"));

    // Step 4: create without a photo.
    let simple = api
        .add_new_pet_without_photo(&key, "Стрелка", "Собака", "4")
        .unwrap();
    assert_eq!(simple.status, 200);
    let simple = simple.body.pet().unwrap();
    assert!(simple.pet_photo.is_empty());

    // Step 5: attach a photo to it.
    let photo = api
        .add_pet_photo(&key, &simple.id, &config.image("cat.jpg"))
        .unwrap();
    assert_eq!(photo.status, 200);
    assert_eq!(photo.body.str_field("name"), Some("Стрелка"));

    // Step 6: update.
    let updated = api
        .update_pet_info(&key, &pet.id, "Туз", "Собака", "3")
        .unwrap();
    assert_eq!(updated.status, 200);
    assert_eq!(updated.body.str_field("age"), Some("3"));

    // Step 7: both pets are mine, newest first.
    let mine = api.get_list_of_pets(&key, PetFilter::MyPets).unwrap();
    let ids: Vec<String> = mine.body.pets().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![simple.id.clone(), pet.id.clone()]);

    // Step 8: delete both.
    for id in [&pet.id, &simple.id] {
        assert_eq!(api.delete_pet(&key, id).unwrap().status, 200);
    }
    let mine = api.get_list_of_pets(&key, PetFilter::MyPets).unwrap();
    assert!(mine.body.pets().unwrap().is_empty());

    // Step 9: deleting again is rejected.
    let again = api.delete_pet(&key, &pet.id).unwrap();
    assert_ne!(again.status, 200);
}

#[test]
fn invalid_credentials_return_403_without_key() {
    let config = common::mock_config();
    let api = PetFriends::new(&config.base_url);

    let resp = api
        .get_api_key(&config.invalid.email, &config.invalid.password)
        .unwrap();
    assert_eq!(resp.status, 403);
    assert!(matches!(resp.body, ResponseBody::Text(_)));
    assert!(!resp.body.has_key("key"));
}

#[test]
fn garbled_key_is_rejected_everywhere() {
    let config = common::mock_config();
    let api = PetFriends::new(&config.base_url);
    let key = login(&api, &config).reversed();

    assert_eq!(api.get_list_of_pets(&key, PetFilter::All).unwrap().status, 403);
    assert_eq!(
        api.add_new_pet_without_photo(&key, "a", "b", "1").unwrap().status,
        403
    );
    assert_eq!(api.delete_pet(&key, "whatever").unwrap().status, 403);
}

#[test]
fn png_photo_is_rejected() {
    let config = common::mock_config();
    let api = PetFriends::new(&config.base_url);
    let key = login(&api, &config);

    let pet = api
        .add_new_pet_without_photo(&key, "Мерча", "cat", "2")
        .unwrap()
        .body
        .pet()
        .unwrap();
    let resp = api
        .add_pet_photo(&key, &pet.id, &config.image("cat-png.png"))
        .unwrap();
    assert_ne!(resp.status, 200);
}

#[test]
fn missing_photo_file_is_a_local_error() {
    let config = common::mock_config();
    let api = PetFriends::new(&config.base_url);
    let key = login(&api, &config);

    let err = api
        .add_new_pet(&key, "a", "b", "1", &config.image("no-such-file.jpg"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Photo { .. }));
}
