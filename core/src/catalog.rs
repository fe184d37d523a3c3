//! The PetFriends scenario catalog.
//!
//! Each scenario pins one observed rule of the service. Several rules look
//! like service defects (negative ages, empty fields, silently ignored empty
//! updates); they are asserted as the service behaves today.

use crate::error::ScenarioError;
use crate::scenario::{
    expect, expect_has_key, expect_lacks_key, expect_non_empty_field, expect_status,
    expect_status_not, expect_str_field, Fixture, Scenario, ScenarioContext,
};
use crate::transport::Transport;
use crate::types::PetFilter;

pub const RACCOON_PHOTO: &str = "Prikol_Enot.jpg";
pub const DOG_PHOTO: &str = "Sobakin.jpg";
pub const CAT_PHOTO: &str = "cat.jpg";
pub const CAT_PNG_PHOTO: &str = "cat-png.png";

type Outcome = Result<(), ScenarioError>;

/// Every scenario, in the order the suite runs them.
pub fn catalog<T: Transport>() -> Vec<Scenario<T>> {
    vec![
        Scenario::new("get_api_key_for_valid_user", Fixture::None, get_api_key_for_valid_user),
        Scenario::new("get_all_pets_with_valid_key", Fixture::MyPet, get_all_pets_with_valid_key),
        Scenario::new("add_new_pet_with_valid_data", Fixture::None, add_new_pet_with_valid_data),
        Scenario::new("add_new_pet_with_negative_age", Fixture::None, add_new_pet_with_negative_age),
        Scenario::new("get_api_key_for_invalid_user", Fixture::None, get_api_key_for_invalid_user),
        Scenario::new("get_all_pets_with_garbled_key", Fixture::None, get_all_pets_with_garbled_key),
        Scenario::new("delete_self_pet", Fixture::MyPet, delete_self_pet),
        Scenario::new("update_self_pet_info", Fixture::MyPet, update_self_pet_info),
        Scenario::new("update_pet_with_empty_name_keeps_name", Fixture::MyPet, update_pet_with_empty_name_keeps_name),
        Scenario::new("update_pet_with_empty_type_keeps_type", Fixture::MyPet, update_pet_with_empty_type_keeps_type),
        Scenario::new("add_pet_without_photo_with_empty_fields", Fixture::None, add_pet_without_photo_with_empty_fields),
        Scenario::new("add_photo_to_self_pet", Fixture::MyPet, add_photo_to_self_pet),
        Scenario::new("update_pet_with_reversed_id", Fixture::MyPet, update_pet_with_reversed_id),
        Scenario::new("update_pet_info_cat", Fixture::MyPet, update_pet_info_cat),
        Scenario::new("add_png_photo_is_rejected", Fixture::MyPet, add_png_photo_is_rejected),
    ]
}

/// Look up one scenario by name.
pub fn find<T: Transport>(name: &str) -> Option<Scenario<T>> {
    catalog().into_iter().find(|s| s.name == name)
}

fn get_api_key_for_valid_user<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let creds = &ctx.config.valid;
    let resp = ctx.api.get_api_key(&creds.email, &creds.password)?;
    expect_status(&resp, 200)?;
    expect_has_key(&resp, "key")
}

fn get_api_key_for_invalid_user<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let creds = &ctx.config.invalid;
    let resp = ctx.api.get_api_key(&creds.email, &creds.password)?;
    expect_status(&resp, 403)?;
    expect_lacks_key(&resp, "key")
}

fn get_all_pets_with_valid_key<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let resp = ctx.api.get_list_of_pets(&ctx.key, PetFilter::All)?;
    expect_status(&resp, 200)?;
    let pets = resp.body.pets().unwrap_or_default();
    expect(!pets.is_empty(), "pet list is empty")
}

fn get_all_pets_with_garbled_key<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let garbled = ctx.key.reversed();
    let resp = ctx.api.get_list_of_pets(&garbled, PetFilter::All)?;
    expect_status(&resp, 403)
}

fn add_new_pet_with_valid_data<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let photo = ctx.config.image(RACCOON_PHOTO);
    let resp = ctx.api.add_new_pet(&ctx.key, "Тёма", "Енот", "2", &photo)?;
    ctx.track_created(&resp);
    expect_status(&resp, 200)?;
    expect_str_field(&resp, "name", "Тёма")?;
    expect_str_field(&resp, "animal_type", "Енот")
}

fn add_new_pet_with_negative_age<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let photo = ctx.config.image(DOG_PHOTO);
    let resp = ctx.api.add_new_pet(&ctx.key, "Шарик", "Собака", "-1", &photo)?;
    ctx.track_created(&resp);
    expect_status(&resp, 200)?;
    expect_has_key(&resp, "name")
}

fn add_pet_without_photo_with_empty_fields<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let resp = ctx.api.add_new_pet_without_photo(&ctx.key, "tESTo", "", "")?;
    ctx.track_created(&resp);
    expect_status(&resp, 200)?;
    expect_str_field(&resp, "name", "tESTo")
}

fn delete_self_pet<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?.to_string();
    let resp = ctx.api.delete_pet(&ctx.key, &pet_id)?;

    let listing = ctx.api.get_list_of_pets(&ctx.key, PetFilter::MyPets)?;
    let remaining = listing.body.pets().unwrap_or_default();

    expect_status(&resp, 200)?;
    expect(
        remaining.iter().all(|pet| pet.id != pet_id),
        format!("pet {pet_id} still listed after delete"),
    )
}

fn update_self_pet_info<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?;
    let resp = ctx.api.update_pet_info(&ctx.key, pet_id, "Туз", "Собака", "3")?;
    expect_status(&resp, 200)?;
    expect_str_field(&resp, "name", "Туз")?;
    expect_str_field(&resp, "animal_type", "Собака")?;
    expect_str_field(&resp, "age", "3")
}

fn update_pet_with_empty_name_keeps_name<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?;
    let resp = ctx.api.update_pet_info(&ctx.key, pet_id, "", "Собака", "5")?;
    expect_status(&resp, 200)?;
    expect_non_empty_field(&resp, "name")
}

fn update_pet_with_empty_type_keeps_type<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?;
    let resp = ctx.api.update_pet_info(&ctx.key, pet_id, "Жора", "", "1")?;
    expect_status(&resp, 200)?;
    expect_non_empty_field(&resp, "animal_type")
}

fn add_photo_to_self_pet<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?.to_string();
    let photo = ctx.config.image(CAT_PHOTO);
    let resp = ctx.api.add_pet_photo(&ctx.key, &pet_id, &photo)?;

    let listing = ctx.api.get_list_of_pets(&ctx.key, PetFilter::MyPets)?;
    let listed = listing
        .body
        .pets()
        .unwrap_or_default()
        .into_iter()
        .find(|pet| pet.id == pet_id);

    expect_status(&resp, 200)?;
    match listed {
        Some(pet) => {
            expect_str_field(&resp, "name", &pet.name)?;
            expect(!pet.pet_photo.is_empty(), "listed pet has no photo")
        }
        None => Err(ScenarioError::Assertion(format!("pet {pet_id} missing from my pets"))),
    }
}

fn update_pet_with_reversed_id<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let reversed: String = ctx.pet_id()?.chars().rev().collect();
    let resp = ctx.api.update_pet_info(&ctx.key, &reversed, "Жека", "Кот", "7")?;
    expect_status(&resp, 400)
}

fn update_pet_info_cat<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?;
    let resp = ctx.api.update_pet_info(&ctx.key, pet_id, "Малыш", "cat", "1")?;
    expect_status(&resp, 200)?;
    expect_str_field(&resp, "name", "Малыш")
}

fn add_png_photo_is_rejected<T: Transport>(ctx: &mut ScenarioContext<'_, T>) -> Outcome {
    let pet_id = ctx.pet_id()?;
    let photo = ctx.config.image(CAT_PNG_PHOTO);
    let resp = ctx.api.add_pet_photo(&ctx.key, pet_id, &photo)?;
    expect_status_not(&resp, 200)
}
