//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions to and from
//! domain resources live next to the rows they serve.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{EntityId, Product, Recipe, Resource, User};

use super::schema::{products, recipes, users};

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub kcal: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub kcal: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub kcal: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::new(EntityId::from_uuid(row.id), row.name, row.description, row.kcal)
    }
}

impl<'a> From<&'a Product> for NewProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: *product.id().as_uuid(),
            name: product.name(),
            description: product.description(),
            kcal: product.kcal(),
        }
    }
}

impl<'a> From<&'a Product> for ProductUpdate<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: product.name(),
            description: product.description(),
            kcal: product.kcal(),
        }
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe::new(
            EntityId::from_uuid(row.id),
            row.name,
            row.description,
            row.image_url,
        )
    }
}

impl<'a> From<&'a Recipe> for NewRecipeRow<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            id: *recipe.id().as_uuid(),
            name: recipe.name(),
            description: recipe.description(),
            image_url: recipe.image_url(),
        }
    }
}

impl<'a> From<&'a Recipe> for RecipeUpdate<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            name: recipe.name(),
            description: recipe.description(),
            image_url: recipe.image_url(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(EntityId::from_uuid(row.id), row.email, row.password)
    }
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            email: user.email(),
            password: user.password(),
        }
    }
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: user.email(),
            password: user.password(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn product_row_round_trips_through_domain() {
        let id = Uuid::new_v4();
        let product = Product::from(ProductRow {
            id,
            name: "Eggs".to_owned(),
            description: "Free range".to_owned(),
            kcal: 70,
        });

        let row = NewProductRow::from(&product);
        assert_eq!(row.id, id);
        assert_eq!((row.name, row.description, row.kcal), ("Eggs", "Free range", 70));
    }

    #[rstest]
    fn recipe_update_excludes_identifier() {
        let recipe = Recipe::new(EntityId::random(), "Soup", "", "/img/soup.png");
        let update = RecipeUpdate::from(&recipe);
        assert_eq!(update.image_url, "/img/soup.png");
        assert_eq!(update.name, "Soup");
    }

    #[rstest]
    fn user_row_keeps_email_case() {
        let user = User::from(UserRow {
            id: Uuid::new_v4(),
            email: "Ada@Example.com".to_owned(),
            password: "analytical".to_owned(),
        });
        assert_eq!(user.email(), "Ada@Example.com");
    }
}
