//! PostgreSQL-backed `ResourceRepository` adapters for products, recipes and
//! users.

use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{EntityId, Product, Recipe, Resource, User};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_repository_macros::diesel_resource_repository;
use super::models::{
    NewProductRow, NewRecipeRow, NewUserRow, ProductRow, ProductUpdate, RecipeRow, RecipeUpdate,
    UserRow, UserUpdate,
};
use super::pool::DbPool;
use super::schema::{products, recipes, users};

diesel::define_sql_function! {
    /// PostgreSQL `lower(text)`.
    fn lower(value: Text) -> Text;
}

diesel_resource_repository! {
    /// Products stored in the `products` table.
    pub struct DieselProductRepository for Product {
        table: products,
        unique_key: name,
        row: ProductRow,
        new_row: NewProductRow<'_>,
        update: ProductUpdate<'_>,
    }
}

diesel_resource_repository! {
    /// Recipes stored in the `recipes` table.
    pub struct DieselRecipeRepository for Recipe {
        table: recipes,
        unique_key: name,
        row: RecipeRow,
        new_row: NewRecipeRow<'_>,
        update: RecipeUpdate<'_>,
    }
}

diesel_resource_repository! {
    /// Users stored in the `users` table.
    pub struct DieselUserRepository for User {
        table: users,
        unique_key: email,
        row: UserRow,
        new_row: NewUserRow<'_>,
        update: UserUpdate<'_>,
    }
}
