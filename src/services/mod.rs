//! Domain services.
//!
//! Plain structs taking their collaborators (store, auth service) as
//! constructor parameters. All uniqueness and existence invariants are
//! enforced here; handlers only validate shape and translate errors.

/// Recipe CRUD orchestration.
pub mod recipes;
/// User registration and sign-in.
pub mod users;

pub use recipes::RecipeService;
pub use users::UserService;
