//! Route paths served by [`crate::router`].

pub const GET_API_HEALTH: &str = "/api/health";

pub const POST_API_AUTH_REGISTER: &str = "/api/auth/register";
pub const POST_API_AUTH_LOGIN: &str = "/api/auth/login";

pub const GET_API_RECIPES_SEARCH: &str = "/api/recipes/search";
pub const GET_API_RECIPES_AUTOCOMPLETE: &str = "/api/recipes/autocomplete";
pub const GET_API_RECIPES_ID: &str = "/api/recipes/{id}";
pub const POST_API_RECIPES_GENERATE: &str = "/api/recipes/generate";

pub const POST_API_RECIPES_SAVE: &str = "/api/recipes/save";
pub const GET_API_RECIPES_SAVED_ALL: &str = "/api/recipes/saved/all";
pub const PUT_API_RECIPES_SAVED_REORDER: &str = "/api/recipes/saved/reorder";
pub const DELETE_API_RECIPES_SAVED_RECIPE_ID: &str = "/api/recipes/saved/{recipeId}";
