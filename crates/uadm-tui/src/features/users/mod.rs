//! User list feature slice.
//!
//! - `state.rs`: table model (`TableBody`, `UserRow`, placeholders, selection)
//! - `update.rs`: activation with the session guard, fetch results, row keys
//! - `render.rs`: the users table view

mod render;
mod state;
mod update;

pub use render::render_users_view;
pub use state::{
    COLUMNS, LOADING_MESSAGE, NO_USERS_MESSAGE, NOT_SPECIFIED, Placeholder, RowAction,
    TableBody, UserRow, UsersState,
};
pub use update::{activate, apply_row_action, handle_key, handle_users_loaded};
