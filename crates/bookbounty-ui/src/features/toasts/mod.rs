//! Toast queue; rendered by `components::toast`.

pub mod state;
