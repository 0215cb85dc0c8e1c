pub mod canvas_page;
pub mod not_found;
