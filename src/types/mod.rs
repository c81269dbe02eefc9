pub mod app_state;
pub mod search_result;
