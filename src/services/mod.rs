pub mod geocoding_client;
pub mod map_token_check;
