#![allow(ambiguous_glob_reexports)]

pub mod initialize;
pub mod update_config;
pub mod set_sale_state;
pub mod request_randomness;
pub mod fulfill_random_words;
pub mod mint;
pub mod get_randomness_request_state;
pub mod wallet_of_owner;
pub mod owner_of;
pub mod close_request_record;

pub use initialize::*;
pub use update_config::*;
pub use set_sale_state::*;
pub use request_randomness::*;
pub use fulfill_random_words::*;
pub use mint::*;
pub use get_randomness_request_state::*;
pub use wallet_of_owner::*;
pub use owner_of::*;
pub use close_request_record::*;
