pub mod connectivity;
pub mod controller;
pub mod source;
pub mod state;
