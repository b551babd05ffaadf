pub mod flow;
pub mod home;
pub mod not_found;
