pub mod credentials;
pub mod repositories;
pub mod sessions;
