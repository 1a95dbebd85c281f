pub mod jwt;
pub mod mentions;
pub mod text;
pub mod validate_utils;
