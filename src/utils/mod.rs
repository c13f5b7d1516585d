pub mod pwd;
pub mod record;
pub mod time;
pub mod token;
pub mod validated_json;
