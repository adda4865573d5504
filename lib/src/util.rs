use chrono::Utc;
use uuid::Uuid;

/// Note identity tokens are stored in their uppercase canonical form.
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

pub fn rfc2822_now() -> String {
    Utc::now().to_rfc2822()
}
