/// Named access to the header fields a note carries on the wire.
///
/// Every accessor returns `None` when the header is missing so that parsing
/// a malformed message can never fail; defaulting is the merge policy's job.
pub trait HeaderParser {
    fn get_header_value(&self, search_string: &str) -> Option<String>;
    fn subject(&self) -> Option<String>;
    fn uuid(&self) -> Option<String>;
    fn message_id(&self) -> Option<String>;
    fn date(&self) -> Option<String>;
    fn created_date(&self) -> Option<String>;
    fn uniform_type_identifier(&self) -> Option<String>;
    fn mime_version(&self) -> Option<String>;
}
