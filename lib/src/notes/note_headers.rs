use crate::notes::traits::header_parser::HeaderParser;

pub type NoteHeaders = Vec<(String, String)>;

impl HeaderParser for NoteHeaders {
    fn get_header_value(&self, search_string: &str) -> Option<String> {
        // Servers are not consistent about header name casing
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(search_string))
            .map(|val| val.1.clone())
    }

    fn subject(&self) -> Option<String> {
        self.get_header_value("Subject")
    }

    fn uuid(&self) -> Option<String> {
        self.get_header_value("X-Universally-Unique-Identifier")
    }

    fn message_id(&self) -> Option<String> {
        self.get_header_value("Message-Id")
    }

    fn date(&self) -> Option<String> {
        self.get_header_value("Date")
    }

    fn created_date(&self) -> Option<String> {
        self.get_header_value("X-Mail-Created-Date")
    }

    fn uniform_type_identifier(&self) -> Option<String> {
        self.get_header_value("X-Uniform-Type-Identifier")
    }

    fn mime_version(&self) -> Option<String> {
        self.get_header_value("Mime-Version")
    }
}
