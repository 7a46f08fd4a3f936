pub(crate) mod http;

pub(crate) use http::{assert_status_ok, parse_json_body, parse_text_body};
