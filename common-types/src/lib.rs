#[allow(non_snake_case)]
pub mod SendEmail {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    // Fields are kept loosely typed, the handler decides what counts as present
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct Request {
        pub receiver_email: Value,
        pub subject: Value,
        pub body_text: Value,
    }

    impl Request {
        /// Reads the three fields out of an arbitrary JSON value. Anything
        /// other than an object has no fields at all.
        pub fn from_value(value: Value) -> Self {
            match value {
                Value::Object(mut fields) => Request {
                    receiver_email: fields.remove("receiver_email").unwrap_or_default(),
                    subject: fields.remove("subject").unwrap_or_default(),
                    body_text: fields.remove("body_text").unwrap_or_default(),
                },
                _ => Request::default(),
            }
        }
    }

    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    pub struct Details {
        pub receiver_email: String,
        pub subject: String,
    }

    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    pub struct Response {
        pub message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub details: Option<Details>,
    }

    impl Response {
        pub fn new<M: Into<String>>(message: M) -> Self {
            Response {
                message: message.into(),
                error: None,
                details: None,
            }
        }

        pub fn with_error<E: ToString>(mut self, error: E) -> Self {
            self.error = Some(error.to_string());
            self
        }

        pub fn with_details(mut self, details: Details) -> Self {
            self.details = Some(details);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SendEmail::{Details, Request, Response};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn request_from_object_takes_known_fields() {
        let request = Request::from_value(json!({
            "receiver_email": "a@b.com",
            "subject": "Hi",
            "body_text": "Hello",
            "cc": "ignored@b.com",
        }));
        assert_eq!(request.receiver_email, json!("a@b.com"));
        assert_eq!(request.subject, json!("Hi"));
        assert_eq!(request.body_text, json!("Hello"));
    }

    #[test]
    fn request_from_non_object_has_no_fields() {
        for value in [json!(null), json!(42), json!("a@b.com"), json!(["a@b.com", "Hi", "Hello"])] {
            assert_eq!(Request::from_value(value), Request::default());
        }
    }

    #[test]
    fn request_missing_field_is_null() {
        let request = Request::from_value(json!({ "subject": "Hi" }));
        assert_eq!(request.receiver_email, Value::Null);
        assert_eq!(request.body_text, Value::Null);
    }

    #[test]
    fn response_omits_empty_optionals() {
        let body = serde_json::to_string(&Response::new("Invalid receiver_email format.")).unwrap();
        assert_eq!(body, r#"{"message":"Invalid receiver_email format."}"#);
    }

    #[test]
    fn response_keeps_field_order() {
        let response = Response::new("ok").with_details(Details {
            receiver_email: "a@b.com".to_string(),
            subject: "Hi".to_string(),
        });
        let body = serde_json::to_string(&response).unwrap();
        assert_eq!(body, r#"{"message":"ok","details":{"receiver_email":"a@b.com","subject":"Hi"}}"#);

        let body = serde_json::to_string(&Response::new("bad").with_error("boom")).unwrap();
        assert_eq!(body, r#"{"message":"bad","error":"boom"}"#);
    }
}
