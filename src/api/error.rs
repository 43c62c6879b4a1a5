use std::io::Cursor;

use rocket::http::{ContentType, Status};

use crate::resolver::ResolveError;

#[derive(Debug)]
pub enum ApiError {
    Resolve(ResolveError),
    /// The resolver produced a path that could not be opened for serving.
    Unavailable,
}

impl From<ResolveError> for ApiError {
    fn from(error: ResolveError) -> Self {
        ApiError::Resolve(error)
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        // Compatibility contract: validation and processing failures answer
        // with a plain-text message and HTTP 200, not a 4xx/5xx.
        let message = match self {
            ApiError::Resolve(err) => err.to_string(),
            ApiError::Unavailable => "This should not have happened :-D What did you do?".to_string(),
        };

        rocket::Response::build()
            .status(Status::Ok)
            .header(ContentType::Plain)
            .sized_body(None, Cursor::new(message))
            .ok()
    }
}
