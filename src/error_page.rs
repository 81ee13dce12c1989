//! Structured HTML error responses.

use http::{header, Response, Result, StatusCode};

use crate::util::Body;

fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "The requested resource was not found.",
        StatusCode::RANGE_NOT_SATISFIABLE => "The requested range is invalid.",
        StatusCode::BAD_REQUEST => "Missing or invalid request parameters.",
        StatusCode::METHOD_NOT_ALLOWED => "The request method is not allowed.",
        _ => "The requested resource may require special permissions or is temporarily unavailable.",
    }
}

fn render_page(title: &str, indicator: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: system-ui, sans-serif; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: #f4f6fb; }}\n\
         .container {{ text-align: center; background: white; padding: 2rem 3rem; border-radius: 12px; box-shadow: 0 5px 25px rgba(0,0,0,0.1); }}\n\
         .status {{ font-size: 4rem; color: #667eea; font-weight: bold; }}\n\
         h1 {{ margin: 0.5rem 0; color: #333; }}\n\
         p {{ color: #666; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n\
         <h1>{title}</h1>\n\
         <div class=\"status\">{indicator}</div>\n\
         <p>{message}</p>\n\
         </div>\n\
         </body>\n\
         </html>\n"
    )
}

/// Build an HTML error response for the given status.
///
/// A `custom_message` signals an operator or configuration fault: the
/// response is then reported as 500 no matter which status triggered it,
/// and the page is marked as a configuration error. Without one, the page
/// shows a canned message selected by the status code.
pub fn build_error_response<S>(
    status: StatusCode,
    custom_message: Option<&str>,
) -> Result<Response<Body<S>>> {
    let (status, page) = match custom_message {
        Some(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            render_page("Configuration error", "!", message),
        ),
        None => (
            status,
            render_page(
                "Request status",
                &status.as_u16().to_string(),
                default_message(status),
            ),
        ),
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::page(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_html<S>(res: Response<Body<S>>) -> String {
        match res.into_body() {
            Body::Page(Some(bytes)) => String::from_utf8(bytes.to_vec()).unwrap(),
            _ => panic!("expected a page body"),
        }
    }

    #[test]
    fn default_messages_follow_status() {
        let res: Response<Body> = build_error_response(StatusCode::NOT_FOUND, None).unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let html = body_html(res);
        assert!(html.contains("404"));
        assert!(html.contains("was not found"));

        let res: Response<Body> =
            build_error_response(StatusCode::RANGE_NOT_SATISFIABLE, None).unwrap();
        assert_eq!(res.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert!(body_html(res).contains("range is invalid"));

        let res: Response<Body> = build_error_response(StatusCode::BAD_REQUEST, None).unwrap();
        assert!(body_html(res).contains("Missing or invalid"));
    }

    #[test]
    fn unlisted_statuses_get_the_generic_message() {
        let res: Response<Body> = build_error_response(StatusCode::FORBIDDEN, None).unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(body_html(res).contains("temporarily unavailable"));
    }

    #[test]
    fn custom_message_forces_500() {
        let res: Response<Body> =
            build_error_response(StatusCode::NOT_FOUND, Some("bucket binding is missing")).unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_html(res);
        assert!(html.contains("Configuration error"));
        assert!(html.contains("bucket binding is missing"));
    }
}
