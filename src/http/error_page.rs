use crate::http::status::StatusCode;

pub const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Renders the HTML error document for `status`.
///
/// Without a message the registry description is used. The message is
/// HTML-escaped since it frequently echoes parts of the request.
pub fn render(status: StatusCode, message: Option<&str>) -> Vec<u8> {
    let title = status.reason_phrase();
    let message = escape(message.unwrap_or_else(|| status.description()));

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         \x20   <head>\n\
         \x20       <meta http-equiv=\"Content-Type\" content=\"{ERROR_CONTENT_TYPE}\">\n\
         \x20       <title>{code} {title}</title>\n\
         \x20   </head>\n\
         \x20   <body>\n\
         \x20       <h1>{title}</h1>\n\
         \x20       <p>{message}</p>\n\
         \x20   </body>\n\
         </html>\n",
        code = status.as_u16(),
    )
    .into_bytes()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
