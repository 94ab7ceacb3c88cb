use http_client::Request;

/// Content type of every POST body sent to the web services.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

const ACCEPT: &str = "application/xml, text/xml;q=0.9, */*;q=0.1";

/// Add headers shared by all web service requests
pub fn add_common_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header("Accept", ACCEPT);
    let _ = request.insert_header("Accept-Charset", "utf-8");
}

/// Add headers for form-encoded POST requests
pub fn add_form_headers(request: &mut Request, user_agent: &str) {
    add_common_headers(request, user_agent);
    let _ = request.insert_header("Content-Type", FORM_CONTENT_TYPE);
}

/// Encode pairs as `k=v&k=v`, percent-encoding both sides.
///
/// Used for GET query strings and POST bodies alike.
pub fn form_encode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
