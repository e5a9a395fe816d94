use axum_extra::TypedHeader;
use headers::authorization::Bearer;
use headers::Authorization;

pub type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

/// Picks the Gemini key for one request.
///
/// An `Authorization: Bearer` header wins over a key in the JSON body; with
/// neither, the server's configured key is used (`None`).
pub fn request_api_key(bearer: BearerHeader, body_key: Option<String>) -> Option<String> {
    let from_header = bearer
        .map(|TypedHeader(auth)| auth.token().trim().to_string())
        .filter(|token| !token.is_empty());

    if let Some(token) = &from_header {
        log::info!("Using request API key from Authorization header: {}", mask(token));
        return from_header;
    }

    let from_body = body_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());
    if let Some(key) = &from_body {
        log::info!("Using request API key from body: {}", mask(key));
    }
    from_body
}

fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
