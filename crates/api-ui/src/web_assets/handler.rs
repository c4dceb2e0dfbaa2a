use super::error::{NotFoundSnafu, ResponseBodySnafu, WebAssetsResult};
use axum::{
    body::Body,
    extract::Path,
    http::header,
    response::Response,
};
use snafu::{OptionExt, ResultExt};

pub const WEB_ASSETS_MOUNT_PATH: &str = "/static/";

// Assets are compiled into the binary
const WEB_ASSETS: [(&str, &str); 3] = [
    ("css/style.css", include_str!("../../static/css/style.css")),
    ("js/main.js", include_str!("../../static/js/main.js")),
    ("js/charts.js", include_str!("../../static/js/charts.js")),
];

fn find_asset(file_name: &str) -> Option<&'static str> {
    WEB_ASSETS
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, content)| *content)
}

pub async fn static_handler(Path(path): Path<String>) -> WebAssetsResult<Response> {
    let file_name = path.trim_start_matches('/');
    let content = find_asset(file_name).context(NotFoundSnafu { path: file_name })?;

    let mime = mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or("application/octet-stream");
    Response::builder()
        .header(header::CONTENT_TYPE, mime)
        .header(header::CONTENT_LENGTH, content.len().to_string())
        .body(Body::from(content))
        .context(ResponseBodySnafu)
}
