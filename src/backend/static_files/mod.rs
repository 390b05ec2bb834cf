/**
 * Static File Serving
 *
 * This module serves files from the content root with a fallback to the
 * template directory, renders plain-text files as HTML, and performs the
 * one-time static asset setup at startup.
 *
 * # Resolution Order
 *
 * A requested path is resolved against the content root first; if the file
 * is absent there, `template/<path>` is tried. This lets a deployment
 * override any shipped asset by dropping a file of the same name into the
 * root, while fresh checkouts still serve the templates' defaults.
 *
 * # Path Safety
 *
 * Every request-supplied relative path is checked by `is_safe_relative_path`
 * before it touches the filesystem: absolute paths and any `..` or `.`
 * component are rejected with 404, so the served tree can never be escaped.
 */

use std::path::{Component, Path, PathBuf};

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};

use crate::backend::error::BackendError;

/// Cache header attached to every static response.
const CACHE_CONTROL_VALUE: &str = "public, max-age=3600";

/// Check that a request-supplied path stays inside the served tree.
///
/// Accepts only non-empty relative paths whose components are all plain
/// names: no root, no drive prefix, no `..`, no `.`.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let path = Path::new(path);
    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// Resolve `relative` against the content root, falling back to the
/// template directory. Returns the first existing file, if any.
async fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let primary = root.join(relative);
    if tokio::fs::metadata(&primary)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
    {
        return Some(primary);
    }

    let fallback = root.join("template").join(relative);
    if tokio::fs::metadata(&fallback)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
    {
        return Some(fallback);
    }

    None
}

/// Serve a static file relative to the content root.
///
/// Content type comes from the file extension (default
/// `application/octet-stream`); responses carry a one-hour public cache
/// header. Missing files and unsafe paths yield 404.
pub async fn serve(root: &Path, relative: &str) -> Result<Response, BackendError> {
    if !is_safe_relative_path(relative) {
        return Err(BackendError::not_found(relative));
    }

    let Some(file_path) = resolve(root, relative).await else {
        return Err(BackendError::not_found(relative));
    };

    let bytes = tokio::fs::read(&file_path).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&file_path))
        .header(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)
        .body(Body::from(bytes))
        .map_err(|e| BackendError::internal(format!("Failed to build response: {}", e)))
}

/// Serve a `.txt` file rendered as a minimal HTML document.
///
/// The file is read as UTF-8, HTML-escaped, and wrapped in a document whose
/// title is the file name and whose body is the escaped content in a
/// preformatted block. Missing files and unsafe paths yield 404.
pub async fn serve_text_as_html(root: &Path, relative: &str) -> Result<Response, BackendError> {
    if !is_safe_relative_path(relative) {
        return Err(BackendError::not_found(relative));
    }

    let file_path = root.join(relative);
    let content = match tokio::fs::read_to_string(&file_path).await {
        Ok(content) => content,
        Err(_) => return Err(BackendError::not_found(relative)),
    };

    let title = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative.to_string());

    let escaped = html_escape::encode_safe(&content);
    let html = html_document(&html_escape::encode_safe(&title), &escaped);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(html))
        .map_err(|e| BackendError::internal(format!("Failed to build response: {}", e)))
}

/// Ensure `index.html` exists in the content root.
///
/// If it is missing, copy the shipped default from `template/html/index.html`.
/// Idempotent; a missing template is not an error (the subsequent serve will
/// 404 as usual).
pub async fn ensure_index_exists(root: &Path) -> Result<(), BackendError> {
    let home_index = root.join("index.html");
    if tokio::fs::metadata(&home_index).await.is_ok() {
        return Ok(());
    }

    let template_index = root.join("template").join("html").join("index.html");
    if tokio::fs::metadata(&template_index).await.is_err() {
        return Ok(());
    }

    tokio::fs::copy(&template_index, &home_index).await?;
    tracing::info!("Created index.html in content root");
    Ok(())
}

/// One-time startup setup of the `css/` and `js/` asset directories.
///
/// Creates each directory under the content root and copies every file from
/// the matching `template/<dir>/` that is not already present. Files the
/// deployment has already customized are left untouched.
pub async fn setup_static_files(root: &Path) -> std::io::Result<()> {
    for dir_name in ["css", "js"] {
        let static_dir = root.join(dir_name);
        let template_dir = root.join("template").join(dir_name);

        tokio::fs::create_dir_all(&static_dir).await?;

        let Ok(mut entries) = tokio::fs::read_dir(&template_dir).await else {
            continue;
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let dest = static_dir.join(entry.file_name());
            if tokio::fs::metadata(&dest).await.is_ok() {
                continue;
            }
            tokio::fs::copy(entry.path(), &dest).await?;
            tracing::info!(
                "Copied {} to {}",
                entry.path().display(),
                dest.display()
            );
        }
    }

    Ok(())
}

/// Content type for a file, from its extension.
fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

/// Minimal HTML document wrapping escaped text content.
fn html_document(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; }}
    pre {{ background-color: #f4f4f4; padding: 15px; border-radius: 5px; white-space: pre-wrap; word-wrap: break-word; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <pre>{content}</pre>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn site_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            tokio::fs::create_dir_all(full.parent().unwrap())
                .await
                .unwrap();
            tokio::fs::write(&full, content).await.unwrap();
        }
        dir
    }

    #[test]
    fn test_safe_relative_paths() {
        assert!(is_safe_relative_path("css/site.css"));
        assert!(is_safe_relative_path("index.html"));
        assert!(is_safe_relative_path("a/b/c.js"));

        assert!(!is_safe_relative_path(""));
        assert!(!is_safe_relative_path("/etc/passwd"));
        assert!(!is_safe_relative_path("../secret"));
        assert!(!is_safe_relative_path("css/../../secret"));
        assert!(!is_safe_relative_path("./css/site.css"));
    }

    #[tokio::test]
    async fn test_serve_from_root() {
        let site = site_with(&[("css/site.css", "body {}")]).await;
        let response = serve(site.path(), "css/site.css").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            CACHE_CONTROL_VALUE
        );
    }

    #[tokio::test]
    async fn test_serve_falls_back_to_template() {
        let site = site_with(&[("template/css/site.css", "body {}")]).await;
        let response = serve(site.path(), "css/site.css").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_serve_prefers_root_over_template() {
        let site = site_with(&[
            ("css/site.css", "root"),
            ("template/css/site.css", "template"),
        ])
        .await;
        let response = serve(site.path(), "css/site.css").await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"root");
    }

    #[tokio::test]
    async fn test_serve_missing_file() {
        let site = site_with(&[]).await;
        let err = serve(site.path(), "nope.html").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_rejects_traversal() {
        let site = site_with(&[]).await;
        tokio::fs::write(site.path().join("secret.txt"), "s")
            .await
            .unwrap();
        let err = serve(site.path(), "../secret.txt").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_unknown_extension_defaults() {
        let site = site_with(&[("data.bin42", "x")]).await;
        let response = serve(site.path(), "data.bin42").await.unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_text_as_html_escapes() {
        let site = site_with(&[("note.txt", "a < b & c")]).await;
        let response = serve_text_as_html(site.path(), "note.txt").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("a &lt; b &amp; c"));
        assert!(html.contains("<title>note.txt</title>"));
        assert!(!html.contains("a < b"));
    }

    #[tokio::test]
    async fn test_text_as_html_missing() {
        let site = site_with(&[]).await;
        let err = serve_text_as_html(site.path(), "nope.txt").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ensure_index_copies_template() {
        let site = site_with(&[("template/html/index.html", "<html>home</html>")]).await;
        ensure_index_exists(site.path()).await.unwrap();
        let copied = tokio::fs::read_to_string(site.path().join("index.html"))
            .await
            .unwrap();
        assert_eq!(copied, "<html>home</html>");

        // Idempotent: a second call leaves the file alone
        tokio::fs::write(site.path().join("index.html"), "customized")
            .await
            .unwrap();
        ensure_index_exists(site.path()).await.unwrap();
        let kept = tokio::fs::read_to_string(site.path().join("index.html"))
            .await
            .unwrap();
        assert_eq!(kept, "customized");
    }

    #[tokio::test]
    async fn test_setup_static_files_copies_missing_only() {
        let site = site_with(&[
            ("template/css/site.css", "fresh"),
            ("template/js/app.js", "js"),
            ("css/site.css", "existing"),
        ])
        .await;

        setup_static_files(site.path()).await.unwrap();

        let css = tokio::fs::read_to_string(site.path().join("css/site.css"))
            .await
            .unwrap();
        assert_eq!(css, "existing");

        let js = tokio::fs::read_to_string(site.path().join("js/app.js"))
            .await
            .unwrap();
        assert_eq!(js, "js");
    }

    #[tokio::test]
    async fn test_setup_static_files_without_templates() {
        let site = site_with(&[]).await;
        setup_static_files(site.path()).await.unwrap();
        assert!(site.path().join("css").is_dir());
        assert!(site.path().join("js").is_dir());
    }
}
