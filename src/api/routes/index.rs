use axum::response::Html;

const INDEX_PAGE: &str = r#"<html>
<head><title>BGP Exporter</title></head>
<body>
<h1>BGP Exporter</h1>
<p><a href='/metrics'>Metrics</a></p>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
