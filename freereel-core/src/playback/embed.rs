//! Fallback embed document.
//!
//! The fallback renderer does not decode video itself: it loads a minimal
//! self-contained HTML document that points a native `<video>` element at
//! the stream URL. If the URL plays in a browser, this document plays it.

use crate::config::PlaybackConfig;

/// Build the self-contained document the fallback renderer loads.
///
/// The URL is escaped for attribute context; everything else is static.
pub fn embed_document(url: &str, config: &PlaybackConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0">
    <style>
      * {{ margin: 0; padding: 0; box-sizing: border-box; }}
      body {{
        background: {background};
        display: flex;
        justify-content: center;
        align-items: center;
        height: 100vh;
        width: 100vw;
        overflow: hidden;
      }}
      video {{
        width: 100%;
        height: 100%;
        object-fit: contain;
      }}
    </style>
  </head>
  <body>
    <video controls playsinline preload="{preload}" src="{src}">
      Your browser does not support the video tag.
    </video>
  </body>
</html>
"#,
        background = config.embed_background,
        preload = config.embed_preload,
        src = escape_attribute(url),
    )
}

/// Escape a value for use inside a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_document_contains_video_element() {
        let config = PlaybackConfig::default();
        let doc = embed_document("https://example.org/movie.mp4", &config);

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"src="https://example.org/movie.mp4""#));
        assert!(doc.contains("controls playsinline"));
        assert!(doc.contains(r#"preload="metadata""#));
        assert!(doc.contains("background: #000"));
    }

    #[test]
    fn test_embed_document_escapes_url() {
        let config = PlaybackConfig::default();
        let doc = embed_document(r#"https://example.org/a"b&c.mp4"#, &config);

        assert!(doc.contains(r#"src="https://example.org/a&quot;b&amp;c.mp4""#));
        assert!(!doc.contains(r#"a"b"#));
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("plain.mp4"), "plain.mp4");
        assert_eq!(escape_attribute(r#"<x> & "y""#), "&lt;x&gt; &amp; &quot;y&quot;");
    }
}
