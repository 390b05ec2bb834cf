//! Test site fixture
//!
//! A `TestSite` is a temporary content root laid out the way a deployment
//! would be: template assets, a template index page, and a shell rendering
//! backend for the chat and log pages. Shell scripts keep the fixture free
//! of heavier interpreters; the production path is identical regardless of
//! which registered backend a deployment ships.

use std::path::Path;

use axum_test::TestServer;
use corkboard::backend::server::config::ServerConfig;
use corkboard::backend::server::init::create_app;
use tempfile::TempDir;

/// Shell backend that renders a channel page by concatenating the channel's
/// message files between HTML markers.
const CHAT_SCRIPT: &str = r#"channel="general"
if [ "$1" = "--channel" ]; then
  channel="$2"
fi
{
  echo "<html><body>"
  if [ -d "message/$channel" ]; then
    cat "message/$channel"/*.txt
  fi
  echo "</body></html>"
} > "chat_$channel.html"
"#;

/// Shell backend for the log report page.
const LOG_SCRIPT: &str = r#"echo "<html><body>log report</body></html>" > log.html
"#;

/// A temporary content root with template assets and rendering backends.
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    /// Build a fully-populated site: template index, css/js assets, and a
    /// shell rendering backend.
    pub async fn new() -> Self {
        let site = Self::empty().await;
        site.write("template/html/index.html", "<html><body>home</body></html>")
            .await;
        site.write("template/css/site.css", "body { margin: 0; }").await;
        site.write("template/js/app.js", "console.log('hi');").await;
        site.write("template/sh/chat.html.sh", CHAT_SCRIPT).await;
        site.write("template/sh/log.html.sh", LOG_SCRIPT).await;
        site
    }

    /// Build a bare site with no templates and no rendering backend.
    pub async fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp site root"),
        }
    }

    /// The content root path.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the content root, creating parent directories.
    pub async fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .expect("failed to create fixture dirs");
        tokio::fs::write(&path, content)
            .await
            .expect("failed to write fixture file");
    }

    /// Read a file under the content root.
    pub async fn read(&self, relative: &str) -> String {
        tokio::fs::read_to_string(self.root().join(relative))
            .await
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    /// Whether a path exists under the content root.
    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }

    /// Count stored `.txt` message files for a channel, ignoring the commit
    /// helper's `.git` directory.
    pub fn message_count(&self, channel: &str) -> usize {
        let dir = self.root().join("message").join(channel);
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Start a test server over this site's content root.
    pub async fn server(&self) -> TestServer {
        let config = ServerConfig::with_root(self.root());
        let app = create_app(config).await;
        TestServer::new(app).expect("failed to start test server")
    }
}
