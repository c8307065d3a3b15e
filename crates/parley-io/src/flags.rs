use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use parley_core::flag::{DEFAULT_FLAG_KEY, FLAG_CDN};
use parley_types::FlagPixels;

#[async_trait]
pub trait FlagSource: Send + Sync {
    /// Pixels for a region key, falling back to the default flag
    async fn fetch(&self, key: &str) -> anyhow::Result<FlagPixels>;
}

/// Downloads flag PNGs from flagcdn and keeps the decoded images by key
pub struct HttpFlagSource {
    client: reqwest::Client,
    base_url: String,
    cache: Mutex<HashMap<String, FlagPixels>>,
}

impl HttpFlagSource {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(FLAG_CDN)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn cached(&self, key: &str) -> Option<FlagPixels> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn remember(&self, key: &str, pixels: &FlagPixels) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key.to_string(), pixels.clone());
        }
    }

    async fn download(&self, key: &str) -> anyhow::Result<FlagPixels> {
        if let Some(pixels) = self.cached(key) {
            return Ok(pixels);
        }

        let url = format!("{}/{key}.png", self.base_url);
        let bytes = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let pixels = decode_png(&bytes)?;
        self.remember(key, &pixels);
        Ok(pixels)
    }
}

#[async_trait]
impl FlagSource for HttpFlagSource {
    async fn fetch(&self, key: &str) -> anyhow::Result<FlagPixels> {
        match self.download(key).await {
            Ok(pixels) => Ok(pixels),
            Err(e) if key != DEFAULT_FLAG_KEY => {
                tracing::warn!("Flag {key} unavailable ({e}), using {DEFAULT_FLAG_KEY}");
                self.download(DEFAULT_FLAG_KEY).await
            }
            Err(e) => Err(e),
        }
    }
}

pub fn decode_png(bytes: &[u8]) -> anyhow::Result<FlagPixels> {
    let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();

    Ok(FlagPixels {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn png(color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(3, 2, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Serves `/us.png` and answers 404 for anything else
    async fn flag_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let us = png([0, 0, 255, 255]);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let us = us.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).into_owned();

                    let (head, body) = if request.starts_with("GET /us.png ") {
                        ("HTTP/1.1 200 OK\r\nContent-Type: image/png", us)
                    } else {
                        ("HTTP/1.1 404 Not Found", Vec::new())
                    };
                    let header = format!(
                        "{head}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    socket.write_all(header.as_bytes()).await.ok();
                    socket.write_all(&body).await.ok();
                    socket.shutdown().await.ok();
                });
            }
        });

        base
    }

    #[test]
    fn decodes_png_to_rgba() {
        let pixels = decode_png(&png([255, 0, 0, 255])).unwrap();
        assert_eq!((pixels.width, pixels.height), (3, 2));
        assert_eq!(pixels.rgba.len(), 3 * 2 * 4);
        assert_eq!(&pixels.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn garbage_is_not_a_flag() {
        assert!(decode_png(b"not a png").is_err());
    }

    #[tokio::test]
    async fn unknown_region_falls_back_to_default_flag() {
        let source = HttpFlagSource::with_base_url(flag_server().await).unwrap();

        let pixels = source.fetch("zz").await.unwrap();
        assert_eq!(&pixels.rgba[..4], &[0, 0, 255, 255]);
        assert!(source.cached("us").is_some());
        assert!(source.cached("zz").is_none());
    }

    #[tokio::test]
    async fn unreachable_cdn_is_an_error() {
        let source = HttpFlagSource::with_base_url("http://127.0.0.1:9").unwrap();
        assert!(source.fetch("gb").await.is_err());
    }
}
