use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;

use crate::core::resources::Disposable;
use crate::math::Rgb;

/// Remote images larger than this are rejected
const MAX_DOWNLOAD_BYTES: u64 = 32 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("offline mode, skipped {0}")]
    Offline(String),

    #[error("image has zero width or height")]
    ZeroDimensions,

    #[error("no sources to load from")]
    NoSources,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    File(PathBuf),
    Url(String),
}

impl TextureSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, TextureSource::Url(_))
    }
}

impl fmt::Display for TextureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSource::File(path) => write!(f, "{}", path.display()),
            TextureSource::Url(url) => f.write_str(url),
        }
    }
}

/// Tightly packed RGBA8 pixels, row-major from the top-left
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroDimensions);
        }
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// 1×1 image of a single color
    pub fn solid(color: Rgb) -> Self {
        let [r, g, b] = color.to_bytes();
        Self {
            width: 1,
            height: 1,
            rgba: vec![r, g, b, 255],
        }
    }
}

/// Read and decode one source. Blocking; call from a loader thread.
pub fn fetch(source: &TextureSource, offline: bool, timeout: Duration) -> Result<DecodedImage, TextureError> {
    let bytes = match source {
        TextureSource::File(path) => std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.clone(),
            source,
        })?,
        TextureSource::Url(url) if offline => return Err(TextureError::Offline(url.clone())),
        TextureSource::Url(url) => download(url, timeout)?,
    };
    DecodedImage::from_bytes(&bytes)
}

fn download(url: &str, timeout: Duration) -> Result<Vec<u8>, TextureError> {
    let response = ureq::get(url).timeout(timeout).call().map_err(|source| TextureError::Http {
        url: url.to_string(),
        source: Box::new(source),
    })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_DOWNLOAD_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|source| TextureError::Io {
            path: PathBuf::from(url),
            source,
        })?;
    Ok(bytes)
}

/// Try each source in order and return the first that decodes, or the last
/// error
pub fn fetch_first(sources: &[TextureSource], offline: bool, timeout: Duration) -> Result<DecodedImage, TextureError> {
    let mut last = TextureError::NoSources;
    for source in sources {
        match fetch(source, offline, timeout) {
            Ok(image) => {
                debug!("loaded texture from {}", source);
                return Ok(image);
            }
            Err(err) => {
                debug!("texture source {} failed: {}", source, err);
                last = err;
            }
        }
    }
    Err(last)
}

/// One finished load, tagged with the caller's key
pub struct LoadedTexture<K> {
    pub key: K,
    pub result: Result<DecodedImage, TextureError>,
}

/// Loads textures on background threads and hands results back over a
/// channel.
///
/// There is no cancellation: dropping the loader drops the receiver and any
/// late results are discarded by the sending thread.
pub struct TextureLoader<K> {
    sender: Sender<LoadedTexture<K>>,
    receiver: Receiver<LoadedTexture<K>>,
    offline: bool,
    timeout: Duration,
    in_flight: usize,
}

impl<K: Send + 'static> TextureLoader<K> {
    pub fn new(offline: bool, timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            offline,
            timeout,
            in_flight: 0,
        }
    }

    pub fn request(&mut self, key: K, sources: Vec<TextureSource>) {
        let sender = self.sender.clone();
        let offline = self.offline;
        let timeout = self.timeout;
        self.in_flight += 1;

        thread::spawn(move || {
            let result = fetch_first(&sources, offline, timeout);
            // receiver gone means the scene unmounted
            let _ = sender.send(LoadedTexture { key, result });
        });
    }

    /// Every result that has arrived since the last call. Failures are logged
    /// here so callers only pick a fallback.
    pub fn drain(&mut self) -> Vec<LoadedTexture<K>> {
        let mut done = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(loaded) => {
                    if let Err(err) = &loaded.result {
                        warn!("texture load failed, using fallback: {}", err);
                    }
                    self.in_flight = self.in_flight.saturating_sub(1);
                    done.push(loaded);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        done
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// A sampled sRGB texture on the GPU
pub struct GpuTexture {
    texture: Disposable<wgpu::Texture>,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    pub fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, image: &DecodedImage, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture: Disposable::new(texture),
            view,
            width: image.width,
            height: image.height,
        }
    }

    /// 1×1 white, bound for untextured materials
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_image(device, queue, &DecodedImage::solid(Rgb::WHITE), "white-texture")
    }

    pub fn dispose(&mut self) -> bool {
        self.texture.dispose()
    }
}
