//! Test doubles shared by the unit tests.

use std::collections::HashMap;

use crate::renderer::traits::{LoadError, TextureHandle, TexturePageLoader, TextureSource};

/// In-memory loader. Paths get their size from `with_size` (64x64 otherwise);
/// "missing.png" and empty byte slices fail.
pub struct MockLoader {
    sizes: HashMap<String, (u32, u32)>,
    loaded: HashMap<TextureHandle, (u32, u32)>,
    next: u32,
    pub released: Vec<TextureHandle>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
            loaded: HashMap::new(),
            next: 1,
            released: Vec::new(),
        }
    }

    pub fn with_size(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(path.to_string(), (width, height));
        self
    }
}

impl TexturePageLoader for MockLoader {
    fn load(&mut self, source: TextureSource<'_>) -> Result<TextureHandle, LoadError> {
        let size = match source {
            TextureSource::Path(path) => {
                let key = path.to_string_lossy().into_owned();
                if key == "missing.png" {
                    return Err(LoadError::NotFound(key));
                }
                self.sizes.get(&key).copied().unwrap_or((64, 64))
            }
            TextureSource::Bytes(bytes) if bytes.is_empty() => {
                return Err(LoadError::Decode("empty buffer".into()));
            }
            TextureSource::Bytes(_) => (32, 32),
        };
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.loaded.insert(handle, size);
        Ok(handle)
    }

    fn size(&self, handle: TextureHandle) -> (u32, u32) {
        self.loaded.get(&handle).copied().unwrap_or((0, 0))
    }

    fn release(&mut self, handle: TextureHandle) {
        self.loaded.remove(&handle);
        self.released.push(handle);
    }
}
