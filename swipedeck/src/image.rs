// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cover image lookup.
//!
//! Decoding and drawing images belong to the host. The deck only needs a handle it can
//! hand back to the renderer, and a way to degrade when a name is unknown.

use std::collections::HashMap;

use tracing::debug;

/// Handle to a decoded image owned by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Image {
    name: String,
    width: u32,
    height: u32,
}

impl Image {
    /// Describe an image of the given pixel size.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// The empty image substituted for failed lookups.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Returns true for the empty placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }

    /// Logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Source of images by logical name.
pub trait ImageStore {
    /// Returns the image registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<Image>;
}

/// A store that knows no images; every card shows the placeholder.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoImages;

impl ImageStore for NoImages {
    #[inline]
    fn lookup(&self, _name: &str) -> Option<Image> {
        None
    }
}

/// In-memory name → image table.
#[derive(Clone, Debug, Default)]
pub struct ImageCatalog {
    images: HashMap<String, Image>,
}

impl ImageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under its name, replacing any previous entry.
    pub fn insert(&mut self, image: Image) {
        self.images.insert(image.name.clone(), image);
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for ImageCatalog {
    fn lookup(&self, name: &str) -> Option<Image> {
        self.images.get(name).cloned()
    }
}

/// Look `name` up in `store`, substituting [`Image::placeholder`] on a miss.
pub fn resolve(store: &dyn ImageStore, name: &str) -> Image {
    store.lookup(name).unwrap_or_else(|| {
        debug!(name, "image lookup missed, using placeholder");
        Image::placeholder()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_hits_and_misses() {
        let mut catalog = ImageCatalog::new();
        catalog.insert(Image::new("event1", 640, 480));
        assert_eq!(catalog.len(), 1);

        let hit = resolve(&catalog, "event1");
        assert_eq!(hit.name(), "event1");
        assert_eq!((hit.width(), hit.height()), (640, 480));
        assert!(!hit.is_placeholder());

        let miss = resolve(&catalog, "event9");
        assert!(miss.is_placeholder());
        assert_eq!(miss, Image::placeholder());
    }

    #[test]
    fn no_images_always_degrades() {
        assert!(resolve(&NoImages, "event1").is_placeholder());
    }
}
