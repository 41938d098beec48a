//! Frame atlas: texture pages, frame groups and named animations.
//!
//! Indices are identities. Pages, groups and images are only ever appended;
//! the only way to remove anything is [`FrameAtlas::clear`].

use std::cell::RefCell;
use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::AtlasError;
use crate::components::animation::{AnimationSequence, PlayMode};
use crate::geometry::Rect;
use crate::renderer::traits::{TextureHandle, TexturePageLoader, TextureSource};

/// A loaded texture page and its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePage {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// A sub-rectangle of one texture page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub rect: Rect,
    /// Index of the page in the owning atlas; -1 marks the invalid sentinel.
    pub texture_index: i32,
}

impl TextureRegion {
    /// Returned by lookups that miss.
    pub const INVALID: Self = Self { rect: Rect::ZERO, texture_index: -1 };

    pub fn is_valid(&self) -> bool {
        self.texture_index >= 0
    }
}

/// Ordered frames, optionally named.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub name: Option<String>,
    pub regions: Vec<TextureRegion>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Addresses a group by index or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for GroupKey<'_> {
    fn from(index: usize) -> Self {
        GroupKey::Index(index)
    }
}

impl<'a> From<&'a str> for GroupKey<'a> {
    fn from(name: &'a str) -> Self {
        GroupKey::Name(name)
    }
}

/// A block of equally sized cells cut from one texture page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    pub cell_w: u32,
    pub cell_h: u32,
    #[serde(default)]
    pub start_col: u32,
    #[serde(default)]
    pub start_row: u32,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32, cell_w: u32, cell_h: u32) -> Self {
        Self { columns, rows, cell_w, cell_h, start_col: 0, start_row: 0 }
    }

    /// Offset the first cell to (`col`, `row`).
    pub fn starting_at(mut self, col: u32, row: u32) -> Self {
        self.start_col = col;
        self.start_row = row;
        self
    }
}

/// Registry of texture pages, frame groups and animation sequences.
///
/// Sprites refer to an atlas through an `AtlasId` and to frames by
/// (group, index); they never own any of it.
#[derive(Debug, Default)]
pub struct FrameAtlas {
    pages: Vec<TexturePage>,
    groups: Vec<Group>,
    group_names: HashMap<String, usize>,
    animations: HashMap<String, AnimationSequence>,
    last_error: RefCell<Option<AtlasError>>,
}

impl FrameAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Error reporting --

    fn record(&self, err: AtlasError) -> AtlasError {
        log::warn!("atlas: {err}");
        *self.last_error.borrow_mut() = Some(err.clone());
        err
    }

    /// The most recent recorded error, if any.
    pub fn last_error(&self) -> Option<AtlasError> {
        self.last_error.borrow().clone()
    }

    /// Take and clear the most recent recorded error.
    pub fn take_error(&self) -> Option<AtlasError> {
        self.last_error.borrow_mut().take()
    }

    // -- Texture pages --

    /// Load a page through `loader`. Returns its texture index.
    pub fn add_texture(
        &mut self,
        loader: &mut dyn TexturePageLoader,
        source: TextureSource<'_>,
    ) -> Result<usize, AtlasError> {
        let handle = loader
            .load(source)
            .map_err(|e| self.record(AtlasError::Load(e.to_string())))?;
        let (width, height) = loader.size(handle);
        self.pages.push(TexturePage { handle, width, height });
        Ok(self.pages.len() - 1)
    }

    pub fn texture_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texture(&self, index: usize) -> Option<&TexturePage> {
        self.pages.get(index)
    }

    pub fn texture_handle(&self, index: usize) -> Option<TextureHandle> {
        self.pages.get(index).map(|p| p.handle)
    }

    fn page(&self, index: usize) -> Result<&TexturePage, AtlasError> {
        self.pages.get(index).ok_or_else(|| {
            self.record(AtlasError::TextureOutOfRange { index, count: self.pages.len() })
        })
    }

    // -- Groups --

    /// Append an empty group. A repeated name rebinds the name to the new group.
    pub fn add_group(&mut self, name: Option<&str>) -> usize {
        let index = self.groups.len();
        let name = name.filter(|n| !n.is_empty());
        if let Some(name) = name {
            if let Some(previous) = self.group_names.insert(name.to_string(), index) {
                log::debug!("atlas: group name '{name}' moved from {previous} to {index}");
            }
        }
        self.groups.push(Group {
            name: name.map(str::to_string),
            regions: Vec::new(),
        });
        index
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Index bound to `name`, recording an error on a miss.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.resolve_group(GroupKey::Name(name)).ok()
    }

    /// Turn a key into a valid group index.
    pub fn resolve_group(&self, key: GroupKey<'_>) -> Result<usize, AtlasError> {
        match key {
            GroupKey::Index(index) if index < self.groups.len() => Ok(index),
            GroupKey::Index(index) => Err(self.record(AtlasError::GroupOutOfRange {
                index,
                count: self.groups.len(),
            })),
            GroupKey::Name(name) => self
                .group_names
                .get(name)
                .copied()
                .ok_or_else(|| self.record(AtlasError::UnknownGroup(name.to_string()))),
        }
    }

    /// Number of images in a group, 0 when the group does not exist.
    pub fn group_len<'a>(&self, group: impl Into<GroupKey<'a>>) -> usize {
        self.resolve_group(group.into())
            .map(|g| self.groups[g].len())
            .unwrap_or(0)
    }

    // -- Images --

    /// Append a region of `texture` to `group`. Returns the image index.
    pub fn add_image_from_rect<'a>(
        &mut self,
        texture: usize,
        group: impl Into<GroupKey<'a>>,
        rect: Rect,
    ) -> Result<usize, AtlasError> {
        self.page(texture)?;
        let group = self.resolve_group(group.into())?;
        let regions = &mut self.groups[group].regions;
        regions.push(TextureRegion { rect, texture_index: texture as i32 });
        Ok(regions.len() - 1)
    }

    /// Append the whole of `texture` as one image.
    pub fn add_image<'a>(
        &mut self,
        texture: usize,
        group: impl Into<GroupKey<'a>>,
    ) -> Result<usize, AtlasError> {
        let page = *self.page(texture)?;
        let rect = Rect::new(0.0, 0.0, page.width as f32, page.height as f32);
        self.add_image_from_rect(texture, group, rect)
    }

    /// Append grid cell (`col`, `row`) of `texture`. The cell must fit inside the page.
    pub fn add_image_from_cell<'a>(
        &mut self,
        texture: usize,
        group: impl Into<GroupKey<'a>>,
        col: u32,
        row: u32,
        cell_w: u32,
        cell_h: u32,
    ) -> Result<usize, AtlasError> {
        let page = *self.page(texture)?;
        let right = (col as u64 + 1) * cell_w as u64;
        let bottom = (row as u64 + 1) * cell_h as u64;
        if cell_w == 0 || cell_h == 0 || right > page.width as u64 || bottom > page.height as u64 {
            return Err(self.record(AtlasError::CellOutOfBounds { texture, col, row, cell_w, cell_h }));
        }
        let rect = Rect::new(
            (col * cell_w) as f32,
            (row * cell_h) as f32,
            cell_w as f32,
            cell_h as f32,
        );
        self.add_image_from_rect(texture, group, rect)
    }

    /// Import a block of grid cells, rows top to bottom, columns left to right.
    ///
    /// Stops at the first failing cell and returns false. Cells added before
    /// the failure stay in the group.
    pub fn add_images_from_grid<'a>(
        &mut self,
        texture: usize,
        group: impl Into<GroupKey<'a>>,
        grid: GridSpec,
    ) -> bool {
        let Ok(group) = self.resolve_group(group.into()) else {
            return false;
        };
        let (Some(end_row), Some(end_col)) = (
            grid.start_row.checked_add(grid.rows),
            grid.start_col.checked_add(grid.columns),
        ) else {
            self.record(AtlasError::CellOutOfBounds {
                texture,
                col: grid.start_col,
                row: grid.start_row,
                cell_w: grid.cell_w,
                cell_h: grid.cell_h,
            });
            return false;
        };
        for row in grid.start_row..end_row {
            for col in grid.start_col..end_col {
                if self
                    .add_image_from_cell(texture, group, col, row, grid.cell_w, grid.cell_h)
                    .is_err()
                {
                    return false;
                }
            }
        }
        true
    }

    /// Region of image `index` in `group`, or [`TextureRegion::INVALID`].
    pub fn image_region<'a>(&self, index: usize, group: impl Into<GroupKey<'a>>) -> TextureRegion {
        self.lookup(index, group.into()).unwrap_or(TextureRegion::INVALID)
    }

    /// Native pixel size of image `index` in `group`, or zero.
    pub fn image_size<'a>(&self, index: usize, group: impl Into<GroupKey<'a>>) -> Vec2 {
        self.lookup(index, group.into())
            .map(|region| region.rect.size())
            .unwrap_or(Vec2::ZERO)
    }

    fn lookup(&self, index: usize, group: GroupKey<'_>) -> Result<TextureRegion, AtlasError> {
        let group = self.resolve_group(group)?;
        let regions = &self.groups[group].regions;
        regions.get(index).copied().ok_or_else(|| {
            self.record(AtlasError::ImageOutOfRange { index, group, count: regions.len() })
        })
    }

    // -- Animations --

    /// Insert or replace a named sequence. Frame ranges are checked when a
    /// sprite plays it, against that sprite's group.
    pub fn define_animation(
        &mut self,
        name: &str,
        start_frame: usize,
        end_frame: usize,
        frame_speed: f32,
        mode: PlayMode,
    ) -> Result<(), AtlasError> {
        if !(frame_speed > 0.0 && frame_speed.is_finite()) {
            return Err(self.record(AtlasError::InvalidFrameSpeed {
                name: name.to_string(),
                speed: frame_speed,
            }));
        }
        self.animations.insert(
            name.to_string(),
            AnimationSequence {
                name: name.to_string(),
                start_frame,
                end_frame,
                frame_speed,
                mode,
            },
        );
        Ok(())
    }

    /// Look up a sequence, recording an error on a miss.
    pub fn animation(&self, name: &str) -> Option<&AnimationSequence> {
        let found = self.animations.get(name);
        if found.is_none() {
            self.record(AtlasError::UnknownAnimation(name.to_string()));
        }
        found
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    // -- Teardown --

    /// Release every page through `loader` and forget all groups and animations.
    pub fn clear(&mut self, loader: &mut dyn TexturePageLoader) {
        for page in self.pages.drain(..) {
            loader.release(page.handle);
        }
        self.groups.clear();
        self.group_names.clear();
        self.animations.clear();
        self.last_error.borrow_mut().take();
    }
}

impl Drop for FrameAtlas {
    fn drop(&mut self) {
        if !self.pages.is_empty() {
            log::warn!("atlas dropped with {} texture page(s) still loaded", self.pages.len());
        }
    }
}
