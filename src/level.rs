//! Level store
//!
//! Levels are plain-text files named `1`, `2`, ... in the level directory.
//! Each line is a directive in block units:
//!
//! ```text
//! stage_length 60
//! end 55 8
//! snow 0 10 20 2
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::scfg::{self, Block, Directive, ScfgError};
use crate::Rect;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Parse { path: String, source: ScfgError },
    #[error("no regions in level {0}")]
    Empty(String),
}

/// Tile appearance registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Snow,
}

impl TileKind {
    pub const ALL: [TileKind; 1] = [TileKind::Snow];

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Snow => "snow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// A solid rectangle of level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub tile: TileKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// World width in pixels
    pub stage_length: f32,
    pub regions: Vec<Region>,
    /// Completion point, the centre of a one-block marker; negative when
    /// the level has none
    pub end: Vec2,
}

impl Level {
    /// Build a level from parsed directives. Malformed directives are logged
    /// and skipped.
    pub fn from_block(block: &Block, source: &str) -> Self {
        let mut level = Level {
            stage_length: MAX_STAGE_LENGTH,
            regions: Vec::with_capacity(block.directives.len()),
            end: Vec2::new(-1.0, -1.0),
        };

        for d in &block.directives {
            match d.name.as_str() {
                "stage_length" => {
                    if d.params.len() != 1 {
                        log::warn!(
                            "{}:{} expected 1 field for stage_length, got {}",
                            source,
                            d.line,
                            d.params.len()
                        );
                    }
                    level.stage_length = parse_stage_length(d.params.first().map(String::as_str));
                }
                "end" => {
                    if d.params.len() != 2 {
                        log::warn!(
                            "{}:{} expected 2 fields for end, got {}",
                            source,
                            d.line,
                            d.params.len()
                        );
                        continue;
                    }
                    match block_coords::<2>(d) {
                        Some([x, y]) => level.end = Vec2::new(x, y),
                        None => log::warn!("{}:{} end expects integers", source, d.line),
                    }
                }
                // Reserved
                "enemy" => {}
                name => {
                    if d.params.len() != 4 {
                        log::warn!(
                            "{}:{} expected 4 fields for tile, got {}",
                            source,
                            d.line,
                            d.params.len()
                        );
                        continue;
                    }
                    let Some(tile) = TileKind::from_name(name) else {
                        log::warn!("{}:{} unknown tile {}", source, d.line, name);
                        continue;
                    };
                    let Some([x, y, w, h]) = block_coords::<4>(d) else {
                        log::warn!("{}:{} tile {} expects integers", source, d.line, name);
                        continue;
                    };
                    level.regions.push(Region {
                        tile,
                        rect: Rect::new(x, y, w, h),
                    });
                }
            }
        }

        if level.end.x < 0.0 || level.end.y < 0.0 {
            log::warn!("{}: level has no end point", source);
        }

        level
    }

    /// Block-sized rectangle centred on the end point that completes the
    /// level on contact
    pub fn end_rect(&self) -> Option<Rect> {
        if self.end.x < 0.0 || self.end.y < 0.0 {
            return None;
        }
        let half = BLOCK_SIZE / 2.0;
        Some(Rect::new(self.end.x - half, self.end.y - half, BLOCK_SIZE, BLOCK_SIZE))
    }
}

/// `stage_length` in blocks; invalid or out-of-range values use the maximum
fn parse_stage_length(param: Option<&str>) -> f32 {
    match param.and_then(|p| p.parse::<i64>().ok()) {
        Some(n) if n > 0 && n as f32 * BLOCK_SIZE <= MAX_STAGE_LENGTH => n as f32 * BLOCK_SIZE,
        _ => MAX_STAGE_LENGTH,
    }
}

fn block_coords<const N: usize>(d: &Directive) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, param) in out.iter_mut().zip(&d.params) {
        *slot = param.parse::<i32>().ok()? as f32 * BLOCK_SIZE;
    }
    Some(out)
}

/// Load a single level file
pub fn load_level(path: &Path) -> Result<Level, LevelError> {
    let source = path.display().to_string();
    let block = scfg::load_file(path).map_err(|source_err| LevelError::Parse {
        path: source.clone(),
        source: source_err,
    })?;
    let level = Level::from_block(&block, &source);
    if level.regions.is_empty() {
        return Err(LevelError::Empty(source));
    }
    Ok(level)
}

/// Load `1`, `2`, ... from `dir`, stopping at the first missing or invalid file
pub fn load_levels(dir: &Path) -> Vec<Level> {
    let mut levels = Vec::new();
    for i in 1..MAX_LEVEL_FILES {
        let path = dir.join(i.to_string());
        if !path.is_file() {
            break;
        }
        match load_level(&path) {
            Ok(level) => levels.push(level),
            Err(e) => {
                log::warn!("{}", e);
                break;
            }
        }
    }
    log::info!("Loaded {} levels from {}", levels.len(), dir.display());
    levels
}
